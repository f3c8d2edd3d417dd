use std::{io::{self, Write}, process};

use log::{debug, error, info, warn};
use oui_macformat::{
    cli::{MacFormatter, OnError},
    macformat::{transform, Record, Settings},
    Config,
};

fn main() {
    let args = MacFormatter::init();

    let app_dir = args.app_dir.clone().unwrap_or_else(Config::default_app_dir);
    let config = match Config::load(&app_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            process::exit(exitcode::CONFIG);
        }
    };

    if let Err(e) = config.log.setup(args.verbose) {
        eprintln!("Error setting up logging: {}", e);
        process::exit(exitcode::CONFIG);
    }

    let settings = Settings::resolve(args.format, args.inputs.clone(), args.outputs.clone(), &config.macformat);

    process::exit(run(&settings, args.on_error));
}

fn run(settings: &Settings, on_error: OnError) -> exitcode::ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut input_error = None;
    let records = serde_json::Deserializer::from_reader(stdin.lock())
        .into_iter::<Record>()
        .map_while(|r| r.map_err(|e| input_error = Some(e)).ok());

    let (mut written, mut invalid) = (0usize, 0usize);
    for result in transform(records, settings) {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                invalid += 1;
                match on_error {
                    OnError::Abort => {
                        error!("{}", e);
                        return finish(&mut out, exitcode::DATAERR);
                    }
                    OnError::Skip => {
                        warn!("{}, record skipped", e);
                        continue;
                    }
                    OnError::Keep => {
                        warn!("{}, record kept", e);
                        e.record
                    }
                }
            }
        };

        if let Err(e) = write_record(&mut out, &record) {
            error!("Writing record failed: {}", e);
            return exitcode::IOERR;
        }
        written += 1;
    }

    if let Some(e) = input_error {
        error!("Reading record failed: {}", e);
        return finish(&mut out, exitcode::DATAERR);
    }

    info!("Wrote {} records, {} with invalid MAC addresses", written, invalid);
    finish(&mut out, exitcode::OK)
}

fn write_record<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    debug!("record = {:?}", record);
    serde_json::to_writer(&mut *out, record)?;
    writeln!(out)
}

fn finish<W: Write>(out: &mut W, code: exitcode::ExitCode) -> exitcode::ExitCode {
    match out.flush() {
        Ok(()) => code,
        Err(e) => {
            error!("Flushing output failed: {}", e);
            exitcode::IOERR
        }
    }
}
