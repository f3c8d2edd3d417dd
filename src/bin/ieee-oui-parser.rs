use std::{io, process, time::Instant};

use log::{debug, error, info};
use oui_macformat::{cli::OuiParser, oui::{self, source::{Source, SourceError}}, Config};

fn main() {
    let started = Instant::now();
    let args = OuiParser::init();

    let app_dir = args.app_dir.clone().unwrap_or_else(Config::default_app_dir);
    let config = match Config::load(&app_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            eprintln!("{}", duration_line(started));
            process::exit(exitcode::CONFIG);
        }
    };

    if let Err(e) = config.log.setup(args.verbose) {
        eprintln!("Error setting up logging: {}", e);
        eprintln!("{}", duration_line(started));
        process::exit(exitcode::CONFIG);
    }

    info!("starting..");
    debug!("calling args={:?}", args);

    let code = run(&args, &config);

    info!("{}", duration_line(started));
    process::exit(code);
}

fn run(args: &OuiParser, config: &Config) -> exitcode::ExitCode {
    let url = args.url.as_deref().unwrap_or(config.oui.url());
    let text = match Source::new(args.path.clone(), url).read() {
        Ok(text) => text,
        Err(e) => {
            error!("{}", e);
            return match e {
                SourceError::Fetch(..) => exitcode::UNAVAILABLE,
                SourceError::Io(..) => exitcode::NOINPUT,
            };
        }
    };

    let records = oui::extract(&text);
    info!("Extracted {} records", records.len());

    let stdout = io::stdout();
    if let Err(e) = oui::write_csv(&records, io::BufWriter::new(stdout.lock())) {
        error!("error while writing csv, exception=\"{}\"", e);
        return exitcode::IOERR;
    }

    exitcode::OK
}

fn duration_line(started: Instant) -> String {
    format!("exiting, execution duration={} seconds", started.elapsed().as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reports_the_duration() {
        let line = duration_line(Instant::now());
        assert!(line.starts_with("exiting, execution duration="));
        assert!(line.ends_with(" seconds"));
    }
}
