use std::{error::Error, path::PathBuf};

use log::LevelFilter;
use log4rs::{
    append::{console::{ConsoleAppender, Target}, file::FileAppender},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config, Handle,
};
use serde::Deserialize;

const LOG_PATTERN: &str = "{d} {l}\t{M}[{P}]:{L} - {m}{n}";

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    level: Option<LevelFilter>,
    file: Option<PathBuf>,
}

impl LogConfig {
    pub fn level(&self) -> LevelFilter {
        self.level.unwrap_or(LevelFilter::Info)
    }

    pub fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    pub fn merge(self, local: Self) -> Self {
        Self {
            level: local.level.or(self.level),
            file: local.file.or(self.file),
        }
    }

    /// Console output always goes to stderr, stdout carries data.
    pub fn build(&self, verbose: bool) -> Result<Config, Box<dyn Error>> {
        let level = if verbose { LevelFilter::Debug } else { self.level() };

        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        let mut config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)));
        let mut root = Root::builder().appender("stderr");

        if let Some(file) = self.file() {
            let logfile = FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .build(file)?;
            config = config.appender(Appender::builder().build("logfile", Box::new(logfile)));
            root = root.appender("logfile");
        }

        Ok(config.build(root.build(level))?)
    }

    pub fn setup(&self, verbose: bool) -> Result<Handle, Box<dyn Error>> {
        Ok(log4rs::init_config(self.build(verbose)?)?)
    }
}
