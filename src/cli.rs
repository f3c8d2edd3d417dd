use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use git_version::git_version;

use crate::macformat::MacFormat;

const VERSION: &str = git_version!(args = ["--always", "--tags"], cargo_prefix = "", fallback = "unknown");

/// Convert the IEEE OUI registry to CSV
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
pub struct OuiParser {
    /// Registry text file, fetched from the configured url if omitted
    pub path: Option<PathBuf>,

    /// Override the registry url
    #[arg(long)]
    pub url: Option<String>,

    /// Directory holding default/ and local/ configuration
    #[arg(long)]
    pub app_dir: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl OuiParser {
    pub fn init() -> Self { OuiParser::parse() }
}

/// Reformat MAC address fields of a JSON record stream
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
pub struct MacFormatter {
    /// Output notation [default: none]
    #[arg(short, long, value_enum)]
    pub format: Option<MacFormat>,

    /// Comma separated input fields [default: macaddress]
    #[arg(short, long, value_delimiter = ',')]
    pub inputs: Option<Vec<String>>,

    /// Comma separated output fields, filled up from inputs
    #[arg(short, long, value_delimiter = ',')]
    pub outputs: Option<Vec<String>>,

    /// What to do with a record holding an invalid MAC address
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    pub on_error: OnError,

    /// Directory holding default/ and local/ configuration
    #[arg(long)]
    pub app_dir: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl MacFormatter {
    pub fn init() -> Self { MacFormatter::parse() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Stop the stream
    Abort,
    /// Drop the record
    Skip,
    /// Pass the record on unchanged
    Keep,
}
