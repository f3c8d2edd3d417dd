pub mod cli;
pub mod config;
pub use config::Config;
pub mod logging;
pub mod macformat;
pub mod oui;
