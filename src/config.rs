use std::{error::Error, fmt::Display, fs, io, path::{Path, PathBuf}};

use log::debug;
use serde::Deserialize;

use crate::logging::LogConfig;
use crate::macformat::config::MacFormatConfig;
use crate::oui::OuiConfig;

/// One configuration layer. All sections and keys are optional.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub oui: OuiConfig,
    pub macformat: MacFormatConfig,
    pub log: LogConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, serde_yaml_ng::Error),
}

impl Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Error reading {}: {}", path.display(), e),
            ConfigError::Parse(path, e) => write!(f, "Error parsing {}: {}", path.display(), e),
        }
    }
}

impl Config {
    const CONFIG_FILE: &'static str = concat!(env!("CARGO_PKG_NAME"), ".yml");
    const DEFAULT_DIR: &'static str = "default";
    const LOCAL_DIR: &'static str = "local";

    /// `<app_dir>/default/` overlaid with `<app_dir>/local/`.
    pub fn load(app_dir: &Path) -> Result<Self, ConfigError> {
        let default = Self::load_layer(&app_dir.join(Self::DEFAULT_DIR).join(Self::CONFIG_FILE))?;
        let local = Self::load_layer(&app_dir.join(Self::LOCAL_DIR).join(Self::CONFIG_FILE))?;

        Ok(default.merge(local))
    }

    /// A missing or empty file is an empty layer.
    pub fn load_layer(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config layer at {:?}", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(path.to_owned(), e)),
        };
        debug!("Load config layer {:?}", path);

        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(&text).map_err(|e| ConfigError::Parse(path.to_owned(), e))
    }

    pub fn merge(self, local: Self) -> Self {
        Self {
            oui: self.oui.merge(local.oui),
            macformat: self.macformat.merge(local.macformat),
            log: self.log.merge(local.log),
        }
    }

    /// The directory above the one holding the executable, so that
    /// `bin/<exe>` finds `default/` and `local/` next to `bin/`.
    pub fn default_app_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use crate::macformat::MacFormat;

    use super::*;

    fn write_layer(dir: &Path, layer: &str, content: &str) {
        let dir = dir.join(layer);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(Config::CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn it_parses_config() {
        let cfg = serde_yaml_ng::from_str::<Config>(r#"---
        oui:
            url: http://example.com/oui.txt
        macformat:
            format: ieee
            inputs: [src_mac]
        log:
            level: debug
        "#);
        assert!(cfg.is_ok());
        let cfg = cfg.unwrap();
        assert_eq!(cfg.oui.url(), "http://example.com/oui.txt");
        assert_eq!(cfg.macformat.format(), Some(MacFormat::Ieee));
        assert_eq!(cfg.log.level(), LevelFilter::Debug);
    }

    #[test]
    fn it_loads_builtin_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.oui.url(), crate::oui::OUI_DATASET_URL);
        assert_eq!(cfg.macformat.format(), None);
        assert_eq!(cfg.macformat.inputs(), None);
    }

    #[test]
    fn it_overlays_the_local_layer() {
        let dir = tempfile::tempdir().unwrap();
        write_layer(dir.path(), "default", "macformat:\n  format: dash\n  inputs: mac, mac2\n");
        write_layer(dir.path(), "local", "macformat:\n  format: cisco\n");

        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.macformat.format(), Some(MacFormat::Cisco));
        assert_eq!(cfg.macformat.inputs().unwrap(), vec!["mac", "mac2"]);
    }

    #[test]
    fn it_accepts_empty_layers() {
        let dir = tempfile::tempdir().unwrap();
        write_layer(dir.path(), "local", "\n");
        assert!(Config::load(dir.path()).is_ok());
    }

    #[test]
    fn it_reports_broken_layers() {
        let dir = tempfile::tempdir().unwrap();
        write_layer(dir.path(), "default", "macformat:\n  format: colon\n");

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
        assert!(err.to_string().contains("default"));
    }

    #[test]
    fn it_parses_the_shipped_default_layer() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("default").join(Config::CONFIG_FILE);
        let cfg = Config::load_layer(&path).unwrap();
        assert_eq!(cfg.macformat.format(), Some(MacFormat::None));
        assert_eq!(cfg.macformat.inputs().unwrap(), vec!["macaddress"]);
    }
}
