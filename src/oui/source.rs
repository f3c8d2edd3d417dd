use std::{error::Error, fmt::Display, fs, path::{Path, PathBuf}};

use log::{debug, info};

/// Upper bound for a registry download.
const BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// Where the registry text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

#[derive(Debug)]
pub enum SourceError {
    Fetch(String, ureq::Error),
    Io(PathBuf, std::io::Error),
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SourceError::Fetch(_, e) => Some(e),
            SourceError::Io(_, e) => Some(e),
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Fetch(url, e) => write!(f, "Request for {} failed: {}", url, e),
            SourceError::Io(path, e) => write!(f, "Reading {} failed: {}", path.display(), e),
        }
    }
}

impl Source {
    /// A path argument wins over the registry url.
    pub fn new(path: Option<PathBuf>, url: &str) -> Self {
        match path {
            Some(path) => Source::File(path),
            None => Source::Url(url.to_owned()),
        }
    }

    /// Read the whole registry text. Invalid UTF-8 is replaced.
    pub fn read(&self) -> Result<String, SourceError> {
        let bytes = match self {
            Source::File(path) => Self::read_file(path)?,
            Source::Url(url) => Self::fetch(url)?,
        };

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_file(path: &Path) -> Result<Vec<u8>, SourceError> {
        let path = match std::env::current_dir() {
            Ok(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_owned(),
        };
        debug!("Read dataset from {:?}", path);

        let bytes = fs::read(&path).map_err(|e| SourceError::Io(path.clone(), e))?;
        info!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }

    fn fetch(url: &str) -> Result<Vec<u8>, SourceError> {
        debug!("Request uri={:?}", url);

        let bytes = ureq::get(url)
            .call()
            .and_then(|mut response| {
                response.body_mut()
                    .with_config()
                    .limit(BODY_LIMIT)
                    .read_to_vec()
            })
            .map_err(|e| SourceError::Fetch(url.to_owned(), e))?;

        info!("Request {} succeeded, bytes_in={}", url, bytes.len());
        Ok(bytes)
    }
}
