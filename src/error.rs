// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::path::PathBuf;

/// Errors that abort a backfill run.
///
/// Per-record problems never surface here; they are reported as
/// [`SkipReason`](crate::backfill::SkipReason) and only skip that record.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Json(String),

    /// The metadata document does not exist at the resolved path.
    DocumentNotFound(PathBuf),

    /// The document parsed as JSON but is not an array of records.
    InvalidDocument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Json(e) => write!(f, "JSON Error: {}", e),
            Error::DocumentNotFound(path) => write!(f, "Data file not found: {}", path.display()),
            Error::InvalidDocument(e) => write!(f, "Invalid metadata document: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
