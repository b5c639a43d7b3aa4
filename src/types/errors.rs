use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule override: {0}. Expected NAME=VALUE")]
    InvalidRule(String),
}

impl ConfigError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ConfigError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error came from malformed configuration content
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConfigError::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
