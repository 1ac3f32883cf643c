use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read or write configuration: {0}")]
    Io(#[from] io::Error),

    #[error("configuration backup `{0}` not found")]
    BackupNotFound(String),

    #[error("malformed configuration: {0}")]
    Serde(String),
}
