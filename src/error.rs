//! Error types for mdocx operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering a document.
///
/// Parsing never fails; every variant comes from the file system or from
/// loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write document to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
