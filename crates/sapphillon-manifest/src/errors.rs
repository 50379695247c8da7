use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a plugin manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("package.toml not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Missing [{0}] section in package.toml")]
    MissingSection(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
