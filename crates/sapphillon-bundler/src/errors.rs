use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while bundling a plugin entry module
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Entry module not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    #[error("Cannot find module '{specifier}' imported from {}", .importer.display())]
    ModuleNotFound { specifier: String, importer: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
