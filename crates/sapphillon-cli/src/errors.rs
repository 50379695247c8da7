//! Error types reported by the sapphillon commands
//!
//! Every failure a user can cause is a [`CliError`]; `main` prints it as
//! `Error: <message>` and exits with status 1.

use sapphillon_bundler::BundleError;
use sapphillon_config::ConfigError;
use sapphillon_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a package
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("Failed to read entry module {}: {source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while scaffolding a new plugin project
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Plugin name is required (usage: sapphillon init <NAME> or --name <NAME>)")]
    MissingName,

    #[error("Invalid path: '{0}' contains directory traversal sequences")]
    InvalidPath(String),

    #[error("Directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Path '{}' already exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to initialize plugin package at {}: {source}", .path.display())]
    Scaffold {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// User-facing command failure
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
