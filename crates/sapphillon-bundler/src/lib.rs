//! Flattens a plugin's entry module and its relative imports into one script
//!
//! Local imports (`./` and `../` specifiers) are resolved depth-first and each
//! module is inlined once, dependencies ahead of importers. Import and export
//! syntax is removed, and TypeScript entries get a best-effort type strip.

pub mod bundler;
pub mod errors;
pub mod imports;
pub mod paths;
mod scan;
pub mod strip_types;

use regex::Regex;
use std::path::Path;

pub use bundler::{BundleOutput, Bundler};
pub use errors::BundleError;
pub use strip_types::strip_type_annotations;

/// Bundle `entry` (relative to `project_root`, or absolute) into a single script
pub fn bundle(entry: &Path, project_root: &Path) -> Result<BundleOutput, BundleError> {
    Bundler::new(project_root).bundle(entry)
}

/// Compile one of the crate's fixed patterns
pub(crate) fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid built-in pattern {re}: {e}"))
}
