//! Sapphillon package manifest
//!
//! Reads the `package.toml` of a plugin project into a [`PackageDescriptor`]
//! and renders new manifests for project scaffolding.

pub mod errors;
pub mod manifest;
pub mod manifest_writer;
pub mod naming;
pub mod types;

pub use errors::ManifestError;
pub use manifest::parse_sections;
pub use manifest_writer::{escape_toml_string, render_manifest, ManifestTemplate};
pub use naming::{derive_package_id, to_package_id_component};
pub use types::{
    ManifestTable, PackageDescriptor, Section, DEFAULT_ENTRY, MANIFEST_FILE_NAME,
    PACKAGE_SECTION,
};
