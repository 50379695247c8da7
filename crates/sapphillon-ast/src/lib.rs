//! Documentation-comment discovery for plugin entry modules
//!
//! This crate extracts callable-function metadata from JavaScript/TypeScript
//! source without a language parser:
//! 1. Locating `/** ... */` blocks followed by an exported function signature
//! 2. Reading `@param`, `@returns` and `@permission` tags plus a description
//! 3. Capturing the function body up to its column-anchored closing brace
//!
//! Malformed or partial input never fails; unmatched blocks are skipped.

pub mod discovery_types;
pub mod extractor;

pub use discovery_types::{
    FunctionMetadata, ParameterInfo, PermissionGrant, PermissionList, ReturnInfo,
};
pub use extractor::DocExtractor;

/// Extract metadata for every documented exported function in `source`
pub fn extract_functions(source: &str) -> Vec<FunctionMetadata> {
    DocExtractor::new(source).extract_functions()
}
