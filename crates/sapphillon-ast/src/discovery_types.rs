//! Types produced by documentation-comment discovery
//!
//! One [`FunctionMetadata`] is created per documented exported function found
//! in the entry module's original (pre-bundling) source.

use smallvec::SmallVec;

/// A documented `@param`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    /// 0-based position among the block's `@param` lines
    pub index: usize,
    pub param_type: String,
    pub description: String,
}

/// A documented `@return` / `@returns`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnInfo {
    pub return_type: String,
    /// 0-based position among the block's return lines
    pub index: usize,
    pub description: String,
}

/// A capability a function needs at runtime, e.g. `FileSystemRead:/etc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    pub capability_type: String,
    pub resource: String,
}

/// Most functions declare zero to two permissions
pub type PermissionList = SmallVec<[PermissionGrant; 2]>;

/// Metadata of one documented exported function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMetadata {
    pub name: String,
    /// First free-text line of the documentation block
    pub description: String,
    pub parameters: Vec<ParameterInfo>,
    pub returns: Vec<ReturnInfo>,
    pub permissions: PermissionList,
    /// Function body between the braces, trimmed
    pub body_source: String,
    /// Raw text between the signature's parentheses
    pub signature_params: String,
    pub is_async: bool,
    /// 1-based line of the `export` keyword
    pub line: usize,
}
