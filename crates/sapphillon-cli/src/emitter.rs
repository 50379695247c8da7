//! Renders the final `package.js`: bundled code followed by the package registration

use sapphillon_ast::{FunctionMetadata, ParameterInfo, PermissionGrant, ReturnInfo};
use sapphillon_bundler::{strip_type_annotations, BundleOutput};
use regex::Regex;
use sapphillon_manifest::PackageDescriptor;
use std::collections::HashSet;
use std::fmt::Write;

/// Global the runtime reads the package descriptor from
pub const REGISTRY_TARGET: &str = "Sapphillon.Package";

/// Escape text for a double-quoted JavaScript string literal
pub fn escape_js_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Build the output script for a bundle and its documented functions
///
/// Functions are registered in discovery order; a repeated name is emitted once.
pub fn emit_package(
    bundle: &BundleOutput,
    functions: &[FunctionMetadata],
    package: &PackageDescriptor,
) -> String {
    let mut seen = HashSet::new();
    let functions: Vec<&FunctionMetadata> = functions
        .iter()
        .filter(|f| seen.insert(f.name.as_str()))
        .collect();

    let mut out = String::new();
    out.push_str(&bundle.code);

    for function in &functions {
        if !declares_function(&bundle.code, &function.name) {
            out.push_str("\n\n");
            out.push_str(&fallback_declaration(function, bundle.is_typescript));
        }
    }

    out.push_str("\n\n");
    let _ = writeln!(out, "{REGISTRY_TARGET} = {{");
    write_meta(&mut out, package);
    out.push_str("  functions: {\n");
    let entries: Vec<String> = functions.iter().map(|f| function_entry(f)).collect();
    out.push_str(&entries.join(",\n"));
    if !entries.is_empty() {
        out.push('\n');
    }
    out.push_str("  }\n};\n");
    out
}

/// Whether `code` holds a `function name (` declaration, spacing and generators included
fn declares_function(code: &str, name: &str) -> bool {
    let declaration = format!(r"\bfunction(?:\s*\*\s*|\s+){}\s*\(", regex::escape(name));
    Regex::new(&declaration).is_ok_and(|re| re.is_match(code))
}

/// Declaration rebuilt from extracted metadata for a handler missing from the bundle
fn fallback_declaration(function: &FunctionMetadata, is_typescript: bool) -> String {
    let declaration = format!(
        "{}function {}({}) {{\n  {}\n}}",
        if function.is_async { "async " } else { "" },
        function.name,
        function.signature_params,
        function.body_source
    );
    if is_typescript {
        strip_type_annotations(&declaration)
    } else {
        declaration
    }
}

fn write_meta(out: &mut String, package: &PackageDescriptor) {
    let fields = [
        ("name", &package.name),
        ("version", &package.version),
        ("description", &package.description),
        ("author_id", &package.author_id),
        ("package_id", &package.package_id),
    ];
    let lines: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("    {key}: \"{}\"", escape_js_string(value)))
        .collect();

    out.push_str("  meta: {\n");
    out.push_str(&lines.join(",\n"));
    out.push_str("\n  },\n");
}

fn function_entry(function: &FunctionMetadata) -> String {
    let permissions: Vec<String> = function.permissions.iter().map(permission_literal).collect();
    let parameters: Vec<String> = function.parameters.iter().map(parameter_literal).collect();
    let returns: Vec<String> = function.returns.iter().map(return_literal).collect();

    format!(
        "    {name}: {{\n      handler: {name},\n      permissions: [{}],\n      description: \"{}\",\n      parameters: {},\n      returns: {}\n    }}",
        permissions.join(", "),
        escape_js_string(&function.description),
        block_array(&parameters),
        block_array(&returns),
        name = function.name,
    )
}

/// `[]` when empty, otherwise one element per line
fn block_array(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    format!("[\n        {}\n      ]", items.join(",\n        "))
}

fn permission_literal(grant: &PermissionGrant) -> String {
    format!(
        "{{ type: \"{}\", resource: \"{}\" }}",
        escape_js_string(&grant.capability_type),
        escape_js_string(&grant.resource)
    )
}

fn parameter_literal(param: &ParameterInfo) -> String {
    format!(
        "{{ name: \"{}\", idx: {}, type: \"{}\", description: \"{}\" }}",
        escape_js_string(&param.name),
        param.index,
        escape_js_string(&param.param_type),
        escape_js_string(&param.description)
    )
}

fn return_literal(ret: &ReturnInfo) -> String {
    format!(
        "{{ type: \"{}\", idx: {}, description: \"{}\" }}",
        escape_js_string(&ret.return_type),
        ret.index,
        escape_js_string(&ret.description)
    )
}
