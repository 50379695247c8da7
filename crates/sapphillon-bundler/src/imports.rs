//! Local import discovery and module-syntax removal

use crate::paths::is_local_specifier;
use crate::pattern;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Whole-line `import ... from "x"`, `import "x"` and `export ... from "x"` statements
static DEPENDENCY_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    pattern(concat!(
        r#"(?m)^[ \t]*(?:"#,
        r#"import\s+(?:type\s+)?(?:(?:\{[^}]*\}|\*\s+as\s+[\w$]+|[\w$]+)(?:\s*,\s*(?:\{[^}]*\}|\*\s+as\s+[\w$]+))?\s+from\s+)?["']([^"'\n]+)["']"#,
        r#"|export\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s+["']([^"'\n]+)["']"#,
        r#")[ \t]*;?[ \t]*\r?(?:\n|\z)"#,
    ))
});

static EXPORT_DEFAULT: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^([ \t]*)export\s+default\s+"));
static EXPORT_LIST: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?m)^[ \t]*export\s+(?:type\s+)?\{[^}]*\}[ \t]*;?[ \t]*\r?(?:\n|\z)")
});
static EXPORT_KEYWORD: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^([ \t]*)export\s+"));

/// A module's local dependencies and its text with their statements removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImports {
    /// Local specifiers in first-encountered order, without duplicates
    pub specifiers: Vec<String>,
    pub code: String,
}

/// Remove local import and re-export statements, collecting their specifiers
///
/// Statements naming a non-local specifier are left in place.
pub fn split_local_imports(source: &str) -> ModuleImports {
    let mut specifiers: Vec<String> = Vec::new();

    let code = DEPENDENCY_STATEMENT
        .replace_all(source, |caps: &Captures<'_>| {
            let specifier = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            if !is_local_specifier(specifier) {
                return caps[0].to_string();
            }
            if !specifiers.iter().any(|s| s == specifier) {
                specifiers.push(specifier.to_string());
            }
            String::new()
        })
        .into_owned();

    ModuleImports { specifiers, code }
}

/// Byte ranges of every import and re-export statement, local or not
pub(crate) fn dependency_statement_spans(code: &str) -> Vec<Range<usize>> {
    DEPENDENCY_STATEMENT.find_iter(code).map(|m| m.range()).collect()
}

/// Strip `export` syntax, keeping the exported declarations
pub fn strip_exports(code: &str) -> String {
    let code = EXPORT_DEFAULT.replace_all(code, "${1}");
    let code = EXPORT_LIST.replace_all(&code, "");
    EXPORT_KEYWORD.replace_all(&code, "${1}").into_owned()
}
