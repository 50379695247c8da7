//! Manifest reader - turns `package.toml` text into a [`PackageDescriptor`]
//!
//! The format is a deliberately small subset of TOML: `[section]` headers and
//! `key = value` lines. Values wrapped in matching quotes lose the quotes; no
//! escape sequences are interpreted.

use crate::errors::ManifestError;
use crate::naming::derive_package_id;
use crate::types::{
    ManifestTable, PackageDescriptor, DEFAULT_ENTRY, MANIFEST_FILE_NAME, PACKAGE_SECTION,
};
use std::path::Path;
use tracing::debug;

/// Parse manifest text into its sections
pub fn parse_sections(content: &str) -> ManifestTable {
    let mut table = ManifestTable::default();
    let mut current: Option<usize> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = section_header(trimmed) {
            current = Some(table.open_section(name));
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            debug!("Ignoring manifest line without '=': {}", trimmed);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = unquote(value.trim());

        let target = match current {
            Some(idx) => &mut table.sections[idx],
            None => &mut table.root,
        };
        target.insert(key.to_string(), value.to_string());
    }

    table
}

/// `[name]` with a non-empty name that contains no `]`
fn section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || inner.contains(']') {
        return None;
    }
    Some(inner)
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl PackageDescriptor {
    /// Build a descriptor from manifest text
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let table = parse_sections(content);
        let package = table
            .section(PACKAGE_SECTION)
            .ok_or_else(|| ManifestError::MissingSection(PACKAGE_SECTION.to_string()))?;

        let field = |key: &str| package.get(key).unwrap_or_default().to_string();

        let name = field("name");
        let author_id = field("author_id");
        let entry = package
            .get("entry")
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENTRY)
            .to_string();

        let package_id = match package.get("package_id").filter(|id| !id.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => derive_package_id(&author_id, &name),
        };

        Ok(PackageDescriptor {
            version: field("version"),
            description: field("description"),
            name,
            entry,
            author_id,
            package_id,
        })
    }

    /// Read `<project_dir>/package.toml`
    pub fn load(project_dir: &Path) -> Result<Self, ManifestError> {
        let path = project_dir.join(MANIFEST_FILE_NAME);
        debug!("Reading manifest: {:?}", path);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path));
            }
            Err(e) => return Err(ManifestError::Io(e)),
        };

        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ManifestError;
    use crate::manifest::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sections_basic() {
        let content = r#"
# leading comment
top = "level"

[package]
name = "test-plugin"
version = '1.0.0'
   description   =   spaced out value
# trailing comment
"#;
        let table = parse_sections(content);
        assert_eq!(table.root.get("top"), Some("level"));

        let Some(package) = table.section("package") else {
            panic!("package section missing");
        };
        assert_eq!(package.get("name"), Some("test-plugin"));
        assert_eq!(package.get("version"), Some("1.0.0"));
        assert_eq!(package.get("description"), Some("spaced out value"));
    }

    #[test]
    fn test_unquote_requires_matching_quotes() {
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("\"x'"), "\"x'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
        // No escape interpretation
        assert_eq!(unquote(r#""a\"b""#), r#"a\"b"#);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let table = parse_sections("[package]\ndescription = \"a = b\"\n");
        assert_eq!(
            table.section("package").and_then(|s| s.get("description")),
            Some("a = b")
        );
    }

    #[test]
    fn test_parse_full_descriptor() {
        let content = r#"
[package]
name = "my-awesome-plugin"
version = "1.0.0"
description = "A test plugin"
entry = "src/index.js"
package_id = "com.example"
"#;
        let descriptor = PackageDescriptor::parse(content).unwrap();
        assert_eq!(descriptor.name, "my-awesome-plugin");
        assert_eq!(descriptor.version, "1.0.0");
        assert_eq!(descriptor.description, "A test plugin");
        assert_eq!(descriptor.entry, "src/index.js");
        assert_eq!(descriptor.package_id, "com.example");
        assert_eq!(descriptor.author_id, "");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let descriptor = PackageDescriptor::parse("[package]\n").unwrap();
        assert_eq!(descriptor.name, "");
        assert_eq!(descriptor.version, "");
        assert_eq!(descriptor.description, "");
        assert_eq!(descriptor.entry, "src/index.js");
        assert_eq!(descriptor.package_id, "");
    }

    #[test]
    fn test_package_id_derived_from_author_id() {
        let content = "[package]\nname = \"My Plugin\"\nauthor_id = \"com.acme\"\n";
        let descriptor = PackageDescriptor::parse(content).unwrap();
        assert_eq!(descriptor.package_id, "com.acme.my-plugin");
        assert_eq!(descriptor.author_id, "com.acme");
    }

    #[test]
    fn test_package_id_derived_from_name_only() {
        let content = "[package]\nname = \"  --My Plugin!! \"\n";
        let descriptor = PackageDescriptor::parse(content).unwrap();
        assert_eq!(descriptor.package_id, "my-plugin");
    }

    #[test]
    fn test_explicit_package_id_wins_over_author_id() {
        let content =
            "[package]\nname = \"x\"\nauthor_id = \"com.acme\"\npackage_id = \"org.other.x\"\n";
        let descriptor = PackageDescriptor::parse(content).unwrap();
        assert_eq!(descriptor.package_id, "org.other.x");
    }

    #[test]
    fn test_missing_package_section() {
        let err = PackageDescriptor::parse("name = \"test\"\n[tool]\nx = 1\n");
        assert!(matches!(err, Err(ManifestError::MissingSection(ref s)) if s == "package"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        match PackageDescriptor::load(dir.path()) {
            Err(ManifestError::NotFound(path)) => {
                assert_eq!(path, dir.path().join("package.toml"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_project_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.toml"),
            "[package]\nname = \"weather\"\nentry = \"src/index.ts\"\n",
        )
        .unwrap();

        let descriptor = PackageDescriptor::load(dir.path()).unwrap();
        assert_eq!(descriptor.entry, "src/index.ts");
        assert_eq!(descriptor.entry_path(dir.path()), dir.path().join("src/index.ts"));
    }
}
