//! Typed view of a plugin's `package.toml`

use std::path::{Path, PathBuf};

/// Name of the manifest file at the root of every plugin project
pub const MANIFEST_FILE_NAME: &str = "package.toml";

/// Section that must be present in every manifest
pub const PACKAGE_SECTION: &str = "package";

/// Entry module used when the manifest does not name one
pub const DEFAULT_ENTRY: &str = "src/index.js";

/// One `[section]` of a manifest with its keys in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite a key, keeping the position of the first occurrence
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }
}

/// Parsed manifest: keys that appear before any header live in `root`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestTable {
    pub root: Section,
    pub sections: Vec<Section>,
}

impl ManifestTable {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Open a section; reopening an existing header continues it
    pub(crate) fn open_section(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return idx;
        }
        self.sections.push(Section::new(name));
        self.sections.len() - 1
    }
}

/// Identity and entry point of a plugin package, built once per build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Entry module path relative to the project directory
    pub entry: String,
    /// Empty when the manifest has no `author_id`
    pub author_id: String,
    pub package_id: String,
}

impl PackageDescriptor {
    /// Absolute (or project-relative) path of the entry module
    pub fn entry_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.entry)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::*;

    #[test]
    fn test_section_insert_overwrites_in_place() {
        let mut section = Section::new("package");
        section.insert("name".to_string(), "a".to_string());
        section.insert("version".to_string(), "1.0.0".to_string());
        section.insert("name".to_string(), "b".to_string());

        assert_eq!(section.get("name"), Some("b"));
        assert_eq!(section.entries[0].0, "name");
        assert_eq!(section.entries.len(), 2);
    }

    #[test]
    fn test_entry_path() {
        let descriptor = PackageDescriptor {
            name: "weather".to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
            entry: "src/index.ts".to_string(),
            author_id: String::new(),
            package_id: "weather".to_string(),
        };
        assert_eq!(
            descriptor.entry_path(Path::new("/work/weather")),
            PathBuf::from("/work/weather/src/index.ts")
        );
    }
}
