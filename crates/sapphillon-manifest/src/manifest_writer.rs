//! Manifest writer used when scaffolding a new plugin project
//!
//! Only string values are written, always as TOML basic strings, so the
//! output is valid TOML as well as valid input for [`crate::parse_sections`].

use crate::types::PACKAGE_SECTION;

/// Values written to a freshly scaffolded `package.toml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTemplate {
    pub name: String,
    pub version: String,
    pub description: String,
    pub entry: String,
    pub author_id: Option<String>,
    pub package_id: String,
}

/// Escape a string for use inside a TOML basic (double-quoted) string
///
/// Backslashes are escaped first so the escapes added afterwards survive.
pub fn escape_toml_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Render the manifest text for `template`
pub fn render_manifest(template: &ManifestTemplate) -> String {
    let mut lines = vec![
        format!("[{}]", PACKAGE_SECTION),
        format!("name = \"{}\"", escape_toml_string(&template.name)),
        format!("version = \"{}\"", escape_toml_string(&template.version)),
        format!(
            "description = \"{}\"",
            escape_toml_string(&template.description)
        ),
        format!("entry = \"{}\"", escape_toml_string(&template.entry)),
    ];

    if let Some(author_id) = template.author_id.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("author_id = \"{}\"", escape_toml_string(author_id)));
    }
    lines.push(format!(
        "package_id = \"{}\"",
        escape_toml_string(&template.package_id)
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use crate::manifest_writer::*;
    use crate::types::PackageDescriptor;

    fn template() -> ManifestTemplate {
        ManifestTemplate {
            name: "my-plugin".to_string(),
            version: "1.0.0".to_string(),
            description: "Plugin package for my-plugin".to_string(),
            entry: "src/index.ts".to_string(),
            author_id: None,
            package_id: "com.example".to_string(),
        }
    }

    #[test]
    fn test_escape_toml_string() {
        assert_eq!(escape_toml_string(r"C:\path"), r"C:\\path");
        assert_eq!(escape_toml_string("say \"hi\""), r#"say \"hi\""#);
        assert_eq!(escape_toml_string("a\nb\tc\r"), r"a\nb\tc\r");
        assert_eq!(escape_toml_string("\\\""), r#"\\\""#);
    }

    #[test]
    fn test_render_manifest() {
        let rendered = render_manifest(&template());
        assert_eq!(
            rendered,
            "[package]\nname = \"my-plugin\"\nversion = \"1.0.0\"\ndescription = \"Plugin package for my-plugin\"\nentry = \"src/index.ts\"\npackage_id = \"com.example\"\n"
        );
    }

    #[test]
    fn test_rendered_manifest_reads_back() {
        let mut template = template();
        template.author_id = Some("com.acme".to_string());

        let descriptor = PackageDescriptor::parse(&render_manifest(&template)).unwrap();
        assert_eq!(descriptor.name, "my-plugin");
        assert_eq!(descriptor.entry, "src/index.ts");
        assert_eq!(descriptor.author_id, "com.acme");
        assert_eq!(descriptor.package_id, "com.example");
    }
}
