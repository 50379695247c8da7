use crate::errors::BundleError;
use crate::imports::{split_local_imports, strip_exports, ModuleImports};
use crate::paths::{is_typescript_path, normalize_path, resolve_file, resolve_import};
use crate::strip_types::strip_type_annotations;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of bundling an entry module and its local dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    /// Flattened script, trimmed
    pub code: String,
    /// The entry module is TypeScript and type syntax was stripped
    pub is_typescript: bool,
    /// Inlined module files, in the order their code appears
    pub modules: Vec<PathBuf>,
}

/// Who asked for a module, used to report an unresolvable path
enum Requester<'a> {
    Entry,
    Import {
        specifier: &'a str,
        importer: &'a Path,
    },
}

impl Requester<'_> {
    fn not_found(&self, path: &Path) -> BundleError {
        match self {
            Requester::Entry => BundleError::EntryNotFound(path.to_path_buf()),
            Requester::Import {
                specifier,
                importer,
            } => BundleError::ModuleNotFound {
                specifier: (*specifier).to_string(),
                importer: importer.to_path_buf(),
            },
        }
    }
}

/// Depth-first bundler for relative local imports
///
/// Each module is inlined at most once per bundle: a module that was already
/// visited contributes nothing, so diamonds and cycles terminate.
pub struct Bundler {
    project_root: PathBuf,
    visited: HashSet<PathBuf>,
    modules: Vec<PathBuf>,
}

impl Bundler {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Bundler {
            project_root: project_root.into(),
            visited: HashSet::new(),
            modules: Vec::new(),
        }
    }

    /// Bundle `entry` (relative to the project root, or absolute)
    pub fn bundle(mut self, entry: &Path) -> Result<BundleOutput, BundleError> {
        let entry = normalize_path(&self.project_root.join(entry));
        debug!("Bundling entry module {}", entry.display());

        let mut code = self.bundle_module(&entry, &Requester::Entry)?;

        let is_typescript = self.modules.last().is_some_and(|p| is_typescript_path(p));
        if is_typescript {
            debug!("Stripping type annotations");
            code = strip_type_annotations(&code);
        }

        info!(
            "Bundled {} module(s) from {}",
            self.modules.len(),
            entry.display()
        );

        Ok(BundleOutput {
            code: code.trim().to_string(),
            is_typescript,
            modules: self.modules,
        })
    }

    fn bundle_module(
        &mut self,
        path: &Path,
        requester: &Requester<'_>,
    ) -> Result<String, BundleError> {
        let Some(resolved) = resolve_file(path) else {
            return Err(requester.not_found(path));
        };

        if !self.visited.insert(resolved.clone()) {
            debug!("Already bundled: {}", self.display_path(&resolved));
            return Ok(String::new());
        }

        let source = fs::read_to_string(&resolved).map_err(|source| BundleError::Io {
            path: resolved.clone(),
            source,
        })?;
        let ModuleImports { specifiers, code } = split_local_imports(&source);

        let mut bundled = String::new();
        for specifier in &specifiers {
            let target = resolve_import(&resolved, specifier);
            let dependency = self.bundle_module(
                &target,
                &Requester::Import {
                    specifier,
                    importer: &resolved,
                },
            )?;
            bundled.push_str(&dependency);
            bundled.push('\n');
        }
        bundled.push_str(&strip_exports(&code));

        debug!(
            "Inlined {} ({} local import(s))",
            self.display_path(&resolved),
            specifiers.len()
        );
        self.modules.push(resolved);
        Ok(bundled)
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::bundler::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn bundle(root: &Path, entry: &str) -> Result<BundleOutput, BundleError> {
        Bundler::new(root).bundle(Path::new(entry))
    }

    #[test]
    fn test_dependencies_precede_importer() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/index.js",
            "import { double } from \"./math.js\";\n\nexport function run(x) {\n  return double(x);\n}\n",
        );
        write(
            temp.path(),
            "src/math.js",
            "export function double(x) {\n  return x * 2;\n}\n",
        );

        let output = bundle(temp.path(), "src/index.js").unwrap();
        assert!(!output.is_typescript);
        assert_eq!(
            output.code,
            "function double(x) {\n  return x * 2;\n}\n\n\nfunction run(x) {\n  return double(x);\n}"
        );
        assert_eq!(output.modules.len(), 2);
        assert!(output.modules[0].ends_with("src/math.js"));
        assert!(output.modules[1].ends_with("src/index.js"));
    }

    #[test]
    fn test_cycle_inlines_each_module_once() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "a.js",
            "import { b } from \"./b.js\";\nexport function a() { return b(); }\n",
        );
        write(
            temp.path(),
            "b.js",
            "import { a } from \"./a.js\";\nexport function b() { return 1; }\n",
        );

        let output = bundle(temp.path(), "a.js").unwrap();
        assert_eq!(output.code.matches("function a()").count(), 1);
        assert_eq!(output.code.matches("function b()").count(), 1);
        assert!(output.code.find("function b()") < output.code.find("function a()"));
        assert_eq!(output.modules.len(), 2);
    }

    #[test]
    fn test_diamond_shares_one_copy() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "index.js",
            "import { left } from \"./left.js\";\nimport { right } from \"./right.js\";\nexport const both = left + right;\n",
        );
        write(
            temp.path(),
            "left.js",
            "import { base } from \"./shared.js\";\nexport const left = base + 1;\n",
        );
        write(
            temp.path(),
            "right.js",
            "import { base } from \"./shared.js\";\nexport const right = base + 2;\n",
        );
        write(temp.path(), "shared.js", "export const base = 40;\n");

        let output = bundle(temp.path(), "index.js").unwrap();
        assert_eq!(output.code.matches("const base = 40;").count(), 1);
        let order: Vec<String> = output
            .modules
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(order, vec!["shared.js", "left.js", "right.js", "index.js"]);
    }

    #[test]
    fn test_no_local_import_lines_remain() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/index.js",
            "import lib from \"some-lib\";\nimport * as fmt from \"./fmt.js\";\nimport \"./setup.js\";\nexport { fmt };\n",
        );
        write(temp.path(), "src/fmt.js", "export function pad(s) { return s; }\n");
        write(temp.path(), "src/setup.js", "globalThis.ready = true;\n");

        let output = bundle(temp.path(), "src/index.js").unwrap();
        assert!(output.code.contains("import lib from \"some-lib\";"));
        assert!(!output.code.contains("./fmt.js"));
        assert!(!output.code.contains("./setup.js"));
        assert!(!output.code.contains("export"));
        assert!(output.code.contains("globalThis.ready = true;"));
    }

    #[test]
    fn test_extension_fallback_and_parent_directories() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/index.js",
            "import { greet } from \"./nested/greet\";\nexport function main() { return greet(); }\n",
        );
        write(
            temp.path(),
            "src/nested/greet.js",
            "import { NAME } from \"../../shared/constants\";\nexport function greet() { return NAME; }\n",
        );
        write(temp.path(), "shared/constants.ts", "export const NAME = \"world\";\n");

        let output = bundle(temp.path(), "src/index.js").unwrap();
        assert!(output.code.starts_with("const NAME = \"world\";"));
        assert!(output.modules[0].ends_with("shared/constants.ts"));
    }

    #[test]
    fn test_missing_module_names_specifier() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/index.js",
            "import { nope } from \"./missing.js\";\n",
        );

        let err = bundle(temp.path(), "src/index.js").unwrap_err();
        match &err {
            BundleError::ModuleNotFound {
                specifier,
                importer,
            } => {
                assert_eq!(specifier, "./missing.js");
                assert!(importer.ends_with("src/index.js"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("./missing.js"));
    }

    #[test]
    fn test_missing_entry() {
        let temp = TempDir::new().unwrap();
        let err = bundle(temp.path(), "src/index.js").unwrap_err();
        assert!(matches!(err, BundleError::EntryNotFound(path) if path.ends_with("src/index.js")));
    }

    #[test]
    fn test_typescript_entry_is_stripped() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/index.ts",
            "import { prefix } from \"./prefix.ts\";\n\ninterface Options {\n  loud: boolean;\n}\n\nexport function greet(name: string): string {\n  return `${prefix}, ${name}!`;\n}\n",
        );
        write(
            temp.path(),
            "src/prefix.ts",
            "export const prefix: string = \"Hello\";\n",
        );

        let output = bundle(temp.path(), "src/index.ts").unwrap();
        assert!(output.is_typescript);
        assert!(output.code.contains("const prefix = \"Hello\";"));
        assert!(output.code.contains("function greet(name) {"));
        assert!(!output.code.contains(": string"));
        assert!(!output.code.contains("interface"));
    }
}
