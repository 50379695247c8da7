use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

const FALLBACK_EXTENSIONS: [&str; 2] = [".js", ".ts"];

/// Collapse `.` and `..` components without touching the filesystem
///
/// A `..` with nothing left to pop is kept for relative paths and dropped at
/// the root of absolute ones.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.into_iter().collect()
}

/// Resolve an import specifier against the directory of the importing file
pub fn resolve_import(importer: &Path, specifier: &str) -> PathBuf {
    let base = importer.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&base.join(specifier))
}

/// Whether a specifier refers to a local module (`./` or `../`)
pub fn is_local_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Whether the path names a typed (TypeScript) module
pub fn is_typescript_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "ts" || ext == "tsx")
}

/// First existing file among the path itself and the path with `.js` / `.ts` appended
pub fn resolve_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    FALLBACK_EXTENSIONS.iter().find_map(|ext| {
        let mut candidate = OsString::from(path.as_os_str());
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}
