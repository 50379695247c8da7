//! Naming utilities for package identifiers

/// Convert a display name to a package-id component
///
/// Lowercases the name, collapses every run of characters outside `[a-z0-9]`
/// into a single hyphen and trims hyphens from both ends:
/// - "My Plugin" -> my-plugin
/// - "  Weather: Forecast!! " -> weather-forecast
pub fn to_package_id_component(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    result
}

/// Derive a package id from an optional author id and the package name
pub fn derive_package_id(author_id: &str, name: &str) -> String {
    let component = to_package_id_component(name);
    if author_id.is_empty() {
        component
    } else {
        format!("{}.{}", author_id, component)
    }
}
