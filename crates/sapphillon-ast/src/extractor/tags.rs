//! Line-level parsing of documentation block tags

use super::pattern;
use crate::discovery_types::PermissionGrant;
use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_TAG: Lazy<Regex> =
    Lazy::new(|| pattern(r"^@param\s+\{([^}]+)\}\s+([\w$]+)\s*(?:-\s*)?(.*)$"));
static RETURN_TAG: Lazy<Regex> =
    Lazy::new(|| pattern(r"^@returns?\s+\{([^}]+)\}\s*(?:-\s+)?(.*)$"));
static PERMISSION_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"^@permission\s+\[(.*)\]"));
static PERMISSION_ENTRY: Lazy<Regex> =
    Lazy::new(|| pattern(r#"["']([^"':]+):([^"']+)["']"#));

/// Classification of one cleaned documentation line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocLine<'a> {
    Param {
        param_type: &'a str,
        name: &'a str,
        description: &'a str,
    },
    Return {
        return_type: &'a str,
        description: &'a str,
    },
    Permission(Vec<PermissionGrant>),
    /// Non-empty line that is not a tag
    Text(&'a str),
    /// Empty line or an unrecognized `@tag`
    Other,
}

/// Strip the leading whitespace and comment asterisk of a block line
pub(crate) fn clean_doc_line(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix('*').unwrap_or(line).trim()
}

/// Classify a cleaned line; tags are tried in priority order param, return, permission
pub(crate) fn classify(line: &str) -> DocLine<'_> {
    if let Some(caps) = PARAM_TAG.captures(line) {
        return DocLine::Param {
            param_type: caps.get(1).map_or("", |m| m.as_str().trim()),
            name: caps.get(2).map_or("", |m| m.as_str()),
            description: caps.get(3).map_or("", |m| m.as_str().trim()),
        };
    }

    if let Some(caps) = RETURN_TAG.captures(line) {
        return DocLine::Return {
            return_type: caps.get(1).map_or("", |m| m.as_str().trim()),
            description: caps.get(2).map_or("", |m| m.as_str().trim()),
        };
    }

    if let Some(caps) = PERMISSION_TAG.captures(line) {
        let list = caps.get(1).map_or("", |m| m.as_str());
        return DocLine::Permission(parse_permission_list(list));
    }

    if line.is_empty() || line.starts_with('@') {
        DocLine::Other
    } else {
        DocLine::Text(line)
    }
}

/// Parse the inside of `["Type:resource", ...]`, keeping the listed order
pub(crate) fn parse_permission_list(list: &str) -> Vec<PermissionGrant> {
    PERMISSION_ENTRY
        .captures_iter(list)
        .filter_map(|caps| {
            let capability_type = caps.get(1)?.as_str().trim();
            let resource = caps.get(2)?.as_str().trim();
            if capability_type.is_empty() {
                return None;
            }
            Some(PermissionGrant {
                capability_type: capability_type.to_string(),
                resource: resource.to_string(),
            })
        })
        .collect()
}
