//! Best-effort removal of TypeScript type syntax
//!
//! Covers parameter and return annotations, generic parameter lists on
//! function and method declarations, variable annotations, `as` assertions
//! and single-line or simple block `interface` / `type` declarations.
//! Nested object types and generics inside default values are not understood.

use crate::imports::dependency_statement_spans;
use crate::pattern;
use crate::scan::{find_matching_paren, map_code_segments, skip_non_code};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

/// Words that open a parenthesized condition rather than a parameter list
///
/// `catch (e: T) {` is absent so its binding is stripped like a parameter.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "with", "return"];

static INTERFACE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?m)^[ \t]*(?:export\s+)?(?:declare\s+)?interface\s+[\w$]+[^{\n]*\{[^}]*\}[ \t]*;?[ \t]*\r?(?:\n|\z)")
});
static TYPE_ALIAS_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?m)^[ \t]*(?:export\s+)?(?:declare\s+)?type\s+[\w$]+(?:<[^>\n]*>)?[ \t]*=\s*(?:\{[^}]*\}[^;\n]*|[^;\n]*);?[ \t]*\r?(?:\n|\z)")
});
/// `const name:` up to and including the colon; group 1 ends at the name
static ANNOTATED_VARIABLE: Lazy<Regex> =
    Lazy::new(|| pattern(r"(\b(?:const|let|var)\s+[\w$]+)\s*:"));
static AS_ASSERTION: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(^|[\w$)\]])\s+as\s+(?:const\b|[\w$.]+(?:<[^<>\n]*>)?(?:\[\])*)")
});

/// Strip type syntax from assembled TypeScript so it runs as plain JavaScript
///
/// Import and re-export statements that survive bundling are copied through
/// unchanged.
pub fn strip_type_annotations(code: &str) -> String {
    let code = INTERFACE_DECLARATION.replace_all(code, "");
    let code = TYPE_ALIAS_DECLARATION.replace_all(&code, "");
    let code = strip_signatures(&code);

    let mut out = String::with_capacity(code.len());
    let mut copied = 0;
    for span in dependency_statement_spans(&code) {
        out.push_str(&strip_expression_types(&code[copied..span.start]));
        out.push_str(&code[span.clone()]);
        copied = span.end;
    }
    out.push_str(&strip_expression_types(&code[copied..]));
    out
}

fn strip_expression_types(code: &str) -> String {
    map_code_segments(code, |segment| {
        strip_assertions(&strip_variable_annotations(segment))
    })
}

/// Drop `: Type` after a declared variable name
///
/// An annotation that runs to the end of the segment is left alone, since the
/// rest of it sits in a literal this pass cannot see.
fn strip_variable_annotations(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut copied = 0;

    for caps in ANNOTATED_VARIABLE.captures_iter(segment) {
        let (Some(whole), Some(binding)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() < copied {
            continue;
        }
        let Some(end) = annotation_end(segment.as_bytes(), whole.end()) else {
            continue;
        };
        out.push_str(&segment[copied..binding.end()]);
        copied = end;
    }

    out.push_str(&segment[copied..]);
    out
}

/// End of a variable's type annotation starting at `from`, before any trailing space
///
/// The annotation stops at a top-level `=`, `;`, `,` or newline; `=>` inside
/// function types does not end it.
fn annotation_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = from;

    loop {
        let b = *bytes.get(i)?;
        if b == b'=' && bytes.get(i + 1) == Some(&b'>') {
            i += 2;
            continue;
        }
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = depth.checked_sub(1)?,
            b'=' | b';' | b',' | b'\n' if depth == 0 => break,
            _ => {}
        }
        i += 1;
    }

    let mut end = i;
    while end > from && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    bytes[from..end]
        .iter()
        .any(|b| !b.is_ascii_whitespace())
        .then_some(end)
}

/// Remove `as Type` assertions, repeating until chained ones are gone
fn strip_assertions(segment: &str) -> String {
    let mut current = segment.to_string();
    while AS_ASSERTION.is_match(&current) {
        current = AS_ASSERTION.replace_all(&current, "${1}").into_owned();
    }
    current
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
    Body,
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// `function [name]` precedes the list
    Function,
    /// A control-flow keyword precedes the list
    Keyword,
    /// Any other identifier, e.g. a method name
    Name,
    Other,
}

/// A parameter list recognized as part of a function, method or arrow
struct Signature {
    /// Start of a removable generic list, else the `(`
    start: usize,
    open: usize,
    close: usize,
    /// `: ReturnType` span to drop
    return_type: Option<Range<usize>>,
}

impl Signature {
    fn at(code: &str, open: usize) -> Option<Self> {
        let close = find_matching_paren(code.as_bytes(), open)?;
        let (follow, return_type) = signature_tail(code, close)?;
        let generics = generic_list_before(code, open);
        let context = context_before(code, generics.unwrap_or(open));

        let is_signature =
            follow == Follow::Arrow || matches!(context, Context::Function | Context::Name);

        is_signature.then_some(Signature {
            start: generics.unwrap_or(open),
            open,
            close,
            return_type,
        })
    }

    fn end(&self) -> usize {
        self.return_type.as_ref().map_or(self.close + 1, |r| r.end)
    }

    fn render_into(&self, code: &str, out: &mut String) {
        out.push('(');
        out.push_str(&strip_parameter_list(&code[self.open + 1..self.close]));
        out.push(')');
        if let Some(return_type) = &self.return_type {
            out.push_str(&code[self.close + 1..return_type.start]);
        }
    }
}

/// Rewrite every recognized signature, leaving other parentheses untouched
fn strip_signatures(code: &str) -> String {
    let bytes = code.as_bytes();
    let mut out = String::with_capacity(code.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        if bytes[i] == b'(' {
            if let Some(signature) = Signature::at(code, i).filter(|s| s.start >= copied) {
                out.push_str(&code[copied..signature.start]);
                signature.render_into(code, &mut out);
                copied = signature.end();
                i = copied;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&code[copied..]);
    out
}

/// What follows a parameter list's `)`: a body or arrow, plus any return annotation
fn signature_tail(code: &str, close: usize) -> Option<(Follow, Option<Range<usize>>)> {
    let rest = &code[close + 1..];
    let trimmed = rest.trim_start();
    let colon = close + 1 + (rest.len() - trimmed.len());

    if trimmed.starts_with("=>") {
        return Some((Follow::Arrow, None));
    }
    if trimmed.starts_with('{') {
        return Some((Follow::Body, None));
    }
    if !trimmed.starts_with(':') {
        return None;
    }

    let (type_end, follow) = scan_return_type(code.as_bytes(), colon + 1)?;
    let annotation = code[colon + 1..type_end].trim_end();
    if annotation.trim_start().is_empty() {
        return None;
    }
    Some((follow, Some(colon..colon + 1 + annotation.len())))
}

/// Walk a return type up to the `{` or `=>` that ends it
///
/// Fails on anything a type cannot contain at the top level, which keeps
/// ternaries such as `ok ? f(x) : y;` intact.
fn scan_return_type(bytes: &[u8], from: usize) -> Option<(usize, Follow)> {
    let mut depth = 0usize;
    let mut i = from;

    while let Some(&b) = bytes.get(i) {
        if b == b'=' && bytes.get(i + 1) == Some(&b'>') {
            if depth == 0 {
                return Some((i, Follow::Arrow));
            }
            i += 2;
            continue;
        }
        if matches!(b, b'"' | b'\'') {
            i = skip_non_code(bytes, i)?;
            continue;
        }
        match b {
            b'{' if depth == 0 => return Some((i, Follow::Body)),
            b'<' | b'(' | b'[' | b'{' => depth += 1,
            b'>' | b')' | b']' | b'}' => depth = depth.checked_sub(1)?,
            _ if depth > 0 => {}
            b'_' | b'$' | b'.' | b',' | b'|' | b'&' | b'?' | b' ' | b'\t' => {}
            _ if b.is_ascii_alphanumeric() => {}
            _ => return None,
        }
        i += 1;
    }
    None
}

/// Start of a `<...>` list directly before `open`, if there is one
fn generic_list_before(code: &str, open: usize) -> Option<usize> {
    let head = code[..open].trim_end();
    if !head.ends_with('>') || head.ends_with("=>") {
        return None;
    }

    let mut depth = 0usize;
    for (i, b) in head.bytes().enumerate().rev() {
        match b {
            b'>' => depth += 1,
            b'<' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            b';' | b'{' | b'}' | b'(' | b')' | b'=' | b'\n' => return None,
            _ => {}
        }
    }
    None
}

fn word_before(code: &str, end: usize) -> Option<(usize, &str)> {
    let head = code[..end].trim_end();
    let start = head
        .trim_end_matches(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
        .len();
    let word = &head[start..];
    (!word.is_empty()).then_some((start, word))
}

fn context_before(code: &str, end: usize) -> Context {
    match word_before(code, end) {
        None => Context::Other,
        Some((_, "function")) => Context::Function,
        Some((_, word)) if CONTROL_KEYWORDS.contains(&word) => Context::Keyword,
        Some((start, _)) => match word_before(code, start) {
            Some((_, "function")) => Context::Function,
            _ => Context::Name,
        },
    }
}

/// Byte offsets of `wanted` outside brackets, literals, `=>` and `==`
fn top_level_offsets(text: &str, wanted: u8) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        let b = bytes[i];
        if b == b'=' && matches!(bytes.get(i + 1), Some(b'>' | b'=')) {
            i += 2;
            continue;
        }
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
            _ if b == wanted && depth == 0 => found.push(i),
            _ => {}
        }
        i += 1;
    }
    found
}

fn strip_parameter_list(params: &str) -> String {
    let mut out = String::with_capacity(params.len());
    let mut start = 0;
    for comma in top_level_offsets(params, b',') {
        out.push_str(&strip_parameter(&params[start..comma]));
        out.push(',');
        start = comma + 1;
    }
    out.push_str(&strip_parameter(&params[start..]));
    out
}

/// `name?: Type = value` becomes `name = value`; unannotated text is kept
fn strip_parameter(param: &str) -> Cow<'_, str> {
    let Some(&colon) = top_level_offsets(param, b':').first() else {
        return Cow::Borrowed(param);
    };
    let equals = top_level_offsets(param, b'=');
    if equals.first().is_some_and(|&eq| eq < colon) {
        return Cow::Borrowed(param);
    }

    let name = param[..colon].trim_end();
    let name = name.strip_suffix('?').unwrap_or(name).trim_end();
    match equals.into_iter().find(|&eq| eq > colon) {
        Some(eq) => Cow::Owned(format!("{name} {}", &param[eq..])),
        None => {
            let trailing = &param[param.trim_end().len()..];
            Cow::Owned(format!("{name}{trailing}"))
        }
    }
}
