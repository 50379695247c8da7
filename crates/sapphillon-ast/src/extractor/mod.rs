use crate::discovery_types::{FunctionMetadata, ParameterInfo, PermissionList, ReturnInfo};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

mod tags;

#[cfg(test)]
mod tests;

use tags::{classify, clean_doc_line, DocLine};

const DOC_START: &str = "/**";
const DOC_END: &str = "*/";

/// `export [async] function name(params)[: ReturnType] {` at the start of the input
static EXPORTED_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    pattern(r"\Aexport\s+(async\s+)?function\s+([A-Za-z_$][\w$]*)\s*\(([^)]*)\)(?:\s*:\s*[^{]+)?\s*\{")
});

/// Compile one of the crate's fixed patterns
pub(crate) fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid built-in pattern {re}: {e}"))
}

/// A `/** ... */` block and the byte offset right after its end marker
struct DocBlock<'a> {
    inner: &'a str,
    end: usize,
}

/// A documented function signature and body located after a block
struct FunctionMatch<'a> {
    name: &'a str,
    params: &'a str,
    body: &'a str,
    is_async: bool,
    start: usize,
    end: usize,
}

/// Extracts metadata for documented exported functions from module source text
///
/// Matching is structural: a doc block must be followed (after whitespace) by
/// an exported function signature, and the function ends at the first `}`
/// that starts a line. Anything else is skipped, never reported as an error.
pub struct DocExtractor<'a> {
    content: &'a str,
}

impl<'a> DocExtractor<'a> {
    pub fn new(content: &'a str) -> Self {
        DocExtractor { content }
    }

    /// All documented exported functions, in source order
    pub fn extract_functions(&self) -> Vec<FunctionMetadata> {
        let mut functions = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = 0;

        while let Some(block) = self.next_doc_block(cursor) {
            let Some(func) = self.match_function(block.end) else {
                cursor = block.end;
                continue;
            };
            cursor = func.end;

            if !seen.insert(func.name) {
                debug!("Skipping duplicate documented function: {}", func.name);
                continue;
            }

            let metadata = Self::build_metadata(block.inner, &func, self.line_of(func.start));
            debug!(
                "Extracted function {} (line {}, {} params, {} returns, {} permissions)",
                metadata.name,
                metadata.line,
                metadata.parameters.len(),
                metadata.returns.len(),
                metadata.permissions.len()
            );
            functions.push(metadata);
        }

        functions
    }

    fn next_doc_block(&self, from: usize) -> Option<DocBlock<'a>> {
        let rest = self.content.get(from..)?;
        let start = from + rest.find(DOC_START)? + DOC_START.len();
        let inner_len = self.content[start..].find(DOC_END)?;

        Some(DocBlock {
            inner: &self.content[start..start + inner_len],
            end: start + inner_len + DOC_END.len(),
        })
    }

    fn match_function(&self, after_block: usize) -> Option<FunctionMatch<'a>> {
        let rest = &self.content[after_block..];
        let signature_start = after_block + (rest.len() - rest.trim_start().len());
        let candidate = &self.content[signature_start..];

        let caps = EXPORTED_SIGNATURE.captures(candidate)?;
        let body_start = signature_start + caps.get(0)?.end();

        // The function's own closing brace is the first one in column 0
        let body_len = self.content[body_start..].find("\n}")?;
        let body_end = body_start + body_len;

        Some(FunctionMatch {
            name: caps.get(2)?.as_str(),
            params: caps.get(3).map_or("", |m| m.as_str()),
            body: &self.content[body_start..body_end],
            is_async: caps.get(1).is_some(),
            start: signature_start,
            end: body_end + "\n}".len(),
        })
    }

    fn line_of(&self, offset: usize) -> usize {
        self.content[..offset].matches('\n').count() + 1
    }

    fn build_metadata(doc: &str, func: &FunctionMatch<'_>, line: usize) -> FunctionMetadata {
        let mut description: Option<String> = None;
        let mut parameters = Vec::new();
        let mut returns = Vec::new();
        let mut permissions = PermissionList::new();

        for raw in doc.lines() {
            match classify(clean_doc_line(raw)) {
                DocLine::Param {
                    param_type,
                    name,
                    description,
                } => parameters.push(ParameterInfo {
                    name: name.to_string(),
                    index: parameters.len(),
                    param_type: param_type.to_string(),
                    description: description.to_string(),
                }),
                DocLine::Return {
                    return_type,
                    description,
                } => returns.push(ReturnInfo {
                    return_type: return_type.to_string(),
                    index: returns.len(),
                    description: description.to_string(),
                }),
                DocLine::Permission(grants) => permissions.extend(grants),
                DocLine::Text(text) => {
                    if description.is_none() {
                        description = Some(text.to_string());
                    }
                }
                DocLine::Other => {}
            }
        }

        FunctionMetadata {
            name: func.name.to_string(),
            description: description.unwrap_or_default(),
            parameters,
            returns,
            permissions,
            body_source: func.body.trim().to_string(),
            signature_params: func.params.trim().to_string(),
            is_async: func.is_async,
            line,
        }
    }
}
