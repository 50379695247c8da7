//! Byte-level walking of source text that steps over string literals and comments

/// Index just past the string literal or comment starting at `i`, if one starts there
pub(crate) fn skip_non_code(bytes: &[u8], i: usize) -> Option<usize> {
    match *bytes.get(i)? {
        quote @ (b'"' | b'\'' | b'`') => Some(skip_quoted(bytes, i, quote)),
        b'/' => match *bytes.get(i + 1)? {
            b'/' => Some(
                bytes[i + 2..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |p| i + 2 + p),
            ),
            b'*' => Some(
                bytes[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map_or(bytes.len(), |p| i + 2 + p + 2),
            ),
            _ => None,
        },
        _ => None,
    }
}

fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i,
            _ if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index of the `)` closing the `(` at `open`
pub(crate) fn find_matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (bytes[i] == b')').then_some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Apply `f` to every stretch of code between literals and comments
pub(crate) fn map_code_segments(code: &str, mut f: impl FnMut(&str) -> String) -> String {
    let bytes = code.as_bytes();
    let mut out = String::with_capacity(code.len());
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match skip_non_code(bytes, i) {
            Some(end) => {
                out.push_str(&f(&code[segment_start..i]));
                out.push_str(&code[i..end]);
                segment_start = end;
                i = end;
            }
            None => i += 1,
        }
    }

    out.push_str(&f(&code[segment_start..]));
    out
}

#[cfg(test)]
mod tests {
    use crate::scan::*;

    #[test]
    fn test_skip_non_code() {
        let code = br#"x = "a \" (b" + 'c' // note ( here
/* block ( */ y"#;
        assert_eq!(skip_non_code(code, 0), None);
        let after_string = skip_non_code(code, 4).unwrap();
        assert_eq!(&code[after_string..after_string + 3], b" + ");
        let comment = code.iter().position(|&b| b == b'/').unwrap();
        assert_eq!(code[skip_non_code(code, comment).unwrap()], b'\n');
    }

    #[test]
    fn test_find_matching_paren() {
        let code = b"f(a, (b), \")\", [c]) + 1";
        assert_eq!(find_matching_paren(code, 1), Some(18));
        assert_eq!(find_matching_paren(b"f(a", 1), None);
        assert_eq!(find_matching_paren(b"(a]", 0), None);
    }

    #[test]
    fn test_map_code_segments_leaves_literals_alone() {
        let code = r#"let a = "x as y"; // as z
let b = c as D;"#;
        let mapped = map_code_segments(code, |segment| segment.replace("as", "AS"));
        assert_eq!(
            mapped,
            r#"let a = "x as y"; // as z
let b = c AS D;"#
        );
    }
}
