use super::*;

fn extract(content: &str) -> Vec<FunctionMetadata> {
    DocExtractor::new(content).extract_functions()
}

#[test]
fn test_single_exported_function() {
    let content = r#"
/**
 * Adds two numbers.
 * @param {number} a - First number
 * @param {number} b - Second number
 * @returns {number} The sum
 */
export function add(a, b) {
  return a + b;
}
"#;
    let functions = extract(content);
    assert_eq!(functions.len(), 1);

    let add = &functions[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.description, "Adds two numbers.");
    let names: Vec<&str> = add.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(add.parameters[0].param_type, "number");
    assert_eq!(add.parameters[0].description, "First number");
    assert_eq!(add.parameters[1].index, 1);
    assert_eq!(add.returns.len(), 1);
    assert_eq!(add.returns[0].return_type, "number");
    assert_eq!(add.returns[0].index, 0);
    assert_eq!(add.body_source, "return a + b;");
    assert_eq!(add.signature_params, "a, b");
    assert!(!add.is_async);
    assert_eq!(add.line, 8);
}

#[test]
fn test_functions_keep_source_order_and_independent_indices() {
    let content = r#"
/**
 * Function one.
 * @param {number} x - Input
 * @param {number} y - Input
 * @returns {number} Output
 */
export function one(x, y) {
  return x + y;
}

/**
 * Function two.
 * @returns {string} First
 * @param {string} s - Input
 * @returns {string} Second
 */
export function two(s) {
  return s;
}
"#;
    let functions = extract(content);
    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);

    assert_eq!(functions[0].parameters[1].index, 1);
    let two = &functions[1];
    assert_eq!(two.parameters.len(), 1);
    assert_eq!(two.parameters[0].index, 0);
    assert_eq!(two.returns[0].index, 0);
    assert_eq!(two.returns[0].description, "First");
    assert_eq!(two.returns[1].index, 1);
    assert_eq!(two.returns[1].description, "Second");
}

#[test]
fn test_permissions_are_collected() {
    let content = r#"
/**
 * Reads a file.
 * @param {string} path - The file path
 * @returns {string} The file content
 * @permission ["FileSystemRead:/etc", "FileSystemWrite:/tmp"]
 */
export function readFile(path) {
  return "";
}
"#;
    let functions = extract(content);
    assert_eq!(functions.len(), 1);
    let permissions = &functions[0].permissions;
    assert_eq!(permissions.len(), 2);
    assert_eq!(permissions[0].capability_type, "FileSystemRead");
    assert_eq!(permissions[0].resource, "/etc");
    assert_eq!(permissions[1].capability_type, "FileSystemWrite");
    assert_eq!(permissions[1].resource, "/tmp");
}

#[test]
fn test_async_and_typed_signature() {
    let content = r#"
/**
 * Fetches data asynchronously.
 * @param {string} id - The resource ID
 * @returns {Promise<object>} The fetched data
 */
export async function fetchData(id: string): Promise<Record<string, unknown>> {
  const res = await fetch(`/items/${id}`);
  return res.json();
}
"#;
    let functions = extract(content);
    assert_eq!(functions.len(), 1);
    let fetch_data = &functions[0];
    assert_eq!(fetch_data.name, "fetchData");
    assert!(fetch_data.is_async);
    assert_eq!(fetch_data.signature_params, "id: string");
    assert_eq!(fetch_data.returns[0].return_type, "Promise<object>");
}

#[test]
fn test_first_text_line_is_description() {
    let content = r#"
/**
 *
 * First line wins.
 * Second line is ignored.
 * @param {string} s - Input
 * Trailing text is ignored too.
 */
export function f(s) {
  return s;
}
"#;
    let functions = extract(content);
    assert_eq!(functions[0].description, "First line wins.");
}

#[test]
fn test_unicode_descriptions() {
    let content = r#"
/**
 * 2つの数値を加算します。
 * @param {number} a - 足される数
 * @returns {number} 合計
 */
export function add(a) {
  return a;
}
"#;
    let functions = extract(content);
    assert_eq!(functions[0].description, "2つの数値を加算します。");
    assert_eq!(functions[0].parameters[0].description, "足される数");
    assert_eq!(functions[0].returns[0].description, "合計");
}

#[test]
fn test_nested_braces_end_at_column_zero_brace() {
    let content = r#"
/**
 * Counts words.
 */
export function countWords(text) {
  const counts = {};
  for (const word of text.split(" ")) {
    if (word) {
      counts[word] = (counts[word] || 0) + 1;
    }
  }
  return counts;
}

export function after() {
  return 1;
}
"#;
    let functions = extract(content);
    assert_eq!(functions.len(), 1);
    let body = &functions[0].body_source;
    assert!(body.starts_with("const counts = {};"));
    assert!(body.ends_with("return counts;"));
    assert!(!body.contains("after"));
}

#[test]
fn test_undocumented_and_unexported_functions_are_skipped() {
    let content = r#"
export function undocumented(a) {
  return a;
}

/**
 * Not exported.
 */
function helper(a) {
  return a;
}

/** A block comment that documents nothing. */
const value = 3;

/**
 * Exported and documented.
 */
export function kept() {
  return value;
}
"#;
    let functions = extract(content);
    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["kept"]);
    assert!(functions[0].parameters.is_empty());
    assert!(functions[0].returns.is_empty());
    assert!(functions[0].permissions.is_empty());
}

#[test]
fn test_unterminated_block_and_body_are_tolerated() {
    assert!(extract("/** never closed\nexport function f() {\n}").is_empty());
    assert!(extract("/** doc */\nexport function f() {\n  return 1;").is_empty());
    assert!(extract("").is_empty());
}

#[test]
fn test_duplicate_names_keep_first() {
    let content = r#"
/**
 * First.
 */
export function dup() {
  return 1;
}

/**
 * Second.
 */
export function dup() {
  return 2;
}
"#;
    let functions = extract(content);
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].description, "First.");
}
