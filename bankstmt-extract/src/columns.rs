//! Whitespace-run column splitting for layout-preserving text.

use regex::Regex;

/// Split one line into column values on runs of two or more whitespace
/// characters.
///
/// Fixed-width statement layouts pad columns with multiple spaces, while
/// single spaces inside a field ("Grocery Store") must survive. There is no
/// column-count guarantee; a line with no multi-space run comes back as a
/// single untrimmed element.
pub fn split_columns(line: &str) -> Vec<String> {
    let separator = Regex::new(r"\s{2,}").expect("separator pattern is valid");
    separator.split(line).map(str::to_string).collect()
}
