//! String utility functions shared by the import dialects.

/// Remove a trailing line comment introduced by `marker`.
///
/// The remainder is trimmed. Comment markers inside string literals are not
/// special-cased; import lines do not carry string literals in the dialects
/// orchard understands.
///
/// # Example
///
/// ```
/// use orchard::string_utils::strip_line_comment;
///
/// assert_eq!(strip_line_comment("use a::b; // why", "//"), "use a::b;");
/// assert_eq!(strip_line_comment("import os", "#"), "import os");
/// ```
pub fn strip_line_comment<'a>(line: &'a str, marker: &str) -> &'a str {
    match line.find(marker) {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

/// Collapse doubled separators (`a::::b` -> `a::b`) left behind when a
/// group prefix already ended in the separator.
///
/// ```
/// use orchard::string_utils::collapse_doubled_separator;
///
/// assert_eq!(collapse_doubled_separator("a::::b", "::"), "a::b");
/// assert_eq!(collapse_doubled_separator("a..b", "."), "a.b");
/// assert_eq!(collapse_doubled_separator("a::b", "::"), "a::b");
/// ```
pub fn collapse_doubled_separator(path: &str, separator: &str) -> String {
    let doubled = separator.repeat(2);
    let mut result = path.to_string();
    while result.contains(&doubled) {
        result = result.replace(&doubled, separator);
    }
    result
}

/// Drop an `as` alias from an import item: `HashMap as Map` -> `HashMap`.
///
/// ```
/// use orchard::string_utils::strip_alias;
///
/// assert_eq!(strip_alias("numpy as np"), "numpy");
/// assert_eq!(strip_alias("io"), "io");
/// ```
pub fn strip_alias(item: &str) -> &str {
    let item = item.trim();
    match item.split_once(" as ") {
        Some((path, _alias)) => path.trim(),
        None => item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment_keeps_code() {
        assert_eq!(strip_line_comment("  use std::io;  ", "//"), "use std::io;");
    }

    #[test]
    fn test_strip_line_comment_removes_trailing_comment() {
        assert_eq!(
            strip_line_comment("use a::{b, c}; // grouped", "//"),
            "use a::{b, c};"
        );
    }

    #[test]
    fn test_strip_line_comment_whole_line() {
        assert_eq!(strip_line_comment("// use a::b;", "//"), "");
    }

    #[test]
    fn test_collapse_doubled_separator_repeated() {
        assert_eq!(collapse_doubled_separator("a::::::b", "::"), "a::b");
    }

    #[test]
    fn test_collapse_doubled_separator_untouched() {
        assert_eq!(collapse_doubled_separator("std::io", "::"), "std::io");
    }

    #[test]
    fn test_strip_alias_extra_whitespace() {
        assert_eq!(strip_alias("  HashMap as Map "), "HashMap");
    }
}
