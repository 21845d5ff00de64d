//! Language-specific import dialects
//!
//! Each dialect is a small line-oriented state machine. A scanner is created
//! per file, fed every line in order, and finished once at end of input.
//!
//! ```text
//! languages/
//! ├── mod.rs      # ImportDialect trait, scanner_for
//! ├── rust.rs     # `use` declarations with brace groups
//! └── python.rs   # `import` / `from ... import`
//! ```

pub mod python;
pub mod rust;

use crate::language::Language;

/// A per-file import scanner.
pub trait ImportDialect {
    /// Feed one raw source line; resolved imports are appended to `out`.
    fn feed_line(&mut self, line: &str, out: &mut Vec<String>);

    /// Signal end of input. A declaration still open at this point is
    /// abandoned without emitting anything.
    fn finish(&mut self) {}
}

/// Create the scanner for `language`, or `None` if it has no dialect.
pub fn scanner_for<'a>(
    language: Language,
    declaring_path: &'a str,
) -> Option<Box<dyn ImportDialect + 'a>> {
    match language {
        Language::Rust => Some(Box::new(rust::RustScanner::new(declaring_path))),
        Language::Python => Some(Box::new(python::PythonScanner::new(declaring_path))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_for_supported_languages() {
        for language in Language::SUPPORTED {
            assert!(scanner_for(*language, "pkg/mod.x").is_some());
        }
    }

    #[test]
    fn test_scanner_for_unsupported_language() {
        assert!(scanner_for(Language::Go, "main.go").is_none());
        assert!(scanner_for(Language::JavaScript, "index.js").is_none());
    }
}
