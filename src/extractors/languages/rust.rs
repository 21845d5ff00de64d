//! Rust `use` declarations.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::ImportDialect;
use crate::extractors::imports::expand_brace_group;
use crate::string_utils::{strip_alias, strip_line_comment};

const SEPARATOR: &str = "::";
const CRATE_MARKER: &str = "crate::";
const SUPER_MARKER: &str = "super::";

/// `use`, optionally behind a visibility qualifier, followed by whitespace.
static RUST_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:pub(?:\s*\([^)]*\))?\s+)?use\s+").expect("RUST_USE regex is invalid")
});

/// Scanner state for one Rust file.
#[derive(Debug)]
pub struct RustScanner<'a> {
    declaring_path: &'a str,
    in_multi_line_import: bool,
    multi_line_buffer: String,
}

impl<'a> RustScanner<'a> {
    pub fn new(declaring_path: &'a str) -> Self {
        Self {
            declaring_path,
            in_multi_line_import: false,
            multi_line_buffer: String::new(),
        }
    }

    /// Expand a complete grouped declaration (keyword already removed).
    fn emit_group(&self, declaration: &str, out: &mut Vec<String>) {
        let declaration = declaration.trim().trim_end_matches(';');
        for path in expand_brace_group(declaration, SEPARATOR) {
            if let Some(path) = normalize_item(&path) {
                out.push(resolve_import(path, self.declaring_path));
            }
        }
    }
}

impl ImportDialect for RustScanner<'_> {
    fn feed_line(&mut self, line: &str, out: &mut Vec<String>) {
        let line = strip_line_comment(line, "//");

        if self.in_multi_line_import {
            self.multi_line_buffer.push(' ');
            self.multi_line_buffer.push_str(line);
            if line.ends_with("};") {
                self.in_multi_line_import = false;
                let declaration = std::mem::take(&mut self.multi_line_buffer);
                self.emit_group(&declaration, out);
            }
            return;
        }

        let Some(keyword) = RUST_USE.find(line) else {
            return;
        };
        let body = &line[keyword.end()..];

        match first_statement(body) {
            Some((statement, rest)) => {
                if !rest.trim().is_empty() {
                    debug!(
                        file = self.declaring_path,
                        rest = rest.trim(),
                        "ignoring text after use declaration"
                    );
                }
                if statement.contains('{') {
                    self.emit_group(statement, out);
                } else if let Some(path) = normalize_item(statement.trim()) {
                    out.push(resolve_import(path, self.declaring_path));
                }
            }
            None if body.contains('{') => {
                self.in_multi_line_import = true;
                self.multi_line_buffer = body.to_string();
            }
            None => {
                if let Some(path) = normalize_item(body.trim()) {
                    out.push(resolve_import(path, self.declaring_path));
                }
            }
        }
    }

    fn finish(&mut self) {
        if self.in_multi_line_import {
            debug!(
                file = self.declaring_path,
                "abandoning unterminated use declaration"
            );
            self.in_multi_line_import = false;
            self.multi_line_buffer.clear();
        }
    }
}

/// Split `body` at the first `;` outside any braces into the declaration
/// and whatever follows the terminator.
fn first_statement(body: &str) -> Option<(&str, &str)> {
    let mut depth: i32 = 0;
    for (i, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            ';' if depth <= 0 => return Some((&body[..i], &body[i + 1..])),
            _ => {}
        }
    }
    None
}

/// Drop aliases and fold `prefix::self` into `prefix`.
fn normalize_item(path: &str) -> Option<&str> {
    let path = strip_alias(path);
    let path = path.strip_suffix("::self").unwrap_or(path);
    if path.is_empty() || path == "self" {
        None
    } else {
        Some(path)
    }
}

/// Resolve `crate::` and `super::` against the declaring file's path.
///
/// `crate::` becomes the first path component. `super::` becomes the whole
/// directory of the declaring file, which for nested files is broader than a
/// single level up; graph node ids depend on this form.
///
/// ```
/// use orchard::extractors::languages::rust::resolve_import;
///
/// assert_eq!(resolve_import("crate::foo::bar", "mycrate/src/lib.rs"), "mycrate::foo::bar");
/// assert_eq!(resolve_import("super::foo", "mycrate/src/module/file.rs"), "mycrate::src::module::foo");
/// assert_eq!(resolve_import("std::io", "mycrate/src/lib.rs"), "std::io");
/// ```
pub fn resolve_import(import: &str, declaring_path: &str) -> String {
    if let Some(rest) = import.strip_prefix(CRATE_MARKER) {
        let root = declaring_path.split('/').next().unwrap_or_default();
        join(root, rest)
    } else if let Some(rest) = import.strip_prefix(SUPER_MARKER) {
        let components: Vec<&str> = declaring_path.split('/').collect();
        let parent = components[..components.len().saturating_sub(1)].join(SEPARATOR);
        join(&parent, rest)
    } else {
        import.to_string()
    }
}

fn join(base: &str, rest: &str) -> String {
    if base.is_empty() {
        rest.to_string()
    } else {
        format!("{base}{SEPARATOR}{rest}")
    }
}
