//! Import/dependency extraction from source text
//!
//! Extracts the import declarations of one file and resolves relative forms
//! against the file's own path, producing fully-qualified module paths.
//! Parsing is best-effort: malformed declarations contribute nothing and
//! never fail the call.

use tracing::debug;

use super::languages;
use crate::error::Result;
use crate::language::Language;
use crate::string_utils::collapse_doubled_separator;

/// Extract the resolved imports of one file.
///
/// `declaring_path` is the file's `/`-separated path relative to the project
/// root; its first component stands in for `crate` when resolving Rust paths.
///
/// Fails only if `language` has no import dialect, before any scanning.
///
/// ```
/// use orchard::extract_imports;
/// use orchard::language::Language;
///
/// let imports = extract_imports("use a::{b, c};", Language::Rust, "demo/src/lib.rs").unwrap();
/// assert_eq!(imports, vec!["a::b", "a::c"]);
/// ```
pub fn extract_imports(
    source: &str,
    language: Language,
    declaring_path: &str,
) -> Result<Vec<String>> {
    let language = language.ensure_supported()?;
    Ok(scan_imports(source, language, declaring_path))
}

/// Run the dialect scanner for an already-validated language.
pub(crate) fn scan_imports(source: &str, language: Language, declaring_path: &str) -> Vec<String> {
    let Some(mut scanner) = languages::scanner_for(language, declaring_path) else {
        return Vec::new();
    };

    let mut imports = Vec::new();
    for line in source.lines() {
        scanner.feed_line(line, &mut imports);
    }
    scanner.finish();

    debug!(
        file = declaring_path,
        count = imports.len(),
        "extracted imports"
    );
    imports
}

/// Resolve a raw import path against the declaring file's path.
///
/// Paths that are already absolute are returned unchanged.
pub fn resolve_import(import: &str, declaring_path: &str, language: Language) -> String {
    match language {
        Language::Rust => languages::rust::resolve_import(import, declaring_path),
        Language::Python => languages::python::resolve_module(import, declaring_path),
        _ => import.to_string(),
    }
}

/// Expand a (possibly nested) brace-group declaration into flat paths.
///
/// `a::{b, c::{d, e}}` expands to `a::b`, `a::c::d`, `a::c::e`, in
/// declaration order. A declaration with unbalanced braces expands to
/// nothing.
pub fn expand_brace_group(declaration: &str, separator: &str) -> Vec<String> {
    if !braces_balanced(declaration) {
        debug!(declaration, "skipping declaration with unbalanced braces");
        return Vec::new();
    }

    let mut paths = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in declaration.chars() {
        match ch {
            '{' => {
                let prefix = current.trim().trim_end_matches(separator).trim();
                if !prefix.is_empty() {
                    stack.push(prefix.to_string());
                }
                current.clear();
            }
            ',' => {
                emit_path(&stack, &current, separator, &mut paths);
                current.clear();
            }
            '}' => {
                emit_path(&stack, &current, separator, &mut paths);
                stack.pop();
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    emit_path(&stack, &current, separator, &mut paths);

    paths
}

fn emit_path(stack: &[String], segment: &str, separator: &str, paths: &mut Vec<String>) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }
    let mut parts: Vec<&str> = stack.iter().map(String::as_str).collect();
    parts.push(segment);
    paths.push(collapse_doubled_separator(&parts.join(separator), separator));
}

fn braces_balanced(declaration: &str) -> bool {
    let mut depth: i32 = 0;
    for ch in declaration.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
