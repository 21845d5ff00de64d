//! Shared helpers for source walking

use std::path::Path;

use glob::Pattern;

/// Check if a path should be ignored based on name and ignore patterns.
pub fn should_ignore_path(path: &Path, ignore_patterns: &[String]) -> bool {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    if name == ".git" {
        return true;
    }

    ignore_patterns
        .iter()
        .any(|pattern| name == *pattern || glob_match(pattern, &name))
}

/// Match a glob pattern against a name. Invalid patterns match nothing.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Join the components of `relative` with `/`, behind an optional prefix.
///
/// ```
/// use std::path::Path;
/// use orchard::sources::relative_key;
///
/// assert_eq!(relative_key(Some("demo"), Path::new("src/lib.rs")), "demo/src/lib.rs");
/// assert_eq!(relative_key(None, Path::new("src/lib.rs")), "src/lib.rs");
/// ```
pub fn relative_key(prefix: Option<&str>, relative: &Path) -> String {
    prefix
        .into_iter()
        .map(str::to_string)
        .chain(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join("/")
}
