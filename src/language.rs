//! Source language selection and classification
//!
//! The language is the one piece of configuration the import parser needs:
//! it picks the per-line dialect and the file naming convention used when
//! walking sources and building the graph.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::OrchardError;

/// Languages orchard recognises.
///
/// Only some of them have an import dialect; see [`Language::supports_imports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
}

impl Language {
    /// Languages with an import dialect.
    pub const SUPPORTED: &'static [Language] = &[Language::Rust, Language::Python];

    /// Detect language from a file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use orchard::language::Language;
    ///
    /// assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
    /// assert_eq!(Language::from_extension("PY"), Some(Language::Python));
    /// assert_eq!(Language::from_extension("unknown"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "rs" => Some(Language::Rust),
            "py" | "pyw" | "pyi" => Some(Language::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
            "go" => Some(Language::Go),
            _ => None,
        }
    }

    /// Detect language from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Returns the human-readable name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Rust => "Rust",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Go => "Go",
        }
    }

    /// Whether an import dialect exists for this language.
    pub fn supports_imports(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Whether a file name (not a full path) follows this language's
    /// source-file naming convention.
    ///
    /// ```
    /// use orchard::language::Language;
    ///
    /// assert!(Language::Rust.is_source_file("lib.rs"));
    /// assert!(!Language::Rust.is_source_file("src"));
    /// assert!(Language::Python.is_source_file("views.py"));
    /// ```
    pub fn is_source_file(&self, name: &str) -> bool {
        Self::from_path(Path::new(name)) == Some(*self)
    }

    /// Reject languages without an import dialect.
    pub fn ensure_supported(self) -> Result<Self, OrchardError> {
        if self.supports_imports() {
            Ok(self)
        } else {
            Err(OrchardError::UnsupportedLanguage(self.name().to_string()))
        }
    }
}

impl FromStr for Language {
    type Err = OrchardError;

    /// Parse a language selector such as `rust` or `Python`.
    ///
    /// Unknown names are configuration errors. Known languages without an
    /// import dialect parse successfully and are rejected later by
    /// [`Language::ensure_supported`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rust" | "rs" => Ok(Language::Rust),
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "go" | "golang" => Ok(Language::Go),
            other => Err(OrchardError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_basic() {
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("js"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("ts"), Some(Language::TypeScript));
        assert_eq!(Language::from_extension("go"), Some(Language::Go));
    }

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(Language::from_extension("RS"), Some(Language::Rust));
        assert_eq!(Language::from_extension("Py"), Some(Language::Python));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path(Path::new("src/main.rs")),
            Some(Language::Rust)
        );
        assert_eq!(
            Language::from_path(Path::new("app/views.py")),
            Some(Language::Python)
        );
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_from_str_known_names() {
        assert_eq!("rust".parse::<Language>().unwrap(), Language::Rust);
        assert_eq!(" Python ".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("golang".parse::<Language>().unwrap(), Language::Go);
    }

    #[test]
    fn test_from_str_unknown_is_config_error() {
        let err = "cobol".parse::<Language>().unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(err, OrchardError::UnsupportedLanguage(name) if name == "cobol"));
    }

    #[test]
    fn test_ensure_supported() {
        assert!(Language::Rust.ensure_supported().is_ok());
        assert!(Language::Python.ensure_supported().is_ok());
        assert!(matches!(
            Language::Go.ensure_supported(),
            Err(OrchardError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_is_source_file() {
        assert!(Language::Rust.is_source_file("main.rs"));
        assert!(Language::Rust.is_source_file("MAIN.RS"));
        assert!(!Language::Rust.is_source_file("main.py"));
        assert!(!Language::Rust.is_source_file("rs"));
        assert!(!Language::Python.is_source_file("pkg"));
    }
}
