//! Import extraction
//!
//! Turns the text of one source file into the list of fully-resolved module
//! paths it imports.
//!
//! # Architecture
//!
//! - **Dialects**: one line-oriented scanner per language in `languages/`
//! - **imports**: the entry point, path resolution, and brace-group expansion
//!
//! Each file is scanned independently and the scanners hold no state outside
//! a single call, so callers may extract many files in parallel.

pub mod imports;
pub mod languages;

use crate::error::Result;
use crate::language::Language;

/// Configuration for an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Language whose import dialect is used for every file
    pub language: Language,
    /// Number of parallel workers for extraction.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl ExtractionConfig {
    /// Create a config for `language`, rejecting languages without a dialect.
    pub fn new(language: Language) -> Result<Self> {
        Ok(Self {
            language: language.ensure_supported()?,
            parallel_workers: 0,
        })
    }

    pub fn with_parallel_workers(mut self, workers: usize) -> Self {
        self.parallel_workers = workers;
        self
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            language: Language::Rust,
            parallel_workers: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrchardError;

    #[test]
    fn test_extraction_config_new_supported() {
        let config = ExtractionConfig::new(Language::Python).unwrap();
        assert_eq!(config.language, Language::Python);
        assert_eq!(config.parallel_workers, 0);
    }

    #[test]
    fn test_extraction_config_new_rejects_unsupported() {
        let result = ExtractionConfig::new(Language::TypeScript);
        assert!(matches!(
            result,
            Err(OrchardError::UnsupportedLanguage(name)) if name == "TypeScript"
        ));
    }

    #[test]
    fn test_extraction_config_workers() {
        let config = ExtractionConfig::default().with_parallel_workers(4);
        assert_eq!(config.language, Language::Rust);
        assert_eq!(config.parallel_workers, 4);
    }
}
