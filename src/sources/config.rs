//! Configuration for the source walker

use crate::file_utils::DEFAULT_MAX_FILE_SIZE;
use crate::language::Language;

/// Configuration for source collection.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Include hidden and gitignored files
    pub show_all: bool,
    /// Glob patterns matched against entry names; matches are skipped
    pub ignore_patterns: Vec<String>,
    /// Prefix every path with the root directory's own name, so the first
    /// path component names the crate or package
    pub include_root_name: bool,
    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,
    /// Only files of this language are collected
    pub language: Language,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            show_all: false,
            ignore_patterns: Vec::new(),
            include_root_name: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            language: Language::Rust,
        }
    }
}
