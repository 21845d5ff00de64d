//! Source file collection
//!
//! Walks a project directory and loads every source file of one language
//! into a [`SourceFiles`](crate::structure::SourceFiles) map keyed by
//! `/`-separated relative path, ready for import extraction.

mod config;
mod utils;
mod walker;

pub use config::WalkerConfig;
pub use utils::{glob_match, relative_key, should_ignore_path};
pub use walker::SourceWalker;
