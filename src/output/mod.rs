//! Structure formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Coloured tree view of an import structure
//! - `json` - JSON output for structures, graphs, and statistics

mod config;
mod json;
mod tree;

pub use config::OutputConfig;
pub use json::print_json;
pub use tree::{StructureFormatter, TreeCounts};
