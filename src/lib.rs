//! Orchard - import extraction and dependency graphs for source trees
//!
//! Orchard reads the import declarations of every source file in a project,
//! resolves relative forms against each file's own path, and arranges the
//! results as a directory-shaped [`ImportStructure`]. The structure can be
//! printed as a tree, serialised as JSON, or turned into a node/edge
//! [`Graph`] for a force-directed renderer.

pub mod error;
pub mod extractors;
pub mod file_utils;
pub mod graph;
pub mod language;
pub mod output;
pub mod sources;
pub mod stats;
pub mod string_utils;
pub mod structure;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::{OrchardError, Result};
pub use extractors::ExtractionConfig;
pub use extractors::imports::{extract_imports, resolve_import};
pub use graph::{
    Edge, Graph, Node, NodeKind, collapse_all_but_root, collapse_imports, from_import_structure,
    toggle_children_for_parent, toggle_descendants_for_parent,
};
pub use language::Language;
pub use output::{OutputConfig, StructureFormatter, print_json};
pub use sources::{SourceWalker, WalkerConfig};
pub use stats::{GraphStats, print_stats};
pub use structure::{ImportStructure, SourceFiles, StructureEntry, extract_structure};
