//! Dependency graph built from an import structure
//!
//! This module turns an [`ImportStructure`](crate::structure::ImportStructure)
//! into nodes and directed edges for a force-directed renderer, and provides
//! the collapse/expand operations a renderer drives interactively.
//!
//! - `builder`: `from_import_structure`
//! - `collapse`: visibility toggles and navigation helpers

mod builder;
mod collapse;
mod types;

pub use builder::{GRAPH_ID, IMPORT_GROUP, ROOT_ID, from_import_structure};
pub use collapse::{
    collapse_all_but_root, collapse_imports, gather_children_for_parent,
    gather_descendants_for_parent, get_node_by_id, toggle_children_for_parent,
    toggle_descendants_for_parent,
};
pub use types::{Edge, Graph, Group, Node, NodeData, NodeKind, WeightedEdge};

/// Node identifier. Unique within a graph.
pub type NodeId = String;
