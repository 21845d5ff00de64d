//! Serializable graph types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Import,
}

/// Navigation data carried by a node. Absent fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<NodeId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Id of the owning graph
    pub graph: String,
    pub depth: usize,
    /// Structural parent id; `"import"` for import nodes.
    pub group: Option<NodeId>,
    pub collapsed: bool,
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        kind: NodeKind,
        depth: usize,
        group: Option<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            graph: super::GRAPH_ID.to_string(),
            depth,
            group,
            collapsed: false,
            data: NodeData::default(),
        }
    }

    pub fn is_import(&self) -> bool {
        self.kind == NodeKind::Import
    }

    /// Flip the collapsed flag.
    pub fn toggle_collapse(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn children(&self) -> &[NodeId] {
        self.data.children.as_deref().unwrap_or_default()
    }

    pub fn parents(&self) -> &[NodeId] {
        self.data.parents.as_deref().unwrap_or_default()
    }
}

/// Directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Edge with a weight, for renderers that scale link strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub id: String,
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
    pub groups: Vec<Group>,
}

impl Graph {
    /// Map from node id to its position in `nodes`.
    pub(crate) fn index(&self) -> HashMap<&str, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect()
    }
}
