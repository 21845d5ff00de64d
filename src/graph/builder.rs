//! Graph construction from an [`ImportStructure`]

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::NodeId;
use super::types::{Edge, Graph, Node, NodeKind};
use crate::language::Language;
use crate::structure::{ImportStructure, StructureEntry};

/// Id of every graph produced by the builder.
pub const GRAPH_ID: &str = "graph";
/// Id of the synthetic root node.
pub const ROOT_ID: &str = "root";
/// Group shared by all import nodes; also the import id prefix.
pub const IMPORT_GROUP: &str = "import";

/// Build the dependency graph of an import structure.
///
/// Directories and files become nodes whose ids chain the path segments with
/// `.`; every resolved import becomes one shared node `import.<path>`, no
/// matter how many files reference it. Depth-1 nodes hang off a synthetic
/// `root` node.
///
/// ```
/// use orchard::graph::from_import_structure;
/// use orchard::language::Language;
/// use orchard::structure::from_json;
///
/// let structure = from_json(r#"{"demo": {"lib.rs": ["std::io"]}}"#).unwrap();
/// let graph = from_import_structure(&structure, Language::Rust);
/// assert_eq!(graph.nodes.len(), 4);
/// assert_eq!(graph.links.len(), 3);
/// ```
pub fn from_import_structure(structure: &ImportStructure, language: Language) -> Graph {
    let mut acc = GraphAccumulator::new(language);
    acc.register(Node::new(ROOT_ID, ROOT_ID, NodeKind::Directory, 0, None));
    acc.walk(structure, None, 1);

    info!(
        nodes = acc.nodes.len(),
        links = acc.links.len(),
        "built dependency graph"
    );

    Graph {
        id: GRAPH_ID.to_string(),
        nodes: acc.nodes,
        links: acc.links,
        groups: Vec::new(),
    }
}

/// Nodes and edges gathered during one traversal.
struct GraphAccumulator {
    language: Language,
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    links: Vec<Edge>,
}

impl GraphAccumulator {
    fn new(language: Language) -> Self {
        Self {
            language,
            nodes: Vec::new(),
            index: HashMap::new(),
            links: Vec::new(),
        }
    }

    /// Add `node` unless its id is taken; returns the index of the stored node.
    fn register(&mut self, mut node: Node) -> usize {
        if let Some(&idx) = self.index.get(&node.id) {
            if !self.nodes[idx].is_import() {
                debug!(id = %node.id, "node id already registered");
            }
            return idx;
        }
        if node.is_import() {
            node.data.parents = Some(Vec::new());
        } else {
            node.data.children = Some(Vec::new());
        }
        let idx = self.nodes.len();
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        idx
    }

    fn link(&mut self, source: &str, target: &str) {
        self.links.push(Edge::new(source, target));
        if let Some(&idx) = self.index.get(source) {
            push_unique(self.nodes[idx].data.children.get_or_insert_default(), target);
        }
        if let Some(&idx) = self.index.get(target) {
            if self.nodes[idx].is_import() {
                push_unique(self.nodes[idx].data.parents.get_or_insert_default(), source);
            }
        }
    }

    fn walk(&mut self, structure: &ImportStructure, parent: Option<&str>, depth: usize) {
        for (key, entry) in structure.iter() {
            let kind = if self.language.is_source_file(key) {
                NodeKind::File
            } else {
                NodeKind::Directory
            };
            let node_id = match parent {
                Some(parent) => format!("{parent}.{key}"),
                None => key.to_string(),
            };

            // A top-level `root` entry merges into the synthetic root node.
            if node_id == ROOT_ID {
                warn!(key, "top-level entry shares the root node id; merging into root");
            } else {
                self.register(Node::new(
                    node_id.as_str(),
                    key,
                    kind,
                    depth,
                    parent.map(str::to_string),
                ));
                self.link(parent.unwrap_or(ROOT_ID), &node_id);
            }

            match entry {
                StructureEntry::Directory(sub) => self.walk(sub, Some(&node_id), depth + 1),
                StructureEntry::Imports(imports) => {
                    for path in imports {
                        let import_id = format!("{IMPORT_GROUP}.{path}");
                        self.register(Node::new(
                            import_id.as_str(),
                            path.as_str(),
                            NodeKind::Import,
                            depth + 1,
                            Some(IMPORT_GROUP.to_string()),
                        ));
                        self.link(&node_id, &import_id);
                    }
                }
            }
        }
    }
}

fn push_unique(ids: &mut Vec<NodeId>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}
