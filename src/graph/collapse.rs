//! Collapse/expand operations and navigation helpers
//!
//! Every operation takes the graph by reference and returns a new graph;
//! only `collapsed` flags change, never nodes or edges.

use std::collections::{HashMap, HashSet};

use super::types::{Graph, Node};
use crate::error::{OrchardError, Result};

pub fn get_node_by_id<'g>(graph: &'g Graph, id: &str) -> Option<&'g Node> {
    graph.nodes.iter().find(|node| node.id == id)
}

/// Immediate children of `parent_id`, in listed order.
pub fn gather_children_for_parent<'g>(graph: &'g Graph, parent_id: &str) -> Result<Vec<&'g Node>> {
    let index = graph.index();
    let parent = lookup(&index, parent_id)?;
    let children = child_indices(graph, &index, parent)?;
    Ok(children.into_iter().map(|i| &graph.nodes[i]).collect())
}

/// Every node reachable from `parent_id` through `children`, depth first.
///
/// Each node appears once; the parent itself is never included, even when a
/// cycle leads back to it.
pub fn gather_descendants_for_parent<'g>(
    graph: &'g Graph,
    parent_id: &str,
) -> Result<Vec<&'g Node>> {
    let index = graph.index();
    let parent = lookup(&index, parent_id)?;
    let descendants = descendant_indices(graph, &index, parent)?;
    Ok(descendants.into_iter().map(|i| &graph.nodes[i]).collect())
}

/// Flip `collapsed` on every node except the root (depth 0).
pub fn collapse_all_but_root(graph: &Graph) -> Graph {
    let mut next = graph.clone();
    for node in next.nodes.iter_mut().filter(|node| node.depth != 0) {
        node.toggle_collapse();
    }
    next
}

/// Collapse every import node.
pub fn collapse_imports(graph: &Graph) -> Graph {
    let mut next = graph.clone();
    for node in next.nodes.iter_mut().filter(|node| node.is_import()) {
        node.collapsed = true;
    }
    next
}

/// Flip `collapsed` on the immediate children of `parent_id`.
pub fn toggle_children_for_parent(graph: &Graph, parent_id: &str) -> Result<Graph> {
    let index = graph.index();
    let parent = lookup(&index, parent_id)?;
    let targets = child_indices(graph, &index, parent)?;
    Ok(toggle(graph, &targets))
}

/// Flip `collapsed` on every descendant of `parent_id`, each at most once.
pub fn toggle_descendants_for_parent(graph: &Graph, parent_id: &str) -> Result<Graph> {
    let index = graph.index();
    let parent = lookup(&index, parent_id)?;
    let targets = descendant_indices(graph, &index, parent)?;
    Ok(toggle(graph, &targets))
}

fn toggle(graph: &Graph, targets: &[usize]) -> Graph {
    let mut next = graph.clone();
    for &i in targets {
        next.nodes[i].toggle_collapse();
    }
    next
}

fn lookup(index: &HashMap<&str, usize>, id: &str) -> Result<usize> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| OrchardError::NodeNotFound(id.to_string()))
}

fn child_indices(graph: &Graph, index: &HashMap<&str, usize>, parent: usize) -> Result<Vec<usize>> {
    let node = &graph.nodes[parent];
    node.children()
        .iter()
        .map(|child| {
            index
                .get(child.as_str())
                .copied()
                .ok_or_else(|| OrchardError::DanglingReference {
                    parent: node.id.clone(),
                    child: child.clone(),
                })
        })
        .collect()
}

fn descendant_indices(
    graph: &Graph,
    index: &HashMap<&str, usize>,
    parent: usize,
) -> Result<Vec<usize>> {
    let mut visited = HashSet::from([parent]);
    let mut out = Vec::new();
    visit(graph, index, parent, &mut visited, &mut out)?;
    Ok(out)
}

fn visit(
    graph: &Graph,
    index: &HashMap<&str, usize>,
    node: usize,
    visited: &mut HashSet<usize>,
    out: &mut Vec<usize>,
) -> Result<()> {
    for child in child_indices(graph, index, node)? {
        if visited.insert(child) {
            out.push(child);
            visit(graph, index, child, visited, out)?;
        }
    }
    Ok(())
}
