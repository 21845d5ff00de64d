//! Dependency graph statistics
//!
//! Summarises a built graph: node counts per kind, link count, and the
//! imports shared by the most files.

use std::collections::HashSet;
use std::io;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::graph::{Graph, NodeKind};

/// How many shared imports `--stats` lists by default.
pub const DEFAULT_TOP_IMPORTS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub directories: usize,
    pub files: usize,
    pub imports: usize,
    pub links: usize,
    /// Import edges, counting repeats within one file
    pub import_references: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub most_shared: Vec<SharedImport>,
}

/// An import and the number of distinct files referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedImport {
    pub import: String,
    pub files: usize,
}

impl GraphStats {
    /// Collect statistics, keeping the `top` most-referenced imports.
    ///
    /// The synthetic root is not counted as a directory.
    pub fn collect(graph: &Graph, top: usize) -> Self {
        let mut stats = GraphStats {
            links: graph.links.len(),
            ..Default::default()
        };

        for node in &graph.nodes {
            match node.kind {
                NodeKind::Directory if node.depth > 0 => stats.directories += 1,
                NodeKind::Directory => {}
                NodeKind::File => stats.files += 1,
                NodeKind::Import => {
                    stats.imports += 1;
                    stats.most_shared.push(SharedImport {
                        import: node.name.clone(),
                        files: node.parents().len(),
                    });
                }
            }
        }

        let import_ids: HashSet<&str> = graph
            .nodes
            .iter()
            .filter(|n| n.is_import())
            .map(|n| n.id.as_str())
            .collect();
        stats.import_references = graph
            .links
            .iter()
            .filter(|edge| import_ids.contains(edge.target.as_str()))
            .count();

        stats
            .most_shared
            .sort_by(|a, b| b.files.cmp(&a.files).then_with(|| a.import.cmp(&b.import)));
        stats.most_shared.truncate(top);
        stats
    }
}

pub fn print_stats(stats: &GraphStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    write_stats(stats, &mut stdout)
}

/// Write the text report to any colour-capable writer.
pub fn write_stats<W: WriteColor>(stats: &GraphStats, out: &mut W) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    writeln!(out, "Dependency Graph Statistics")?;
    out.reset()?;
    writeln!(out, "───────────────────────────")?;

    writeln!(out, "Directories:  {}", stats.directories)?;
    writeln!(out, "Files:        {}", stats.files)?;
    writeln!(
        out,
        "Imports:      {} unique, {} references",
        stats.imports, stats.import_references
    )?;
    writeln!(out, "Links:        {}", stats.links)?;

    if !stats.most_shared.is_empty() {
        writeln!(out)?;
        out.set_color(&bold)?;
        writeln!(out, "Most Shared Imports:")?;
        out.reset()?;

        let mut import_color = ColorSpec::new();
        import_color.set_fg(Some(Color::Cyan));
        let width = stats
            .most_shared
            .iter()
            .map(|s| s.import.chars().count())
            .max()
            .unwrap_or(0);

        for shared in &stats.most_shared {
            write!(out, "  ")?;
            out.set_color(&import_color)?;
            write!(out, "{:<width$}", shared.import)?;
            out.reset()?;
            writeln!(out, "  {:>4} files", shared.files)?;
        }
    }

    Ok(())
}
