//! Tree formatter for import structures
//!
//! Renders an [`ImportStructure`] the way `tree` renders a directory, with
//! each file's resolved imports listed beneath it.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::structure::{ImportStructure, StructureEntry};

use super::config::OutputConfig;

/// Totals reported in the footer line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub directories: usize,
    pub files: usize,
    pub imports: usize,
}

impl TreeCounts {
    fn add(&mut self, other: TreeCounts) {
        self.directories += other.directories;
        self.files += other.files;
        self.imports += other.imports;
    }
}

/// Formatter for the tree view.
pub struct StructureFormatter {
    config: OutputConfig,
}

impl StructureFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render to a plain string, without colour.
    pub fn format(&self, structure: &ImportStructure, root_label: &str) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing to a Vec cannot fail.
        let _ = self.render(structure, root_label, &mut out);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Print to stdout, coloured when `use_color` is set.
    pub fn print(&self, structure: &ImportStructure, root_label: &str) -> io::Result<TreeCounts> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.render(structure, root_label, &mut stdout)
    }

    /// Write the tree and footer to any colour-capable writer.
    pub fn render<W: WriteColor>(
        &self,
        structure: &ImportStructure,
        root_label: &str,
        out: &mut W,
    ) -> io::Result<TreeCounts> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        writeln!(out, "{}", root_label)?;
        out.reset()?;

        let counts = self.render_entries(structure, out, "")?;

        writeln!(out)?;
        writeln!(
            out,
            "{} directories, {} files, {} imports",
            counts.directories, counts.files, counts.imports
        )?;
        Ok(counts)
    }

    fn render_entries<W: WriteColor>(
        &self,
        structure: &ImportStructure,
        out: &mut W,
        prefix: &str,
    ) -> io::Result<TreeCounts> {
        let mut counts = TreeCounts::default();
        let len = structure.len();

        for (i, (name, entry)) in structure.iter().enumerate() {
            let is_last = i + 1 == len;
            let connector = if is_last { "└── " } else { "├── " };
            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };

            write!(out, "{}{}", prefix, connector)?;
            match entry {
                StructureEntry::Directory(sub) => {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                    writeln!(out, "{}", name)?;
                    out.reset()?;
                    counts.directories += 1;
                    counts.add(self.render_entries(sub, out, &child_prefix)?);
                }
                StructureEntry::Imports(imports) => {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
                    write!(out, "{}", name)?;
                    out.reset()?;
                    writeln!(out)?;
                    counts.files += 1;
                    counts.imports += imports.len();
                    if self.config.show_imports {
                        self.render_imports(imports, out, &child_prefix)?;
                    }
                }
            }
        }

        Ok(counts)
    }

    fn render_imports<W: WriteColor>(
        &self,
        imports: &[String],
        out: &mut W,
        prefix: &str,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        for import in imports {
            write!(out, "{}→ ", prefix)?;
            out.set_color(&spec)?;
            write!(out, "{}", import)?;
            out.reset()?;
            writeln!(out)?;
        }
        Ok(())
    }
}
