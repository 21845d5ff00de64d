//! Test utilities for building throwaway source trees.
//!
//! Only compiled with the `test-utils` feature (tests and benchmarks).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A temporary project directory, removed when dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a new temporary directory with `git init` run in it.
    pub fn with_git() -> Self {
        let repo = Self::new();
        Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(repo.path())
            .output()
            .expect("Failed to init git");
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn add_files(&self, files: &[(&str, &str)]) {
        for (path, content) in files {
            self.add_file(path, content);
        }
    }

    /// Lay out a small Rust crate named `name` whose modules import each
    /// other through `crate::`, `super::` and grouped `use` declarations.
    /// Returns the crate directory.
    pub fn add_rust_crate(&self, name: &str) -> PathBuf {
        self.add_files(&[
            (
                format!("{name}/src/lib.rs").as_str(),
                "pub mod graph;\npub mod parser;\n\nuse std::collections::HashMap;\n",
            ),
            (
                format!("{name}/src/graph/mod.rs").as_str(),
                "use crate::parser::{Token, parse};\nuse std::{\n    fmt,\n    io::{self, Write},\n};\n",
            ),
            (
                format!("{name}/src/graph/edge.rs").as_str(),
                "use super::Node;\nuse std::fmt;\n",
            ),
            (
                format!("{name}/src/parser.rs").as_str(),
                "use regex::Regex;\nuse std::fmt;\n",
            ),
        ]);
        self.path().join(name)
    }

    /// Generate `count` Rust files, each with a few grouped imports.
    pub fn add_many_rust_files(&self, name: &str, count: usize) -> PathBuf {
        for i in 0..count {
            self.add_file(
                &format!("{name}/src/module_{:03}/file_{i}.rs", i % 10),
                &format!(
                    "use crate::module_{:03}::{{Item{i}, Other}};\nuse std::{{fmt, io::{{Read, Write}}}};\nuse super::shared;\n\nfn f{i}() {{}}\n",
                    (i + 1) % 10
                ),
            );
        }
        self.path().join(name)
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
