//! SourceWalker - loads every source file of one language under a root

use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use super::config::WalkerConfig;
use super::utils::{relative_key, should_ignore_path};
use crate::error::{OrchardError, Result};
use crate::file_utils::read_source_file;
use crate::structure::SourceFiles;

/// Walks a directory tree and collects source text keyed by relative path.
pub struct SourceWalker {
    config: WalkerConfig,
}

impl SourceWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Collect the source files under `root`.
    ///
    /// Gitignore rules and hidden files are honoured unless `show_all` is
    /// set. Symlinks are never followed. Files that cannot be read are
    /// logged and skipped; a missing or unreadable root is an error.
    pub fn collect(&self, root: &Path) -> Result<SourceFiles> {
        let metadata = std::fs::metadata(root).map_err(|e| OrchardError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(OrchardError::InvalidConfig(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        let prefix = if self.config.include_root_name {
            root_name(root)?
        } else {
            None
        };

        let respect_ignores = !self.config.show_all;
        let patterns = self.config.ignore_patterns.clone();
        let walker = WalkBuilder::new(root)
            .hidden(respect_ignores)
            .ignore(respect_ignores)
            .git_ignore(respect_ignores)
            .git_global(respect_ignores)
            .git_exclude(respect_ignores)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                entry.depth() == 0 || !should_ignore_path(entry.path(), &patterns)
            })
            .build();

        let mut files = SourceFiles::new();
        let mut skipped = 0usize;

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() || !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let name = entry.file_name().to_string_lossy();
            if !self.config.language.is_source_file(&name) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            let key = relative_key(prefix.as_deref(), relative);

            match read_source_file(path, self.config.max_file_size) {
                Ok(Some(content)) => {
                    files.insert(key, content);
                }
                Ok(None) => skipped += 1,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable source file");
                    skipped += 1;
                }
            }
        }

        info!(
            root = %root.display(),
            language = %self.config.language,
            files = files.len(),
            skipped,
            "collected source files"
        );
        Ok(files)
    }
}

/// Name of the root directory itself, resolving `.` and `..`.
fn root_name(root: &Path) -> Result<Option<String>> {
    let canonical = std::fs::canonicalize(root).map_err(|e| OrchardError::io(root, e))?;
    let name = canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    if name.is_none() {
        debug!(root = %root.display(), "root has no name; paths are unprefixed");
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("demo");
        fs::create_dir_all(root.join("src/graph")).unwrap();
        fs::write(root.join("src/lib.rs"), "use crate::graph::Graph;\n").unwrap();
        fs::write(root.join("src/graph/mod.rs"), "use super::lib;\n").unwrap();
        fs::write(root.join("README.md"), "# demo\n").unwrap();
        fs::write(root.join("build.py"), "import os\n").unwrap();
        (dir, root)
    }

    fn keys(files: &SourceFiles) -> Vec<&str> {
        files.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_collects_only_configured_language() {
        let (_dir, root) = project();
        let files = SourceWalker::new(WalkerConfig::default())
            .collect(&root)
            .unwrap();
        assert_eq!(keys(&files), vec!["demo/src/graph/mod.rs", "demo/src/lib.rs"]);
        assert_eq!(files["demo/src/lib.rs"], "use crate::graph::Graph;\n");
    }

    #[test]
    fn test_python_language() {
        let (_dir, root) = project();
        let config = WalkerConfig {
            language: Language::Python,
            ..Default::default()
        };
        let files = SourceWalker::new(config).collect(&root).unwrap();
        assert_eq!(keys(&files), vec!["demo/build.py"]);
    }

    #[test]
    fn test_without_root_name() {
        let (_dir, root) = project();
        let config = WalkerConfig {
            include_root_name: false,
            ..Default::default()
        };
        let files = SourceWalker::new(config).collect(&root).unwrap();
        assert_eq!(keys(&files), vec!["src/graph/mod.rs", "src/lib.rs"]);
    }

    #[test]
    fn test_ignore_patterns() {
        let (_dir, root) = project();
        let config = WalkerConfig {
            ignore_patterns: vec!["graph".to_string()],
            ..Default::default()
        };
        let files = SourceWalker::new(config).collect(&root).unwrap();
        assert_eq!(keys(&files), vec!["demo/src/lib.rs"]);
    }

    #[test]
    fn test_gitignore_respected_unless_show_all() {
        let (_dir, root) = project();
        fs::write(root.join(".gitignore"), "generated.rs\n").unwrap();
        fs::write(root.join("src/generated.rs"), "use a::b;\n").unwrap();

        let files = SourceWalker::new(WalkerConfig::default())
            .collect(&root)
            .unwrap();
        assert!(!files.contains_key("demo/src/generated.rs"));

        let config = WalkerConfig {
            show_all: true,
            ..Default::default()
        };
        let files = SourceWalker::new(config).collect(&root).unwrap();
        assert!(files.contains_key("demo/src/generated.rs"));
    }

    #[test]
    fn test_oversized_files_skipped() {
        let (_dir, root) = project();
        fs::write(root.join("src/big.rs"), "x".repeat(64)).unwrap();
        let config = WalkerConfig {
            max_file_size: 32,
            ..Default::default()
        };
        let files = SourceWalker::new(config).collect(&root).unwrap();
        assert!(!files.contains_key("demo/src/big.rs"));
        assert!(files.contains_key("demo/src/lib.rs"));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = SourceWalker::new(WalkerConfig::default()).collect(&dir.path().join("nope"));
        assert!(matches!(result, Err(OrchardError::Io { .. })));
    }

    #[test]
    fn test_file_root_rejected() {
        let (_dir, root) = project();
        let result = SourceWalker::new(WalkerConfig::default()).collect(&root.join("src/lib.rs"));
        assert!(matches!(result, Err(OrchardError::InvalidConfig(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed() {
        use std::os::unix::fs::symlink;

        let (_dir, root) = project();
        symlink(root.join("src/lib.rs"), root.join("src/link.rs")).unwrap();
        let files = SourceWalker::new(WalkerConfig::default())
            .collect(&root)
            .unwrap();
        assert!(!files.contains_key("demo/src/link.rs"));
    }
}
