//! Python `import` and `from ... import` statements.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::ImportDialect;
use crate::string_utils::{strip_alias, strip_line_comment};

const SEPARATOR: &str = ".";

static PY_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import\s+(.+)$").expect("PY_IMPORT regex is invalid"));

static PY_FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from\s+(\S+)\s+import\s+(.+)$").expect("PY_FROM_IMPORT regex is invalid")
});

/// Scanner state for one Python file.
#[derive(Debug)]
pub struct PythonScanner<'a> {
    declaring_path: &'a str,
    in_multi_line_import: bool,
    multi_line_buffer: String,
    /// Resolved module of the open parenthesised `from` statement
    pending_module: String,
}

impl<'a> PythonScanner<'a> {
    pub fn new(declaring_path: &'a str) -> Self {
        Self {
            declaring_path,
            in_multi_line_import: false,
            multi_line_buffer: String::new(),
            pending_module: String::new(),
        }
    }

    fn handle_from(&mut self, module: &str, names: &str, out: &mut Vec<String>) {
        let module = resolve_module(module, self.declaring_path);
        match names.strip_prefix('(') {
            Some(inner) => match inner.split_once(')') {
                Some((inner, _)) => emit_names(&module, inner, out),
                None => {
                    self.in_multi_line_import = true;
                    self.multi_line_buffer = inner.to_string();
                    self.pending_module = module;
                }
            },
            None => emit_names(&module, names.trim_end_matches('\\'), out),
        }
    }
}

impl ImportDialect for PythonScanner<'_> {
    fn feed_line(&mut self, line: &str, out: &mut Vec<String>) {
        let line = strip_line_comment(line, "#");

        if self.in_multi_line_import {
            self.multi_line_buffer.push(' ');
            match line.split_once(')') {
                Some((last, _)) => {
                    self.multi_line_buffer.push_str(last);
                    self.in_multi_line_import = false;
                    let names = std::mem::take(&mut self.multi_line_buffer);
                    let module = std::mem::take(&mut self.pending_module);
                    emit_names(&module, &names, out);
                }
                None => self.multi_line_buffer.push_str(line),
            }
            return;
        }

        if let Some(caps) = PY_FROM_IMPORT.captures(line) {
            let module = caps.get(1).map_or("", |m| m.as_str());
            let names = caps.get(2).map_or("", |m| m.as_str().trim());
            self.handle_from(module, names, out);
        } else if let Some(caps) = PY_IMPORT.captures(line) {
            let modules = caps.get(1).map_or("", |m| m.as_str());
            for module in modules.split(',') {
                let module = strip_alias(module);
                if !module.is_empty() {
                    out.push(resolve_module(module, self.declaring_path));
                }
            }
        }
    }

    fn finish(&mut self) {
        if self.in_multi_line_import {
            debug!(
                file = self.declaring_path,
                module = %self.pending_module,
                "abandoning unterminated from-import"
            );
            self.in_multi_line_import = false;
            self.multi_line_buffer.clear();
            self.pending_module.clear();
        }
    }
}

fn emit_names(module: &str, names: &str, out: &mut Vec<String>) {
    for name in names.split(',') {
        let name = strip_alias(name);
        if name.is_empty() {
            continue;
        }
        if module.is_empty() {
            out.push(name.to_string());
        } else {
            out.push(format!("{module}{SEPARATOR}{name}"));
        }
    }
}

/// Resolve a relative module (leading dots) against the declaring file.
///
/// One dot is the file's own package (its directory); each further dot
/// drops one more trailing component. Absolute modules are unchanged.
///
/// ```
/// use orchard::extractors::languages::python::resolve_module;
///
/// assert_eq!(resolve_module(".models", "app/api/views.py"), "app.api.models");
/// assert_eq!(resolve_module("..core", "app/api/views.py"), "app.core");
/// assert_eq!(resolve_module("os.path", "app/api/views.py"), "os.path");
/// ```
pub fn resolve_module(module: &str, declaring_path: &str) -> String {
    let rest = module.trim_start_matches('.');
    let dots = module.len() - rest.len();
    if dots == 0 {
        return module.to_string();
    }

    let components: Vec<&str> = declaring_path.split('/').collect();
    let directory = &components[..components.len().saturating_sub(1)];
    let keep = directory.len().saturating_sub(dots - 1);
    let base = directory[..keep].join(SEPARATOR);

    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => base,
        (false, false) => format!("{base}{SEPARATOR}{rest}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str, path: &str) -> Vec<String> {
        let mut scanner = PythonScanner::new(path);
        let mut out = Vec::new();
        for line in source.lines() {
            scanner.feed_line(line, &mut out);
        }
        scanner.finish();
        out
    }

    #[test]
    fn test_plain_imports() {
        let source = "import os\nimport numpy as np, sys\n";
        assert_eq!(scan(source, "app/main.py"), vec!["os", "numpy", "sys"]);
    }

    #[test]
    fn test_from_imports() {
        let source = "from pathlib import Path\nfrom collections import defaultdict as dd, Counter\n";
        assert_eq!(
            scan(source, "app/main.py"),
            vec!["pathlib.Path", "collections.defaultdict", "collections.Counter"]
        );
    }

    #[test]
    fn test_relative_imports() {
        let source = "from .models import User\nfrom . import utils\nfrom ..core import db\n";
        assert_eq!(
            scan(source, "app/api/views.py"),
            vec!["app.api.models.User", "app.api.utils", "app.core.db"]
        );
    }

    #[test]
    fn test_parenthesised_multi_line() {
        let source = "from typing import (\n    Any,\n    Optional,  # maybe\n)\nimport json\n";
        assert_eq!(
            scan(source, "app/main.py"),
            vec!["typing.Any", "typing.Optional", "json"]
        );
    }

    #[test]
    fn test_parenthesised_single_line() {
        assert_eq!(
            scan("from a import (b, c)", "x.py"),
            vec!["a.b", "a.c"]
        );
    }

    #[test]
    fn test_star_import() {
        assert_eq!(scan("from os.path import *", "x.py"), vec!["os.path.*"]);
    }

    #[test]
    fn test_comments_and_code_ignored() {
        let source = "# import os\nimported = 1\nprint('import x')\n";
        assert!(scan(source, "x.py").is_empty());
    }

    #[test]
    fn test_unterminated_parenthesised_import() {
        let source = "import os\nfrom a import (\n    b,\n";
        assert_eq!(scan(source, "x.py"), vec!["os"]);
    }

    #[test]
    fn test_resolve_beyond_root() {
        assert_eq!(resolve_module("...x", "app/views.py"), "x");
        assert_eq!(resolve_module(".", "app/views.py"), "app");
    }
}
