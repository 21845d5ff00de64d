//! Nested directory → file → imports structure
//!
//! An [`ImportStructure`] mirrors the directory layout of the extracted
//! files: inner mappings are directories, leaves are the resolved import
//! lists of single files. It is the hand-off point between extraction and
//! graph construction and serialises as nested JSON objects whose leaves are
//! string arrays.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::extractors::ExtractionConfig;
use crate::extractors::imports::scan_imports;
use crate::language::Language;

/// File contents keyed by `/`-separated path relative to the project root.
pub type SourceFiles = BTreeMap<String, String>;

/// One value in an [`ImportStructure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureEntry {
    /// Resolved imports of a single file
    Imports(Vec<String>),
    /// A subdirectory
    Directory(ImportStructure),
}

/// Ordered mapping from path segment to [`StructureEntry`].
///
/// Keys keep their first-insertion order, which is also the order the graph
/// builder visits them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStructure {
    entries: Vec<(String, StructureEntry)>,
}

impl ImportStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&StructureEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructureEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert or replace `key`, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, entry: StructureEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Store `imports` at a `/`-separated file path, creating directories
    /// on the way. A file sitting where a directory is needed is replaced.
    pub fn insert_path(&mut self, path: &str, imports: Vec<String>) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.insert_segments(&segments, imports);
    }

    fn insert_segments(&mut self, segments: &[&str], imports: Vec<String>) {
        match segments {
            [] => {}
            [file] => self.insert(*file, StructureEntry::Imports(imports)),
            [directory, rest @ ..] => {
                let idx = match self.entries.iter().position(|(k, _)| k == directory) {
                    Some(idx) => idx,
                    None => {
                        self.entries.push((
                            directory.to_string(),
                            StructureEntry::Directory(ImportStructure::new()),
                        ));
                        self.entries.len() - 1
                    }
                };
                let slot = &mut self.entries[idx].1;
                match slot {
                    StructureEntry::Directory(sub) => sub.insert_segments(rest, imports),
                    StructureEntry::Imports(_) => {
                        let mut sub = ImportStructure::new();
                        sub.insert_segments(rest, imports);
                        *slot = StructureEntry::Directory(sub);
                    }
                }
            }
        }
    }

    /// Number of file leaves, recursively.
    pub fn file_count(&self) -> usize {
        self.iter()
            .map(|(_, entry)| match entry {
                StructureEntry::Imports(_) => 1,
                StructureEntry::Directory(dir) => dir.file_count(),
            })
            .sum()
    }
}

impl Serialize for ImportStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Either a well-formed entry or anything else, so one bad value does not
/// reject the whole document.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeEntry {
    Entry(StructureEntry),
    Malformed(IgnoredAny),
}

struct ImportStructureVisitor;

impl<'de> Visitor<'de> for ImportStructureVisitor {
    type Value = ImportStructure;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of directories and import lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut structure = ImportStructure::new();
        while let Some(key) = access.next_key::<String>()? {
            match access.next_value::<MaybeEntry>()? {
                MaybeEntry::Entry(entry) => structure.insert(key, entry),
                MaybeEntry::Malformed(_) => {
                    warn!(key = %key, "skipping structure entry that is neither a directory nor an import list");
                }
            }
        }
        Ok(structure)
    }
}

impl<'de> Deserialize<'de> for ImportStructure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ImportStructureVisitor)
    }
}

/// Parse an ImportStructure from its JSON form.
pub fn from_json(json: &str) -> Result<ImportStructure> {
    Ok(serde_json::from_str(json)?)
}

/// Extract every file and fold the results into an [`ImportStructure`].
///
/// The language is validated before any file is scanned. Files are
/// extracted independently (in parallel per `config.parallel_workers`) and
/// inserted in path order.
pub fn extract_structure(files: &SourceFiles, config: &ExtractionConfig) -> Result<ImportStructure> {
    let language = config.language.ensure_supported()?;

    let entries: Vec<(&str, &str)> = files
        .iter()
        .map(|(path, source)| (path.as_str(), source.as_str()))
        .collect();

    let results: Vec<(&str, Vec<String>)> = if config.parallel_workers == 1 {
        entries
            .iter()
            .map(|entry| extract_entry(entry, language))
            .collect()
    } else if config.parallel_workers == 0 {
        entries
            .par_iter()
            .map(|entry| extract_entry(entry, language))
            .collect()
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_workers)
            .build()
        {
            Ok(pool) => pool.install(|| {
                entries
                    .par_iter()
                    .map(|entry| extract_entry(entry, language))
                    .collect()
            }),
            Err(e) => {
                warn!(error = %e, "falling back to the global thread pool");
                entries
                    .par_iter()
                    .map(|entry| extract_entry(entry, language))
                    .collect()
            }
        }
    };

    let mut structure = ImportStructure::new();
    let mut import_count = 0;
    for (path, imports) in results {
        import_count += imports.len();
        structure.insert_path(path, imports);
    }

    info!(
        language = %language,
        files = files.len(),
        imports = import_count,
        "built import structure"
    );
    Ok(structure)
}

fn extract_entry<'f>(entry: &(&'f str, &'f str), language: Language) -> (&'f str, Vec<String>) {
    let (path, source) = *entry;
    (path, scan_imports(source, language, path))
}
