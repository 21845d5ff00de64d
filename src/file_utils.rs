//! Shared file reading utilities for source collection
//!
//! Reading a source file is bounded by a size limit; size strings from the
//! command line use K/M/G suffixes.

use std::path::Path;

use tracing::debug;

use crate::error::{OrchardError, Result};

/// Default maximum file size for extraction (1MB).
/// Files larger than this are skipped to prevent excessive memory usage.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// Read a source file if it is within `max_file_size` bytes.
///
/// Returns `Ok(None)` for files over the limit. Files that cannot be read,
/// including those that are not valid UTF-8, are errors.
pub fn read_source_file(path: &Path, max_file_size: u64) -> Result<Option<String>> {
    let metadata = path.metadata().map_err(|e| OrchardError::io(path, e))?;
    if metadata.len() > max_file_size {
        debug!(
            path = %path.display(),
            size = metadata.len(),
            limit = max_file_size,
            "skipping file over size limit"
        );
        return Ok(None);
    }

    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| OrchardError::io(path, e))
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
///
/// ```
/// use orchard::file_utils::parse_file_size;
///
/// assert_eq!(parse_file_size("512").unwrap(), 512);
/// assert_eq!(parse_file_size("2k").unwrap(), 2048);
/// assert!(parse_file_size("lots").is_err());
/// ```
pub fn parse_file_size(s: &str) -> Result<u64> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| OrchardError::InvalidConfig(format!("invalid file size: {s}")))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| OrchardError::InvalidConfig(format!("file size too large: {s}")))
}
