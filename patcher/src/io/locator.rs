//! Locate bundle files by name prefix or by content.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, error, info};

/// List regular files in `dir` whose names end with `extension`, sorted by name.
fn list_files(dir: &Path, extension: &str) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.context("read entry")?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(extension) {
            files.push((name, path));
        }
    }
    files.sort();
    Ok(files)
}

/// Find the first file (by name) that starts with `prefix` and ends with `extension`.
///
/// Errors if `dir` does not exist or nothing matches.
pub fn find_by_prefix(dir: &Path, prefix: &str, extension: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("assets directory not found: {}", dir.display());
    }
    let found = list_files(dir, extension)?
        .into_iter()
        .find(|(name, _)| name.starts_with(prefix));
    match found {
        Some((name, path)) => {
            debug!(file = %name, prefix, "located by prefix");
            Ok(path)
        }
        None => bail!(
            "no file found matching pattern: {prefix}*{extension} in {}",
            dir.display()
        ),
    }
}

/// Find the first file (by name) with `extension` whose content contains `text`.
///
/// Never fails: a missing directory or no match is logged and yields `None`.
/// Files that cannot be read as UTF-8 are skipped.
pub fn find_by_text(dir: &Path, text: &str, extension: &str) -> Option<PathBuf> {
    find_all_by_text(dir, text, extension).into_iter().next()
}

/// Every file (sorted by name) with `extension` whose content contains `text`.
///
/// Same failure handling as [`find_by_text`]; an empty list means no match.
pub fn find_all_by_text(dir: &Path, text: &str, extension: &str) -> Vec<PathBuf> {
    let files = match list_files(dir, extension) {
        Ok(files) => files,
        Err(err) => {
            error!("search for '{text}' failed: {err:#}");
            return Vec::new();
        }
    };
    let mut found = Vec::new();
    for (name, path) in files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                debug!(file = %name, %err, "skip unreadable file");
                continue;
            }
        };
        if content.contains(text) {
            info!("found '{text}' in {}", path.display());
            found.push(path);
        }
    }
    if found.is_empty() {
        info!("text '{text}' not found in any asset file");
    }
    found
}
