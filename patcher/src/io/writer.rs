//! Persist patched buffers back to their files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Overwrites files in place. Last write wins; no backup is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct Writer {
    /// Log the write without touching the file.
    pub dry_run: bool,
}

impl Writer {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        let name = file_name(path);
        if self.dry_run {
            info!("would update {name} (dry run)");
            return Ok(());
        }
        fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
        info!("updated {name}");
        Ok(())
    }
}

/// Final path component for display, falling back to the full path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
