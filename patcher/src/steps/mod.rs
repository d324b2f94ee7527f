//! The fixed patch steps.
//!
//! Each step reads its target, transforms the buffer with `core` helpers and
//! writes through the shared [`Writer`]. Steps return a [`StepOutcome`] and
//! may fail with an error; the orchestrator turns errors into
//! `StepOutcome::Failed` so later steps still run.

pub mod index_html;
pub mod logo;
pub mod welcome;

use std::path::Path;

use crate::core::types::{Change, StepOutcome};
use crate::io::config::PatcherConfig;
use crate::io::paths::AssetPaths;
use crate::io::writer::{Writer, file_name};
use crate::templates::Templates;

/// Everything a step needs, borrowed for the length of one run.
pub struct StepContext<'a> {
    pub paths: &'a AssetPaths,
    pub config: &'a PatcherConfig,
    pub templates: &'a Templates,
    pub writer: Writer,
}

fn applied(path: &Path, description: impl Into<String>) -> StepOutcome {
    StepOutcome::Applied {
        changes: vec![Change {
            file: file_name(path),
            description: description.into(),
        }],
    }
}
