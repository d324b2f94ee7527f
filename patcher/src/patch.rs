//! Orchestration for `patcher apply`.
//!
//! Runs the fixed step sequence against one asset root. Every step is guarded:
//! an error inside a step is logged and recorded as `StepOutcome::Failed`, and
//! the remaining steps still run.

use std::path::Path;

use anyhow::{Result, bail};
use tracing::{error, info, warn};

use crate::core::types::{PatchReport, StepKind, StepOutcome, StepReport};
use crate::io::config::PatcherConfig;
use crate::io::paths::AssetPaths;
use crate::io::writer::Writer;
use crate::steps::StepContext;
use crate::steps::index_html::patch_index_html;
use crate::steps::logo::{patch_login_logo, patch_reset_password_logo};
use crate::steps::welcome::patch_welcome_text;
use crate::templates::Templates;

#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Compute every change but leave files untouched.
    pub dry_run: bool,
}

type StepFn = fn(&StepContext<'_>) -> Result<StepOutcome>;

fn step_fn(kind: StepKind) -> StepFn {
    match kind {
        StepKind::WelcomeText => patch_welcome_text,
        StepKind::LoginLogo => patch_login_logo,
        StepKind::ResetPasswordLogo => patch_reset_password_logo,
        StepKind::IndexHtml => patch_index_html,
    }
}

/// Apply all branding steps under `root`.
///
/// Errors only when the run cannot start (bad root, invalid config, template
/// setup); step failures are reported in the returned [`PatchReport`].
pub fn run_patch(root: &Path, config: &PatcherConfig, options: PatchOptions) -> Result<PatchReport> {
    if !root.is_dir() {
        bail!("root directory not found: {}", root.display());
    }
    config.validate()?;
    let templates = Templates::new()?;
    let paths = AssetPaths::new(root, config);
    let ctx = StepContext {
        paths: &paths,
        config,
        templates: &templates,
        writer: Writer::new(options.dry_run),
    };

    info!(
        root = %root.display(),
        brand = %config.brand.name,
        dry_run = options.dry_run,
        "applying branding customizations"
    );

    let steps = StepKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            info!("{}. {}", i + 1, kind.label());
            run_guarded(kind, &ctx, step_fn(kind))
        })
        .collect();

    Ok(PatchReport {
        dry_run: options.dry_run,
        steps,
    })
}

fn run_guarded(kind: StepKind, ctx: &StepContext<'_>, step: StepFn) -> StepReport {
    let outcome = match step(ctx) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("error updating {}: {err:#}", kind.label());
            StepOutcome::Failed {
                error: format!("{err:#}"),
            }
        }
    };
    match &outcome {
        StepOutcome::Applied { .. } => info!(step = kind.label(), "applied"),
        StepOutcome::AlreadyApplied { detail } => info!(step = kind.label(), %detail, "already applied"),
        StepOutcome::NoMatch { reason } => warn!(step = kind.label(), %reason, "no match"),
        StepOutcome::Skipped { reason } => warn!(step = kind.label(), %reason, "skipped"),
        StepOutcome::Failed { .. } => {}
    }
    StepReport {
        step: kind,
        outcome,
    }
}
