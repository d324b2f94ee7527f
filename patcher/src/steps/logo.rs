//! Swap the stock logo component in the login and reset-password bundles.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{StepContext, applied};
use crate::core::inject::{Injection, prepend_once};
use crate::core::rules::apply_rules;
use crate::core::types::StepOutcome;
use crate::io::config::LogoStepConfig;
use crate::io::encoder::image_to_data_uri;
use crate::io::locator::find_by_prefix;
use crate::templates::logo_guard;

pub fn patch_login_logo(ctx: &StepContext<'_>) -> Result<StepOutcome> {
    patch_logo(ctx, &ctx.config.login, &ctx.paths.login_logo_path)
}

pub fn patch_reset_password_logo(ctx: &StepContext<'_>) -> Result<StepOutcome> {
    patch_logo(ctx, &ctx.config.reset_password, &ctx.paths.reset_password_logo_path)
}

/// Replace logo patterns in the file selected by `step.file_prefix`.
///
/// When nothing matches and the component is not already present, the step
/// either prepends the fallback style script (`css_fallback`) or reports
/// `NoMatch`.
fn patch_logo(
    ctx: &StepContext<'_>,
    step: &LogoStepConfig,
    logo_path: &Path,
) -> Result<StepOutcome> {
    let path = find_by_prefix(&ctx.paths.assets_dir, &step.file_prefix, &step.file_extension)?;
    info!("found {} file: {}", step.file_prefix, path.display());

    let Some(logo) = image_to_data_uri(logo_path) else {
        return Ok(StepOutcome::Skipped {
            reason: format!("logo image {} unavailable", logo_path.display()),
        });
    };

    let brand = &ctx.config.brand.name;
    let component = ctx
        .templates
        .logo_component(&logo, brand, &step.img_class)?;
    let rules = step.compile_rules(&component)?;

    let content = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let outcome = apply_rules(&content, &rules);
    if outcome.changed {
        ctx.writer.write(&path, &outcome.content)?;
        let names: Vec<&str> = outcome.hits.iter().map(|hit| hit.rule.as_str()).collect();
        return Ok(applied(
            &path,
            format!("replaced logo patterns: {}", names.join(", ")),
        ));
    }

    if content.contains(&logo_guard(brand)) {
        info!("{brand} logo already present in {}", path.display());
        return Ok(StepOutcome::AlreadyApplied {
            detail: "logo component present".to_string(),
        });
    }

    if !step.css_fallback {
        warn!("no logo patterns found in {}", path.display());
        return Ok(StepOutcome::NoMatch {
            reason: "no logo pattern matched".to_string(),
        });
    }

    warn!("no logo patterns found in {}, injecting styles", path.display());
    let script = ctx
        .templates
        .login_styles(&step.style_id, brand, &logo)?;
    match prepend_once(&content, &step.style_id, &script) {
        Injection::Inserted(patched) => {
            ctx.writer.write(&path, &patched)?;
            Ok(applied(&path, "injected fallback logo styles"))
        }
        Injection::AlreadyPresent | Injection::AnchorMissing => Ok(StepOutcome::AlreadyApplied {
            detail: format!("{} present", step.style_id),
        }),
    }
}
