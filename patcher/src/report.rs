//! Rendering of a [`PatchReport`] for stdout.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::core::types::{PatchReport, StepOutcome};

/// One line per step, then a totals line.
pub fn render_summary(report: &PatchReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let label = step.step.label();
        let line = match &step.outcome {
            StepOutcome::Applied { changes } => {
                let verb = if report.dry_run { "would apply" } else { "applied" };
                let details: Vec<String> = changes
                    .iter()
                    .map(|change| format!("{}: {}", change.file, change.description))
                    .collect();
                format!("{verb} ({})", details.join("; "))
            }
            StepOutcome::AlreadyApplied { detail } => format!("already applied ({detail})"),
            StepOutcome::NoMatch { reason } => format!("no match ({reason})"),
            StepOutcome::Skipped { reason } => format!("skipped ({reason})"),
            StepOutcome::Failed { error } => format!("failed ({error})"),
        };
        let _ = writeln!(out, "summary: {label}: {line}");
    }
    let failed = report
        .steps
        .iter()
        .filter(|step| step.outcome.is_failure())
        .count();
    let _ = writeln!(
        out,
        "summary: changed_files={} failed_steps={} dry_run={}",
        report.changed_files().len(),
        failed,
        report.dry_run
    );
    out
}

pub fn render_json(report: &PatchReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report json")
}
