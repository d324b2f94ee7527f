//! Report types shared by the steps and the orchestrator.
//!
//! Reports are plain values so callers (CLI, tests) can inspect the outcome of
//! every step without scraping log output.

use serde::Serialize;

/// The fixed patch steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    WelcomeText,
    LoginLogo,
    ResetPasswordLogo,
    IndexHtml,
}

impl StepKind {
    pub const ALL: [StepKind; 4] = [
        StepKind::WelcomeText,
        StepKind::LoginLogo,
        StepKind::ResetPasswordLogo,
        StepKind::IndexHtml,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StepKind::WelcomeText => "welcome text",
            StepKind::LoginLogo => "login logo",
            StepKind::ResetPasswordLogo => "reset password logo",
            StepKind::IndexHtml => "index.html branding",
        }
    }
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Files were (or, in a dry run, would be) rewritten.
    Applied { changes: Vec<Change> },
    /// The guard marker is already in place.
    AlreadyApplied { detail: String },
    /// The target text or patterns were not found. Non-fatal.
    NoMatch { reason: String },
    /// A prerequisite (image, entry file) is unavailable.
    Skipped { reason: String },
    /// The step raised an error; later steps still ran.
    Failed { error: String },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// One rewritten file and a short description of the edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub file: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: StepKind,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Report of a whole patch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub dry_run: bool,
    pub steps: Vec<StepReport>,
}

impl PatchReport {
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|report| report.outcome.is_failure())
    }

    /// Files touched by `Applied` steps, in step order, without duplicates.
    pub fn changed_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for report in &self.steps {
            if let StepOutcome::Applied { changes } = &report.outcome {
                for change in changes {
                    if !files.contains(&change.file.as_str()) {
                        files.push(&change.file);
                    }
                }
            }
        }
        files
    }

    pub fn outcome(&self, step: StepKind) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|report| report.step == step)
            .map(|report| &report.outcome)
    }
}
