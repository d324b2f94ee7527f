//! Replace the stock greeting with the branded one.

use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::StepContext;
use crate::core::rules::{Rule, apply_rules};
use crate::core::types::{Change, StepOutcome};
use crate::io::locator::{find_all_by_text, find_by_text};
use crate::io::writer::file_name;

/// Rewrite the greeting in every asset that still carries it.
pub fn patch_welcome_text(ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let welcome = &ctx.config.welcome;
    let dir = &ctx.paths.assets_dir;

    let paths = find_all_by_text(dir, &welcome.find, &welcome.file_extension);
    if paths.is_empty() {
        if find_by_text(dir, &welcome.replace, &welcome.file_extension).is_some() {
            info!("welcome text already branded");
            return Ok(StepOutcome::AlreadyApplied {
                detail: "branded welcome text present".to_string(),
            });
        }
        warn!("could not find a file containing '{}'", welcome.find);
        return Ok(StepOutcome::NoMatch {
            reason: format!("no asset contains '{}'", welcome.find),
        });
    }

    let rules = [Rule::literal("welcome", &welcome.find, &welcome.replace)];
    let mut changes = Vec::new();
    for path in &paths {
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let outcome = apply_rules(&content, &rules);
        if !outcome.changed {
            continue;
        }
        ctx.writer.write(path, &outcome.content)?;
        let count: usize = outcome.hits.iter().map(|hit| hit.count).sum();
        changes.push(Change {
            file: file_name(path),
            description: format!("replaced {count} welcome text occurrence(s)"),
        });
    }

    if changes.is_empty() {
        warn!("welcome text not found or already updated");
        return Ok(StepOutcome::NoMatch {
            reason: "welcome text unchanged".to_string(),
        });
    }
    Ok(StepOutcome::Applied { changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AssetFixture;

    #[test]
    fn replaces_greeting_everywhere_in_file() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture
            .asset("app-1.js", r#"h1("Welcome to Medusa");p("Welcome to Medusa")"#)
            .expect("asset");

        let outcome = fixture.with_context(patch_welcome_text).expect("step");
        assert!(matches!(outcome, StepOutcome::Applied { .. }));

        let content = fixture.read_asset("app-1.js").expect("read");
        assert!(!content.contains("Welcome to Medusa"));
        assert_eq!(
            content.matches("Welcome to The Mediabox Global Ecommerce Store Admin Portal").count(),
            2
        );
    }

    #[test]
    fn second_run_reports_already_applied() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.asset("app-1.js", "Welcome to Medusa").expect("asset");

        fixture.with_context(patch_welcome_text).expect("first");
        let outcome = fixture.with_context(patch_welcome_text).expect("second");
        assert!(matches!(outcome, StepOutcome::AlreadyApplied { .. }));
    }

    #[test]
    fn every_file_with_greeting_is_patched_in_one_run() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.asset("a.js", "Welcome to Medusa").expect("asset");
        fixture.asset("b.js", "Welcome to Medusa").expect("asset");
        fixture.asset("c.js", "hello").expect("asset");

        let outcome = fixture.with_context(patch_welcome_text).expect("first");
        let StepOutcome::Applied { changes } = outcome else {
            panic!("expected applied, got {outcome:?}");
        };
        let files: Vec<&str> = changes.iter().map(|change| change.file.as_str()).collect();
        assert_eq!(files, vec!["a.js", "b.js"]);
        for name in ["a.js", "b.js"] {
            assert!(!fixture.read_asset(name).expect("read").contains("Welcome to Medusa"));
        }
        assert_eq!(fixture.read_asset("c.js").expect("read"), "hello");

        let outcome = fixture.with_context(patch_welcome_text).expect("second");
        assert!(matches!(outcome, StepOutcome::AlreadyApplied { .. }), "{outcome:?}");
    }

    #[test]
    fn missing_greeting_is_no_match() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.asset("app-1.js", "hello").expect("asset");

        let outcome = fixture.with_context(patch_welcome_text).expect("step");
        assert!(matches!(outcome, StepOutcome::NoMatch { .. }));
    }
}
