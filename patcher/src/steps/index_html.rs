//! Favicon link and global brand styles in the entry HTML.

use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::StepContext;
use crate::core::inject::{Injection, ensure_favicon, insert_before_once};
use crate::core::types::{Change, StepOutcome};
use crate::io::encoder::image_to_data_uri;
use crate::io::writer::file_name;
use crate::templates::GlobalStyles;

pub fn patch_index_html(ctx: &StepContext<'_>) -> Result<StepOutcome> {
    let index = &ctx.config.index;
    let path = &ctx.paths.index_path;
    if !path.is_file() {
        warn!("{} not found, skipping", path.display());
        return Ok(StepOutcome::Skipped {
            reason: format!("{} not found", path.display()),
        });
    }

    let mut content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file = file_name(path);
    let mut changes = Vec::new();
    let mut missing_anchor = false;

    match ensure_favicon(&content, &index.favicon_href, &index.head_anchor) {
        Injection::Inserted(patched) => {
            content = patched;
            changes.push(Change {
                file: file.clone(),
                description: format!("favicon -> {}", index.favicon_href),
            });
        }
        Injection::AlreadyPresent => info!("favicon already points to {}", index.favicon_href),
        Injection::AnchorMissing => {
            warn!("no icon link or '{}' in {file}", index.head_anchor);
            missing_anchor = true;
        }
    }

    if content.contains(&index.style_id) {
        info!("{} already present", index.style_id);
    } else {
        let login_logo = image_to_data_uri(&ctx.paths.login_logo_path);
        let header_logo = image_to_data_uri(&ctx.paths.header_logo_path);
        let block = ctx.templates.global_styles(&GlobalStyles {
            style_id: &index.style_id,
            brand: &ctx.config.brand,
            login_logo: login_logo.as_deref(),
            header_logo: header_logo.as_deref(),
        })?;
        match insert_before_once(&content, &index.head_anchor, &index.style_id, &block) {
            Injection::Inserted(patched) => {
                content = patched;
                changes.push(Change {
                    file: file.clone(),
                    description: format!("injected #{}", index.style_id),
                });
            }
            Injection::AlreadyPresent => {}
            Injection::AnchorMissing => {
                warn!("'{}' not found in {file}", index.head_anchor);
                missing_anchor = true;
            }
        }
    }

    if !changes.is_empty() {
        ctx.writer.write(path, &content)?;
        info!("{file} updated with global branding");
        return Ok(StepOutcome::Applied { changes });
    }
    if missing_anchor {
        return Ok(StepOutcome::NoMatch {
            reason: format!("'{}' not found in {file}", index.head_anchor),
        });
    }
    info!("{file} already contains branding");
    Ok(StepOutcome::AlreadyApplied {
        detail: format!("favicon and #{} present", index.style_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{AssetFixture, MINIMAL_INDEX, PNG_BYTES};

    #[test]
    fn injects_favicon_and_styles_once() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.index(MINIMAL_INDEX).expect("index");
        fixture.image("logo-login.png", PNG_BYTES).expect("image");
        fixture.image("logo-header.png", PNG_BYTES).expect("image");

        let outcome = fixture.with_context(patch_index_html).expect("step");
        let StepOutcome::Applied { changes } = outcome else {
            panic!("expected applied, got {outcome:?}");
        };
        assert_eq!(changes.len(), 2);

        let html = fixture.read_index().expect("read");
        assert_eq!(html.matches(r#"rel="icon""#).count(), 1);
        assert_eq!(html.matches(r#"href="/app/assets/favicon.ico""#).count(), 1);
        assert_eq!(html.matches(r#"id="mediabox-global-styles""#).count(), 1);
        let style_at = html.find("mediabox-global-styles").expect("style");
        let head_at = html.find("</head>").expect("head");
        assert!(style_at < head_at);
        assert_eq!(html.matches("data:image/png;base64,").count(), 2);
    }

    #[test]
    fn second_run_changes_nothing() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.index(MINIMAL_INDEX).expect("index");

        fixture.with_context(patch_index_html).expect("first");
        let first = fixture.read_index().expect("read");
        let outcome = fixture.with_context(patch_index_html).expect("second");
        assert!(matches!(outcome, StepOutcome::AlreadyApplied { .. }));
        assert_eq!(fixture.read_index().expect("read"), first);
    }

    #[test]
    fn styles_render_without_logo_images() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.index(MINIMAL_INDEX).expect("index");

        fixture.with_context(patch_index_html).expect("step");
        let html = fixture.read_index().expect("read");
        assert!(html.contains("--mediabox-primary: #df3d58;"));
        assert!(!html.contains("data:image/"));
    }

    #[test]
    fn missing_index_is_skipped() {
        let fixture = AssetFixture::new().expect("fixture");
        let outcome = fixture.with_context(patch_index_html).expect("step");
        assert!(matches!(outcome, StepOutcome::Skipped { .. }));
    }

    #[test]
    fn missing_head_close_is_no_match() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture.index("<html><body></body></html>").expect("index");

        let outcome = fixture.with_context(patch_index_html).expect("step");
        assert!(matches!(outcome, StepOutcome::NoMatch { .. }));
        assert_eq!(
            fixture.read_index().expect("read"),
            "<html><body></body></html>"
        );
    }

    #[test]
    fn favicon_with_reordered_attributes_is_replaced_not_duplicated() {
        let fixture = AssetFixture::new().expect("fixture");
        fixture
            .index(r#"<html><head><link type="image/svg+xml" rel="icon" href="/vite.svg"></head></html>"#)
            .expect("index");

        fixture.with_context(patch_index_html).expect("first");
        let html = fixture.read_index().expect("read");
        assert_eq!(html.matches("<link").count(), 1);
        assert!(!html.contains("/vite.svg"));

        let outcome = fixture.with_context(patch_index_html).expect("second");
        assert!(matches!(outcome, StepOutcome::AlreadyApplied { .. }));
        assert_eq!(fixture.read_index().expect("read"), html);
    }

    #[test]
    fn existing_favicon_is_kept_while_styles_are_added() {
        let fixture = AssetFixture::new().expect("fixture");
        let html = r#"<head><link rel="icon" type="image/x-icon" href="/app/assets/favicon.ico"></head>"#;
        fixture.index(html).expect("index");

        let outcome = fixture.with_context(patch_index_html).expect("step");
        let StepOutcome::Applied { changes } = outcome else {
            panic!("expected applied, got {outcome:?}");
        };
        assert_eq!(changes.len(), 1);
        assert!(changes[0].description.contains("mediabox-global-styles"));
    }
}
