//! Guard-marked text injection.
//!
//! Every injection is keyed by a guard string that the injected block itself
//! contains. A buffer that already holds the guard is left untouched, so
//! applying the same injection twice yields the same buffer.

use std::sync::LazyLock;

use regex::Regex;

/// Outcome of an injection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// New buffer with the block inserted.
    Inserted(String),
    /// The guard is already present; nothing to do.
    AlreadyPresent,
    /// The anchor to insert before was not found.
    AnchorMissing,
}

/// Insert `block` (followed by a newline) before the first `anchor`, unless `guard` is present.
pub fn insert_before_once(content: &str, anchor: &str, guard: &str, block: &str) -> Injection {
    if content.contains(guard) {
        return Injection::AlreadyPresent;
    }
    match content.find(anchor) {
        Some(idx) => {
            let mut out = String::with_capacity(content.len() + block.len() + 1);
            out.push_str(&content[..idx]);
            out.push_str(block);
            out.push('\n');
            out.push_str(&content[idx..]);
            Injection::Inserted(out)
        }
        None => Injection::AnchorMissing,
    }
}

/// Prepend `block` and a newline, unless `guard` is present.
pub fn prepend_once(content: &str, guard: &str, block: &str) -> Injection {
    if content.contains(guard) {
        return Injection::AlreadyPresent;
    }
    Injection::Inserted(format!("{block}\n{content}"))
}

static ICON_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<link\b[^>]*\brel\s*=\s*(?:"(?:shortcut\s+)?icon"|'(?:shortcut\s+)?icon'|(?:shortcut\s+)?icon\b)[^>]*>"#,
    )
    .expect("icon link regex is valid")
});

/// The favicon tag written for `href`.
pub fn favicon_tag(href: &str) -> String {
    format!(r#"<link rel="icon" type="image/x-icon" href="{href}">"#)
}

/// Make the buffer carry exactly one favicon link pointing at `href`.
///
/// The buffer is settled only when its sole icon link is [`favicon_tag`].
/// Otherwise the first icon link is rewritten and any later ones are dropped.
/// Without an icon link, the tag is inserted before `anchor`.
pub fn ensure_favicon(content: &str, href: &str, anchor: &str) -> Injection {
    let tag = favicon_tag(href);
    let matches: Vec<_> = ICON_LINK_RE.find_iter(content).collect();
    match matches.as_slice() {
        [] => return insert_before_once(content, anchor, &tag, &tag),
        [only] if only.as_str() == tag => return Injection::AlreadyPresent,
        _ => {}
    }

    let mut out = String::with_capacity(content.len() + tag.len());
    let mut last = 0;
    for (i, m) in matches.iter().enumerate() {
        out.push_str(&content[last..m.start()]);
        if i == 0 {
            out.push_str(&tag);
        }
        last = m.end();
    }
    out.push_str(&content[last..]);
    Injection::Inserted(out)
}
