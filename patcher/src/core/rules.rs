//! Ordered find/replace rules applied to an in-memory text buffer.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use tracing::debug;

/// How a rule locates the text it replaces.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact substring; every occurrence is replaced.
    Literal(String),
    /// Regular expression; every non-overlapping match is replaced.
    Regex(Regex),
}

/// A single named replacement rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    matcher: Matcher,
    replacement: String,
}

impl Rule {
    pub fn literal(
        name: impl Into<String>,
        find: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: Matcher::Literal(find.into()),
            replacement: replacement.into(),
        }
    }

    /// Compile a regex rule. The replacement is inserted verbatim (`$` is not expanded).
    pub fn regex(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let regex =
            Regex::new(pattern).with_context(|| format!("compile pattern for rule '{name}'"))?;
        Ok(Self {
            name,
            matcher: Matcher::Regex(regex),
            replacement: replacement.into(),
        })
    }

    fn apply(&self, content: &str) -> (String, usize) {
        match &self.matcher {
            Matcher::Literal(find) => {
                if find.is_empty() {
                    return (content.to_string(), 0);
                }
                let count = content.matches(find.as_str()).count();
                if count == 0 {
                    return (content.to_string(), 0);
                }
                (content.replace(find.as_str(), &self.replacement), count)
            }
            Matcher::Regex(regex) => {
                let count = regex.find_iter(content).count();
                if count == 0 {
                    return (content.to_string(), 0);
                }
                let replaced = regex.replace_all(content, NoExpand(&self.replacement));
                (replaced.into_owned(), count)
            }
        }
    }
}

/// Number of matches a rule replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub rule: String,
    pub count: usize,
}

/// Result of applying a rule list to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    /// True when `content` differs from the input buffer.
    pub changed: bool,
    /// Rules that matched at least once, in application order.
    pub hits: Vec<RuleHit>,
}

/// Apply `rules` in order, each one to the output of the previous.
///
/// A rule that matches nothing is skipped; it never aborts the remaining rules.
pub fn apply_rules(content: &str, rules: &[Rule]) -> PatchOutcome {
    let mut current = content.to_string();
    let mut hits = Vec::new();
    for rule in rules {
        let (next, count) = rule.apply(&current);
        if count == 0 {
            debug!(rule = %rule.name, "rule matched nothing");
            continue;
        }
        debug!(rule = %rule.name, count, "rule applied");
        hits.push(RuleHit {
            rule: rule.name.clone(),
            count,
        });
        current = next;
    }
    PatchOutcome {
        changed: current != content,
        content: current,
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_rule_replaces_every_occurrence() {
        let rules = vec![Rule::literal("welcome", "Welcome to Medusa", "Welcome home")];
        let out = apply_rules("a Welcome to Medusa b Welcome to Medusa", &rules);
        assert_eq!(out.content, "a Welcome home b Welcome home");
        assert!(out.changed);
        assert_eq!(
            out.hits,
            vec![RuleHit {
                rule: "welcome".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn regex_rules_apply_in_order() {
        let rules = vec![
            Rule::regex("logo-box", r"jsx\d*\(LogoBox[^)]*\)", "LOGO").expect("rule"),
            Rule::regex("logo-again", r"LOGO", "IMG").expect("rule"),
        ];
        let out = apply_rules("x=jsx3(LogoBox, {});", &rules);
        assert_eq!(out.content, "x=IMG;");
        assert_eq!(out.hits.len(), 2);
    }

    #[test]
    fn no_match_leaves_content_unchanged() {
        let rules = vec![
            Rule::literal("missing", "nothing here", "x"),
            Rule::regex("svg", r#"jsx\d*\("svg""#, "x").expect("rule"),
        ];
        let out = apply_rules("plain text", &rules);
        assert_eq!(out.content, "plain text");
        assert!(!out.changed);
        assert!(out.hits.is_empty());
    }

    #[test]
    fn regex_replacement_is_not_expanded() {
        let rules = vec![Rule::regex("dollar", r"(cat)", "$1-$0").expect("rule")];
        let out = apply_rules("cat", &rules);
        assert_eq!(out.content, "$1-$0");
    }

    #[test]
    fn identical_replacement_reports_unchanged() {
        let rules = vec![Rule::literal("same", "abc", "abc")];
        let out = apply_rules("abc", &rules);
        assert!(!out.changed);
        assert_eq!(out.hits.len(), 1);
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = Rule::regex("broken", r"jsx(", "x").expect_err("should fail");
        assert!(err.to_string().contains("broken"));
    }
}
