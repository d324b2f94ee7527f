//! Patcher configuration stored as `patcher.toml` next to the build output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::rules::Rule;

/// Default file name looked up under the asset root.
pub const CONFIG_FILE_NAME: &str = "patcher.toml";

/// Patcher configuration (TOML).
///
/// Every table is optional; missing fields fall back to the branding the
/// patcher ships with. The logo patterns target one specific build of the
/// admin bundle and are expected to be edited when that build changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatcherConfig {
    /// Directory holding the compiled bundle and logo images, relative to the root.
    pub assets_dir: String,
    pub brand: BrandConfig,
    pub welcome: WelcomeConfig,
    #[serde(deserialize_with = "login_table")]
    pub login: LogoStepConfig,
    #[serde(deserialize_with = "reset_password_table")]
    pub reset_password: LogoStepConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrandConfig {
    /// Brand name; used as image alt text and CSS variable prefix.
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub hover: String,
    /// Color re-asserted for status/success indicators.
    pub status_green: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WelcomeConfig {
    pub find: String,
    pub replace: String,
    pub file_extension: String,
}

/// Settings for a step that swaps the logo component in one bundle file.
///
/// The login and reset-password tables have different defaults, so a partial
/// table is read as `LogoStepOverrides` and merged onto the matching base.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LogoStepConfig {
    pub file_prefix: String,
    pub file_extension: String,
    /// Image file under the assets directory.
    pub logo_image: String,
    /// Class list for the injected `<img>`.
    pub img_class: String,
    /// Inject a style script when no logo pattern matches.
    pub css_fallback: bool,
    /// Element id of the fallback style script.
    pub style_id: String,
    pub rules: Vec<RuleConfig>,
}

/// A find pattern whose matches are replaced by the logo component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
    /// Treat `pattern` as plain text instead of a regex.
    #[serde(default)]
    pub literal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IndexConfig {
    /// Entry HTML file, relative to the root.
    pub file: String,
    pub favicon_href: String,
    /// Element id of the global style block; doubles as the idempotence guard.
    pub style_id: String,
    pub header_logo_image: String,
    pub head_anchor: String,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            brand: BrandConfig::default(),
            welcome: WelcomeConfig::default(),
            login: LogoStepConfig::login(),
            reset_password: LogoStepConfig::reset_password(),
            index: IndexConfig::default(),
        }
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "Mediabox".to_string(),
            primary: "#df3d58".to_string(),
            secondary: "#d74e2f".to_string(),
            hover: "#c23450".to_string(),
            status_green: "#10b981".to_string(),
        }
    }
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            find: "Welcome to Medusa".to_string(),
            replace: "Welcome to The Mediabox Global Ecommerce Store Admin Portal".to_string(),
            file_extension: ".js".to_string(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file: "index.html".to_string(),
            favicon_href: "/app/assets/favicon.ico".to_string(),
            style_id: "mediabox-global-styles".to_string(),
            header_logo_image: "logo-header.png".to_string(),
            head_anchor: "</head>".to_string(),
        }
    }
}

impl LogoStepConfig {
    pub fn login() -> Self {
        Self {
            file_prefix: "login-".to_string(),
            file_extension: ".js".to_string(),
            logo_image: "logo-login.png".to_string(),
            img_class: "h-20 w-auto".to_string(),
            css_fallback: true,
            style_id: "mediabox-login-styles".to_string(),
            rules: vec![
                RuleConfig::regex("AvatarBox", r"jsx\d*\(AvatarBox[^)]*\)"),
                RuleConfig::regex("LogoBox", r"jsx\d*\(LogoBox[^)]*\)"),
                RuleConfig::regex(
                    "logo-div",
                    r#"jsx\d*\("div",\s*\{\s*className:\s*"[^"]*(?:avatar|logo)[^"]*"[^}]*\}\)"#,
                ),
                RuleConfig::regex("MedusaLogo", r"jsx\d*\([^,]*MedusaLogo[^)]*\)"),
                RuleConfig::regex(
                    "icon-svg",
                    r#"jsx\d*\("svg",\s*\{[^}]*(?:width:\s*"?40"?|height:\s*"?40"?)[^}]*\}\)"#,
                ),
            ],
        }
    }

    pub fn reset_password() -> Self {
        Self {
            file_prefix: "reset-password-".to_string(),
            img_class: "h-16 w-auto".to_string(),
            css_fallback: false,
            style_id: "mediabox-reset-password-styles".to_string(),
            rules: vec![
                RuleConfig::regex("LogoBox", r"jsx\d*\(LogoBox[^)]*\)"),
                RuleConfig::regex("MedusaLogo", r"jsx\d*\([^,]*MedusaLogo[^)]*\)"),
            ],
            ..Self::login()
        }
    }

    /// Compile the rule table, replacing every match with `replacement`.
    pub fn compile_rules(&self, replacement: &str) -> Result<Vec<Rule>> {
        self.rules
            .iter()
            .map(|rule| rule.compile(replacement))
            .collect()
    }

    fn validate(&self, table: &str) -> Result<()> {
        if self.file_prefix.trim().is_empty() {
            return Err(anyhow!("{table}.file_prefix must not be empty"));
        }
        if self.logo_image.trim().is_empty() {
            return Err(anyhow!("{table}.logo_image must not be empty"));
        }
        if self.css_fallback && self.style_id.trim().is_empty() {
            return Err(anyhow!(
                "{table}.style_id must not be empty when css_fallback is set"
            ));
        }
        for rule in &self.rules {
            if rule.pattern.is_empty() {
                return Err(anyhow!("{table}.rules '{}' has an empty pattern", rule.name));
            }
            rule.compile("")
                .with_context(|| format!("invalid rule in [{table}]"))?;
        }
        Ok(())
    }
}

/// Fields present in a `[login]` or `[reset_password]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LogoStepOverrides {
    file_prefix: Option<String>,
    file_extension: Option<String>,
    logo_image: Option<String>,
    img_class: Option<String>,
    css_fallback: Option<bool>,
    style_id: Option<String>,
    rules: Option<Vec<RuleConfig>>,
}

impl LogoStepOverrides {
    fn apply(self, mut base: LogoStepConfig) -> LogoStepConfig {
        if let Some(file_prefix) = self.file_prefix {
            base.file_prefix = file_prefix;
        }
        if let Some(file_extension) = self.file_extension {
            base.file_extension = file_extension;
        }
        if let Some(logo_image) = self.logo_image {
            base.logo_image = logo_image;
        }
        if let Some(img_class) = self.img_class {
            base.img_class = img_class;
        }
        if let Some(css_fallback) = self.css_fallback {
            base.css_fallback = css_fallback;
        }
        if let Some(style_id) = self.style_id {
            base.style_id = style_id;
        }
        if let Some(rules) = self.rules {
            base.rules = rules;
        }
        base
    }
}

fn login_table<'de, D>(deserializer: D) -> Result<LogoStepConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LogoStepOverrides::deserialize(deserializer)?.apply(LogoStepConfig::login()))
}

fn reset_password_table<'de, D>(deserializer: D) -> Result<LogoStepConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LogoStepOverrides::deserialize(deserializer)?.apply(LogoStepConfig::reset_password()))
}

impl RuleConfig {
    pub fn regex(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            literal: false,
        }
    }

    pub fn compile(&self, replacement: &str) -> Result<Rule> {
        if self.literal {
            Ok(Rule::literal(&self.name, &self.pattern, replacement))
        } else {
            Rule::regex(&self.name, &self.pattern, replacement)
        }
    }
}

impl PatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.assets_dir.trim().is_empty() {
            return Err(anyhow!("assets_dir must not be empty"));
        }
        if self.brand.name.trim().is_empty() {
            return Err(anyhow!("brand.name must not be empty"));
        }
        if self.welcome.find.is_empty() {
            return Err(anyhow!("welcome.find must not be empty"));
        }
        if self.welcome.replace.is_empty() {
            return Err(anyhow!("welcome.replace must not be empty"));
        }
        if self.welcome.replace.contains(&self.welcome.find) {
            return Err(anyhow!("welcome.replace must not contain welcome.find"));
        }
        self.login.validate("login")?;
        self.reset_password.validate("reset_password")?;
        if self.index.file.trim().is_empty() {
            return Err(anyhow!("index.file must not be empty"));
        }
        if self.index.favicon_href.trim().is_empty() {
            return Err(anyhow!("index.favicon_href must not be empty"));
        }
        if self.index.style_id.trim().is_empty() {
            return Err(anyhow!("index.style_id must not be empty"));
        }
        if self.index.head_anchor.is_empty() {
            return Err(anyhow!("index.head_anchor must not be empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PatcherConfig::default()`.
pub fn load_config(path: &Path) -> Result<PatcherConfig> {
    if !path.exists() {
        let cfg = PatcherConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PatcherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

pub fn render_config(cfg: &PatcherConfig) -> Result<String> {
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    Ok(buf)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &PatcherConfig) -> Result<()> {
    cfg.validate()?;
    let buf = render_config(cfg)?;
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
