//! Test-only helpers for building asset directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::config::PatcherConfig;
use crate::io::paths::AssetPaths;
use crate::io::writer::Writer;
use crate::steps::StepContext;
use crate::templates::Templates;

/// PNG signature plus a few bytes; enough for the encoder.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

/// Entry HTML shaped like the admin build output.
pub const MINIMAL_INDEX: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <link rel="icon" type="image/svg+xml" href="/vite.svg" />
    <title>Medusa Admin</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

pub const LOGIN_BUNDLE: &str =
    r#"function Login(){return jsx3("div",{children:[jsx3(LogoBox, {}),jsx3("h1",{children:"Sign in"})]})}"#;
pub const RESET_PASSWORD_BUNDLE: &str =
    r#"function Reset(){return jsx2("div",{children:[jsx2(icons.MedusaLogo, {}),"Reset"]})}"#;
pub const APP_BUNDLE: &str = r#"const t={welcome:"Welcome to Medusa",hint:"Sign in"};"#;

/// Temporary asset root with an `assets/` directory.
pub struct AssetFixture {
    dir: TempDir,
    config: PatcherConfig,
}

impl AssetFixture {
    /// Empty root containing only the assets directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let config = PatcherConfig::default();
        fs::create_dir_all(dir.path().join(&config.assets_dir)).context("create assets dir")?;
        Ok(Self { dir, config })
    }

    /// A complete build output: bundles for every step, both logos, and index.html.
    pub fn portal() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.asset("app-Ck3.js", APP_BUNDLE)?;
        fixture.asset("login-Bx12.js", LOGIN_BUNDLE)?;
        fixture.asset("reset-password-9f.js", RESET_PASSWORD_BUNDLE)?;
        fixture.image("logo-login.png", PNG_BYTES)?;
        fixture.image("logo-header.png", PNG_BYTES)?;
        fixture.index(MINIMAL_INDEX)?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root().join(&self.config.assets_dir)
    }

    pub fn asset(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.assets_dir().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn image(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.assets_dir().join(name);
        fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn remove_asset(&self, name: &str) -> Result<()> {
        let path = self.assets_dir().join(name);
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
    }

    pub fn read_asset(&self, name: &str) -> Result<String> {
        let path = self.assets_dir().join(name);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    pub fn index(&self, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(&self.config.index.file);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_index(&self) -> Result<String> {
        let path = self.root().join(&self.config.index.file);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    /// Contents of every file in the root and assets directories, keyed by relative path.
    pub fn snapshot(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut files = BTreeMap::new();
        for dir in [self.root().to_path_buf(), self.assets_dir()] {
            for entry in fs::read_dir(&dir).with_context(|| format!("read {}", dir.display()))? {
                let path = entry.context("read entry")?.path();
                if !path.is_file() {
                    continue;
                }
                let key = path
                    .strip_prefix(self.root())
                    .unwrap_or(&path)
                    .display()
                    .to_string();
                let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
                files.insert(key, bytes);
            }
        }
        Ok(files)
    }

    /// Run `step` against this fixture with the default config.
    pub fn with_context<T>(&self, step: impl FnOnce(&StepContext<'_>) -> Result<T>) -> Result<T> {
        let templates = Templates::new()?;
        let paths = AssetPaths::new(self.root(), &self.config);
        let ctx = StepContext {
            paths: &paths,
            config: &self.config,
            templates: &templates,
            writer: Writer::new(false),
        };
        step(&ctx)
    }
}
