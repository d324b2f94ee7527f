//! Canonical paths under an asset root.

use std::path::{Path, PathBuf};

use super::config::{CONFIG_FILE_NAME, PatcherConfig};

/// Every path the patcher reads or writes, resolved against one root.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub assets_dir: PathBuf,
    pub index_path: PathBuf,
    pub login_logo_path: PathBuf,
    pub reset_password_logo_path: PathBuf,
    pub header_logo_path: PathBuf,
}

impl AssetPaths {
    pub fn new(root: &Path, config: &PatcherConfig) -> Self {
        let assets_dir = root.join(&config.assets_dir);
        Self {
            index_path: root.join(&config.index.file),
            login_logo_path: assets_dir.join(&config.login.logo_image),
            reset_password_logo_path: assets_dir.join(&config.reset_password.logo_image),
            header_logo_path: assets_dir.join(&config.index.header_logo_image),
            assets_dir,
        }
    }
}

/// Default config location for `root`.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_config() {
        let mut config = PatcherConfig::default();
        config.assets_dir = "static".to_string();
        config.index.file = "app.html".to_string();

        let paths = AssetPaths::new(Path::new("/srv/admin"), &config);
        assert_eq!(paths.assets_dir, PathBuf::from("/srv/admin/static"));
        assert_eq!(paths.index_path, PathBuf::from("/srv/admin/app.html"));
        assert_eq!(
            paths.login_logo_path,
            PathBuf::from("/srv/admin/static/logo-login.png")
        );
        assert_eq!(
            paths.header_logo_path,
            PathBuf::from("/srv/admin/static/logo-header.png")
        );
    }
}
