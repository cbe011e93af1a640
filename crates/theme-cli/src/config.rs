//! `theme-sync.toml` configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use theme_fs::ConfigStore;

use crate::error::Result;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "theme-sync.toml";

/// Defaults for the sync command. Flags and `THEME_SYNC_*` variables win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one directory per theme
    pub themes_dir: PathBuf,
    /// Action used when `--action` is not given
    pub default_action: String,
    /// Directory of support files copied into every theme
    pub support_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("."),
            default_action: "all".to_string(),
            support_dir: None,
        }
    }
}

impl Config {
    /// Load `explicit`, or `theme-sync.toml` if present, or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::new();
        match explicit {
            Some(path) => Ok(store.load(path)?),
            None => Ok(store.load_or_default(Path::new(CONFIG_FILE))?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_keys_take_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("theme-sync.toml");
        std::fs::write(&path, "themes_dir = \"/srv/wp/themes\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.themes_dir, PathBuf::from("/srv/wp/themes"));
        assert_eq!(config.default_action, "all");
        assert_eq!(config.support_dir, None);
    }
}
