//! Project configuration
//!
//! Each project carries a `pixel-motion.config.json` at its root, written by
//! `pixel-motion init` and read by `pixel-motion add`:
//!
//! ```json
//! {
//!   "style": "default",
//!   "uiDir": "src/pixel-motion/ui",
//!   "libDir": "src/pixel-motion/lib",
//!   "typescript": true
//! }
//! ```
//!
//! `uiDir` and `libDir` are relative to the project root (absolute paths are
//! used as-is). Registry location is configured separately through
//! [`RegistrySettings`](crate::registry::RegistrySettings).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::constants::CONFIG_FILE_NAME;
use crate::core::PixelMotionError;
use crate::registry::ItemType;
use crate::utils::fs::atomic_write;

/// Contents of `pixel-motion.config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default = "default_style")]
    pub style: String,
    pub ui_dir: String,
    pub lib_dir: String,
    #[serde(default = "default_typescript")]
    pub typescript: bool,
}

fn default_style() -> String {
    "default".to_string()
}

const fn default_typescript() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            ui_dir: "src/pixel-motion/ui".to_string(),
            lib_dir: "src/pixel-motion/lib".to_string(),
            typescript: default_typescript(),
        }
    }
}

impl ProjectConfig {
    /// Path of the configuration file for a project root
    #[must_use]
    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Load the configuration from `project_root`
    ///
    /// # Errors
    ///
    /// - [`PixelMotionError::ConfigMissing`] when the file does not exist
    /// - [`PixelMotionError::ConfigInvalid`] when it is not a valid configuration
    pub async fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path_in(project_root);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(PixelMotionError::ConfigMissing {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read project config from {}", path.display()))?;

        let config: Self =
            serde_json::from_str(&content).map_err(|e| PixelMotionError::ConfigInvalid {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!("Loaded project config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration to `project_root` as pretty JSON
    pub async fn save(&self, project_root: &Path) -> Result<PathBuf> {
        let path = Self::path_in(project_root);
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize project config")?;
        content.push('\n');

        atomic_write(&path, content.as_bytes())?;
        Ok(path)
    }

    /// Destination directory for files of the given type
    #[must_use]
    pub fn dir_for(&self, project_root: &Path, item_type: ItemType) -> PathBuf {
        let dir = match item_type {
            ItemType::Ui => &self.ui_dir,
            ItemType::Lib => &self.lib_dir,
        };
        project_root.join(dir)
    }
}
