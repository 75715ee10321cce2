//! Installation context.

use std::path::Path;

use crate::config::ProjectConfig;

/// Parameters shared by every file written during one `add` run.
///
/// # Fields
///
/// * `project_dir` - Project root; `uiDir` and `libDir` are resolved against it
/// * `config` - The loaded `pixel-motion.config.json`
/// * `overwrite` - Replace files that already exist instead of skipping them
#[derive(Debug, Clone, Copy)]
pub struct InstallContext<'a> {
    pub project_dir: &'a Path,
    pub config: &'a ProjectConfig,
    pub overwrite: bool,
}

impl<'a> InstallContext<'a> {
    /// Context that never replaces existing files.
    #[must_use]
    pub const fn new(project_dir: &'a Path, config: &'a ProjectConfig) -> Self {
        Self {
            project_dir,
            config,
            overwrite: false,
        }
    }

    #[must_use]
    pub const fn overwrite(mut self, value: bool) -> Self {
        self.overwrite = value;
        self
    }
}
