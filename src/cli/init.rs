//! Initialize pixel-motion in a project.
//!
//! Writes `pixel-motion.config.json` to the project root and creates the UI
//! and library directories it names.
//!
//! # Examples
//!
//! ```bash
//! pixel-motion init
//! pixel-motion init --ui-dir src/components/motion --lib-dir src/lib/motion
//! pixel-motion init --force        # replace an existing config
//! ```
//!
//! # Error Conditions
//!
//! - The config file already exists and `--force` is not given
//! - A directory or the config file cannot be written

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CommandContext;
use crate::config::ProjectConfig;
use crate::core::PixelMotionError;
use crate::utils::fs::ensure_dir;
use crate::utils::progress::spinner_with_message;

/// Command to write the project configuration.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Directory for UI components, relative to the project root
    #[arg(long, value_name = "DIR")]
    ui_dir: Option<String>,

    /// Directory for library helpers, relative to the project root
    #[arg(long, value_name = "DIR")]
    lib_dir: Option<String>,

    /// Mark the project as plain JavaScript
    #[arg(long)]
    no_typescript: bool,

    /// Overwrite an existing pixel-motion.config.json
    #[arg(short, long)]
    force: bool,

    /// Accept defaults (init never prompts; kept for compatibility)
    #[arg(short = 'y', long, hide = true)]
    yes: bool,
}

impl InitCommand {
    /// Configuration this command would write
    fn project_config(&self) -> ProjectConfig {
        let defaults = ProjectConfig::default();
        ProjectConfig {
            ui_dir: self.ui_dir.clone().unwrap_or(defaults.ui_dir),
            lib_dir: self.lib_dir.clone().unwrap_or(defaults.lib_dir),
            typescript: !self.no_typescript,
            ..ProjectConfig::default()
        }
    }

    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        println!("{}\n", "Welcome to the Pixel Motion CLI!".green().bold());

        let config_path = ProjectConfig::path_in(&ctx.project_dir);
        if config_path.exists() && !self.force {
            return Err(PixelMotionError::ConfigAlreadyExists {
                path: config_path.display().to_string(),
            }
            .into());
        }

        let spinner = spinner_with_message("Setting up your project...", ctx.progress);

        ensure_dir(&ctx.project_dir)?;
        let config = self.project_config();
        let written = config.save(&ctx.project_dir).await?;
        tracing::debug!("Wrote {}", written.display());

        ensure_dir(&ctx.project_dir.join(&config.ui_dir))?;
        ensure_dir(&ctx.project_dir.join(&config.lib_dir))?;

        spinner.finish_and_clear();
        println!("{} {}", "✓".green(), "Project setup complete!".green());
        println!("{}", "\nYou're all set to start creating motion components!".green());
        println!("  Next steps:");
        println!("    {}", "npx pixel-motion add terminal".cyan());
        println!();

        Ok(())
    }
}
