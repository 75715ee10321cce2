//! Add components to a project.
//!
//! Runs the full installation pipeline:
//!
//! 1. Load `pixel-motion.config.json` (missing config is fatal)
//! 2. Fetch the registry index
//! 3. Resolve the requested names plus their `registryDependencies`
//! 4. Fetch each component and write its files (existing files are skipped
//!    unless `--overwrite` is given)
//! 5. Install the union of npm dependencies with the detected package manager
//!
//! A failed dependency install is reported with the command to run by hand
//! and does not fail the command.
//!
//! # Examples
//!
//! ```bash
//! pixel-motion add terminal
//! pixel-motion add terminal fade-in --overwrite
//! pixel-motion add --all
//! pixel-motion add code-block --skip-install
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::{debug, warn};

use super::CommandContext;
use crate::config::ProjectConfig;
use crate::core::PixelMotionError;
use crate::installer::{FileOutcome, FileStatus, InstallContext, InstallReport, install_components};
use crate::package_manager::PackageManager;
use crate::registry::RegistryClient;
use crate::resolver::{ResolveRequest, resolve};
use crate::utils::progress::{ProgressBar, spinner_with_message};

/// Command to install registry components.
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Components to add
    #[arg(value_name = "COMPONENTS")]
    components: Vec<String>,

    /// Overwrite existing files
    #[arg(short, long)]
    overwrite: bool,

    /// Add all available components
    #[arg(short, long)]
    all: bool,

    /// Print the dependency install command instead of running it
    #[arg(long)]
    skip_install: bool,
}

impl AddCommand {
    fn request(&self) -> ResolveRequest {
        if self.all {
            ResolveRequest::All
        } else {
            ResolveRequest::named(self.components.iter().cloned())
        }
    }

    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let config = ProjectConfig::load(&ctx.project_dir).await?;

        let request = self.request();
        if request.is_empty() {
            println!(
                "{}",
                "No components specified. Pass one or more component names, or use --all."
                    .yellow()
            );
            println!("  Run {} to see what is available.", "npx pixel-motion list".cyan());
            return Ok(());
        }

        let client = RegistryClient::new(ctx.registry.clone())?;
        let spinner = spinner_with_message("Fetching registry...", ctx.progress);

        let report = match self.install(ctx, &config, &client, &request, &spinner).await {
            Ok(report) => report,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        };

        spinner.finish_and_clear();
        println!("{} {}", "✓".green(), "Components installed!".green());

        self.install_dependencies(ctx, &report).await;
        println!();

        Ok(())
    }

    async fn install(
        &self,
        ctx: &CommandContext,
        config: &ProjectConfig,
        client: &RegistryClient,
        request: &ResolveRequest,
        spinner: &ProgressBar,
    ) -> Result<InstallReport> {
        let index = client.fetch_index().await?;
        debug!("Registry {} lists {} components", index.name, index.items.len());

        let resolved = resolve(&index, request)?;
        debug!("Resolved {} components: {:?}", resolved.len(), resolved.iter().collect::<Vec<_>>());

        spinner.set_message("Installing components...");
        let install_ctx = InstallContext::new(&ctx.project_dir, config).overwrite(self.overwrite);

        install_components(&install_ctx, client, &resolved, |outcome| {
            spinner.suspend(|| print_outcome(outcome));
        })
        .await
    }

    async fn install_dependencies(&self, ctx: &CommandContext, report: &InstallReport) {
        let manager = PackageManager::detect(&ctx.project_dir);
        let Some(command) = manager.install_command(&report.dependencies) else {
            return;
        };

        if self.skip_install {
            println!("{}", "\n  Install dependencies with:".yellow());
            println!("    {}", command.to_string().cyan());
            return;
        }

        println!("{}", format!("\n  Installing dependencies with {manager}...").yellow());
        println!("{}\n", format!("  $ {command}").dimmed());

        let spinner = spinner_with_message("Installing dependencies...", ctx.progress);
        let result = command.run(&ctx.project_dir).await;
        spinner.finish_and_clear();

        match result {
            Ok(()) => println!("{} {}", "✓".green(), "Dependencies installed!".green()),
            Err(e) => {
                warn!("{e}");
                if let PixelMotionError::DependencyInstallFailed { reason, .. } = &e {
                    debug!("{reason}");
                }
                println!("{} {}", "✗".red(), "Failed to install dependencies".red());
                println!("{}", "\n  Please install manually:".yellow());
                println!("    {}", command.to_string().cyan());
            }
        }
    }
}

fn print_outcome(outcome: &FileOutcome) {
    match outcome.status {
        FileStatus::Written => println!("  {} {}", "✓".green(), outcome.file_name.green()),
        FileStatus::Skipped => println!(
            "{}",
            format!("  Skipping {} (already exists)", outcome.file_name).yellow()
        ),
    }
}
