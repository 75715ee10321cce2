//! Command-line interface for pixel-motion.
//!
//! The binary installs animated video components from the Pixel Motion
//! registry into a project, copying their source files in the way shadcn-style
//! registries do.
//!
//! # Available Commands
//!
//! - `init` - Write `pixel-motion.config.json` and create the component directories
//! - `add` - Resolve, download and install components plus their npm dependencies
//! - `list` - Show the components available in the registry
//!
//! # Basic Workflow
//!
//! ```bash
//! # 1. Set up the project
//! pixel-motion init
//!
//! # 2. See what is available
//! pixel-motion list
//!
//! # 3. Install a component and everything it depends on
//! pixel-motion add terminal
//! ```
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` control log output on stderr (`RUST_LOG` overrides both)
//! - `--no-progress` hides spinners (also `PIXEL_MOTION_NO_PROGRESS`)
//! - `--cwd <DIR>` runs against another project root
//! - `--registry <URL>` points at another registry (also `PIXEL_MOTION_REGISTRY_URL`)

pub mod add;
pub mod init;
pub mod list;


use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::constants::REGISTRY_URL_ENV;
use crate::registry::RegistrySettings;

/// Runtime settings derived from the global flags
///
/// Kept separate from [`Cli`] so tests can run commands with explicit settings
/// instead of parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default filter for `tracing` when `RUST_LOG` is unset
    pub log_level: Option<String>,

    /// Hide spinners
    pub no_progress: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter used for log output: `RUST_LOG` if set, else `log_level`, else `warn`
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        })
    }

    /// Install the global `tracing` subscriber writing to stderr
    ///
    /// Calling this again after a subscriber is installed is a no-op.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init();
    }
}

/// Everything a subcommand needs besides its own arguments
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root, where `pixel-motion.config.json` lives
    pub project_dir: PathBuf,
    /// Registry to talk to
    pub registry: RegistrySettings,
    /// Whether spinners are drawn
    pub progress: bool,
}

/// Main CLI structure for pixel-motion
#[derive(Parser)]
#[command(
    name = "pixel-motion",
    about = "Add Pixel Motion components to your project",
    version,
    long_about = "pixel-motion copies animated video components from the Pixel Motion registry \
                  into your project, resolving the components they build on and installing \
                  their npm dependencies with your package manager."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable spinners
    #[arg(long, global = true)]
    no_progress: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Registry base URL
    ///
    /// Defaults to https://motion.pixeldeveloper.io/r
    #[arg(long, global = true, value_name = "URL", env = REGISTRY_URL_ENV)]
    registry: Option<String>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Initialize pixel-motion in your project
    Init(init::InitCommand),

    /// Add components to your project
    Add(add::AddCommand),

    /// List all available components
    List(list::ListCommand),
}

impl Cli {
    /// Set up logging and run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
        }
    }

    /// Run the selected command with explicit settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let project_dir = match self.cwd {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let ctx = CommandContext {
            project_dir,
            registry: RegistrySettings::from_override(self.registry.as_deref()),
            progress: !config.no_progress,
        };

        match self.command {
            Commands::Init(cmd) => cmd.execute(&ctx).await,
            Commands::Add(cmd) => cmd.execute(&ctx).await,
            Commands::List(cmd) => cmd.execute(&ctx).await,
        }
    }
}
