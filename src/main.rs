//! pixel-motion CLI entry point
//!
//! Parses arguments, runs the selected command and renders failures with
//! their suggestion before exiting with status 1:
//! - `init` - Write pixel-motion.config.json
//! - `add` - Install components and their dependencies
//! - `list` - Show available components

use anyhow::Result;
use clap::Parser;
use pixel_motion_cli::cli;
use pixel_motion_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
