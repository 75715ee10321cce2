//! Progress indicators
//!
//! Thin wrapper over `indicatif` spinners with the CLI's styling. Spinners are
//! replaced by hidden bars when `--no-progress` is passed or when the
//! `PIXEL_MOTION_NO_PROGRESS` environment variable is set, which keeps output
//! clean in scripts and CI logs.
//!
//! ```rust
//! use pixel_motion_cli::utils::progress::ProgressBar;
//!
//! let spinner = ProgressBar::hidden();
//! spinner.set_message("Fetching registry...");
//! spinner.suspend(|| println!("  ✓ terminal.tsx"));
//! spinner.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

use crate::constants::NO_PROGRESS_ENV;

/// Checks if progress indicators are disabled through the environment
fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some()
}

/// A spinner with consistent styling
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates an animated spinner, or a hidden one if progress is disabled
    #[must_use]
    pub fn new_spinner() -> Self {
        if is_progress_disabled() {
            return Self::hidden();
        }

        let bar = IndicatifBar::new_spinner();
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            inner: bar,
        }
    }

    /// Creates a spinner that never draws anything
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Run `f` with the spinner temporarily cleared from the terminal
    ///
    /// Use this for any `println!` issued while the spinner is active so the
    /// line is not overdrawn. Works the same for hidden spinners.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.inner.suspend(f)
    }

    /// Stop the spinner and erase it
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

/// Spinner, or hidden bar when `enabled` is false
#[must_use]
pub fn spinner_with_message(msg: impl Into<String>, enabled: bool) -> ProgressBar {
    let spinner = if enabled {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    spinner.set_message(msg);
    spinner
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"])
}
