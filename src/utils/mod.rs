//! Utilities shared by the commands
//!
//! - [`fs`] - directory creation and atomic file writes
//! - [`progress`] - spinners for network and process waits

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir};
pub use progress::{ProgressBar, spinner_with_message};
