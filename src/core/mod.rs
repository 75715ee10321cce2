//! Core types for Pixel Motion
//!
//! This module holds the error taxonomy shared by every command. Command code
//! raises [`PixelMotionError`] variants; the binary turns whatever reaches
//! `main` into an [`ErrorContext`] via [`user_friendly_error`] and prints it.
//!
//! ```rust
//! use pixel_motion_cli::core::PixelMotionError;
//! use anyhow::Result;
//!
//! fn load() -> Result<()> {
//!     Err(PixelMotionError::ConfigMissing {
//!         path: "pixel-motion.config.json".to_string(),
//!     }
//!     .into())
//! }
//!
//! assert!(load().is_err());
//! ```

pub mod error;

pub use error::{ErrorContext, PixelMotionError, user_friendly_error};
