//! Error handling for Pixel Motion
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`PixelMotionError`]) so code can branch on the
//!    exact failure mode (for example, a dependency-install failure is a warning,
//!    a missing component is fatal)
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and an actionable
//!    suggestion for the person running the CLI
//!
//! Command implementations return [`anyhow::Result`] and raise typed errors with
//! `?` or `.into()`. The binary converts whatever bubbles up with
//! [`user_friendly_error`] and prints it before exiting with status 1.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pixel_motion_cli::core::{PixelMotionError, user_friendly_error};
//!
//! let error = anyhow::Error::from(PixelMotionError::ComponentNotFound {
//!     name: "terminal".to_string(),
//! });
//! let ctx = user_friendly_error(error);
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for Pixel Motion operations
///
/// # Error Categories
///
/// ## Registry
/// - [`RegistryUnavailable`] - index or payload request failed at the transport level
/// - [`ComponentNotFound`] - a requested or transitively-required component is absent
/// - [`InvalidComponent`] - a component payload could not be decoded or used
///
/// ## Project configuration
/// - [`ConfigMissing`] - `pixel-motion.config.json` not found
/// - [`ConfigInvalid`] - the configuration file is not valid JSON for a project config
/// - [`ConfigAlreadyExists`] - `init` would replace an existing configuration
///
/// ## Package manager
/// - [`DependencyInstallFailed`] - the external install command failed (recoverable)
///
/// [`RegistryUnavailable`]: PixelMotionError::RegistryUnavailable
/// [`ComponentNotFound`]: PixelMotionError::ComponentNotFound
/// [`InvalidComponent`]: PixelMotionError::InvalidComponent
/// [`ConfigMissing`]: PixelMotionError::ConfigMissing
/// [`ConfigInvalid`]: PixelMotionError::ConfigInvalid
/// [`ConfigAlreadyExists`]: PixelMotionError::ConfigAlreadyExists
/// [`DependencyInstallFailed`]: PixelMotionError::DependencyInstallFailed
#[derive(Error, Debug)]
pub enum PixelMotionError {
    /// The registry could not be reached or answered with a non-success status
    ///
    /// Raised for network errors, timeouts, non-2xx responses to the index
    /// request, and index bodies that are not valid registry JSON. No partial
    /// index is usable, so the command aborts.
    #[error("Failed to fetch registry from {url}")]
    RegistryUnavailable {
        /// The URL that was requested
        url: String,
        /// Transport or status description
        reason: String,
    },

    /// A component name has no matching registry entry or payload
    ///
    /// Lookups are exact string matches; `Terminal` does not match `terminal`.
    #[error("Component \"{name}\" not found in registry")]
    ComponentNotFound {
        /// The component name that could not be found
        name: String,
    },

    /// A component payload was fetched but cannot be installed
    #[error("Component \"{name}\" is invalid: {reason}")]
    InvalidComponent {
        /// The component whose payload is unusable
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Project configuration file not found
    #[error("No pixel-motion.config.json found at {path}")]
    ConfigMissing {
        /// Where the configuration was expected
        path: String,
    },

    /// Project configuration file could not be parsed
    #[error("Invalid configuration file {path}")]
    ConfigInvalid {
        /// Path to the configuration file
        path: String,
        /// Parser message
        reason: String,
    },

    /// `init` refused to replace an existing configuration
    #[error("A pixel-motion.config.json file already exists at {path}")]
    ConfigAlreadyExists {
        /// Path to the existing configuration file
        path: String,
    },

    /// The package manager install invocation failed
    ///
    /// This is the only recoverable variant: components have already been
    /// written when it occurs, so the CLI reports it as a warning together
    /// with the command line to run manually.
    #[error("Failed to install dependencies with `{command}`")]
    DependencyInstallFailed {
        /// The full command line that was attempted
        command: String,
        /// Exit status or spawn failure, plus captured output
        reason: String,
    },

    /// Anything that does not fit a more specific variant
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper that adds user-facing details and a suggestion
///
/// `details` explain what happened, `suggestion` says what to do next. Both are
/// optional and are rendered in yellow and green respectively by
/// [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PixelMotionError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion
    #[must_use]
    pub const fn new(error: PixelMotionError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`PixelMotionError`] (also when wrapped in `anyhow` context),
/// [`std::io::Error`] and [`serde_json::Error`]. Anything else is reported with
/// its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<PixelMotionError>() {
        Ok(pm_error) => return create_error_context(pm_error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PixelMotionError::Other {
                    message: format!("Permission denied: {error:#}"),
                })
                .with_suggestion("Check file ownership of the destination directories or run from a writable project")
                .with_details("Pixel Motion writes component files into the directories named in pixel-motion.config.json");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PixelMotionError::Other {
                    message: format!("File not found: {error:#}"),
                })
                .with_suggestion("Check that the project directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if error.downcast_ref::<serde_json::Error>().is_some() {
        return ErrorContext::new(PixelMotionError::Other {
            message: format!("{error:#}"),
        })
        .with_suggestion("Check the JSON syntax of the file or response being read");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PixelMotionError::Other {
        message,
    })
}

/// Map each [`PixelMotionError`] variant to details and a suggestion
fn create_error_context(error: PixelMotionError) -> ErrorContext {
    match &error {
        PixelMotionError::RegistryUnavailable { url, reason } => {
            let details = format!("Request to {url} failed: {reason}");
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion(format!(
                    "Check your internet connection, or point {} at a reachable registry",
                    crate::constants::REGISTRY_URL_ENV
                ))
        }
        PixelMotionError::ComponentNotFound { name } => {
            let suggestion = format!(
                "Run `pixel-motion list` to see available components. Names are case-sensitive (\"{name}\" must match exactly)"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("The name is either absent from the registry index or has no payload under components/")
        }
        PixelMotionError::InvalidComponent { .. } => ErrorContext::new(error)
            .with_details("The registry returned a payload that cannot be installed")
            .with_suggestion("Report the problem to the registry maintainers or try again later"),
        PixelMotionError::ConfigMissing { .. } => ErrorContext::new(error)
            .with_suggestion("Run `pixel-motion init` first")
            .with_details("The add command needs uiDir and libDir from the project configuration"),
        PixelMotionError::ConfigInvalid { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error).with_details(details).with_suggestion(
                "Fix the JSON in pixel-motion.config.json or re-create it with `pixel-motion init --force`",
            )
        }
        PixelMotionError::ConfigAlreadyExists { .. } => ErrorContext::new(error)
            .with_suggestion("Use --force to overwrite the existing configuration"),
        PixelMotionError::DependencyInstallFailed { command, reason } => {
            let details = reason.clone();
            let suggestion = format!("Please install manually: {command}");
            ErrorContext::new(error).with_details(details).with_suggestion(suggestion)
        }
        PixelMotionError::Other { .. } => ErrorContext::new(error),
    }
}
