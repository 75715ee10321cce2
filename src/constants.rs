//! Global constants used throughout the Pixel Motion CLI.
//!
//! File names, environment variable names, and timeouts that are shared
//! between the CLI layer and the core modules live here so that tests and
//! commands agree on them.

use std::time::Duration;

/// Name of the project configuration file written by `init`.
pub const CONFIG_FILE_NAME: &str = "pixel-motion.config.json";

/// Registry used when no override is configured.
pub const DEFAULT_REGISTRY_URL: &str = "https://motion.pixeldeveloper.io/r";

/// Environment variable overriding the registry base URL.
pub const REGISTRY_URL_ENV: &str = "PIXEL_MOTION_REGISTRY_URL";

/// Environment variable disabling spinners when set to any value.
pub const NO_PROGRESS_ENV: &str = "PIXEL_MOTION_NO_PROGRESS";

/// Timeout applied to every registry request (30 seconds).
///
/// A hung connection surfaces as a registry-unavailable error instead of
/// blocking the command forever.
pub const REGISTRY_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Index document path relative to the registry base URL.
pub const REGISTRY_INDEX_PATH: &str = "registry.json";

/// Directory holding per-component payloads relative to the registry base URL.
pub const REGISTRY_COMPONENTS_DIR: &str = "components";
