//! pixel-motion - component registry installer
//!
//! Installs animated video components from the Pixel Motion registry into a
//! project the way shadcn-style registries do: component source files are
//! copied into the project, where they are owned and edited by the user,
//! and the npm packages they need are installed with the project's own
//! package manager.
//!
//! # Architecture Overview
//!
//! The `add` pipeline runs strictly in sequence:
//!
//! ```text
//! ProjectConfig::load ─► RegistryClient::fetch_index ─► resolver::resolve
//!        ─► installer::install_components ─► PackageManager::install_command ─► run
//! ```
//!
//! - The **index** (`registry.json`) lists every component with its
//!   `registryDependencies`; resolution works on the index alone
//! - **Payloads** (`components/<name>.json`) carry file contents and npm
//!   `dependencies`; they are fetched only while installing
//! - Files land in `uiDir` or `libDir` from `pixel-motion.config.json`,
//!   keyed by the final segment of their registry path
//! - Existing files are never replaced unless `--overwrite` is given
//!
//! # Core Modules
//!
//! - [`registry`] - Wire model and HTTP client for the registry
//! - [`resolver`] - Transitive, cycle-safe resolution of registry dependencies
//! - [`installer`] - Payload download, file routing and the overwrite policy
//! - [`package_manager`] - Lockfile-based package manager detection and the batched install
//! - [`config`] - `pixel-motion.config.json`
//! - [`cli`] - `init`, `add` and `list`
//!
//! ## Supporting Modules
//!
//! - [`core`] - Error types and user-facing error rendering
//! - [`utils`] - Atomic file writes and progress spinners
//! - [`constants`] - Shared names, URLs and timeouts
//!
//! # Project Configuration
//!
//! ```json
//! {
//!   "style": "default",
//!   "uiDir": "src/pixel-motion/ui",
//!   "libDir": "src/pixel-motion/lib",
//!   "typescript": true
//! }
//! ```
//!
//! # Registry Location
//!
//! `https://motion.pixeldeveloper.io/r` unless overridden with `--registry`
//! or `PIXEL_MOTION_REGISTRY_URL`.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod package_manager;
pub mod registry;
pub mod resolver;
pub mod utils;

// test_utils is available for tests and for the integration suite through the
// test-utils feature
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
