//! Test utilities for pixel-motion
//!
//! Helpers shared by unit tests and the integration suite (enabled there through
//! the `test-utils` feature):
//!
//! - [`init_test_logging`] to see `tracing` output while debugging a test
//! - [`MockRegistry`], an in-memory [`ComponentSource`] that counts fetches
//! - Small builders for index entries, components and files
//!
//! # Example
//!
//! ```rust
//! use pixel_motion_cli::registry::ItemType;
//! use pixel_motion_cli::test_utils::{ComponentExt, MockRegistry, component, file};
//!
//! let registry = MockRegistry::new().with_component(
//!     component("terminal", ItemType::Ui)
//!         .with_file(file("ui/terminal.tsx", ItemType::Ui, "export {}"))
//!         .with_dependencies(["remotion"]),
//! );
//! assert_eq!(registry.index().items.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, Once};

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::PixelMotionError;
use crate::registry::{
    ComponentSource, ItemType, RegistryComponent, RegistryFile, RegistryIndex, RegistryIndexEntry,
};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// In-memory registry
///
/// Components are served by exact name. Unknown names produce
/// [`PixelMotionError::ComponentNotFound`], the same as a 404 from the real
/// service.
#[derive(Debug, Default)]
pub struct MockRegistry {
    components: Vec<RegistryComponent>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MockRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component; its index entry is derived from the payload
    #[must_use]
    pub fn with_component(mut self, component: RegistryComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Index listing every component in insertion order
    #[must_use]
    pub fn index(&self) -> RegistryIndex {
        RegistryIndex {
            name: "pixel-motion".to_string(),
            homepage: "https://motion.pixeldeveloper.io".to_string(),
            items: self.components.iter().map(entry_for).collect(),
        }
    }

    /// Every registered payload
    #[must_use]
    pub fn components(&self) -> &[RegistryComponent] {
        &self.components
    }

    /// How many times `name` has been fetched
    #[must_use]
    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches.lock().map(|fetches| fetches.get(name).copied().unwrap_or(0)).unwrap_or(0)
    }
}

impl ComponentSource for MockRegistry {
    async fn fetch_component(&self, name: &str) -> Result<RegistryComponent, PixelMotionError> {
        if let Ok(mut fetches) = self.fetches.lock() {
            *fetches.entry(name.to_string()).or_default() += 1;
        }

        self.components.iter().find(|c| c.name == name).cloned().ok_or_else(|| {
            PixelMotionError::ComponentNotFound {
                name: name.to_string(),
            }
        })
    }
}

fn entry_for(component: &RegistryComponent) -> RegistryIndexEntry {
    RegistryIndexEntry {
        name: component.name.clone(),
        item_type: component.item_type,
        registry_dependencies: component.registry_dependencies.clone(),
        description: Some(component.description.clone()).filter(|d| !d.is_empty()),
        dependencies: component.dependencies.clone(),
    }
}

/// Empty component payload
#[must_use]
pub fn component(name: &str, item_type: ItemType) -> RegistryComponent {
    RegistryComponent {
        name: name.to_string(),
        item_type,
        title: name.to_string(),
        description: String::new(),
        dependencies: Vec::new(),
        registry_dependencies: Vec::new(),
        files: Vec::new(),
    }
}

/// A component file
#[must_use]
pub fn file(path: &str, file_type: ItemType, content: &str) -> RegistryFile {
    RegistryFile {
        path: path.to_string(),
        file_type,
        content: content.to_string(),
    }
}

/// Builder-style setters for test payloads
pub trait ComponentExt {
    #[must_use]
    fn with_file(self, file: RegistryFile) -> Self;
    #[must_use]
    fn with_dependencies<'a>(self, deps: impl IntoIterator<Item = &'a str>) -> Self;
    #[must_use]
    fn with_registry_dependencies<'a>(self, deps: impl IntoIterator<Item = &'a str>) -> Self;
    #[must_use]
    fn with_description(self, description: &str) -> Self;
}

impl ComponentExt for RegistryComponent {
    fn with_file(mut self, file: RegistryFile) -> Self {
        self.files.push(file);
        self
    }

    fn with_dependencies<'a>(mut self, deps: impl IntoIterator<Item = &'a str>) -> Self {
        self.dependencies.extend(deps.into_iter().map(str::to_string));
        self
    }

    fn with_registry_dependencies<'a>(mut self, deps: impl IntoIterator<Item = &'a str>) -> Self {
        self.registry_dependencies.extend(deps.into_iter().map(str::to_string));
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}
