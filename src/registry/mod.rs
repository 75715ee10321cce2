//! Registry data model and client
//!
//! The registry is a read-only HTTP JSON service with two documents:
//!
//! - `{base}/registry.json` - the [`RegistryIndex`], a lightweight list of every
//!   component with its type and registry dependencies
//! - `{base}/components/{name}.json` - the full [`RegistryComponent`] payload,
//!   including file contents and external package dependencies
//!
//! Resolution works on the index alone; payloads are only fetched while
//! installing. The [`client`] module performs both requests.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "name": "terminal",
//!   "type": "registry:ui",
//!   "title": "Terminal",
//!   "description": "Animated terminal window",
//!   "dependencies": ["remotion"],
//!   "registryDependencies": ["code-block"],
//!   "files": [{ "path": "ui/terminal.tsx", "type": "registry:ui", "content": "..." }]
//! }
//! ```

pub mod client;

pub use client::{ComponentSource, RegistryClient, RegistrySettings};

use serde::{Deserialize, Serialize};

/// Kind of registry item or file
///
/// Decides which configured directory a file is written to. The registry
/// publishes `registry:ui` and `registry:lib`; bare `ui` and `lib` are accepted
/// as well. Any other value is treated as [`ItemType::Lib`], so only files
/// explicitly marked as UI end up in the UI directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    /// Visual component, installed under `uiDir`
    Ui,
    /// Helper module, installed under `libDir`
    Lib,
}

impl ItemType {
    /// Wire representation used by the registry
    #[must_use]
    pub const fn as_registry_str(&self) -> &'static str {
        match self {
            ItemType::Ui => "registry:ui",
            ItemType::Lib => "registry:lib",
        }
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        match value.strip_prefix("registry:").unwrap_or(&value) {
            "ui" => ItemType::Ui,
            _ => ItemType::Lib,
        }
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        value.as_registry_str().to_string()
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Ui => write!(f, "ui"),
            ItemType::Lib => write!(f, "lib"),
        }
    }
}

/// The registry catalog fetched once per command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryIndex {
    /// Display name of the registry
    pub name: String,
    /// Registry homepage
    #[serde(default)]
    pub homepage: String,
    /// Every installable component, in publication order
    #[serde(default)]
    pub items: Vec<RegistryIndexEntry>,
}

impl RegistryIndex {
    /// Look up an entry by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistryIndexEntry> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// One component as listed in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryIndexEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// Full payload for a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// External packages to install through the project's package manager
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Other components from the same registry
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    #[serde(default)]
    pub files: Vec<RegistryFile>,
}

/// A source file shipped with a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Source-relative path; only the final segment names the destination
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: ItemType,
    /// File text, written verbatim
    #[serde(default)]
    pub content: String,
}

impl RegistryFile {
    /// Destination file name (the final segment of [`RegistryFile::path`])
    ///
    /// Returns `None` when the path has no usable final segment, such as an
    /// empty path or one ending in `..`.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        std::path::Path::new(&self.path).file_name().and_then(|name| name.to_str())
    }
}
