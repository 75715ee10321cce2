//! Registry dependency resolution
//!
//! Turns the component names requested on the command line into the complete
//! set of components to install, following `registryDependencies` edges in the
//! [`RegistryIndex`]. Only the index is consulted; payloads are not fetched
//! here.
//!
//! The traversal is an explicit work list plus a seen-set rather than
//! recursion. A name that is already in the seen-set is never expanded again,
//! which both deduplicates the result and breaks dependency cycles, so
//! resolution terminates for any index.
//!
//! # Example
//!
//! ```rust
//! use pixel_motion_cli::registry::{ItemType, RegistryIndex, RegistryIndexEntry};
//! use pixel_motion_cli::resolver::{ResolveRequest, resolve};
//!
//! let entry = |name: &str, deps: &[&str]| RegistryIndexEntry {
//!     name: name.to_string(),
//!     item_type: ItemType::Ui,
//!     registry_dependencies: deps.iter().map(|d| d.to_string()).collect(),
//!     description: None,
//!     dependencies: Vec::new(),
//! };
//! let index = RegistryIndex {
//!     name: "pixel-motion".to_string(),
//!     homepage: String::new(),
//!     items: vec![entry("terminal", &["code-block"]), entry("code-block", &[])],
//! };
//!
//! let resolved = resolve(&index, &ResolveRequest::named(["terminal"])).unwrap();
//! assert!(resolved.contains("terminal"));
//! assert!(resolved.contains("code-block"));
//! assert_eq!(resolved.len(), 2);
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::core::PixelMotionError;
use crate::registry::RegistryIndex;

/// What the user asked to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveRequest {
    /// Every component in the index
    All,
    /// The given names plus everything they transitively depend on
    Named(Vec<String>),
}

impl ResolveRequest {
    /// Request specific components by name
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Named(names.into_iter().map(Into::into).collect())
    }

    /// `true` when nothing at all was requested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Named(names) if names.is_empty())
    }
}

/// Deduplicated, transitively closed set of component names
///
/// Membership is what matters. Iteration yields names in the order they were
/// first resolved, which keeps installer output stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ResolvedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns `false` if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.members.contains(&name) {
            return false;
        }
        self.members.insert(name.clone());
        self.order.push(name);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Resolve `request` against `index`
///
/// # Errors
///
/// Returns [`PixelMotionError::ComponentNotFound`] for the first name (requested
/// or reached through `registryDependencies`) that has no index entry. Names
/// are compared exactly, without case folding or trimming. Resolution stops at
/// that point; no partial set is returned.
pub fn resolve(
    index: &RegistryIndex,
    request: &ResolveRequest,
) -> Result<ResolvedSet, PixelMotionError> {
    let requested = match request {
        ResolveRequest::All => {
            let mut resolved = ResolvedSet::new();
            for item in &index.items {
                resolved.insert(item.name.as_str());
            }
            debug!("Resolved all {} registry components", resolved.len());
            return Ok(resolved);
        }
        ResolveRequest::Named(names) => names,
    };

    let mut resolved = ResolvedSet::new();
    // Reversed so the first requested name is popped first
    let mut work_list: Vec<&str> = requested.iter().rev().map(String::as_str).collect();

    while let Some(name) = work_list.pop() {
        if resolved.contains(name) {
            continue;
        }

        let entry = index.get(name).ok_or_else(|| PixelMotionError::ComponentNotFound {
            name: name.to_string(),
        })?;

        resolved.insert(name);
        debug!("Resolved {} ({} registry dependencies)", name, entry.registry_dependencies.len());

        for dependency in entry.registry_dependencies.iter().rev() {
            if !resolved.contains(dependency) {
                work_list.push(dependency.as_str());
            }
        }
    }

    Ok(resolved)
}
