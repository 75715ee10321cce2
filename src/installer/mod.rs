//! Component installation.
//!
//! Installs a [`ResolvedSet`] into a project: each component payload is
//! fetched from a [`ComponentSource`], its files are written into the directory
//! configured for their type, and its external package dependencies are
//! collected for the package manager bridge.
//!
//! # Installation Process
//!
//! 1. **Fetch**: one payload request per resolved component, sequentially
//! 2. **Aggregate**: `dependencies` of every component are unioned into one set
//! 3. **Route**: `registry:ui` files go to `uiDir`, everything else to `libDir`
//! 4. **Flatten**: only the last segment of a file's `path` is kept
//! 5. **Write**: existing files are skipped unless `overwrite` is set; new
//!    files are written atomically, creating directories as needed
//!
//! # Conflict Policy
//!
//! Installation never destroys user modifications unless asked to. When a
//! destination already exists and overwrite is off, the file is reported as
//! [`FileStatus::Skipped`] and its content is neither read nor touched.
//!
//! # Partial Failure
//!
//! There is no rollback. If fetching a later component fails, files already
//! written for earlier components stay on disk; components are independent
//! units and every written file is complete.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::PixelMotionError;
use crate::registry::{ComponentSource, RegistryComponent};
use crate::resolver::ResolvedSet;
use crate::utils::fs::atomic_write;

mod context;


pub use context::InstallContext;

/// What happened to one component file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was created or replaced
    Written,
    /// The destination already existed and overwrite was off
    Skipped,
}

/// Per-file result, reported in installation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Component the file belongs to
    pub component: String,
    /// Destination file name
    pub file_name: String,
    /// Full destination path
    pub destination: PathBuf,
    pub status: FileStatus,
}

/// Summary of an installation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Components whose payloads were processed, in installation order
    pub components: Vec<String>,
    /// Every file outcome, in installation order
    pub files: Vec<FileOutcome>,
    /// Union of external package dependencies across all components
    pub dependencies: BTreeSet<String>,
}

impl InstallReport {
    pub fn written(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|file| file.status == FileStatus::Written)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|file| file.status == FileStatus::Skipped)
    }
}

/// Install every component in `resolved`.
///
/// `on_file` is called for each file as soon as it has been written or
/// skipped, so callers can report progress even if a later component fails.
///
/// # Errors
///
/// - [`PixelMotionError::ComponentNotFound`] / [`PixelMotionError::RegistryUnavailable`]
///   when a payload cannot be fetched
/// - [`PixelMotionError::InvalidComponent`] when a file path has no file name
/// - I/O errors while creating directories or writing files
pub async fn install_components<S, F>(
    ctx: &InstallContext<'_>,
    source: &S,
    resolved: &ResolvedSet,
    mut on_file: F,
) -> Result<InstallReport>
where
    S: ComponentSource,
    F: FnMut(&FileOutcome),
{
    let mut report = InstallReport::default();

    for name in resolved.iter() {
        let component = source.fetch_component(name).await?;
        debug!(
            "Installing {} ({} files, {} dependencies)",
            name,
            component.files.len(),
            component.dependencies.len()
        );

        report.dependencies.extend(component.dependencies.iter().cloned());

        install_component_files(ctx, &component, |outcome| {
            on_file(&outcome);
            report.files.push(outcome);
        })?;

        report.components.push(name.to_string());
    }

    Ok(report)
}

/// Write the files of a single component, handing each outcome to `on_file`
/// before moving on to the next file.
fn install_component_files<F>(
    ctx: &InstallContext<'_>,
    component: &RegistryComponent,
    mut on_file: F,
) -> Result<()>
where
    F: FnMut(FileOutcome),
{
    for file in &component.files {
        let file_name = file.file_name().ok_or_else(|| PixelMotionError::InvalidComponent {
            name: component.name.clone(),
            reason: format!("file path \"{}\" has no file name", file.path),
        })?;

        let destination = ctx.config.dir_for(ctx.project_dir, file.file_type).join(file_name);

        let status = if destination.exists() && !ctx.overwrite {
            debug!("Skipping existing {}", destination.display());
            FileStatus::Skipped
        } else {
            atomic_write(&destination, file.content.as_bytes()).with_context(|| {
                format!("Failed to install {} from component {}", file_name, component.name)
            })?;
            debug!("Wrote {}", destination.display());
            FileStatus::Written
        };

        on_file(FileOutcome {
            component: component.name.clone(),
            file_name: file_name.to_string(),
            destination,
            status,
        });
    }

    Ok(())
}
