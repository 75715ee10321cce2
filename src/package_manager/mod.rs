//! Package manager detection and dependency installation
//!
//! After component files are written, their external dependencies are installed
//! with a single invocation of the project's package manager. The manager is
//! picked from the lockfile present in the project root:
//!
//! | Lockfile                    | Manager | Command       |
//! |-----------------------------|---------|---------------|
//! | `bun.lockb` or `bun.lock`   | bun     | `bun add`     |
//! | `pnpm-lock.yaml`            | pnpm    | `pnpm add`    |
//! | `yarn.lock`                 | yarn    | `yarn add`    |
//! | none of the above           | npm     | `npm install` |
//!
//! Earlier rows win when several lockfiles exist. Output of the child process
//! is captured rather than streamed; on failure its stderr is carried in the
//! returned [`PixelMotionError::DependencyInstallFailed`].

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::core::PixelMotionError;

/// A JavaScript package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Bun,
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManager {
    /// Detect the manager used by the project at `project_root`
    #[must_use]
    pub fn detect(project_root: &Path) -> Self {
        let has = |name: &str| project_root.join(name).exists();

        if has("bun.lockb") || has("bun.lock") {
            Self::Bun
        } else if has("pnpm-lock.yaml") {
            Self::Pnpm
        } else if has("yarn.lock") {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    /// Executable name
    #[must_use]
    pub const fn program(&self) -> &'static str {
        match self {
            Self::Bun => "bun",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Subcommand that adds packages
    #[must_use]
    pub const fn add_subcommand(&self) -> &'static str {
        match self {
            Self::Npm => "install",
            Self::Bun | Self::Pnpm | Self::Yarn => "add",
        }
    }

    /// Build the install command for `packages`
    ///
    /// Returns `None` when there is nothing to install.
    #[must_use]
    pub fn install_command(&self, packages: &BTreeSet<String>) -> Option<InstallCommand> {
        if packages.is_empty() {
            return None;
        }

        let mut args = Vec::with_capacity(packages.len() + 1);
        args.push(self.add_subcommand().to_string());
        args.extend(packages.iter().cloned());

        Some(InstallCommand {
            manager: *self,
            args,
        })
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// One package manager invocation, e.g. `pnpm add remotion`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub manager: PackageManager,
    /// Arguments after the program name
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Run the command in `project_root`, capturing its output
    ///
    /// # Errors
    ///
    /// Returns [`PixelMotionError::DependencyInstallFailed`] if the program is
    /// not on `PATH`, cannot be spawned, or exits unsuccessfully.
    pub async fn run(&self, project_root: &Path) -> Result<(), PixelMotionError> {
        let program = which::which(self.manager.program()).map_err(|e| self.failed(e.to_string()))?;
        debug!("Executing command: {} (resolved to {})", self, program.display());

        let output = Command::new(&program)
            .args(&self.args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.failed(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim());
        }

        if !output.status.success() {
            debug!("Command failed with exit code: {:?}", output.status.code());
            let reason = match (stderr.trim(), output.status.code()) {
                ("", Some(code)) => format!("exited with status {code}"),
                ("", None) => "terminated by signal".to_string(),
                (stderr, _) => stderr.to_string(),
            };
            return Err(self.failed(reason));
        }

        if !stderr.trim().is_empty() {
            debug!("{}", stderr.trim());
        }
        Ok(())
    }

    fn failed(&self, reason: String) -> PixelMotionError {
        PixelMotionError::DependencyInstallFailed {
            command: self.to_string(),
            reason,
        }
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manager.program())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
