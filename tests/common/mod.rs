//! Common test utilities for pixel-motion integration tests
//!
//! - [`RegistryServer`] serves registry documents from a local axum server
//! - [`TestProject`] is a temporary project directory plus an isolated `PATH`
//!   for running the real `pixel-motion` binary

// Not every helper is used by every test module
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use pixel_motion_cli::registry::ItemType;
use pixel_motion_cli::test_utils::{ComponentExt, MockRegistry, component, file};
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Path prefix the registry is mounted under
const REGISTRY_PREFIX: &str = "/r";

#[derive(Default)]
struct ServerState {
    documents: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

async fn serve_document(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(path.clone());
    }

    match state.documents.get(&path) {
        Some(body) => ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Local HTTP registry running on its own thread
///
/// Unknown paths answer 404. Stops when dropped.
pub struct RegistryServer {
    base_url: String,
    state: Arc<ServerState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl RegistryServer {
    /// Serve the index and every payload of `registry`
    pub fn start(registry: &MockRegistry) -> Result<Self> {
        let mut documents = HashMap::new();
        documents.insert("registry.json".to_string(), serde_json::to_string(&registry.index())?);
        for component in registry.components() {
            documents.insert(
                format!("components/{}.json", component.name),
                serde_json::to_string(component)?,
            );
        }
        Self::start_with_documents(documents)
    }

    /// Serve raw documents keyed by their path below the registry base URL
    pub fn start_with_documents(documents: HashMap<String, String>) -> Result<Self> {
        let state = Arc::new(ServerState {
            documents: documents
                .into_iter()
                .map(|(path, body)| (format!("{REGISTRY_PREFIX}/{path}"), body))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(serve_document).with_state(Arc::clone(&state));
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = addr_tx.send(Err(e.to_string()));
                    return;
                }
            };
            runtime.block_on(async move {
                let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                    Ok(listener) => listener,
                    Err(e) => {
                        let _ = addr_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = addr_tx.send(listener.local_addr().map_err(|e| e.to_string()));
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        });

        let addr = addr_rx
            .recv()
            .context("Registry server thread exited early")?
            .map_err(|e| anyhow::anyhow!("Failed to start registry server: {e}"))?;

        Ok(Self {
            base_url: format!("http://{addr}{REGISTRY_PREFIX}"),
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    /// Base URL to pass as the registry
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Paths requested so far, relative to the base URL
    pub fn requests(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .map(|requests| {
                requests
                    .iter()
                    .map(|path| {
                        path.strip_prefix(REGISTRY_PREFIX)
                            .unwrap_or(path)
                            .trim_start_matches('/')
                            .to_string()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Drop for RegistryServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Temporary project for running the CLI
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    bin_dir: PathBuf,
}

impl TestProject {
    /// Empty project without a config file
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let bin_dir = temp_dir.path().join("bin");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&bin_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            bin_dir,
        })
    }

    /// Project with the default `pixel-motion.config.json`
    pub fn initialized() -> Result<Self> {
        let project = Self::new()?;
        project.write_config(
            r#"{
  "style": "default",
  "uiDir": "src/pixel-motion/ui",
  "libDir": "src/pixel-motion/lib",
  "typescript": true
}
"#,
        )?;
        Ok(project)
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Path of a UI component file
    pub fn ui_file(&self, name: &str) -> PathBuf {
        self.project_dir.join("src/pixel-motion/ui").join(name)
    }

    /// Path of a library file
    pub fn lib_file(&self, name: &str) -> PathBuf {
        self.project_dir.join("src/pixel-motion/lib").join(name)
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        let config_path = self.project_dir.join("pixel-motion.config.json");
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))
    }

    /// Create a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;
        Ok(())
    }

    /// Put a fake package manager on the isolated `PATH`
    ///
    /// The script appends its arguments as one line to `<name>.log` and exits
    /// with `exit_code`, printing a message on stderr when non-zero.
    #[cfg(unix)]
    pub fn install_fake_package_manager(&self, name: &str, exit_code: i32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let log = self.bin_dir.join(format!("{name}.log"));
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\nif [ {exit_code} -ne 0 ]; then echo \"{name}: registry unreachable\" >&2; fi\nexit {exit_code}\n",
            log.display()
        );
        let path = self.bin_dir.join(name);
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    /// Argument lines recorded by a fake package manager
    pub fn package_manager_calls(&self, name: &str) -> Vec<String> {
        fs::read_to_string(self.bin_dir.join(format!("{name}.log")))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The binary, run in the project with an isolated environment
    ///
    /// `PATH` only contains the fake package managers, so a real npm is never
    /// invoked.
    pub fn command(&self, registry_url: &str) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_pixel-motion"));
        cmd.current_dir(&self.project_dir)
            .env("PIXEL_MOTION_REGISTRY_URL", registry_url)
            .env("PIXEL_MOTION_NO_PROGRESS", "1")
            .env("NO_COLOR", "1")
            .env("PATH", &self.bin_dir)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary and capture its output
    pub fn run(&self, registry_url: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self
            .command(registry_url)
            .args(args)
            .output()
            .context("Failed to run pixel-motion")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert_eq!(
            self.code,
            Some(1),
            "Expected exit code 1\nStdout: {}\nStderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file to not exist: {}", path.display());
    }

    pub fn equals(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        assert_eq!(content, expected, "Unexpected content in {}", path.display());
    }
}

/// Registry used across the suite
///
/// `terminal` builds on `code-block`; both need `remotion`. `interpolations`
/// is a standalone library helper.
pub fn motion_registry() -> MockRegistry {
    MockRegistry::new()
        .with_component(
            component("terminal", ItemType::Ui)
                .with_description("Animated terminal window")
                .with_file(file("registry/ui/terminal.tsx", ItemType::Ui, TERMINAL_SOURCE))
                .with_dependencies(["remotion"])
                .with_registry_dependencies(["code-block"]),
        )
        .with_component(
            component("code-block", ItemType::Ui)
                .with_description("Syntax highlighted code")
                .with_file(file("registry/ui/code-block.tsx", ItemType::Ui, CODE_BLOCK_SOURCE))
                .with_dependencies(["remotion"]),
        )
        .with_component(
            component("interpolations", ItemType::Lib)
                .with_file(file("registry/lib/interpolations.ts", ItemType::Lib, "export {};\n"))
                .with_dependencies(["remotion", "@remotion/paths"]),
        )
}

pub const TERMINAL_SOURCE: &str = "import { CodeBlock } from \"./code-block\";\nexport const Terminal = () => null;\n";
pub const CODE_BLOCK_SOURCE: &str = "export const CodeBlock = () => null;\n";
