//! Test environment management
//!
//! Provides isolated test environments with automatic cleanup using RAII.

use anyhow::{bail, Context, Result};
use blastgate_core::{Config, OutputMode};
use blastgate_utils::IndexKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Roots of the environments that currently export variables
static ENV_REGISTRY: Lazy<Mutex<Vec<PathBuf>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Configuration for test environment
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Preserve the directory after the test (for debugging)
    pub preserve: bool,
    /// Export `BLASTGATE_*` variables pointing into the environment
    ///
    /// Tests enabling this must run serially. Creation fails while another
    /// exporting environment is alive.
    pub export_env: bool,
    /// Search timeout written into `config()`
    pub timeout_secs: u64,
    /// Output mode written into `config()`
    pub output: OutputMode,
    /// Custom prefix for test directories
    pub prefix: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            preserve: false,
            export_env: false,
            timeout_secs: 10,
            output: OutputMode::Stdout,
            prefix: None,
        }
    }
}

/// Isolated test environment with automatic cleanup
pub struct TestEnvironment {
    /// Root temporary directory
    temp_dir: Option<TempDir>,
    /// Path to the test environment root
    root_path: PathBuf,
    /// Saved environment variables for restoration
    saved_env: HashMap<String, Option<String>>,
    config: TestConfig,
}

impl TestEnvironment {
    /// Create a new test environment with default config
    pub fn new() -> Result<Self> {
        Self::with_config(TestConfig::default())
    }

    /// Create a new test environment with custom config
    pub fn with_config(config: TestConfig) -> Result<Self> {
        let prefix = config.prefix.as_deref().unwrap_or("blastgate-test");
        let temp_dir =
            TempDir::with_prefix(prefix).context("Failed to create temporary directory")?;

        let root_path = temp_dir.path().to_path_buf();

        // Create standard subdirectories
        std::fs::create_dir_all(root_path.join("databases"))?;
        std::fs::create_dir_all(root_path.join("tools"))?;
        std::fs::create_dir_all(root_path.join("workspace"))?;

        let mut env = Self {
            temp_dir: Some(temp_dir),
            root_path,
            saved_env: HashMap::new(),
            config,
        };

        if env.config.export_env {
            env.setup_environment()?;
        }

        Ok(env)
    }

    /// Set up isolated environment variables
    ///
    /// Fails while another environment is exporting.
    fn setup_environment(&mut self) -> Result<()> {
        let mut registry = ENV_REGISTRY.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(live) = registry.first() {
            bail!(
                "BLASTGATE_* variables are already exported by the environment at {}",
                live.display()
            );
        }

        let vars = [
            ("BLASTGATE_DATABASES_DIR", self.databases_dir()),
            ("BLASTGATE_TOOLS_DIR", self.tools_dir()),
            ("BLASTGATE_WORKSPACE_DIR", self.workspace_dir()),
        ];

        // Save and set environment variables
        for (key, value) in &vars {
            self.saved_env
                .insert(key.to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }

        registry.push(self.root_path.clone());
        Ok(())
    }

    /// Get the root path of the test environment
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Get path to databases directory
    pub fn databases_dir(&self) -> PathBuf {
        self.root_path.join("databases")
    }

    /// Get path to the directory fake tools are installed in
    pub fn tools_dir(&self) -> PathBuf {
        self.root_path.join("tools")
    }

    /// Get path to workspace directory
    pub fn workspace_dir(&self) -> PathBuf {
        self.root_path.join("workspace")
    }

    /// Create the index marker file for a database
    pub fn add_database(&self, name: &str, kind: IndexKind) -> Result<PathBuf> {
        let extension = match kind {
            IndexKind::Nucleotide => "nin",
            IndexKind::Protein => "pin",
        };
        let path = self.databases_dir().join(format!("{}.{}", name, extension));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, b"")
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(path)
    }

    pub fn add_nucleotide_database(&self, name: &str) -> Result<PathBuf> {
        self.add_database(name, IndexKind::Nucleotide)
    }

    pub fn add_protein_database(&self, name: &str) -> Result<PathBuf> {
        self.add_database(name, IndexKind::Protein)
    }

    /// Install an executable script under the tools directory
    pub fn install_tool(&self, name: &str, script: &str) -> Result<PathBuf> {
        let path = self.tools_dir().join(name);
        std::fs::write(&path, script)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
        }

        Ok(path)
    }

    /// Number of request workspaces currently on disk
    pub fn workspace_count(&self) -> usize {
        std::fs::read_dir(self.workspace_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Service configuration pointing into this environment
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.database.database_dir = self.databases_dir();
        config.search.tools_dir = Some(self.tools_dir());
        config.search.timeout_secs = self.config.timeout_secs;
        config.search.output = self.config.output;
        config.workspace.root = self.workspace_dir();
        config
    }

    /// Write a file in the test environment
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root_path.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Manually preserve the environment (for debugging)
    pub fn preserve(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            let path = temp_dir.keep();
            println!("Test environment preserved at: {}", path.display());
        }
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        // Restore environment variables
        for (key, value) in &self.saved_env {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }

        ENV_REGISTRY
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|root| root != &self.root_path);

        if self.config.preserve {
            self.preserve();
        }
        // Otherwise, temp_dir is automatically cleaned up when dropped
    }
}
