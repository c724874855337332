//! Configuration types for blastgate

use crate::system::paths;
use crate::types::ParameterAllowList;
use crate::BlastgateError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Wall-clock limit for one BLAST run
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum sequence length in characters
    #[serde(default = "default_max_sequence_length")]
    pub max_sequence_length: usize,
    /// Directory containing blastn/blastp; looked up on PATH when unset
    #[serde(default = "default_tools_dir", skip_serializing_if = "Option::is_none")]
    pub tools_dir: Option<PathBuf>,
    /// Where BLAST writes its report
    #[serde(default)]
    pub output: OutputMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the BLAST database index files
    #[serde(default = "default_database_dir")]
    pub database_dir: PathBuf,
    /// Index file extensions that mark a nucleotide database
    #[serde(default = "default_nucleotide_markers")]
    pub nucleotide_markers: Vec<String>,
    /// Index file extensions that mark a protein database
    #[serde(default = "default_protein_markers")]
    pub protein_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParametersConfig {
    /// Flags a request may pass through to BLAST
    #[serde(default)]
    pub allowed: ParameterAllowList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Parent directory of the per-request scratch directories
    #[serde(default = "default_workspace_root")]
    pub root: PathBuf,
}

/// How the report is collected from BLAST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Capture standard output
    #[default]
    Stdout,
    /// Pass `-out <file>` and read the file back
    File,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 4001 }
fn default_timeout_secs() -> u64 { 60 }
fn default_max_sequence_length() -> usize { 1_000_000 }
fn default_tools_dir() -> Option<PathBuf> { paths::blastgate_tools_dir() }
fn default_database_dir() -> PathBuf { paths::blastgate_databases_dir() }
fn default_nucleotide_markers() -> Vec<String> { vec!["nin".to_string()] }
fn default_protein_markers() -> Vec<String> { vec!["pin".to_string()] }
fn default_workspace_root() -> PathBuf { paths::blastgate_workspace_dir() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_sequence_length: default_max_sequence_length(),
            tools_dir: default_tools_dir(),
            output: OutputMode::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_dir: default_database_dir(),
            nucleotide_markers: default_nucleotide_markers(),
            protein_markers: default_protein_markers(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_workspace_root(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DatabaseConfig {
    /// All recognized index extensions, nucleotide first
    pub fn index_markers(&self) -> Vec<String> {
        self.nucleotide_markers
            .iter()
            .chain(self.protein_markers.iter())
            .map(|m| m.trim_start_matches('.').to_string())
            .collect()
    }
}

impl Config {
    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), BlastgateError> {
        if self.search.timeout_secs == 0 {
            return Err(BlastgateError::Configuration(
                "search.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.search.max_sequence_length == 0 {
            return Err(BlastgateError::Configuration(
                "search.max_sequence_length must be greater than zero".to_string(),
            ));
        }
        if self.database.index_markers().iter().all(|m| m.is_empty()) {
            return Err(BlastgateError::Configuration(
                "at least one database index marker is required".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, BlastgateError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), BlastgateError> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
