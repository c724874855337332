//! Core types shared across the blastgate crates
//!
//! Holds the error taxonomy, the TOML configuration model, filesystem path
//! defaults and the request types that flow through the search pipeline.

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, save_config, Config, OutputMode};
pub use error::{BlastgateError, BlastgateResult};
pub use types::{
    ParameterAllowList, ParameterKind, ParameterToken, ScoringDefaults, SearchMode,
    SearchPayload, SearchRequest,
};

// Re-export system utilities
pub use system::{blastgate_databases_dir, blastgate_tools_dir, blastgate_workspace_dir};

/// Version information for the blastgate project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
