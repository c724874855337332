pub mod paths;

// Re-export commonly used functions
pub use paths::{
    blastgate_databases_dir, blastgate_tools_dir, blastgate_workspace_dir, describe_paths,
    DEFAULT_DATABASES_DIR,
};
