use std::path::PathBuf;

/// Database directory used when nothing else is configured
pub const DEFAULT_DATABASES_DIR: &str = "/blast/blastdb";

/// Get the BLAST database directory
/// Checks BLASTGATE_DATABASES_DIR environment variable, falls back to /blast/blastdb
pub fn blastgate_databases_dir() -> PathBuf {
    std::env::var("BLASTGATE_DATABASES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASES_DIR))
}

/// Get the directory holding the BLAST+ executables, if one is configured
/// Checks BLASTGATE_TOOLS_DIR; `None` means the executables are looked up on PATH
pub fn blastgate_tools_dir() -> Option<PathBuf> {
    std::env::var("BLASTGATE_TOOLS_DIR").ok().map(PathBuf::from)
}

/// Get the root directory for per-request workspaces
/// Checks BLASTGATE_WORKSPACE_DIR environment variable, falls back to $TMPDIR/blastgate or /tmp/blastgate
pub fn blastgate_workspace_dir() -> PathBuf {
    if let Ok(path) = std::env::var("BLASTGATE_WORKSPACE_DIR") {
        PathBuf::from(path)
    } else if let Ok(tmpdir) = std::env::var("TMPDIR") {
        PathBuf::from(tmpdir).join("blastgate")
    } else {
        PathBuf::from("/tmp/blastgate")
    }
}

/// Describe the resolved paths (used by --print-config and startup logging)
pub fn describe_paths() -> String {
    let tools = blastgate_tools_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(PATH)".to_string());
    format!(
        "Databases: {}\nTools: {}\nWorkspaces: {}",
        blastgate_databases_dir().display(),
        tools,
        blastgate_workspace_dir().display()
    )
}
