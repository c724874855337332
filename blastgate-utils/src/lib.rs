//! Filesystem utilities for blastgate
//!
//! Database lookup against the BLAST database directory and the scratch
//! directories each search runs in.

pub mod database;
pub mod workspace;

// Re-export commonly used types
pub use database::{DatabaseResolver, FilesystemDatabaseResolver, IndexKind, ResolvedDatabase};
pub use workspace::{purge_stale_workspaces, RequestWorkspace};
