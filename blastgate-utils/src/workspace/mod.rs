//! Workspace management utilities

pub mod temp;

// Re-export main workspace types
pub use temp::{purge_stale_workspaces, RequestWorkspace};
