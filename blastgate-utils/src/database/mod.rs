//! Database-related utilities

pub mod resolver;

// Re-export main types
pub use resolver::{DatabaseResolver, FilesystemDatabaseResolver, IndexKind, ResolvedDatabase};
