//! External BLAST+ tool integration
//!
//! Builds `blastn`/`blastp` command lines from validated requests and runs
//! them as bounded subprocesses.

// Modules
pub mod blast;
pub mod testing;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use blast::{BlastCommand, BlastGateway, CommandBuilder, OutputTarget};
pub use testing::MockSearchRunner;
pub use traits::SearchRunner;
pub use types::Tool;
