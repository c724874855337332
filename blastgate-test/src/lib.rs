//! Test utilities for the blastgate workspace
//!
//! Common helpers shared by the crates' integration tests.
//!
//! # Features
//!
//! - **Test Environment**: database, tools and workspace directories in a
//!   temporary root, removed on drop
//! - **Fake Tools**: shell scripts standing in for `blastn`/`blastp`
//! - **Fixtures**: FASTA queries and sequence generators
//! - **Assertions**: checks for normalized FASTA and JSON error bodies

pub mod assertions;
pub mod environment;
pub mod fixtures;
pub mod scripts;

// Re-export commonly used items
pub use environment::{TestConfig, TestEnvironment};
pub use fixtures::{create_test_fasta, generate_sequences, TestSequence};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
///
/// Honors `BLASTGATE_LOG`, output goes through the test harness capture.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("BLASTGATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Run a test with a clean environment
///
/// # Example
/// ```rust
/// use blastgate_test::with_test_env;
///
/// with_test_env(|env| {
///     env.add_nucleotide_database("human")?;
///     assert!(env.databases_dir().join("human.nin").exists());
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    // Cleanup happens automatically via Drop
    f(&env)
}

/// Run a test with a configured environment
pub fn with_configured_env<F, R>(config: TestConfig, f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::with_config(config)?;
    f(&env)
}
