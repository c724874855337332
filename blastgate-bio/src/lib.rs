//! Sequence handling for blastgate

pub mod formats;

// Re-export fasta functions
pub use formats::fasta::{normalize_fasta, NormalizedFasta, SYNTHETIC_ID_PREFIX};
