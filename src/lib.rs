//! Blastgate: an HTTP gateway for BLAST+ searches
//!
//! Requests flow validator → FASTA normalizer → database resolver →
//! request workspace → command builder → invocation gateway. The member
//! crates hold the individual stages; this crate wires them together and
//! serves them over HTTP.

pub mod cli;
pub mod pipeline;
pub mod server;

pub use pipeline::{SearchService, Validator};
pub use server::{router, serve, AppState};

pub use blastgate_core::{BlastgateError, BlastgateResult, Config};
