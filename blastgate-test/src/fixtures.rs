//! Test fixtures and data generators
//!
//! Common queries and request bodies for use across the blastgate workspace.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write;

/// Single nucleotide record with a header
pub const NUCLEOTIDE_QUERY: &str = ">seq1 test query\nACGTACGTACGTTTGACCA\n";

/// Single protein record with a header
pub const PROTEIN_QUERY: &str = ">sp|P69905|HBA_HUMAN\nMVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF\n";

/// Bare residues, no header at all
pub const HEADERLESS_QUERY: &str = "ACGTACGTACGT";

/// Headers that need repair mixed with user-chosen `Query_<n>` ids
pub const MESSY_QUERY: &str = "\r\n>\r\nACGT\r\n\r\n>Query_1 kept\nTTTT\nGGGG\n  \n>  padded  \nCCCC\n";

/// Test sequence with metadata
#[derive(Debug, Clone)]
pub struct TestSequence {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl TestSequence {
    /// Create a simple test sequence
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            sequence: sequence.into(),
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Convert to FASTA format
    pub fn to_fasta(&self) -> String {
        let mut header = format!(">{}", self.id);
        if !self.description.is_empty() {
            let _ = write!(&mut header, " {}", self.description);
        }
        format!("{}\n{}\n", header, self.sequence)
    }
}

/// Generate random DNA sequences
pub fn generate_sequences(count: usize, length: usize) -> Vec<TestSequence> {
    let mut rng = StdRng::seed_from_u64(42); // Deterministic for tests
    let bases = ['A', 'T', 'G', 'C'];

    (0..count)
        .map(|i| {
            let sequence: String = (0..length).map(|_| bases[rng.gen_range(0..4)]).collect();

            TestSequence::new(format!("seq_{}", i), sequence)
        })
        .collect()
}

/// Create a test FASTA file content
pub fn create_test_fasta(sequences: &[TestSequence]) -> String {
    sequences.iter().map(|s| s.to_fasta()).collect()
}

/// Residue string of exactly `length` characters
pub fn sequence_of_length(length: usize) -> String {
    "ACGT".chars().cycle().take(length).collect()
}

/// JSON request body in the shape the HTTP endpoints accept
pub fn request_body(sequence: &str, databases: &[&str], params: Option<&str>) -> String {
    let mut body = serde_json::json!({
        "sequence": sequence,
        "db": databases,
    });
    if let Some(params) = params {
        body["params"] = serde_json::Value::String(params.to_string());
    }
    body.to_string()
}
