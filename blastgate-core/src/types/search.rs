//! Search modes and the request shapes handled by the HTTP layer

use crate::error::{BlastgateError, BlastgateResult};
use crate::types::parameters::{tokenize_parameters, ParameterToken};
use serde::{Deserialize, Serialize};

/// BLAST search program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Nucleotide query against nucleotide databases (blastn)
    Nucleotide,
    /// Protein query against protein databases (blastp)
    Protein,
}

impl SearchMode {
    pub const ALL: [SearchMode; 2] = [SearchMode::Nucleotide, SearchMode::Protein];

    /// Name of the BLAST+ executable for this mode
    pub fn program_name(&self) -> &'static str {
        match self {
            SearchMode::Nucleotide => "blastn",
            SearchMode::Protein => "blastp",
        }
    }

    /// Scoring flags added to every search in this mode
    pub fn scoring_defaults(&self) -> Option<ScoringDefaults> {
        match self {
            SearchMode::Nucleotide => Some(ScoringDefaults::NUCLEOTIDE),
            SearchMode::Protein => None,
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program_name())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = BlastgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blastn" | "nucleotide" => Ok(SearchMode::Nucleotide),
            "blastp" | "protein" => Ok(SearchMode::Protein),
            _ => Err(BlastgateError::Configuration(format!(
                "Unknown search mode: {}",
                s
            ))),
        }
    }
}

/// Fixed match/mismatch and gap scores passed to the search tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringDefaults {
    pub reward: i32,
    pub penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl ScoringDefaults {
    pub const NUCLEOTIDE: ScoringDefaults = ScoringDefaults {
        reward: 2,
        penalty: -3,
        gap_open: 5,
        gap_extend: 2,
    };

    /// Render as command-line flags
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-reward".to_string(),
            self.reward.to_string(),
            "-penalty".to_string(),
            self.penalty.to_string(),
            "-gapopen".to_string(),
            self.gap_open.to_string(),
            "-gapextend".to_string(),
            self.gap_extend.to_string(),
        ]
    }
}

/// Raw JSON body of a search request
///
/// `sequence` is kept as an untyped JSON value so that a non-string
/// sequence can be reported as such instead of as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub sequence: Option<serde_json::Value>,
    #[serde(default)]
    pub db: Option<Vec<String>>,
    #[serde(default)]
    pub params: Option<String>,
}

impl SearchPayload {
    /// Parse a request body. An empty body or a bare `null` is treated as `{}`.
    pub fn from_slice(body: &[u8]) -> BlastgateResult<Self> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| BlastgateError::MalformedRequest(e.to_string()))?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| BlastgateError::MalformedRequest(e.to_string()))
    }
}

/// A search request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub sequence: String,
    pub databases: Vec<String>,
    pub raw_parameters: String,
}

impl SearchRequest {
    /// Whitespace-delimited tokens of the raw parameter string
    pub fn parameter_tokens(&self) -> Vec<ParameterToken> {
        tokenize_parameters(&self.raw_parameters)
    }
}
