//! Common types for the BLAST+ executables

use blastgate_core::{BlastgateError, SearchMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// BLAST+ programs the service can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Blastn,
    Blastp,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::Blastn, Tool::Blastp];

    /// Get the tool used for a search mode
    pub fn for_mode(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Nucleotide => Tool::Blastn,
            SearchMode::Protein => Tool::Blastp,
        }
    }

    /// Get the binary name for the tool
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Blastn => "blastn",
            Tool::Blastp => "blastp",
        }
    }

    /// Path the tool is launched from
    ///
    /// With a tools directory the binary is taken from there, otherwise the
    /// bare name is left for `PATH` lookup at spawn time.
    pub fn program_path(&self, tools_dir: Option<&Path>) -> PathBuf {
        match tools_dir {
            Some(dir) => dir.join(self.binary_name()),
            None => PathBuf::from(self.binary_name()),
        }
    }

    /// Check if the binary can be found without launching it
    pub fn is_available(&self, tools_dir: Option<&Path>) -> bool {
        match tools_dir {
            Some(dir) => dir.join(self.binary_name()).is_file(),
            None => which::which(self.binary_name()).is_ok(),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary_name())
    }
}

impl std::str::FromStr for Tool {
    type Err = BlastgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blastn" => Ok(Tool::Blastn),
            "blastp" => Ok(Tool::Blastp),
            _ => Err(BlastgateError::Configuration(format!("Unknown tool: {}", s))),
        }
    }
}
