//! User-supplied BLAST parameters and the allow-list that guards them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Flags that may be forwarded from a request to BLAST+.
///
/// Flags that name files (`-out`, `-query`, `-db`, `-import_search_strategy`),
/// contact remote services (`-remote`) or change the output format are not
/// listed. Neither is `-penalty`: its value is always negative and every
/// token starting with `-` is checked as a flag.
pub const DEFAULT_ALLOWED_PARAMETERS: &[&str] = &[
    "-evalue",
    "-word_size",
    "-gapopen",
    "-gapextend",
    "-reward",
    "-matrix",
    "-task",
    "-max_target_seqs",
    "-num_descriptions",
    "-num_alignments",
    "-max_hsps",
    "-perc_identity",
    "-qcov_hsp_perc",
    "-strand",
    "-dust",
    "-seg",
    "-soft_masking",
    "-lcase_masking",
    "-ungapped",
    "-comp_based_stats",
    "-threshold",
    "-window_size",
    "-xdrop_ungap",
    "-xdrop_gap",
    "-xdrop_gap_final",
    "-culling_limit",
    "-best_hit_overhang",
    "-best_hit_score_edge",
    "-sum_stats",
    "-searchsp",
    "-dbsize",
    "-query_loc",
];

/// Classification of a parameter token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Flag,
    Value,
}

/// A single whitespace-delimited token of the raw parameter string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterToken {
    pub text: String,
    pub kind: ParameterKind,
}

impl ParameterToken {
    pub fn new(text: &str) -> Self {
        let kind = if text.starts_with('-') {
            ParameterKind::Flag
        } else {
            ParameterKind::Value
        };
        Self {
            text: text.to_string(),
            kind,
        }
    }

    pub fn is_flag(&self) -> bool {
        self.kind == ParameterKind::Flag
    }
}

/// Split a raw parameter string into classified tokens
pub fn tokenize_parameters(raw: &str) -> Vec<ParameterToken> {
    raw.split_whitespace().map(ParameterToken::new).collect()
}

/// Immutable set of recognized flags, built once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterAllowList {
    flags: BTreeSet<String>,
}

impl ParameterAllowList {
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// First flag token that is not in the allow-list
    pub fn first_unrecognized<'a>(
        &self,
        tokens: &'a [ParameterToken],
    ) -> Option<&'a ParameterToken> {
        tokens
            .iter()
            .find(|token| token.is_flag() && !self.contains(&token.text))
    }
}

impl Default for ParameterAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_PARAMETERS.iter().copied())
    }
}
