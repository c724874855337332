use blastgate_core::types::parameters::tokenize_parameters;
use blastgate_core::{
    BlastgateError, BlastgateResult, Config, ParameterAllowList, SearchMode, SearchPayload,
    SearchRequest,
};
use serde_json::Value;
use std::sync::Arc;

/// Checks a request body before anything touches the filesystem
///
/// Checks run in a fixed order and the first failure is returned:
/// sequence presence, sequence type, sequence length, database list,
/// then the parameter allow-list.
#[derive(Debug, Clone)]
pub struct Validator {
    max_sequence_length: usize,
    allowed: Arc<ParameterAllowList>,
}

impl Validator {
    pub fn new(max_sequence_length: usize, allowed: Arc<ParameterAllowList>) -> Self {
        Self {
            max_sequence_length,
            allowed,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.search.max_sequence_length,
            Arc::new(config.parameters.allowed.clone()),
        )
    }

    pub fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }

    pub fn allowed(&self) -> &ParameterAllowList {
        &self.allowed
    }

    pub fn validate(&self, mode: SearchMode, payload: SearchPayload) -> BlastgateResult<SearchRequest> {
        let sequence = match payload.sequence {
            None | Some(Value::Null) => return Err(BlastgateError::MissingSequence),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(BlastgateError::MissingSequence)
            }
            Some(Value::String(s)) => s,
            Some(_) => return Err(BlastgateError::InvalidSequenceType),
        };

        let length = sequence.chars().count();
        if length > self.max_sequence_length {
            return Err(BlastgateError::SequenceTooLarge {
                length,
                limit: self.max_sequence_length,
            });
        }

        let databases = payload.db.unwrap_or_default();
        if databases.is_empty() {
            return Err(BlastgateError::MissingDatabase);
        }

        let raw_parameters = payload.params.unwrap_or_default();
        let tokens = tokenize_parameters(&raw_parameters);
        if let Some(token) = self.allowed.first_unrecognized(&tokens) {
            return Err(BlastgateError::UnrecognizedParameter(token.text.clone()));
        }

        Ok(SearchRequest {
            mode,
            sequence,
            databases,
            raw_parameters,
        })
    }
}
