//! Request types shared by the search pipeline

pub mod parameters;
pub mod search;

pub use parameters::{
    tokenize_parameters, ParameterAllowList, ParameterKind, ParameterToken,
    DEFAULT_ALLOWED_PARAMETERS,
};
pub use search::{ScoringDefaults, SearchMode, SearchPayload, SearchRequest};
