//! Request pipeline: validation, normalization, resolution and execution

pub mod search;
pub mod validator;

pub use search::SearchService;
pub use validator::Validator;
