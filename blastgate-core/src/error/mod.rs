//! Core error types for blastgate

use thiserror::Error;

/// Main error type for blastgate operations
///
/// The first group of variants are validation failures caused by the
/// request itself; everything else is a server-side failure.
#[derive(Error, Debug)]
pub enum BlastgateError {
    #[error("It looks like the sequence was not provided. Please check and try again.")]
    MissingSequence,

    #[error("Sequence must be a string. Please check the input.")]
    InvalidSequenceType,

    #[error(
        "Sequence is too large. Maximum allowed size is {} characters.",
        format_count(.limit)
    )]
    SequenceTooLarge { length: usize, limit: usize },

    #[error("Missing database input. One or more databases must be included to run the analysis.")]
    MissingDatabase,

    #[error("{}", describe_missing_databases(.0))]
    DatabaseNotFound(Vec<String>),

    #[error("Unrecognized BLAST parameter: '{0}'.")]
    UnrecognizedParameter(String),

    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error("Error normalizing the sequence. Please check the input and try again.")]
    NormalizationError,

    #[error("The BLAST engine is currently unavailable. Please try again later.")]
    ToolUnavailable,

    #[error("The analysis took too long. Please try again.")]
    ToolTimeout,

    #[error("There was a problem running BLAST. Please try again.")]
    ToolLaunchFailed(String),

    #[error("BLAST failure: {0}")]
    ToolExecutionFailed(String),

    #[error("Unable to process the sequence temporarily. Please try again.")]
    Workspace(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for blastgate operations
pub type BlastgateResult<T> = Result<T, BlastgateError>;

impl BlastgateError {
    /// Whether the error was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BlastgateError::MissingSequence
                | BlastgateError::InvalidSequenceType
                | BlastgateError::SequenceTooLarge { .. }
                | BlastgateError::MissingDatabase
                | BlastgateError::DatabaseNotFound(_)
                | BlastgateError::UnrecognizedParameter(_)
                | BlastgateError::MalformedRequest(_)
        )
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BlastgateError::MissingSequence => "missing_sequence",
            BlastgateError::InvalidSequenceType => "invalid_sequence_type",
            BlastgateError::SequenceTooLarge { .. } => "sequence_too_large",
            BlastgateError::MissingDatabase => "missing_database",
            BlastgateError::DatabaseNotFound(_) => "database_not_found",
            BlastgateError::UnrecognizedParameter(_) => "unrecognized_parameter",
            BlastgateError::MalformedRequest(_) => "malformed_request",
            BlastgateError::NormalizationError => "normalization_error",
            BlastgateError::ToolUnavailable => "tool_unavailable",
            BlastgateError::ToolTimeout => "tool_timeout",
            BlastgateError::ToolLaunchFailed(_) => "tool_launch_failed",
            BlastgateError::ToolExecutionFailed(_) => "tool_execution_failed",
            BlastgateError::Workspace(_) => "workspace",
            BlastgateError::Io(_) => "io",
            BlastgateError::Serialization(_) => "serialization",
            BlastgateError::Configuration(_) => "configuration",
        }
    }
}

fn describe_missing_databases(names: &[String]) -> String {
    match names {
        [single] => format!(
            "Database '{}' not found. Please verify the database name and try again.",
            single
        ),
        _ => format!(
            "The following databases were not found: {}. Please verify the database names and try again.",
            names.join(", ")
        ),
    }
}

/// Format a count with thousands separators (1000000 -> "1,000,000")
fn format_count(n: &usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl From<serde_json::Error> for BlastgateError {
    fn from(err: serde_json::Error) -> Self {
        BlastgateError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BlastgateError {
    fn from(err: toml::de::Error) -> Self {
        BlastgateError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for BlastgateError {
    fn from(err: toml::ser::Error) -> Self {
        BlastgateError::Configuration(format!("Failed to serialize config: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BlastgateError::MissingSequence.to_string(),
            "It looks like the sequence was not provided. Please check and try again."
        );
        assert_eq!(
            BlastgateError::UnrecognizedParameter("-badflag".to_string()).to_string(),
            "Unrecognized BLAST parameter: '-badflag'."
        );
        assert_eq!(
            BlastgateError::ToolExecutionFailed("segfault".to_string()).to_string(),
            "BLAST failure: segfault"
        );
        assert!(BlastgateError::ToolTimeout.to_string().contains("too long"));
    }

    #[test]
    fn test_sequence_too_large_formats_limit() {
        let err = BlastgateError::SequenceTooLarge {
            length: 1_000_001,
            limit: 1_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Sequence is too large. Maximum allowed size is 1,000,000 characters."
        );
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(&0), "0");
        assert_eq!(format_count(&999), "999");
        assert_eq!(format_count(&1000), "1,000");
        assert_eq!(format_count(&123456789), "123,456,789");
    }

    #[test]
    fn test_database_not_found_singular_and_plural() {
        let single = BlastgateError::DatabaseNotFound(vec!["missingdb".to_string()]);
        assert_eq!(
            single.to_string(),
            "Database 'missingdb' not found. Please verify the database name and try again."
        );

        let several =
            BlastgateError::DatabaseNotFound(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            several.to_string(),
            "The following databases were not found: a, b. Please verify the database names and try again."
        );
        assert_eq!(single.kind(), several.kind());
    }

    #[test]
    fn test_client_error_classification() {
        let client = [
            BlastgateError::MissingSequence,
            BlastgateError::InvalidSequenceType,
            BlastgateError::SequenceTooLarge { length: 2, limit: 1 },
            BlastgateError::MissingDatabase,
            BlastgateError::DatabaseNotFound(vec!["x".to_string()]),
            BlastgateError::UnrecognizedParameter("-x".to_string()),
            BlastgateError::MalformedRequest("eof".to_string()),
        ];
        for err in &client {
            assert!(err.is_client_error(), "{:?} should be a client error", err);
        }

        let server = [
            BlastgateError::NormalizationError,
            BlastgateError::ToolUnavailable,
            BlastgateError::ToolTimeout,
            BlastgateError::ToolLaunchFailed("denied".to_string()),
            BlastgateError::ToolExecutionFailed("exit 2".to_string()),
            BlastgateError::Workspace("disk full".to_string()),
            BlastgateError::Configuration("bad".to_string()),
        ];
        for err in &server {
            assert!(!err.is_client_error(), "{:?} should be a server error", err);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: BlastgateError = io_err.into();

        match err {
            BlastgateError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_result: Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("{invalid json}");
        let err: BlastgateError = parse_result.unwrap_err().into();

        match err {
            BlastgateError::Serialization(msg) => assert!(msg.contains("key must be a string")),
            _ => panic!("Expected Serialization error variant"),
        }
    }

    #[test]
    fn test_launch_failure_hides_detail() {
        let err = BlastgateError::ToolLaunchFailed("EACCES /opt/blast/bin/blastn".to_string());
        assert!(!err.to_string().contains("EACCES"));
    }
}
