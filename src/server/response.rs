//! Mapping of pipeline results onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blastgate_core::BlastgateError;
use serde::Serialize;

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// A pipeline error on its way to the client
#[derive(Debug)]
pub struct ApiError(pub BlastgateError);

impl From<BlastgateError> for ApiError {
    fn from(error: BlastgateError) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Text shown to the client
    ///
    /// Internal failures that carry filesystem details get a generic message.
    pub fn message(&self) -> String {
        match &self.0 {
            BlastgateError::Io(_)
            | BlastgateError::Serialization(_)
            | BlastgateError::Configuration(_) => {
                "An internal error occurred. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            message: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError(BlastgateError::MissingSequence).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(BlastgateError::DatabaseNotFound(vec!["x".to_string()])).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(BlastgateError::MalformedRequest("eof".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(BlastgateError::ToolTimeout).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(BlastgateError::NormalizationError).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = ApiError(BlastgateError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "/srv/secret/path",
        )));
        assert!(!err.message().contains("/srv/secret"));

        let err = ApiError(BlastgateError::ToolLaunchFailed("/opt/bin/blastn: EACCES".to_string()));
        assert!(!err.message().contains("EACCES"));
    }

    #[test]
    fn test_tool_failure_carries_stderr() {
        let err = ApiError(BlastgateError::ToolExecutionFailed("bad db".to_string()));
        assert_eq!(err.message(), "BLAST failure: bad db");
    }
}
