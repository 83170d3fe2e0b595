//! Endpoint-boundary error handling.
//!
//! Every failure class (upstream unreachable, upstream query error,
//! malformed input) is caught here, logged, and converted into a
//! generic `500 {"error": ...}` body. Missing entities are not errors;
//! handlers return JSON `null` for those.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{MetadataError, SubgraphError};

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure message.
    pub error: String,
}

/// A request that could not be served.
#[derive(Debug)]
pub struct ApiError(String);

impl ApiError {
    /// A required request parameter was absent.
    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self(format!("{name} parameter is required"))
    }

    /// A request parameter held a value that could not be parsed.
    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self(format!("invalid {name} parameter: {value}"))
    }
}

impl From<SubgraphError> for ApiError {
    fn from(e: SubgraphError) -> Self {
        Self(e.to_string())
    }
}

impl From<MetadataError> for ApiError {
    fn from(e: MetadataError) -> Self {
        Self(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: self.0 }),
        )
            .into_response()
    }
}
