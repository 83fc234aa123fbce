//! Response envelope and error mapping for the HTTP layer.

use crate::task::services::TaskLifecycleError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// JSON envelope returned by every API endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

/// Field-level validation failures keyed by field name.
pub type FieldViolations = BTreeMap<&'static str, Vec<String>>;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not valid JSON for the endpoint.
    #[error("malformed json")]
    MalformedJson(#[from] JsonRejection),

    /// The path did not name a task identifier.
    #[error("invalid task identifier")]
    InvalidPath(#[from] PathRejection),

    /// One or more payload fields failed validation.
    #[error("invalid request payload")]
    Validation(FieldViolations),

    /// The lifecycle service failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::MalformedJson(rejection) => {
                tracing::debug!(error = %rejection, "rejected malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    Value::String("malformed json".to_owned()),
                )
            }
            Self::InvalidPath(rejection) => {
                tracing::debug!(error = %rejection, "rejected task path");
                (
                    StatusCode::NOT_FOUND,
                    Value::String("invalid task identifier".to_owned()),
                )
            }
            Self::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                serde_json::to_value(violations).unwrap_or(Value::Null),
            ),
            Self::Lifecycle(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, Value::String(err.to_string()))
            }
            Self::Lifecycle(err) => {
                tracing::error!(error = %err, "task operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String(err.to_string()),
                )
            }
        };

        let body: ApiResponse<()> = ApiResponse {
            data: None,
            error: Some(error),
        };
        (status, Json(body)).into_response()
    }
}
