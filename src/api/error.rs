//! Error responses for the HTTP layer.
//!
//! Every failure is answered with `{ "error": "<message>" }`. Caller mistakes
//! carry the underlying message; storage failures are logged and answered with
//! the route's fixed message only.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Maps a ledger error onto a status code, using `fallback` as the body of
    /// internal failures.
    #[must_use]
    pub fn from_error(err: Error, fallback: &'static str) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else if matches!(err, Error::DuplicateId { .. }) {
            StatusCode::CONFLICT
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{fallback}: {err}");
            return Self {
                status,
                message: fallback.to_string(),
            };
        }
        Self {
            status,
            message: err.to_string(),
        }
    }

    /// A 400 with the given message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Status code of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Attaches a route's fixed failure message to a ledger result.
pub trait ResultExt<T> {
    /// Converts the error with [`ApiError::from_error`].
    fn or_fail(self, fallback: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for crate::errors::Result<T> {
    fn or_fail(self, fallback: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_error(e, fallback))
    }
}
