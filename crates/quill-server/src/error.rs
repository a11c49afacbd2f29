use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use quill_store::StoreError;
use thiserror::Error;

use crate::config::StatusPolicy;

/// Body returned when a read or update targets a missing article.
pub const RECORD_NOT_FOUND: &str = "record not found";

/// Body returned after a successful delete.
pub const ARTICLE_DELETED: &str = "Article is deleted";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A failed request: status code plus a message sent as a JSON string.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Malformed request body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A store failure reported with the error's own message.
    pub fn from_store(err: &StoreError, policy: StatusPolicy) -> Self {
        let status = policy.status_for(err);
        if !err.is_not_found() {
            tracing::error!(error = %err, "storage operation failed");
        }
        Self::new(status, err.to_string())
    }

    /// A store failure on the read path.
    ///
    /// Missing records answer with [`RECORD_NOT_FOUND`]. Under
    /// [`StatusPolicy::Compat`] every other failure does too; under
    /// [`StatusPolicy::Strict`] they keep their own message and status.
    pub fn record_not_found(err: &StoreError, policy: StatusPolicy) -> Self {
        match (err.is_not_found(), policy) {
            (true, _) => Self::new(StatusCode::NOT_FOUND, RECORD_NOT_FOUND),
            (false, StatusPolicy::Compat) => {
                tracing::error!(error = %err, "storage operation failed");
                Self::new(StatusCode::NOT_FOUND, RECORD_NOT_FOUND)
            }
            (false, StatusPolicy::Strict) => Self::from_store(err, policy),
        }
    }

    /// A store failure on the update path.
    ///
    /// Missing records answer with [`RECORD_NOT_FOUND`]; any other failure
    /// keeps its own message, with the status chosen by `policy`.
    pub fn missing_or_store(err: &StoreError, policy: StatusPolicy) -> Self {
        if err.is_not_found() {
            Self::new(StatusCode::NOT_FOUND, RECORD_NOT_FOUND)
        } else {
            Self::from_store(err, policy)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.message)).into_response()
    }
}

impl StatusPolicy {
    /// Status code for a store failure.
    pub fn status_for(&self, err: &StoreError) -> StatusCode {
        match (self, err.is_not_found()) {
            (_, true) | (StatusPolicy::Compat, false) => StatusCode::NOT_FOUND,
            (StatusPolicy::Strict, false) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
