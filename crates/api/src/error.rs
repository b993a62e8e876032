//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"code": "...", "detail": "..."}` with
//! the matching status code.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use db::DbError;
use taxonomy::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// An id-addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Malformed body, query or path, or a payload breaking a field rule.
    #[error("{0}")]
    Validation(String),

    /// The database refused the write (missing foreign key, check, …).
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    detail: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ConstraintViolation(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        if let Self::Internal(_) = self {
            error!(detail = %detail, "request failed");
        }
        let body = ErrorBody { code: self.code(), detail: &detail };
        (self.status(), Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(_) => Self::NotFound(err.to_string()),
            DbError::ConstraintViolation(msg) => Self::ConstraintViolation(msg),
            DbError::Sqlx(_) | DbError::Migration(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
