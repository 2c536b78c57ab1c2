use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::errors::StoreError;
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        details: Vec<ValidationDetail>,
    },

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Rate limited")]
    RateLimited { retry_after_secs: u64 },

    /// The detail is logged and never sent to the client.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl ApiError {
    /// Invalid input without per-field details.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            message: message.into(),
            details: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after = match &self {
            ApiError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        let (status, error_code, message, details) = match self {
            ApiError::InvalidInput { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_input",
                message,
                (!details.is_empty()).then_some(details),
            ),
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, "unauthenticated", msg, None),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials".into(),
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::AlreadyExists(msg) => (StatusCode::BAD_REQUEST, "already_exists", msg, None),
            ApiError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests. Please try again later.".into(),
                None,
            ),
            ApiError::StorageUnavailable(msg) => {
                tracing::error!(detail = %msg, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_unavailable",
                    "An internal error occurred".into(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Resource not found".into()),
            StoreError::Conflict(detail) => {
                tracing::info!(detail = %detail, "Write rejected by uniqueness constraint");
                ApiError::AlreadyExists("Resource already exists".into())
            }
            StoreError::Unavailable(msg) => ApiError::StorageUnavailable(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::AdminAlreadyExists => ApiError::AlreadyExists("Admin user already exists".into()),
            AuthError::PasswordError(e) => ApiError::StorageUnavailable(e.to_string()),
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        let message = match details.as_slice() {
            [only] => format!("{}: {}", only.field, only.message),
            _ => format!("{} validation errors", details.len()),
        };

        ApiError::InvalidInput { message, details }
    }
}
