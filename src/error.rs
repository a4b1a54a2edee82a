use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input, reported per field.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Unknown id or missing resource.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Missing, expired or invalid credentials.
    #[error("invalid or missing credentials")]
    Unauthorized,

    /// Authenticated, but not permitted to act on this resource.
    #[error("forbidden")]
    Forbidden,

    /// Business-rule violation (duplicate email, duplicate pending request,
    /// already-responded request, feedback already given).
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// True when a write bounced off a unique constraint, so the caller can
/// surface a Conflict instead of a generic 500.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(d) if d.is_unique_violation())
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Internal(anyhow::Error::from(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "validation failed", "fields": fields }),
            ),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{what} not found") }),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "invalid or missing credentials" }),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": "forbidden" })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                AppError::validation("email", "bad"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::NotFound("user"), StatusCode::NOT_FOUND),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (AppError::conflict("dup"), StatusCode::CONFLICT),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn conflict_message_is_preserved() {
        let err = AppError::conflict("email already registered");
        assert_eq!(err.to_string(), "email already registered");
    }

    #[test]
    fn field_errors_serialize_with_field_names() {
        let fields = vec![
            FieldError::new("email", "invalid email"),
            FieldError::new("password", "too short"),
        ];
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains("\"field\":\"email\""));
        assert!(json.contains("too short"));
    }
}
