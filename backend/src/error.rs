//! Error types for the HTTP API
//!
//! Every failure is per request. Client mistakes map to 4xx with a JSON body;
//! database failures are logged and reported as a bare 500.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chess_rules::RulesError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Field name -> list of messages, serialized as a flat JSON object
///
/// `{"type": ["\"Turtle\" is not a valid choice."]}`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// Errors that can occur while serving a request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Piece creation rejected; nothing was stored
    #[error("invalid piece fields: {}", .0.fields().collect::<Vec<_>>().join(", "))]
    Validation(FieldErrors),

    /// Missing or malformed move query input
    #[error(transparent)]
    InvalidInput(#[from] RulesError),

    /// Request body that is not a JSON object
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("piece {id} not found")]
    NotFound { id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::warn!(fields = ?errors, "rejected piece");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::InvalidInput(e) => {
                tracing::warn!(error = %e, "rejected move query");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
            }
            ApiError::MalformedBody(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response(),
            ApiError::NotFound { id } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("piece {id} not found") })),
            )
                .into_response(),
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Database error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_serialize_as_flat_map() {
        let mut errors = FieldErrors::default();
        errors.add("type", "\"Turtle\" is not a valid choice.");
        errors.add("color", "\"purple\" is not a valid choice.");

        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            json!({
                "color": ["\"purple\" is not a valid choice."],
                "type": ["\"Turtle\" is not a valid choice."],
            })
        );
    }

    #[test]
    fn test_status_codes() {
        let mut errors = FieldErrors::default();
        errors.add("color", "This field is required.");
        assert_eq!(
            ApiError::Validation(errors).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RulesError::MissingCoordinate)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound { id: 7 }.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(sqlx::Error::PoolClosed)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let mut errors = FieldErrors::default();
        errors.add("type", "bad");
        errors.add("color", "bad");
        assert_eq!(
            ApiError::Validation(errors).to_string(),
            "invalid piece fields: color, type"
        );
    }
}
