//! Error types and HTTP error response handling.
//!
//! This module defines the application error taxonomy and the single
//! boundary adapter that converts errors into HTTP responses. Managers
//! return these variants; nothing else in the codebase touches status
//! codes for failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation**: missing or malformed input, detected before any
///   database access. Always 400.
/// - **Conflict**: a uniqueness or referential rule would be violated,
///   detected by a pre-check query or by the database constraint itself.
///   Always 400.
/// - **NotFound**: an id lookup found no row. 404.
/// - **ServiceMissing**: the service get-by-id miss. Also 404, but its
///   response body deliberately omits the `status` field the rest of the
///   API carries (see `IntoResponse` below).
/// - **Database**: any other store failure. 500, generic message to the
///   caller, full detail logged server-side only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request input is missing or malformed.
    ///
    /// Returns HTTP 400 Bad Request. The string is the exact client-facing
    /// message ("All fields are required", "Invalid ID parameter", ...).
    #[error("{0}")]
    Validation(String),

    /// The request would violate a uniqueness or referential rule.
    ///
    /// Returns HTTP 400 Bad Request. Covers duplicate email/phone,
    /// duplicate service name under a provider, and provider deletion
    /// blocked by dependent services.
    #[error("{0}")]
    Conflict(String),

    /// An id lookup found nothing.
    ///
    /// Returns HTTP 404 Not Found with the standard error envelope.
    #[error("{0}")]
    NotFound(String),

    /// Service get-by-id found nothing.
    ///
    /// Returns HTTP 404 Not Found, but the body is `{"error": "Service
    /// not found"}` with no `status` field. Every other failure carries
    /// `"status": false`. The asymmetry is inherited API surface that
    /// clients may depend on, so it is kept rather than unified.
    #[error("Service not found")]
    ServiceMissing,

    /// Database operation failed in a way the taxonomy above does not
    /// cover (connection loss, syntax error, unexpected constraint).
    ///
    /// Returns HTTP 500. The sqlx detail is logged and never sent to the
    /// client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Shorthand for a validation error with a fixed message.
    pub fn validation(msg: &str) -> Self {
        AppError::Validation(msg.to_string())
    }

    /// Shorthand for a conflict error with a fixed message.
    pub fn conflict(msg: &str) -> Self {
        AppError::Conflict(msg.to_string())
    }

    /// Shorthand for a not-found error with a fixed message.
    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// Failures use the envelope `{"status": false, "error": "<message>"}`,
/// with two exceptions:
///
/// - `ServiceMissing` omits `status` entirely (documented quirk)
/// - `Database` replaces the message with a generic "Internal server
///   error" so internal detail never leaks to clients
///
/// # Status Code Mapping
///
/// - `Validation` → 400 Bad Request
/// - `Conflict` → 400 Bad Request
/// - `NotFound` → 404 Not Found
/// - `ServiceMissing` → 404 Not Found
/// - `Database` → 500 Internal Server Error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) | AppError::Conflict(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": false, "error": msg }),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "status": false, "error": msg }),
            ),
            AppError::ServiceMissing => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Service not found" }),
            ),
            AppError::Database(err) => {
                // Full detail stays server-side
                tracing::error!(error = %err, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": false, "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn response_parts(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_envelope() {
        let (status, body) = response_parts(AppError::validation("All fields are required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], Value::Bool(false));
        assert_eq!(body["error"], "All fields are required");
    }

    #[tokio::test]
    async fn conflict_maps_to_400() {
        let (status, body) = response_parts(AppError::conflict("Email already exists")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already exists");
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_envelope() {
        let (status, body) = response_parts(AppError::not_found("Provider not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], Value::Bool(false));
        assert_eq!(body["error"], "Provider not found");
    }

    #[tokio::test]
    async fn service_missing_omits_status_field() {
        let (status, body) = response_parts(AppError::ServiceMissing).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Service not found");
        assert!(
            body.get("status").is_none(),
            "service get-by-id 404 must not carry a status field"
        );
    }

    #[tokio::test]
    async fn database_errors_are_generic_500s() {
        let (status, body) = response_parts(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], Value::Bool(false));
        assert_eq!(body["error"], "Internal server error");
    }
}
