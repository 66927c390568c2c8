//! HTTP request handlers (route handlers).
//!
//! Each handler is a thin adapter: it extracts the path id and/or JSON
//! body, invokes one manager operation, and wraps the result in the
//! response envelope `{"data": ..., "status": true, "message": ...}`.
//! Errors come back as `AppError` and are converted by its `IntoResponse`
//! implementation; handlers never touch failure status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Health check endpoint
pub mod health;
/// Provider endpoints
pub mod providers;
/// Service endpoints
pub mod services;

/// Build a success envelope carrying a data payload.
fn success<T: Serialize>(status: StatusCode, data: T, message: &str) -> Response {
    (
        status,
        Json(json!({ "data": data, "status": true, "message": message })),
    )
        .into_response()
}

/// Build a success envelope with no data payload (deletes).
fn success_empty(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": true, "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_envelope_carries_data_status_and_message() {
        let response = success(StatusCode::CREATED, json!({"id": 1}), "Provider created successfully!");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["status"], Value::Bool(true));
        assert_eq!(body["message"], "Provider created successfully!");
        assert_eq!(body["data"]["id"], 1);
    }

    #[tokio::test]
    async fn empty_envelope_omits_data() {
        let response = success_empty("Service deleted successfully!");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], Value::Bool(true));
        assert!(body.get("data").is_none());
    }
}
