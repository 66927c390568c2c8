//! Provider HTTP handlers.
//!
//! This module implements the provider API endpoints:
//! - GET /providers - List all providers
//! - POST /providers - Create a new provider
//! - GET /providers/:id - Get a provider by ID
//! - PUT /providers/:id - Update a provider by ID
//! - DELETE /providers/:id - Delete a provider by ID
//!
//! The path id is extracted as a raw string so the manager can reject a
//! non-numeric value with the API's own 400 message rather than the
//! extractor's generic rejection.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    db::DbPool,
    error::AppError,
    handlers::{success, success_empty},
    managers::providers,
    models::provider::ProviderInput,
};

/// List all providers.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "data": [
///     { "id": 1, "name": "Acme Plumbing", "email": "contact@acme.example",
///       "phone": "555-0100", "address": "1 Main St" }
///   ],
///   "status": true,
///   "message": "Providers retrieved successfully!"
/// }
/// ```
pub async fn list_providers(State(pool): State<DbPool>) -> Result<Response, AppError> {
    let rows = providers::list(&pool).await?;

    Ok(success(StatusCode::OK, rows, "Providers retrieved successfully!"))
}

/// Create a new provider.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Acme Plumbing",
///   "email": "contact@acme.example",
///   "phone": "555-0100",
///   "address": "1 Main St"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the new provider in the data envelope
/// - **400**: a field is missing, or the email/phone is already taken
/// - **500**: database error
pub async fn create_provider(
    State(pool): State<DbPool>,
    Json(input): Json<ProviderInput>,
) -> Result<Response, AppError> {
    let provider = providers::create(&pool, input).await?;

    Ok(success(StatusCode::CREATED, provider, "Provider created successfully!"))
}

/// Get a provider by ID.
///
/// # Response
///
/// - **200 OK**: the provider in the data envelope
/// - **400**: id is not numeric
/// - **404**: no provider with that id
pub async fn get_provider(
    State(pool): State<DbPool>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let provider = providers::get(&pool, &id).await?;

    Ok(success(StatusCode::OK, provider, "Provider retrieved successfully!"))
}

/// Update a provider by ID (full replace of all four fields).
///
/// # Response
///
/// - **200 OK**: the updated provider in the data envelope
/// - **400**: invalid id, missing fields, or the new email/phone belongs
///   to another provider
/// - **404**: no provider with that id
pub async fn update_provider(
    State(pool): State<DbPool>,
    Path(id): Path<String>,
    Json(input): Json<ProviderInput>,
) -> Result<Response, AppError> {
    let provider = providers::update(&pool, &id, input).await?;

    Ok(success(StatusCode::OK, provider, "Provider updated successfully!"))
}

/// Delete a provider by ID.
///
/// # Response
///
/// - **200 OK**: `{"status": true, "message": "Provider deleted successfully!"}`
/// - **400**: invalid id, or the provider still has services
/// - **404**: no provider with that id
pub async fn delete_provider(
    State(pool): State<DbPool>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    providers::delete(&pool, &id).await?;

    Ok(success_empty("Provider deleted successfully!"))
}
