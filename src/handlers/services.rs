//! Service HTTP handlers.
//!
//! This module implements the service API endpoints:
//! - GET /services - List all services (joined with provider data)
//! - POST /services - Create a new service
//! - GET /services/:id - Get a service by ID
//! - PUT /services/:id - Update a service by ID
//! - DELETE /services/:id - Delete a service by ID

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
    managers::services,
    models::service::ServiceInput,
};

/// List all services, each with its provider's contact fields inline.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "data": [
///     { "id": 1, "name": "Haircut", "description": "30 minute cut",
///       "price": "25.00", "provider_id": 1,
///       "provider_name": "Acme", "provider_email": "contact@acme.example",
///       "provider_phone": "555-0100", "provider_address": "1 Main St" }
///   ],
///   "status": true,
///   "message": "Services retrieved successfully!"
/// }
/// ```
pub async fn list_services(State(pool): State<DbPool>) -> Result<Response, AppError> {
    let rows = services::list(&pool).await?;

    Ok(success(StatusCode::OK, rows, "Services retrieved successfully!"))
}

/// Create a new service.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Haircut",
///   "description": "30 minute cut",
///   "price": 25.00,
///   "provider_id": 1
/// }
/// ```
///
/// `price` and `provider_id` may also arrive as numeric strings.
///
/// # Response
///
/// - **201 Created**: the new service, joined with its provider
/// - **400**: missing fields, bad price, bad provider_id, or a duplicate
///   name (case-insensitive, trimmed) under the same provider
/// - **404**: the referenced provider does not exist
pub async fn create_service(
    State(pool): State<DbPool>,
    Json(input): Json<ServiceInput>,
) -> Result<Response, AppError> {
    let service = services::create(&pool, input).await?;

    Ok(success(StatusCode::CREATED, service, "Service created successfully!"))
}

/// Get a service by ID, joined with its provider.
///
/// # Response
///
/// - **200 OK**: the service in the data envelope
/// - **400**: id is not numeric
/// - **404**: `{"error": "Service not found"}` - note this body carries
///   no `status` field, unlike every other failure
pub async fn get_service(
    State(pool): State<DbPool>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let service = services::get(&pool, &id).await?;

    Ok(success(StatusCode::OK, service, "Service retrieved successfully!"))
}

/// Update a service by ID (full replace, re-validated).
///
/// # Response
///
/// - **200 OK**: the updated service, joined with its provider
/// - **400**: invalid id or body, or another service already holds the
///   same name under the same provider
/// - **404**: no service with that id
pub async fn update_service(
    State(pool): State<DbPool>,
    Path(id): Path<String>,
    Json(input): Json<ServiceInput>,
) -> Result<Response, AppError> {
    let service = services::update(&pool, &id, input).await?;

    Ok(success(StatusCode::OK, service, "Service updated successfully!"))
}

/// Delete a service by ID. Services are leaf entities; no referential
/// check applies.
///
/// # Response
///
/// - **200 OK**: `{"status": true, "message": "Service deleted successfully!"}`
/// - **400**: id is not numeric
/// - **404**: no service with that id
pub async fn delete_service(
    State(pool): State<DbPool>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    services::delete(&pool, &id).await?;

    Ok(success_empty("Service deleted successfully!"))
}
