//! Provider manager - validation and persistence for providers.
//!
//! Enforces:
//! - all four body fields present and non-empty
//! - email and phone unique across all providers
//! - deletion blocked while services reference the provider
//!
//! Uniqueness is pre-checked with SELECT queries for friendly error
//! messages, but the check-then-write sequence is not transactional; a
//! concurrent request can slip between the check and the write. The
//! unique indexes catch that case, and the write-time violation maps to
//! the same 400 the pre-check would have produced.

use crate::{
    db::{self, ConstraintKind, DbPool},
    error::AppError,
    models::provider::{Provider, ProviderInput},
};

const ALL_FIELDS_REQUIRED: &str = "All fields are required";
const INVALID_ID: &str = "Invalid ID parameter";
const PROVIDER_NOT_FOUND: &str = "Provider not found";
const EMAIL_OR_PHONE_EXISTS: &str = "Email or phone already exists";
const EMAIL_EXISTS: &str = "Email already exists";
const PHONE_EXISTS: &str = "Phone number already exists";
const HAS_SERVICES: &str = "Cannot delete provider because it has associated services";

/// Parse a path id, rejecting non-numeric values before any store access.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(INVALID_ID))
}

async fn fetch_by_id(pool: &DbPool, id: i64) -> Result<Option<Provider>, sqlx::Error> {
    sqlx::query_as::<_, Provider>(
        "SELECT id, name, email, phone, address FROM providers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List all providers.
pub async fn list(pool: &DbPool) -> Result<Vec<Provider>, AppError> {
    let providers = sqlx::query_as::<_, Provider>(
        "SELECT id, name, email, phone, address FROM providers ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(providers)
}

/// Create a provider.
///
/// # Process
///
/// 1. Require all four fields (400, no store access otherwise)
/// 2. Reject if any provider already holds the email or phone (400)
/// 3. Insert, then re-fetch the row by its generated id (201)
pub async fn create(pool: &DbPool, input: ProviderInput) -> Result<Provider, AppError> {
    let (name, email, phone, address) = input
        .fields()
        .ok_or_else(|| AppError::validation(ALL_FIELDS_REQUIRED))?;

    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM providers WHERE email = $1 OR phone = $2)")
            .bind(email)
            .bind(phone)
            .fetch_one(pool)
            .await?;

    if taken {
        return Err(AppError::conflict(EMAIL_OR_PHONE_EXISTS));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO providers (name, email, phone, address) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(address)
    .fetch_one(pool)
    .await
    .map_err(|err| match db::constraint_kind(&err) {
        // Lost a race with a concurrent create; same outcome as the pre-check
        Some(ConstraintKind::Unique) => AppError::conflict(EMAIL_OR_PHONE_EXISTS),
        _ => AppError::from(err),
    })?;

    let provider = sqlx::query_as::<_, Provider>(
        "SELECT id, name, email, phone, address FROM providers WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(provider)
}

/// Get a provider by id. 400 on a non-numeric id, 404 if absent.
pub async fn get(pool: &DbPool, raw_id: &str) -> Result<Provider, AppError> {
    let id = parse_id(raw_id)?;

    fetch_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(PROVIDER_NOT_FOUND))
}

/// Update a provider in place (full replace of all four fields).
///
/// # Process
///
/// 1. Validate the id, then require all four fields (400)
/// 2. Verify the target exists (404)
/// 3. Reject if another provider holds the new email, then the new
///    phone - two independent checks, email reported first (400)
/// 4. Update, re-fetch, return the new row (200)
pub async fn update(pool: &DbPool, raw_id: &str, input: ProviderInput) -> Result<Provider, AppError> {
    let id = parse_id(raw_id)?;
    let (name, email, phone, address) = input
        .fields()
        .ok_or_else(|| AppError::validation(ALL_FIELDS_REQUIRED))?;

    if fetch_by_id(pool, id).await?.is_none() {
        return Err(AppError::not_found(PROVIDER_NOT_FOUND));
    }

    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM providers WHERE email = $1 AND id <> $2)")
            .bind(email)
            .bind(id)
            .fetch_one(pool)
            .await?;
    if email_taken {
        return Err(AppError::conflict(EMAIL_EXISTS));
    }

    let phone_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM providers WHERE phone = $1 AND id <> $2)")
            .bind(phone)
            .bind(id)
            .fetch_one(pool)
            .await?;
    if phone_taken {
        return Err(AppError::conflict(PHONE_EXISTS));
    }

    sqlx::query("UPDATE providers SET name = $1, email = $2, phone = $3, address = $4 WHERE id = $5")
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|err| match db::constraint_kind(&err) {
            // Race past the pre-checks; the constraint name tells us which
            Some(ConstraintKind::Unique) => {
                if db::violated_constraint(&err).is_some_and(|c| c.contains("phone")) {
                    AppError::conflict(PHONE_EXISTS)
                } else {
                    AppError::conflict(EMAIL_EXISTS)
                }
            }
            _ => AppError::from(err),
        })?;

    let provider = sqlx::query_as::<_, Provider>(
        "SELECT id, name, email, phone, address FROM providers WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(provider)
}

/// Delete a provider by id.
///
/// Deletion is rejected (400) while any service references the provider;
/// the foreign key raises, and that violation is an expected outcome here,
/// not a server error.
pub async fn delete(pool: &DbPool, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id)?;

    if fetch_by_id(pool, id).await?.is_none() {
        return Err(AppError::not_found(PROVIDER_NOT_FOUND));
    }

    sqlx::query("DELETE FROM providers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|err| match db::constraint_kind(&err) {
            Some(ConstraintKind::ForeignKey) => AppError::conflict(HAS_SERVICES),
            _ => AppError::from(err),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn non_numeric_ids_are_rejected_with_the_fixed_message() {
        for raw in ["abc", "", "1x", "1.5"] {
            let err = parse_id(raw).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{raw}");
            assert_eq!(err.to_string(), "Invalid ID parameter");
        }
    }
}
