//! Service manager - validation and persistence for services.
//!
//! Enforces:
//! - all four body fields present and non-empty
//! - price parses as a number and is strictly positive
//! - provider_id parses as a whole number and references a provider
//! - service name unique per provider, compared trimmed and lower-cased
//!   on create (update compares the exact name; see `update`)
//!
//! Every read returns the service joined with its provider's contact
//! fields. As with providers, pre-checks are not transactional with the
//! write; the unique and foreign key constraints backstop races and
//! write-time violations map to the same client errors.

use rust_decimal::Decimal;

use crate::{
    db::{self, ConstraintKind, DbPool},
    error::AppError,
    models::service::{ServiceInput, ServiceWithProvider, normalize_name},
};

const ALL_FIELDS_REQUIRED: &str = "All fields are required";
const INVALID_ID: &str = "Invalid service ID format. Must be a number";
const INVALID_PRICE: &str = "Invalid price format. Price must be a positive number";
const INVALID_PROVIDER_ID: &str = "Invalid provider_id format. Must be a number";
const DUPLICATE_SERVICE: &str = "Service with the same name and provider already exists";
const PROVIDER_NOT_FOUND: &str = "Provider not found";
const SERVICE_NOT_FOUND: &str = "Service not found";

/// Shared SELECT joining each service with its provider's attributes.
const JOINED_SELECT: &str = "\
    SELECT s.id, s.name, s.description, s.price, s.provider_id, \
           p.name AS provider_name, p.email AS provider_email, \
           p.phone AS provider_phone, p.address AS provider_address \
    FROM services s \
    INNER JOIN providers p ON s.provider_id = p.id";

/// Parse a path id, rejecting non-numeric values before any store access.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(INVALID_ID))
}

/// Validate a request body, in fixed order: required fields, then price,
/// then provider_id. Returns the parsed values; the name keeps its
/// original casing.
fn validated(input: &ServiceInput) -> Result<(&str, &str, Decimal, i64), AppError> {
    let (Some(name), Some(description), Some(price), Some(provider_id)) = (
        &input.name,
        &input.description,
        &input.price,
        &input.provider_id,
    ) else {
        return Err(AppError::validation(ALL_FIELDS_REQUIRED));
    };

    if name.is_empty() || description.is_empty() || price.is_blank() || provider_id.is_blank() {
        return Err(AppError::validation(ALL_FIELDS_REQUIRED));
    }

    let price = price
        .as_decimal()
        .filter(|p| *p > Decimal::ZERO)
        .ok_or_else(|| AppError::validation(INVALID_PRICE))?;

    let provider_id = provider_id
        .as_id()
        .ok_or_else(|| AppError::validation(INVALID_PROVIDER_ID))?;

    Ok((name.as_str(), description.as_str(), price, provider_id))
}

async fn fetch_joined(pool: &DbPool, id: i64) -> Result<Option<ServiceWithProvider>, sqlx::Error> {
    sqlx::query_as::<_, ServiceWithProvider>(&format!("{JOINED_SELECT} WHERE s.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn exists(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM services WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// List all services, each joined with its provider.
pub async fn list(pool: &DbPool) -> Result<Vec<ServiceWithProvider>, AppError> {
    let services = sqlx::query_as::<_, ServiceWithProvider>(
        &format!("{JOINED_SELECT} ORDER BY s.id"),
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Create a service.
///
/// # Process
///
/// 1. Validate the body (400s, no store access otherwise)
/// 2. Reject a duplicate of the trimmed, lower-cased name under the same
///    provider (400)
/// 3. Verify the referenced provider exists (404)
/// 4. Insert the original-cased name, re-fetch the joined row (201)
pub async fn create(pool: &DbPool, input: ServiceInput) -> Result<ServiceWithProvider, AppError> {
    let (name, description, price, provider_id) = validated(&input)?;

    let duplicate: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM services WHERE LOWER(TRIM(name)) = $1 AND provider_id = $2)",
    )
    .bind(normalize_name(name))
    .bind(provider_id)
    .fetch_one(pool)
    .await?;
    if duplicate {
        return Err(AppError::conflict(DUPLICATE_SERVICE));
    }

    let provider_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM providers WHERE id = $1)")
            .bind(provider_id)
            .fetch_one(pool)
            .await?;
    if !provider_exists {
        return Err(AppError::not_found(PROVIDER_NOT_FOUND));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO services (name, description, price, provider_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(provider_id)
    .fetch_one(pool)
    .await
    .map_err(|err| match db::constraint_kind(&err) {
        // Races past the pre-checks land on the same client errors
        Some(ConstraintKind::Unique) => AppError::conflict(DUPLICATE_SERVICE),
        Some(ConstraintKind::ForeignKey) => AppError::not_found(PROVIDER_NOT_FOUND),
        _ => AppError::from(err),
    })?;

    let service = sqlx::query_as::<_, ServiceWithProvider>(
        &format!("{JOINED_SELECT} WHERE s.id = $1"),
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

/// Get a service by id, joined with its provider.
///
/// A miss returns `ServiceMissing`, whose 404 body omits the `status`
/// field the rest of the API carries.
pub async fn get(pool: &DbPool, raw_id: &str) -> Result<ServiceWithProvider, AppError> {
    let id = parse_id(raw_id)?;

    fetch_joined(pool, id).await?.ok_or(AppError::ServiceMissing)
}

/// Update a service in place (full replace, re-validated).
///
/// The duplicate check here compares the exact name, not the normalized
/// form create uses. The asymmetry is inherited behavior; unifying it
/// silently would change which updates are rejected, so it stays until a
/// product decision says otherwise.
pub async fn update(
    pool: &DbPool,
    raw_id: &str,
    input: ServiceInput,
) -> Result<ServiceWithProvider, AppError> {
    let id = parse_id(raw_id)?;
    let (name, description, price, provider_id) = validated(&input)?;

    let duplicate: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM services WHERE id <> $1 AND name = $2 AND provider_id = $3)",
    )
    .bind(id)
    .bind(name)
    .bind(provider_id)
    .fetch_one(pool)
    .await?;
    if duplicate {
        return Err(AppError::conflict(DUPLICATE_SERVICE));
    }

    if !exists(pool, id).await? {
        return Err(AppError::not_found(SERVICE_NOT_FOUND));
    }

    sqlx::query(
        "UPDATE services SET name = $1, description = $2, price = $3, provider_id = $4 WHERE id = $5",
    )
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(provider_id)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|err| match db::constraint_kind(&err) {
        Some(ConstraintKind::Unique) => AppError::conflict(DUPLICATE_SERVICE),
        Some(ConstraintKind::ForeignKey) => AppError::not_found(PROVIDER_NOT_FOUND),
        _ => AppError::from(err),
    })?;

    let service = sqlx::query_as::<_, ServiceWithProvider>(
        &format!("{JOINED_SELECT} WHERE s.id = $1"),
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

/// Delete a service by id. Services are leaf entities, so deletion is
/// unconditional once the row is known to exist.
pub async fn delete(pool: &DbPool, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id)?;

    if !exists(pool, id).await? {
        return Err(AppError::not_found(SERVICE_NOT_FOUND));
    }

    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service::RawNumber;

    fn body(
        name: Option<&str>,
        description: Option<&str>,
        price: Option<RawNumber>,
        provider_id: Option<RawNumber>,
    ) -> ServiceInput {
        ServiceInput {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            price,
            provider_id,
        }
    }

    fn complete() -> ServiceInput {
        body(
            Some("Haircut"),
            Some("30 minute cut"),
            Some(RawNumber::Num(25.0)),
            Some(RawNumber::Num(1.0)),
        )
    }

    #[test]
    fn complete_body_validates() {
        let input = complete();
        let (name, description, price, provider_id) = validated(&input).unwrap();
        assert_eq!(name, "Haircut");
        assert_eq!(description, "30 minute cut");
        assert_eq!(price, Decimal::from(25));
        assert_eq!(provider_id, 1);
    }

    #[test]
    fn missing_or_empty_fields_are_rejected_first() {
        let cases = [
            body(None, Some("cut"), Some(RawNumber::Num(25.0)), Some(RawNumber::Num(1.0))),
            body(Some(""), Some("cut"), Some(RawNumber::Num(25.0)), Some(RawNumber::Num(1.0))),
            body(Some("Haircut"), None, Some(RawNumber::Num(25.0)), Some(RawNumber::Num(1.0))),
            body(Some("Haircut"), Some("cut"), None, Some(RawNumber::Num(1.0))),
            body(
                Some("Haircut"),
                Some("cut"),
                Some(RawNumber::Text("  ".into())),
                Some(RawNumber::Num(1.0)),
            ),
            body(Some("Haircut"), Some("cut"), Some(RawNumber::Num(25.0)), None),
        ];
        for input in cases {
            let err = validated(&input).unwrap_err();
            assert_eq!(err.to_string(), "All fields are required");
        }
    }

    #[test]
    fn non_positive_or_unparseable_prices_are_rejected() {
        for price in [
            RawNumber::Num(0.0),
            RawNumber::Num(-5.0),
            RawNumber::Text("abc".into()),
        ] {
            let input = body(
                Some("Haircut"),
                Some("cut"),
                Some(price),
                Some(RawNumber::Num(1.0)),
            );
            let err = validated(&input).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid price format. Price must be a positive number"
            );
        }
    }

    #[test]
    fn price_is_checked_before_provider_id() {
        let input = body(
            Some("Haircut"),
            Some("cut"),
            Some(RawNumber::Text("abc".into())),
            Some(RawNumber::Text("xyz".into())),
        );
        let err = validated(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid price format. Price must be a positive number"
        );
    }

    #[test]
    fn non_numeric_provider_id_is_rejected() {
        let input = body(
            Some("Haircut"),
            Some("cut"),
            Some(RawNumber::Num(25.0)),
            Some(RawNumber::Text("xyz".into())),
        );
        let err = validated(&input).unwrap_err();
        assert_eq!(err.to_string(), "Invalid provider_id format. Must be a number");
    }

    #[test]
    fn string_encoded_numbers_are_accepted() {
        let input = body(
            Some("Haircut"),
            Some("cut"),
            Some(RawNumber::Text("25.50".into())),
            Some(RawNumber::Text("3".into())),
        );
        let (_, _, price, provider_id) = validated(&input).unwrap();
        assert_eq!(price, "25.50".parse().unwrap());
        assert_eq!(provider_id, 3);
    }

    #[test]
    fn service_ids_parse_with_their_own_message() {
        assert_eq!(parse_id("12").unwrap(), 12);
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid service ID format. Must be a number");
    }
}
