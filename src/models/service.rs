//! Service data model and request body types.
//!
//! This module defines:
//! - `ServiceWithProvider`: a service row joined with its provider's
//!   contact fields, the shape every service read returns
//! - `ServiceInput`: request body for create and update operations
//! - `RawNumber`: a numeric field that clients may send as a JSON number
//!   or a numeric string

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A service row joined with its provider's attributes.
///
/// Every service read (list, get, and the re-fetch after create/update)
/// goes through the same INNER JOIN against `providers`, so clients
/// always see the provider contact fields inline.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ServiceWithProvider {
    /// Unique identifier, assigned by the database
    pub id: i64,

    /// Service name. Stored with original casing; uniqueness per provider
    /// is compared case-insensitively and whitespace-trimmed.
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Price, strictly positive, NUMERIC(10,2) in the database
    pub price: Decimal,

    /// Owning provider's id
    pub provider_id: i64,

    /// Joined provider fields
    pub provider_name: String,
    pub provider_email: String,
    pub provider_phone: String,
    pub provider_address: String,
}

/// A numeric request field that may arrive as a number or a string.
///
/// The API accepts `"price": 25.5` and `"price": "25.5"` alike, so the
/// wire type is looser than the validated value. Parsing and range
/// checks happen in the manager, which owns the error messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Num(f64),
    Text(String),
}

impl RawNumber {
    /// True for a string of only whitespace; such a field counts as
    /// absent for the required-fields check.
    pub fn is_blank(&self) -> bool {
        match self {
            RawNumber::Num(_) => false,
            RawNumber::Text(s) => s.trim().is_empty(),
        }
    }

    /// Parse as a decimal, `None` if not numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RawNumber::Num(n) => Decimal::try_from(*n).ok(),
            RawNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Parse as an integer id, `None` if not a whole number.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            RawNumber::Num(n) if n.fract() == 0.0 => Some(*n as i64),
            RawNumber::Num(_) => None,
            RawNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Request body for creating or updating a service.
///
/// # JSON Example
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
/// All four fields are required. Price must be a strictly positive
/// number; provider_id must be a whole number referencing an existing
/// provider. Both tolerate string-encoded numbers.
#[derive(Debug, Deserialize)]
pub struct ServiceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<RawNumber>,
    pub provider_id: Option<RawNumber>,
}

/// Normalize a service name for uniqueness comparison: trimmed and
/// lower-cased. The stored value keeps its original form.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Option<RawNumber> {
        Some(RawNumber::Num(n))
    }

    fn text(s: &str) -> Option<RawNumber> {
        Some(RawNumber::Text(s.to_string()))
    }

    #[test]
    fn decimal_parses_from_number_and_string() {
        assert_eq!(num(25.5).unwrap().as_decimal(), "25.5".parse().ok());
        assert_eq!(text(" 25.5 ").unwrap().as_decimal(), "25.5".parse().ok());
        assert!(text("abc").unwrap().as_decimal().is_none());
    }

    #[test]
    fn zero_and_negative_still_parse() {
        // Range checking is the manager's job, not the parser's
        assert_eq!(num(0.0).unwrap().as_decimal(), Some(Decimal::ZERO));
        assert!(num(-5.0).unwrap().as_decimal().unwrap() < Decimal::ZERO);
    }

    #[test]
    fn id_requires_a_whole_number() {
        assert_eq!(num(3.0).unwrap().as_id(), Some(3));
        assert_eq!(text("7").unwrap().as_id(), Some(7));
        assert!(num(3.5).unwrap().as_id().is_none());
        assert!(text("abc").unwrap().as_id().is_none());
    }

    #[test]
    fn blank_detection_only_applies_to_strings() {
        assert!(text("   ").unwrap().is_blank());
        assert!(!text("25.5").unwrap().is_blank());
        // Numeric zero is present; its rejection belongs to range checks
        assert!(!num(0.0).unwrap().is_blank());
    }

    #[test]
    fn names_compare_trimmed_and_lowercased() {
        assert_eq!(normalize_name("  HAIRCUT  "), "haircut");
        assert_eq!(normalize_name("Haircut"), normalize_name("  HAIRCUT  "));
    }
}
