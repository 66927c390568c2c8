//! Provider data model and request body type.
//!
//! This module defines:
//! - `Provider`: database entity representing a service provider
//! - `ProviderInput`: request body for create and update operations

use serde::{Deserialize, Serialize};

/// A provider record from the database.
///
/// Maps to the `providers` table. Email and phone are unique across all
/// providers (enforced by unique indexes).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Provider {
    /// Unique identifier, assigned by the database
    pub id: i64,

    /// Display name of the provider
    pub name: String,

    /// Contact email, unique across all providers
    pub email: String,

    /// Contact phone, unique across all providers
    pub phone: String,

    /// Street address
    pub address: String,
}

/// Request body for creating or updating a provider.
///
/// # JSON Example
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
/// Every field is required and must be non-empty. Fields are optional at
/// the type level so the manager can reject incomplete bodies with a 400
/// instead of the deserializer rejecting them with an opaque error.
#[derive(Debug, Deserialize)]
pub struct ProviderInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProviderInput {
    /// Borrow all four fields, or `None` if any is absent or empty.
    pub fn fields(&self) -> Option<(&str, &str, &str, &str)> {
        match (
            self.name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.address.as_deref(),
        ) {
            (Some(name), Some(email), Some(phone), Some(address))
                if !name.is_empty()
                    && !email.is_empty()
                    && !phone.is_empty()
                    && !address.is_empty() =>
            {
                Some((name, email, phone, address))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, phone: &str, address: &str) -> ProviderInput {
        ProviderInput {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            address: Some(address.to_string()),
        }
    }

    #[test]
    fn complete_input_yields_fields() {
        let body = input("Acme", "a@b.c", "555", "1 Main St");
        assert_eq!(body.fields(), Some(("Acme", "a@b.c", "555", "1 Main St")));
    }

    #[test]
    fn absent_field_is_missing() {
        let body = ProviderInput {
            name: Some("Acme".to_string()),
            email: Some("a@b.c".to_string()),
            phone: None,
            address: Some("1 Main St".to_string()),
        };
        assert!(body.fields().is_none());
    }

    #[test]
    fn empty_field_is_missing() {
        assert!(input("Acme", "", "555", "1 Main St").fields().is_none());
    }
}
