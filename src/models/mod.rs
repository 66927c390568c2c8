//! Data models representing database entities and request bodies.

/// Provider row and request body
pub mod provider;
/// Service row (joined with provider) and request body
pub mod service;
