//! Business logic for the two resources.
//!
//! Each manager owns the validation and persistence orchestration for one
//! resource: input validation first (no database access), then pre-check
//! queries for uniqueness and existence, then the write and a re-fetch of
//! the affected row. Managers return domain values or `AppError`; the
//! handlers translate both into HTTP.

/// Provider operations
pub mod providers;
/// Service operations
pub mod services;
