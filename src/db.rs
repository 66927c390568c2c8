//! Database connection pool, migrations, and store error classification.
//!
//! The pool is created once at startup and handed to the router as shared
//! state; handlers never construct their own connections. Constraint
//! violations raised by PostgreSQL are classified here so that business
//! logic can match on an enum instead of inspecting driver error codes.

use sqlx::{Pool, Postgres};

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Maximum number of concurrent database connections.
///
/// Acquisitions beyond this limit queue rather than fail, so request
/// bursts degrade to waiting instead of erroring.
const MAX_CONNECTIONS: u32 = 10;

/// Create a new PostgreSQL connection pool.
///
/// Connections are created lazily as needed and idle connections are
/// kept alive for reuse across requests.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server
/// cannot be reached or authenticated against.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// The bootstrap migration is idempotent (CREATE TABLE IF NOT EXISTS),
/// and sqlx additionally tracks applied migrations in `_sqlx_migrations`
/// so each file runs only once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migration files at compile time
    sqlx::migrate!("./migrations").run(pool).await
}

/// Constraint violation classes the business logic cares about.
///
/// Multi-step check-then-write sequences are not wrapped in transactions,
/// so two concurrent requests can both pass a uniqueness pre-check and
/// both attempt the insert. The database constraint is the real backstop;
/// managers treat these violation classes as expected outcomes and map
/// them to client errors, not server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A unique index was violated (duplicate email/phone/service name).
    Unique,
    /// A foreign key was violated (row still referenced, or reference
    /// target missing).
    ForeignKey,
}

/// Classify a sqlx error as a constraint violation, if it is one.
///
/// Returns `None` for anything that is not a recognized constraint
/// violation; callers treat those as internal errors.
pub fn constraint_kind(err: &sqlx::Error) -> Option<ConstraintKind> {
    match err.as_database_error()?.kind() {
        sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
        sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
        _ => None,
    }
}

/// Name of the violated constraint, when the database reports one.
///
/// Used to tell a duplicate email apart from a duplicate phone when an
/// update slips past the pre-checks and hits the unique index directly.
pub fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    err.as_database_error()?.constraint()
}
