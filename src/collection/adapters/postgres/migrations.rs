//! Embedded SQL migrations for the collection tables.

use super::{CollectionPgPool, run_blocking};
use crate::collection::ports::{RepositoryError, RepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// A named, idempotent schema migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Directory name under `migrations/`.
    pub name: &'static str,
    /// SQL applied when migrating up.
    pub up: &'static str,
}

/// Every migration, in application order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "2026-10-01-000000_create_tasks",
        up: include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql"),
    },
    Migration {
        name: "2026-10-01-000001_create_users",
        up: include_str!("../../../../migrations/2026-10-01-000001_create_users/up.sql"),
    },
];

/// Applies every migration on an open connection.
///
/// Migrations use `IF NOT EXISTS` guards, so reapplying them is harmless.
///
/// # Errors
///
/// Returns [`RepositoryError::Persistence`] when a statement fails.
pub fn apply_migrations(connection: &mut PgConnection) -> RepositoryResult<()> {
    for migration in MIGRATIONS {
        tracing::debug!(migration = migration.name, "applying migration");
        connection
            .batch_execute(migration.up)
            .map_err(RepositoryError::persistence)?;
    }
    Ok(())
}

/// Applies every migration using a pooled connection.
///
/// # Errors
///
/// Returns [`RepositoryError::Persistence`] when no connection is available
/// or a statement fails.
pub async fn migrate(pool: &CollectionPgPool) -> RepositoryResult<()> {
    run_blocking(pool, apply_migrations).await
}
