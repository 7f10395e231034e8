//! `PostgreSQL` plumbing shared by the task and user adapters.
//!
//! Entity adapters own their Diesel schema and row models; this module holds
//! the connection pool type, the blocking bridge onto the tokio runtime, and
//! the embedded schema migrations.

mod migrations;

pub use migrations::{MIGRATIONS, Migration, apply_migrations, migrate};

use crate::collection::{
    domain::{Choice, StatusCounts, parse_choice},
    ports::{RepositoryError, RepositoryResult},
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::DatabaseErrorInformation;

/// `PostgreSQL` connection pool type used by collection adapters.
pub type CollectionPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`RepositoryError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> RepositoryResult<CollectionPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(RepositoryError::persistence)
}

/// Runs a blocking Diesel operation on the tokio blocking pool.
pub(crate) async fn run_blocking<F, T>(pool: &CollectionPgPool, operation: F) -> RepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(RepositoryError::persistence)?;
        operation(&mut connection)
    })
    .await
    .map_err(RepositoryError::persistence)?
}

/// Returns `true` when a unique violation was raised by `constraint`.
pub(crate) fn violates_constraint(info: &dyn DatabaseErrorInformation, constraint: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == constraint)
}

/// Converts a SQL `COUNT(*)` result into an unsigned count.
pub(crate) fn count_to_u64(count: i64) -> RepositoryResult<u64> {
    u64::try_from(count).map_err(RepositoryError::invalid_persisted_data)
}

/// Folds `(status, count)` rows from a `GROUP BY status` query into counts
/// whose total is the sum of the rows.
pub(crate) fn fold_status_counts<S: Choice>(
    rows: Vec<(String, i64)>,
) -> RepositoryResult<StatusCounts<S>> {
    let mut total = 0_u64;
    let mut by_status = Vec::with_capacity(rows.len());
    for (raw_status, raw_count) in rows {
        let status = parse_choice::<S>("status", &raw_status)
            .map_err(RepositoryError::invalid_persisted_data)?;
        let count = count_to_u64(raw_count)?;
        total += count;
        by_status.push((status, count));
    }
    Ok(by_status
        .into_iter()
        .fold(StatusCounts::new(total), |counts, (status, count)| {
            counts.with_count(status, count)
        }))
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
