//! Persistence gateway port shared by every collection.

use crate::collection::domain::{CollectionRecord, StatusCounts};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence gateway operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage contract for one record type.
///
/// Implementations own uniqueness enforcement: when a record type declares a
/// [`unique key`](CollectionRecord::unique_key), the check against existing
/// records and the write must happen atomically in storage. Partial updates
/// are applied to the stored record inside the same atomic step, so
/// concurrent updates to different fields never overwrite one another.
#[async_trait]
pub trait CollectionRepository<R: CollectionRecord>: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateId`] when the identifier already
    /// exists or [`RepositoryError::DuplicateKey`] when another record holds
    /// the same unique key.
    async fn insert(&self, record: &R) -> RepositoryResult<()>;

    /// Finds a record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: R::Id) -> RepositoryResult<Option<R>>;

    /// Returns every record matching `filter`, oldest first.
    async fn find_all(&self, filter: &R::Filter) -> RepositoryResult<Vec<R>>;

    /// Applies `changes` to the stored record and returns the result.
    ///
    /// The read of the current record, the application of `changes` and the
    /// write happen as one atomic step; `now` becomes the new update time.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the record does not exist
    /// or [`RepositoryError::DuplicateKey`] when the new unique key belongs to
    /// a different record. Nothing is written on error.
    async fn update(
        &self,
        id: R::Id,
        changes: R::Changes,
        now: DateTime<Utc>,
    ) -> RepositoryResult<R>;

    /// Deletes a record, returning `false` when it did not exist.
    async fn delete(&self, id: R::Id) -> RepositoryResult<bool>;

    /// Counts records matching `filter`.
    async fn count_where(&self, filter: &R::Filter) -> RepositoryResult<u64>;

    /// Counts all records and the records holding each status value.
    ///
    /// Every count comes from one consistent read, so the per-status counts
    /// always sum to the total.
    async fn status_counts(&self) -> RepositoryResult<StatusCounts<R::Status>>;
}

/// Errors returned by persistence gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate record identifier: {0}")]
    DuplicateId(String),

    /// Another record already holds the unique field value.
    #[error("duplicate {field}: {value}")]
    DuplicateKey {
        /// Wire name of the unique field.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// The record was not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
