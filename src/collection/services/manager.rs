//! Generic collection manager: create, read, update, delete and statistics.

use crate::collection::{
    domain::{CollectionRecord, CollectionSchema, ValidationError},
    ports::{CollectionRepository, RepositoryError},
};
use mockable::Clock;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

type RecordOf<S> = <S as CollectionSchema>::Record;
type IdOf<S> = <RecordOf<S> as CollectionRecord>::Id;
type FilterOf<S> = <RecordOf<S> as CollectionRecord>::Filter;

/// Category of a service failure, for transports mapping errors to status
/// codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input violated a field constraint.
    Validation,
    /// The referenced record does not exist.
    NotFound,
    /// A uniqueness constraint was violated.
    Conflict,
    /// The persistence gateway failed.
    Storage,
}

/// Service-level errors for collection operations.
#[derive(Debug, Error)]
pub enum CollectionServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record exists with the given identifier.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity name.
        kind: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// Another record already holds a unique field value.
    #[error("{kind} with {field} '{value}' already exists")]
    Conflict {
        /// Entity name.
        kind: &'static str,
        /// Wire name of the unique field.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl CollectionServiceError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Storage,
        }
    }

    /// Lifts a gateway error into the service taxonomy for entity `kind`.
    fn from_repository(kind: &'static str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey { field, value } => Self::Conflict { kind, field, value },
            RepositoryError::NotFound(id) => Self::NotFound { kind, id },
            other => Self::Repository(other),
        }
    }
}

/// Result type for collection service operations.
pub type CollectionServiceResult<T> = Result<T, CollectionServiceError>;

/// Collection manager generic over the entity schema, gateway and clock.
///
/// The service holds no mutable state of its own; every operation reads and
/// writes through the repository, so clones may be shared freely between
/// concurrent request handlers.
pub struct CollectionService<S, R, C>
where
    S: CollectionSchema,
    R: CollectionRepository<S::Record>,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    schema: PhantomData<fn() -> S>,
}

impl<S, R, C> Clone for CollectionService<S, R, C>
where
    S: CollectionSchema,
    R: CollectionRepository<S::Record>,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            schema: PhantomData,
        }
    }
}

impl<S, R, C> CollectionService<S, R, C>
where
    S: CollectionSchema,
    R: CollectionRepository<S::Record>,
    C: Clock + Send + Sync,
{
    /// Creates a new collection service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            schema: PhantomData,
        }
    }

    fn lift(err: RepositoryError) -> CollectionServiceError {
        CollectionServiceError::from_repository(<S::Record as CollectionRecord>::KIND, err)
    }

    /// Validates and stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::Validation`] for invalid input,
    /// [`CollectionServiceError::Conflict`] when a unique field is taken, or
    /// [`CollectionServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all, fields(kind = <S::Record as CollectionRecord>::KIND))]
    pub async fn create(&self, request: S::CreateRequest) -> CollectionServiceResult<S::Record> {
        let record = S::build(request, &*self.clock)?;
        self.repository.insert(&record).await.map_err(|err| {
            log_conflict(&err);
            Self::lift(err)
        })?;
        tracing::debug!(id = %record.id(), "record created");
        Ok(record)
    }

    /// Returns every record in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all, fields(kind = <S::Record as CollectionRecord>::KIND))]
    pub async fn find_all(&self) -> CollectionServiceResult<Vec<S::Record>> {
        self.find_matching(&<FilterOf<S> as Default>::default()).await
    }

    /// Returns the records selected by `filter`.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::Repository`] when persistence fails.
    pub async fn find_matching(
        &self,
        filter: &FilterOf<S>,
    ) -> CollectionServiceResult<Vec<S::Record>> {
        self.repository.find_all(filter).await.map_err(Self::lift)
    }

    /// Returns the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::NotFound`] when no record matches,
    /// or [`CollectionServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all, fields(kind = <S::Record as CollectionRecord>::KIND, %id))]
    pub async fn find_one(&self, id: IdOf<S>) -> CollectionServiceResult<S::Record> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::lift)?
            .ok_or_else(|| CollectionServiceError::NotFound {
                kind: <S::Record as CollectionRecord>::KIND,
                id: id.to_string(),
            })
    }

    /// Applies the supplied fields of `request` to an existing record.
    ///
    /// The request is validated before storage is consulted, so an invalid
    /// payload never touches storage. The gateway applies the changes to the
    /// record as currently stored, so concurrent updates to different fields
    /// are all kept.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::Validation`] for invalid fields,
    /// [`CollectionServiceError::NotFound`] when the record does not exist,
    /// [`CollectionServiceError::Conflict`] when a unique field is taken by
    /// another record, or [`CollectionServiceError::Repository`] when
    /// persistence fails.
    #[tracing::instrument(skip_all, fields(kind = <S::Record as CollectionRecord>::KIND, %id))]
    pub async fn update(
        &self,
        id: IdOf<S>,
        request: S::UpdateRequest,
    ) -> CollectionServiceResult<S::Record> {
        let changes = S::validate_update(request)?;
        let record = self
            .repository
            .update(id, changes, self.clock.utc())
            .await
            .map_err(|err| {
                log_conflict(&err);
                Self::lift(err)
            })?;
        tracing::debug!("record updated");
        Ok(record)
    }

    /// Permanently removes a record.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::NotFound`] when the record does not
    /// exist, or [`CollectionServiceError::Repository`] when persistence
    /// fails.
    #[tracing::instrument(skip_all, fields(kind = <S::Record as CollectionRecord>::KIND, %id))]
    pub async fn remove(&self, id: IdOf<S>) -> CollectionServiceResult<()> {
        let removed = self.repository.delete(id).await.map_err(Self::lift)?;
        if !removed {
            return Err(CollectionServiceError::NotFound {
                kind: <S::Record as CollectionRecord>::KIND,
                id: id.to_string(),
            });
        }
        tracing::debug!("record removed");
        Ok(())
    }

    /// Computes status statistics from the current collection state.
    ///
    /// Counts are read fresh from the repository on every call, in a single
    /// gateway read so the per-status counts agree with the total.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all, fields(kind = <S::Record as CollectionRecord>::KIND))]
    pub async fn get_stats(&self) -> CollectionServiceResult<S::Stats> {
        let counts = self
            .repository
            .status_counts()
            .await
            .map_err(Self::lift)?;
        Ok(S::Stats::from(counts))
    }
}

fn log_conflict(err: &RepositoryError) {
    if let RepositoryError::DuplicateKey { field, .. } = err {
        tracing::warn!(field, "unique field already taken");
    }
}
