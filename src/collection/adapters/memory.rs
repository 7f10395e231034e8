//! In-memory persistence gateway usable by any collection.

use crate::collection::{
    domain::{Choice, CollectionRecord, RecordFilter, StatusCounts},
    ports::{CollectionRepository, RepositoryError, RepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory repository.
///
/// Records are kept in insertion order. The unique-key index is checked and
/// updated under the same write guard as the record map, so concurrent
/// writers can never both claim one key.
#[derive(Debug, Clone)]
pub struct InMemoryCollectionRepository<R: CollectionRecord> {
    state: Arc<RwLock<InMemoryCollectionState<R>>>,
}

#[derive(Debug)]
struct InMemoryCollectionState<R: CollectionRecord> {
    records: HashMap<R::Id, R>,
    insertion_order: Vec<R::Id>,
    unique_index: HashMap<String, R::Id>,
}

impl<R: CollectionRecord> Default for InMemoryCollectionRepository<R> {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryCollectionState {
                records: HashMap::new(),
                insertion_order: Vec::new(),
                unique_index: HashMap::new(),
            })),
        }
    }
}

impl<R: CollectionRecord> InMemoryCollectionRepository<R> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RepositoryResult<RwLockReadGuard<'_, InMemoryCollectionState<R>>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> RepositoryResult<RwLockWriteGuard<'_, InMemoryCollectionState<R>>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Fails when `record`'s unique key is indexed against a different record.
fn ensure_key_available<R: CollectionRecord>(
    state: &InMemoryCollectionState<R>,
    record: &R,
) -> RepositoryResult<()> {
    let Some(key) = record.unique_key() else {
        return Ok(());
    };
    match state.unique_index.get(key.value) {
        Some(owner) if *owner != record.id() => Err(RepositoryError::DuplicateKey {
            field: key.field,
            value: key.value.to_owned(),
        }),
        _ => Ok(()),
    }
}

fn index_key<R: CollectionRecord>(state: &mut InMemoryCollectionState<R>, record: &R) {
    if let Some(key) = record.unique_key() {
        state
            .unique_index
            .insert(key.value.to_owned(), record.id());
    }
}

fn unindex_key<R: CollectionRecord>(state: &mut InMemoryCollectionState<R>, record: &R) {
    if let Some(key) = record.unique_key() {
        state.unique_index.remove(key.value);
    }
}

fn ordered_matches<'a, R: CollectionRecord>(
    state: &'a InMemoryCollectionState<R>,
    filter: &'a R::Filter,
) -> impl Iterator<Item = &'a R> + 'a {
    state
        .insertion_order
        .iter()
        .filter_map(|id| state.records.get(id))
        .filter(move |record| filter.matches(record))
}

#[async_trait]
impl<R: CollectionRecord> CollectionRepository<R> for InMemoryCollectionRepository<R> {
    async fn insert(&self, record: &R) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.records.contains_key(&record.id()) {
            return Err(RepositoryError::DuplicateId(record.id().to_string()));
        }
        ensure_key_available(&state, record)?;

        index_key(&mut state, record);
        state.insertion_order.push(record.id());
        state.records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: R::Id) -> RepositoryResult<Option<R>> {
        let state = self.read_state()?;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_all(&self, filter: &R::Filter) -> RepositoryResult<Vec<R>> {
        let state = self.read_state()?;
        Ok(ordered_matches(&state, filter).cloned().collect())
    }

    async fn update(
        &self,
        id: R::Id,
        changes: R::Changes,
        now: DateTime<Utc>,
    ) -> RepositoryResult<R> {
        let mut state = self.write_state()?;
        let previous = state
            .records
            .get(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?
            .clone();
        let mut updated = previous.clone();
        updated.apply_changes(changes, now);
        ensure_key_available(&state, &updated)?;

        unindex_key(&mut state, &previous);
        index_key(&mut state, &updated);
        state.records.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: R::Id) -> RepositoryResult<bool> {
        let mut state = self.write_state()?;
        let Some(removed) = state.records.remove(&id) else {
            return Ok(false);
        };
        unindex_key(&mut state, &removed);
        state.insertion_order.retain(|existing| *existing != id);
        Ok(true)
    }

    async fn count_where(&self, filter: &R::Filter) -> RepositoryResult<u64> {
        let state = self.read_state()?;
        to_count(ordered_matches(&state, filter).count())
    }

    async fn status_counts(&self) -> RepositoryResult<StatusCounts<R::Status>> {
        let state = self.read_state()?;
        let mut counts = StatusCounts::new(to_count(state.records.len())?);
        for status in <R::Status as Choice>::ALL {
            let filter = R::status_filter(*status);
            let count = to_count(ordered_matches(&state, &filter).count())?;
            counts = counts.with_count(*status, count);
        }
        Ok(counts)
    }
}

fn to_count(count: usize) -> RepositoryResult<u64> {
    u64::try_from(count).map_err(RepositoryError::persistence)
}
