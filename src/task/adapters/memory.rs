//! In-memory repository for task services and tests.

use crate::collection::adapters::memory::InMemoryCollectionRepository;
use crate::task::domain::Task;

/// Thread-safe in-memory task repository.
pub type InMemoryTaskRepository = InMemoryCollectionRepository<Task>;
