//! Repository port for task persistence and filtered lookup.

use crate::collection::ports::CollectionRepository;
use crate::task::domain::Task;

/// Task persistence contract.
///
/// Any collection gateway over [`Task`] records qualifies; filtering by
/// owner and status goes through [`crate::task::domain::TaskFilter`].
pub trait TaskRepository: CollectionRepository<Task> {}

impl<T> TaskRepository for T where T: CollectionRepository<Task> + ?Sized {}
