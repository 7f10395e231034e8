//! Shared world state for task collection BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workboard::collection::services::CollectionServiceError;
use workboard::task::{
    adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskService,
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task collection behaviour tests.
pub struct TaskCollectionWorld {
    pub service: TestTaskService,
    pub current_task: Option<Task>,
    pub listed_tasks: Vec<Task>,
    pub last_error: Option<CollectionServiceError>,
}

impl TaskCollectionWorld {
    /// Creates a world over an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            current_task: None,
            listed_tasks: Vec::new(),
            last_error: None,
        }
    }

    /// Records the outcome of a task-producing operation.
    pub fn record(&mut self, result: Result<Task, CollectionServiceError>) {
        match result {
            Ok(task) => {
                self.current_task = Some(task);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for TaskCollectionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCollectionWorld {
    TaskCollectionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
