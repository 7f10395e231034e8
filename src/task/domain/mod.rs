//! Domain model for task records.
//!
//! Tasks are validated at construction; every stored task holds a non-empty
//! title and enumerated values from [`TaskStatus`] and [`TaskPriority`].

mod ids;
mod stats;
mod task;

pub use ids::{TaskId, UserRef};
pub use stats::TaskStats;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskFilter, TaskPriority, TaskStatus};
