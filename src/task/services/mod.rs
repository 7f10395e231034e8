//! Application services for task collection management.

mod lifecycle;

pub use lifecycle::{CreateTaskRequest, TaskCollection, TaskService, UpdateTaskRequest};
