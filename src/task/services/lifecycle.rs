//! Task collection schema, request payloads and task-specific queries.

use crate::collection::{
    domain::{CollectionSchema, ValidationError, parse_optional_choice, require_text},
    services::{CollectionService, CollectionServiceResult},
};
use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskFilter, TaskStats, UserRef},
    ports::TaskRepository,
};
use mockable::Clock;
use serde::Deserialize;

/// Request payload for creating a task.
///
/// Enumerated fields arrive as raw strings and are validated by the
/// service, so unknown values fail with a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status; defaults to `pending` when omitted.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the priority; defaults to `medium` when omitted.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the advisory owner reference.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update that only refreshes `updatedAt`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the advisory owner reference.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Schema binding [`Task`] records to their validation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskCollection;

impl CollectionSchema for TaskCollection {
    type Record = Task;
    type CreateRequest = CreateTaskRequest;
    type UpdateRequest = UpdateTaskRequest;
    type Stats = TaskStats;

    fn build<C: Clock>(request: CreateTaskRequest, clock: &C) -> Result<Task, ValidationError> {
        let data = NewTask {
            title: require_text("title", &request.title)?,
            description: request.description,
            status: parse_optional_choice("status", request.status.as_deref())?
                .unwrap_or_default(),
            priority: parse_optional_choice("priority", request.priority.as_deref())?
                .unwrap_or_default(),
            user_id: request.user_id.map(UserRef::new),
        };
        Ok(Task::new(data, clock))
    }

    fn validate_update(request: UpdateTaskRequest) -> Result<TaskChanges, ValidationError> {
        Ok(TaskChanges {
            title: request
                .title
                .map(|title| require_text("title", &title))
                .transpose()?,
            description: request.description,
            status: parse_optional_choice("status", request.status.as_deref())?,
            priority: parse_optional_choice("priority", request.priority.as_deref())?,
            user_id: request.user_id.map(UserRef::new),
        })
    }
}

/// Task collection manager.
pub type TaskService<R, C> = CollectionService<TaskCollection, R, C>;

impl<R, C> CollectionService<TaskCollection, R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Returns the tasks whose advisory owner reference equals `user_id`
    /// exactly.
    ///
    /// No task matching is not an error; the result is simply empty. The
    /// reference is not checked against the user collection.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence fails.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_user_id(&self, user_id: &str) -> CollectionServiceResult<Vec<Task>> {
        self.find_matching(&TaskFilter::for_user(UserRef::new(user_id))).await
    }
}
