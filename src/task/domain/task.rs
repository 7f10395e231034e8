//! Task record and its enumerated fields.

use super::{TaskId, UserRef};
use crate::collection::domain::{Choice, CollectionRecord, RecordFilter, Timestamps};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task progress status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl Choice for TaskStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::InProgress, Self::Completed];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Choice for TaskPriority {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Validated field values for a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Optional advisory owner reference.
    pub user_id: Option<UserRef>,
}

/// Validated partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement owner reference.
    pub user_id: Option<UserRef>,
}

/// Task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserRef>,
    #[serde(flatten)]
    timestamps: Timestamps,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted owner reference, if any.
    pub user_id: Option<UserRef>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with a fresh identifier and matching timestamps.
    #[must_use]
    pub fn new(data: NewTask, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            user_id: data.user_id,
            timestamps: Timestamps::now(clock),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            user_id: data.user_id,
            timestamps: Timestamps::from_persisted(data.created_at, data.updated_at),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the advisory owner reference, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserRef> {
        self.user_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at()
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at()
    }

    /// Applies the supplied changes and advances `updated_at` to `now`.
    ///
    /// Any status may replace any other; there are no transition guards.
    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            user_id,
        } = changes;

        if let Some(value) = title {
            self.title = value;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if user_id.is_some() {
            self.user_id = user_id;
        }
        self.timestamps.touch(now);
    }
}

impl CollectionRecord for Task {
    type Id = TaskId;
    type Status = TaskStatus;
    type Filter = TaskFilter;
    type Changes = TaskChanges;

    const KIND: &'static str = "task";

    fn id(&self) -> TaskId {
        self.id
    }

    fn status_filter(status: TaskStatus) -> TaskFilter {
        TaskFilter::default().with_status(status)
    }

    fn apply_changes(&mut self, changes: TaskChanges, now: DateTime<Utc>) {
        self.apply(changes, now);
    }
}

/// Task selection criteria; unset criteria match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    user_id: Option<UserRef>,
    status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Selects tasks assigned to `user_id`.
    #[must_use]
    pub const fn for_user(user_id: UserRef) -> Self {
        Self {
            user_id: Some(user_id),
            status: None,
        }
    }

    /// Narrows the selection to tasks with `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the owner criterion, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserRef> {
        self.user_id.as_ref()
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }
}

impl RecordFilter<Task> for TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        let user_matches = self
            .user_id
            .as_ref()
            .is_none_or(|wanted| task.user_id.as_ref() == Some(wanted));
        let status_matches = self.status.is_none_or(|wanted| task.status == wanted);
        user_matches && status_matches
    }
}
