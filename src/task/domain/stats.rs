//! Task statistics summary.

use super::TaskStatus;
use crate::collection::domain::StatusCounts;
use serde::{Deserialize, Serialize};

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Number of tasks in the collection.
    pub total: u64,
    /// Tasks with status `pending`.
    pub pending: u64,
    /// Tasks with status `in-progress`.
    pub in_progress: u64,
    /// Tasks with status `completed`.
    pub completed: u64,
}

impl From<StatusCounts<TaskStatus>> for TaskStats {
    fn from(counts: StatusCounts<TaskStatus>) -> Self {
        Self {
            total: counts.total(),
            pending: counts.count(TaskStatus::Pending),
            in_progress: counts.count(TaskStatus::InProgress),
            completed: counts.count(TaskStatus::Completed),
        }
    }
}
