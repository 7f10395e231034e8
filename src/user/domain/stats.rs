//! User statistics summary.

use super::UserStatus;
use crate::collection::domain::StatusCounts;
use serde::{Deserialize, Serialize};

/// User counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of users in the collection.
    pub total: u64,
    /// Users with status `active`.
    pub active: u64,
    /// Users with status `inactive`.
    pub inactive: u64,
    /// Users with status `pending`.
    pub pending: u64,
}

impl From<StatusCounts<UserStatus>> for UserStats {
    fn from(counts: StatusCounts<UserStatus>) -> Self {
        Self {
            total: counts.total(),
            active: counts.count(UserStatus::Active),
            inactive: counts.count(UserStatus::Inactive),
            pending: counts.count(UserStatus::Pending),
        }
    }
}
