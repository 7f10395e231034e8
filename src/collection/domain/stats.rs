//! Raw status counts folded into entity-specific statistics.

use super::Choice;

/// Record counts per status value, plus the collection total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts<S: Choice> {
    total: u64,
    by_status: Vec<(S, u64)>,
}

impl<S: Choice> StatusCounts<S> {
    /// Creates counts with the given total and no per-status entries.
    #[must_use]
    pub const fn new(total: u64) -> Self {
        Self {
            total,
            by_status: Vec::new(),
        }
    }

    /// Records the count for one status value, replacing any earlier count.
    #[must_use]
    pub fn with_count(mut self, status: S, count: u64) -> Self {
        self.by_status.retain(|(existing, _)| *existing != status);
        self.by_status.push((status, count));
        self
    }

    /// Returns the number of records in the collection.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of records holding `status`, zero when unrecorded.
    #[must_use]
    pub fn count(&self, status: S) -> u64 {
        self.by_status
            .iter()
            .find(|(existing, _)| *existing == status)
            .map_or(0, |(_, count)| *count)
    }
}
