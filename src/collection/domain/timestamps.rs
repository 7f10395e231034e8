//! Creation and modification timestamps carried by every record.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Digits of sub-second precision kept; matches `PostgreSQL` `timestamptz`.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Lifecycle timestamps.
///
/// `created_at` is fixed at creation. `updated_at` starts equal to it and
/// strictly increases on every [`Timestamps::touch`], even when the clock has
/// not advanced since the previous write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Timestamps {
    /// Stamps a newly created record with the current clock time.
    #[must_use]
    pub fn now(clock: &impl Clock) -> Self {
        let timestamp = clock.utc().trunc_subsecs(STORED_SUBSEC_DIGITS);
        Self {
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs timestamps read back from storage.
    #[must_use]
    pub const fn from_persisted(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
        }
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Advances `updated_at` to `now`, or one microsecond past its previous
    /// value when `now` is not later.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + TimeDelta::microseconds(1);
        self.updated_at = now.trunc_subsecs(STORED_SUBSEC_DIGITS).max(floor);
    }
}
