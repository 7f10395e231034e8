//! Traits describing a managed record type and its collection rules.

use super::{Choice, StatusCounts, ValidationError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Value of a field that must be unique across the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueKey<'a> {
    /// Wire name of the unique field.
    pub field: &'static str,
    /// Field value, compared by exact match.
    pub value: &'a str,
}

/// Selection criteria understood by a persistence gateway.
///
/// The default value selects every record.
pub trait RecordFilter<R>: Default + Clone + Debug + Send + Sync {
    /// Returns `true` when `record` satisfies every populated criterion.
    fn matches(&self, record: &R) -> bool;
}

/// A record owned by exactly one collection manager.
pub trait CollectionRecord: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Stable identifier, generated at creation.
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;
    /// Enumerated status counted by the statistics operation.
    type Status: Choice;
    /// Gateway filter for this record type.
    type Filter: RecordFilter<Self>;
    /// Validated partial update.
    type Changes: Clone + Debug + Send + Sync + 'static;

    /// Human-readable entity name used in errors and log fields.
    const KIND: &'static str;

    /// Returns the record identifier.
    fn id(&self) -> Self::Id;

    /// Builds a filter selecting records with the given status.
    fn status_filter(status: Self::Status) -> Self::Filter;

    /// Applies validated changes and advances the update timestamp to `now`.
    ///
    /// Gateways call this on the currently stored record while holding
    /// whatever lock or transaction makes the update atomic.
    fn apply_changes(&mut self, changes: Self::Changes, now: DateTime<Utc>);

    /// Returns the collection-wide unique field value, if the entity has one.
    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        None
    }
}

/// Entity descriptor binding a record type to its validation rules.
///
/// A schema turns raw inbound requests into validated records or changes;
/// the generic service takes care of persistence and error mapping.
pub trait CollectionSchema: Send + Sync + 'static {
    /// Record type stored in the collection.
    type Record: CollectionRecord;
    /// Raw creation payload.
    type CreateRequest: Send + 'static;
    /// Raw partial-update payload.
    type UpdateRequest: Send + 'static;
    /// Statistics summary returned to callers.
    type Stats: From<StatusCounts<<Self::Record as CollectionRecord>::Status>> + Send;

    /// Validates a creation payload and builds a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when any field violates its constraint.
    fn build<C: Clock>(
        request: Self::CreateRequest,
        clock: &C,
    ) -> Result<Self::Record, ValidationError>;

    /// Validates every supplied field of an update payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a supplied field violates its
    /// constraint.
    fn validate_update(
        request: Self::UpdateRequest,
    ) -> Result<<Self::Record as CollectionRecord>::Changes, ValidationError>;
}
