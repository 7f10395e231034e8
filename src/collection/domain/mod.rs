//! Domain traits and value types shared by every managed collection.
//!
//! Nothing here knows about storage. Entity modules implement
//! [`CollectionRecord`] and [`CollectionSchema`] for their own types and
//! reuse the validation helpers for enumerated fields and timestamps.

mod choice;
mod error;
mod record;
mod stats;
mod timestamps;

pub use choice::{Choice, parse_choice, parse_optional_choice};
pub use error::{ValidationError, require_text};
pub use record::{CollectionRecord, CollectionSchema, RecordFilter, UniqueKey};
pub use stats::StatusCounts;
pub use timestamps::Timestamps;
