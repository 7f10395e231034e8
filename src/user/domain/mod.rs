//! Domain model for user records.

mod email;
mod ids;
mod stats;
mod user;

pub use email::EmailAddress;
pub use ids::UserId;
pub use stats::UserStats;
pub use user::{
    DEFAULT_ROLE, NewUser, PersistedUserData, User, UserChanges, UserFilter, UserStatus,
};
