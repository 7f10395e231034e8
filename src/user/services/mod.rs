//! Application services for user collection management.

mod lifecycle;

pub use lifecycle::{CreateUserRequest, UpdateUserRequest, UserCollection, UserService};
