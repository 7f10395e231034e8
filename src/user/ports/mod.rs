//! Port contracts for user persistence.

pub mod repository;

pub use repository::UserRepository;
pub use crate::collection::ports::{RepositoryError, RepositoryResult};
