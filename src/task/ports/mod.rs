//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::TaskRepository;
pub use crate::collection::ports::{RepositoryError, RepositoryResult};
