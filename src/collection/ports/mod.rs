//! Port contracts for collection persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by collection
//! services.

pub mod repository;

pub use repository::{CollectionRepository, RepositoryError, RepositoryResult};
