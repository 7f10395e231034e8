//! In-memory repository for user services and tests.

use crate::collection::adapters::memory::InMemoryCollectionRepository;
use crate::user::domain::User;

/// Thread-safe in-memory user repository with an email index.
pub type InMemoryUserRepository = InMemoryCollectionRepository<User>;
