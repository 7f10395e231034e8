//! Repository port for user persistence.

use crate::collection::ports::CollectionRepository;
use crate::user::domain::User;

/// User persistence contract.
///
/// Implementations must enforce email uniqueness atomically with the write
/// and report violations as
/// [`RepositoryError::DuplicateKey`](crate::collection::ports::RepositoryError::DuplicateKey).
pub trait UserRepository: CollectionRepository<User> {}

impl<T> UserRepository for T where T: CollectionRepository<User> + ?Sized {}
