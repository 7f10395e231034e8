//! Shared world state for user collection BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workboard::collection::services::CollectionServiceError;
use workboard::user::{
    adapters::memory::InMemoryUserRepository, domain::User, services::UserService,
};

/// Service type used by the BDD world.
pub type TestUserService = UserService<InMemoryUserRepository, DefaultClock>;

/// Scenario world for user collection behaviour tests.
pub struct UserCollectionWorld {
    pub service: TestUserService,
    pub users_by_name: HashMap<String, User>,
    pub current_user: Option<User>,
    pub last_error: Option<CollectionServiceError>,
}

impl UserCollectionWorld {
    /// Creates a world over an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let service = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            users_by_name: HashMap::new(),
            current_user: None,
            last_error: None,
        }
    }

    /// Records the outcome of a user-producing operation.
    pub fn record(&mut self, result: Result<User, CollectionServiceError>) {
        match result {
            Ok(user) => {
                self.users_by_name
                    .insert(user.name().to_owned(), user.clone());
                self.current_user = Some(user);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for UserCollectionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> UserCollectionWorld {
    UserCollectionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
