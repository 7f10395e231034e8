//! Application services for collection lifecycle orchestration.

mod manager;

pub use manager::{
    CollectionService, CollectionServiceError, CollectionServiceResult, ErrorKind,
};
