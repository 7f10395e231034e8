//! User collection management.
//!
//! User records carry a name, an email address that is unique across the
//! collection, an optional avatar URL, a status drawn from a closed set and
//! a free-text role. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
