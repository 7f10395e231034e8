//! Task collection management.
//!
//! Task records carry a title, optional description, a status and priority
//! drawn from closed sets, and an advisory reference to the owning user that
//! is stored but never checked against the user collection. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
