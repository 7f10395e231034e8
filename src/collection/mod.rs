//! Generic collection management shared by the task and user services.
//!
//! Both services own a single collection of records and expose the same
//! lifecycle: validated creation, partial update, filtered retrieval, removal
//! and on-demand status statistics. This module implements that lifecycle
//! once, parameterised by a [`domain::CollectionSchema`] describing the
//! entity. The module follows hexagonal architecture:
//!
//! - Domain traits and shared value types in [`domain`]
//! - The persistence gateway contract in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The generic orchestration service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
