//! Workboard: task and user collection management.
//!
//! This crate provides two collection managers, one for task records and
//! one for user records. Each offers validated creation, partial updates,
//! filtered retrieval, permanent removal and status statistics computed
//! fresh from storage.
//!
//! # Architecture
//!
//! Workboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`collection`]: Generic collection manager shared by both entities
//! - [`task`]: Task records and the task collection schema
//! - [`user`]: User records with unique email addresses
//! - [`config`]: Layered runtime settings
//! - [`telemetry`]: Tracing subscriber installation

pub mod collection;
pub mod config;
pub mod task;
pub mod telemetry;
pub mod user;
