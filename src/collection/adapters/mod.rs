//! Adapter implementations for the collection persistence gateway.

pub mod memory;
pub mod postgres;
