//! Step definitions for user collection scenarios.

pub mod given;
pub mod when;
pub mod world;
