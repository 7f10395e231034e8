//! Unit tests for the generic collection building blocks.
