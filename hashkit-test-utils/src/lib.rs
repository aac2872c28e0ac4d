//! Test utilities for hashkit
//!
//! This crate provides input builders, reference vectors and mock
//! selectors for testing the checksum engine and its registry.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{DataPattern, KNOWN_VECTORS, KnownVector, TestDataBuilder};
pub use mocks::{FailingSelector, PassThroughSelector, RecordingSelector};
