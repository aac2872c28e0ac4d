//! Mock selectors for testing

mod selectors;

pub use selectors::{FailingSelector, PassThroughSelector, RecordingSelector};
