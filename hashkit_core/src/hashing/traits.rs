//! Core traits for the algorithm extensibility system

use super::descriptor::AlgorithmDescriptor;
use super::engine::ChecksumEngine;
use super::registry::AlgorithmRegistry;
use crate::Result;

/// Per-family accumulator that every algorithm must implement
///
/// Feeding a buffer in one call or byte by byte must produce the same
/// digest.
pub trait StreamingHasher: Send {
    /// Return to the initial state
    fn reset(&mut self);

    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Digest of everything consumed so far, `bit_width() / 8` bytes long
    fn digest(&self) -> Vec<u8>;

    /// Digest width in bits
    fn bit_width(&self) -> usize;
}

/// Matches names to an algorithm family and builds engines for it
pub trait Selector: Send + Sync {
    /// Descriptors of the family, used for listing and cache population
    fn descriptors(&self) -> &[AlgorithmDescriptor];

    /// Whether `name` belongs to this family
    fn matches(&self, name: &str) -> bool {
        self.descriptors().iter().any(|d| d.matches(name))
    }

    /// Create a fresh engine for a name this selector matched
    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine>;
}
