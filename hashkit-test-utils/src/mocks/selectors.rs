//! Selectors with controllable behaviour for registry and combination tests

use hashkit_core::error::InternalError;
use hashkit_core::{
    AlgorithmDescriptor, AlgorithmRegistry, Checksum, ChecksumEngine, Result, Selector,
    StreamingHasher,
};
use std::sync::{Arc, Mutex};

/// Zero-width algorithm that consumes input and produces no digest bytes
///
/// Useful as a neutral member of a combination.
pub struct PassThroughSelector {
    descriptor: AlgorithmDescriptor,
}

impl PassThroughSelector {
    pub const ID: &'static str = "passthrough";

    pub fn new() -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(Self::ID, "Pass-through", &["null"], 0),
        }
    }
}

impl Default for PassThroughSelector {
    fn default() -> Self {
        Self::new()
    }
}

struct PassThrough;

impl StreamingHasher for PassThrough {
    fn reset(&mut self) {}

    fn update(&mut self, _data: &[u8]) {}

    fn digest(&self) -> Vec<u8> {
        Vec::new()
    }

    fn bit_width(&self) -> usize {
        0
    }
}

impl Selector for PassThroughSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        std::slice::from_ref(&self.descriptor)
    }

    fn instantiate(
        &self,
        name: &str,
        _alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        Ok(Checksum::new(name, Box::new(PassThrough)).into())
    }
}

/// Records every instantiation it performs
///
/// Its engines count input bytes and report the count as a 64-bit
/// big-endian digest.
pub struct RecordingSelector {
    descriptor: AlgorithmDescriptor,
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl RecordingSelector {
    pub fn new(id: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(id, "Recording", aliases, 64),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the `(name, alternate)` log, usable after the selector
    /// has moved into a registry
    pub fn calls(&self) -> Arc<Mutex<Vec<(String, bool)>>> {
        Arc::clone(&self.calls)
    }
}

#[derive(Default)]
struct ByteCounter {
    count: u64,
}

impl StreamingHasher for ByteCounter {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn update(&mut self, data: &[u8]) {
        self.count += data.len() as u64;
    }

    fn digest(&self) -> Vec<u8> {
        self.count.to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        64
    }
}

impl Selector for RecordingSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        std::slice::from_ref(&self.descriptor)
    }

    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((name.to_string(), alternate));
        Ok(Checksum::new(name, Box::new(ByteCounter::default())).into())
    }
}

/// Claims a name and always fails to build it
pub struct FailingSelector {
    descriptor: AlgorithmDescriptor,
}

impl FailingSelector {
    pub fn new(id: &'static str) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(id, "Failing", &[], 32),
        }
    }
}

impl Selector for FailingSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        std::slice::from_ref(&self.descriptor)
    }

    fn instantiate(
        &self,
        name: &str,
        _alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        Err(InternalError::instantiation_failure(name, "backing implementation unavailable").into())
    }
}
