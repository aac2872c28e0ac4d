//! CRC-32 (IEEE 802.3) backed by crc32fast

use super::FixedSelector;
use super::crc::{CRC32_PARAMS, Crc};
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;
use crc32fast::Hasher;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("crc32", "CRC-32", &["crc-32"], 32);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Crc32::new()))
        .with_alternate(|| Box::new(Crc::table_driven(CRC32_PARAMS)))
}

/// CRC-32 using the SIMD accelerated crc32fast implementation
struct Crc32 {
    hasher: Hasher,
}

impl Crc32 {
    fn new() -> Self {
        Self {
            hasher: Hasher::new(),
        }
    }
}

impl StreamingHasher for Crc32 {
    fn reset(&mut self) {
        self.hasher.reset();
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn digest(&self) -> Vec<u8> {
        self.hasher.clone().finalize().to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        32
    }
}
