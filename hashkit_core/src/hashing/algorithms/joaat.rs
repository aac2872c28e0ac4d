//! Bob Jenkins' one-at-a-time hash

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;

const DESCRIPTOR: AlgorithmDescriptor = AlgorithmDescriptor::new(
    "joaat",
    "Jenkins one-at-a-time",
    &["one-at-a-time", "oaat"],
    32,
);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Joaat::default()))
}

#[derive(Default)]
struct Joaat {
    hash: u32,
}

impl StreamingHasher for Joaat {
    fn reset(&mut self) {
        self.hash = 0;
    }

    fn update(&mut self, data: &[u8]) {
        let mut hash = self.hash;
        for &byte in data {
            hash = hash.wrapping_add(u32::from(byte));
            hash = hash.wrapping_add(hash << 10);
            hash ^= hash >> 6;
        }
        self.hash = hash;
    }

    // the avalanche step only applies to the reported value
    fn digest(&self) -> Vec<u8> {
        let mut hash = self.hash;
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 11;
        hash = hash.wrapping_add(hash << 15);
        hash.to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        32
    }
}
