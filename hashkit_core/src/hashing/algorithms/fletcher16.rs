//! Fletcher-16 checksum

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("fletcher16", "Fletcher-16", &["fletcher-16"], 16);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Fletcher16::default()))
}

/// Two running sums modulo 255, reported as `sum2 << 8 | sum1`
#[derive(Default)]
struct Fletcher16 {
    sum1: u16,
    sum2: u16,
}

impl StreamingHasher for Fletcher16 {
    fn reset(&mut self) {
        self.sum1 = 0;
        self.sum2 = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.sum1 = (self.sum1 + u16::from(byte)) % 255;
            self.sum2 = (self.sum2 + self.sum1) % 255;
        }
    }

    fn digest(&self) -> Vec<u8> {
        vec![self.sum2 as u8, self.sum1 as u8]
    }

    fn bit_width(&self) -> usize {
        16
    }
}
