//! ELF symbol table hash (PJW variant used by the System V ABI)

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("elf", "ELF hash", &["elf32", "elf-32"], 32);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Elf::default()))
}

#[derive(Default)]
struct Elf {
    hash: u32,
}

impl StreamingHasher for Elf {
    fn reset(&mut self) {
        self.hash = 0;
    }

    fn update(&mut self, data: &[u8]) {
        let mut hash = self.hash;
        for &byte in data {
            hash = (hash << 4).wrapping_add(u32::from(byte));
            let high = hash & 0xF000_0000;
            if high != 0 {
                hash ^= high >> 24;
            }
            hash &= !high;
        }
        self.hash = hash;
    }

    fn digest(&self) -> Vec<u8> {
        self.hash.to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        32
    }
}
