//! POSIX and Minix `cksum`
//!
//! The POSIX CRC register runs over the data followed by the data length,
//! least significant byte first and without trailing zero bytes, and is
//! complemented at the end. Minix `cksum` leaves the length out.

use super::FixedSelector;
use super::crc::{CrcCore, POSIX_PARAMS};
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("cksum", "POSIX cksum", &["posix-cksum"], 32);
const MINIX: AlgorithmDescriptor =
    AlgorithmDescriptor::new("cksum_minix", "cksum (Minix)", &["minix-cksum"], 32);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Cksum::new(CrcCore::table_driven(POSIX_PARAMS))))
        .with_alternate(|| Box::new(Cksum::new(CrcCore::bitwise(POSIX_PARAMS))))
}

pub(super) fn minix() -> FixedSelector {
    FixedSelector::new(MINIX, || {
        Box::new(Cksum::new(CrcCore::table_driven(POSIX_PARAMS)).without_length())
    })
    .with_alternate(|| Box::new(Cksum::new(CrcCore::bitwise(POSIX_PARAMS)).without_length()))
}

struct Cksum {
    core: CrcCore,
    length: u64,
    append_length: bool,
}

impl Cksum {
    fn new(core: CrcCore) -> Self {
        Self {
            core,
            length: 0,
            append_length: true,
        }
    }

    fn without_length(mut self) -> Self {
        self.append_length = false;
        self
    }
}

impl StreamingHasher for Cksum {
    fn reset(&mut self) {
        self.core.reset();
        self.length = 0;
    }

    fn update(&mut self, data: &[u8]) {
        self.core.update(data);
        self.length += data.len() as u64;
    }

    fn digest(&self) -> Vec<u8> {
        let mut core = self.core.clone();
        let mut length = if self.append_length { self.length } else { 0 };
        while length > 0 {
            core.update(&[length as u8]);
            length >>= 8;
        }
        (!(core.value() as u32)).to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        32
    }
}
