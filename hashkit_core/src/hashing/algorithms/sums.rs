//! Additive and XOR checksums
//!
//! `sum_bsd` and `sum_sysv` reproduce the two flavours of the Unix `sum`
//! utility; Minix `sum` uses the BSD algorithm. `sumN` is the plain byte
//! sum modulo 2^N.

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;

const SUM_BSD: AlgorithmDescriptor =
    AlgorithmDescriptor::new("sum_bsd", "sum (BSD Unix)", &["bsdsum", "sumbsd"], 16);
const SUM_MINIX: AlgorithmDescriptor =
    AlgorithmDescriptor::new("sum_minix", "sum (Minix)", &["minixsum", "summinix"], 16);
const SUM_SYSV: AlgorithmDescriptor = AlgorithmDescriptor::new(
    "sum_sysv",
    "sum (System V Unix)",
    &["sumsysv", "sysv", "sysvsum"],
    16,
);
const XOR8: AlgorithmDescriptor = AlgorithmDescriptor::new("xor8", "XOR 8", &["xor-8"], 8);

const SUM8: AlgorithmDescriptor = AlgorithmDescriptor::new("sum8", "Sum 8", &["sum-8"], 8);
const SUM16: AlgorithmDescriptor = AlgorithmDescriptor::new("sum16", "Sum 16", &["sum-16"], 16);
const SUM24: AlgorithmDescriptor = AlgorithmDescriptor::new("sum24", "Sum 24", &["sum-24"], 24);
const SUM32: AlgorithmDescriptor = AlgorithmDescriptor::new("sum32", "Sum 32", &["sum-32"], 32);
const SUM40: AlgorithmDescriptor = AlgorithmDescriptor::new("sum40", "Sum 40", &["sum-40"], 40);
const SUM48: AlgorithmDescriptor = AlgorithmDescriptor::new("sum48", "Sum 48", &["sum-48"], 48);
const SUM56: AlgorithmDescriptor = AlgorithmDescriptor::new("sum56", "Sum 56", &["sum-56"], 56);

pub(super) fn sum_bsd() -> FixedSelector {
    FixedSelector::new(SUM_BSD, || Box::new(SumBsd::default()))
}

pub(super) fn sum_minix() -> FixedSelector {
    FixedSelector::new(SUM_MINIX, || Box::new(SumBsd::default()))
}

pub(super) fn sum_sysv() -> FixedSelector {
    FixedSelector::new(SUM_SYSV, || Box::new(SumSysV::default()))
}

pub(super) fn xor8() -> FixedSelector {
    FixedSelector::new(XOR8, || Box::new(Xor8::default()))
}

/// Byte sum modulo 2^BITS
pub(super) fn sum_n<const BITS: u32>() -> FixedSelector {
    FixedSelector::new(ByteSum::<BITS>::DESCRIPTOR, || Box::new(ByteSum::<BITS>::default()))
}

/// Rotating 16-bit sum of BSD `sum`
#[derive(Default)]
struct SumBsd {
    checksum: u16,
}

impl StreamingHasher for SumBsd {
    fn reset(&mut self) {
        self.checksum = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.checksum = self.checksum.rotate_right(1).wrapping_add(u16::from(byte));
        }
    }

    fn digest(&self) -> Vec<u8> {
        self.checksum.to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        16
    }
}

/// System V `sum`: a 32-bit byte sum folded twice into 16 bits
#[derive(Default)]
struct SumSysV {
    sum: u32,
}

impl StreamingHasher for SumSysV {
    fn reset(&mut self) {
        self.sum = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.sum = self.sum.wrapping_add(u32::from(byte));
        }
    }

    fn digest(&self) -> Vec<u8> {
        let folded = (self.sum & 0xffff) + (self.sum >> 16);
        let folded = (folded & 0xffff) + (folded >> 16);
        (folded as u16).to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        16
    }
}

#[derive(Default)]
struct Xor8 {
    value: u8,
}

impl StreamingHasher for Xor8 {
    fn reset(&mut self) {
        self.value = 0;
    }

    fn update(&mut self, data: &[u8]) {
        self.value = data.iter().fold(self.value, |acc, byte| acc ^ byte);
    }

    fn digest(&self) -> Vec<u8> {
        vec![self.value]
    }

    fn bit_width(&self) -> usize {
        8
    }
}

#[derive(Default)]
struct ByteSum<const BITS: u32> {
    sum: u64,
}

impl<const BITS: u32> ByteSum<BITS> {
    const MASK: u64 = u64::MAX >> (64 - BITS);

    const DESCRIPTOR: AlgorithmDescriptor = match BITS {
        8 => SUM8,
        16 => SUM16,
        24 => SUM24,
        32 => SUM32,
        40 => SUM40,
        48 => SUM48,
        56 => SUM56,
        _ => panic!("byte sums exist for 8 to 56 bits in whole bytes"),
    };
}

impl<const BITS: u32> StreamingHasher for ByteSum<BITS> {
    fn reset(&mut self) {
        self.sum = 0;
    }

    fn update(&mut self, data: &[u8]) {
        let added = data.iter().fold(0u64, |acc, &byte| acc.wrapping_add(u64::from(byte)));
        self.sum = self.sum.wrapping_add(added) & Self::MASK;
    }

    fn digest(&self) -> Vec<u8> {
        let bytes = self.sum.to_be_bytes();
        bytes[8 - (BITS / 8) as usize..].to_vec()
    }

    fn bit_width(&self) -> usize {
        BITS as usize
    }
}
