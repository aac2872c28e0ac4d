//! Fowler/Noll/Vo hashes
//!
//! Three variants at 32, 64, 128, 256, 512 and 1024 bits. The 32 and
//! 64-bit sizes use native integer arithmetic and keep the multi-limb
//! engine as their alternate strategy. Larger sizes only have the
//! multi-limb engine.
//!
//! Every FNV prime has the form `2^k + 2^8 + c`, so a multiplication is a
//! shift plus a small-factor product. Offset bases are the FNV-0 hash of
//! [`OFFSET_BASIS_SOURCE`].

use crate::Result;
use crate::error::ResolutionError;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::engine::{Checksum, ChecksumEngine};
use crate::hashing::registry::AlgorithmRegistry;
use crate::hashing::traits::{Selector, StreamingHasher};

/// Input whose FNV-0 hash is the offset basis of FNV-1 and FNV-1a
pub const OFFSET_BASIS_SOURCE: &[u8] = b"chongo <Landon Curt Noll> /\\../\\";

/// Supported size with the `(k, c)` pair of its prime
type Prime = (usize, u32, u32);

const PRIMES: [Prime; 6] = [
    (32, 24, 0x93),
    (64, 40, 0xb3),
    (128, 88, 0x3b),
    (256, 168, 0x63),
    (512, 344, 0x57),
    (1024, 680, 0x8d),
];

const FNV32_PRIME: u32 = 0x0100_0193;
const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;
const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FnvVariant {
    /// Zero offset basis, multiply then xor
    Fnv0,
    /// Multiply then xor
    Fnv1,
    /// Xor then multiply
    Fnv1a,
}

impl FnvVariant {
    /// Name prefix preceding the bit width, e.g. `fnv-1a_`
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Fnv0 => "fnv-0_",
            Self::Fnv1 => "fnv-1_",
            Self::Fnv1a => "fnv-1a_",
        }
    }

    fn descriptors(self) -> &'static [AlgorithmDescriptor] {
        match self {
            Self::Fnv0 => &FNV0_DESCRIPTORS,
            Self::Fnv1 => &FNV1_DESCRIPTORS,
            Self::Fnv1a => &FNV1A_DESCRIPTORS,
        }
    }
}

const fn native(id: &'static str, display_name: &'static str, bits: usize) -> AlgorithmDescriptor {
    AlgorithmDescriptor::new(id, display_name, &[], bits).with_alternate()
}

const fn wide(id: &'static str, display_name: &'static str, bits: usize) -> AlgorithmDescriptor {
    AlgorithmDescriptor::new(id, display_name, &[], bits)
}

const FNV0_DESCRIPTORS: [AlgorithmDescriptor; 6] = [
    native("fnv-0_32", "FNV-0 (32 bits)", 32),
    native("fnv-0_64", "FNV-0 (64 bits)", 64),
    wide("fnv-0_128", "FNV-0 (128 bits)", 128),
    wide("fnv-0_256", "FNV-0 (256 bits)", 256),
    wide("fnv-0_512", "FNV-0 (512 bits)", 512),
    wide("fnv-0_1024", "FNV-0 (1024 bits)", 1024),
];

const FNV1_DESCRIPTORS: [AlgorithmDescriptor; 6] = [
    native("fnv-1_32", "FNV-1 (32 bits)", 32),
    native("fnv-1_64", "FNV-1 (64 bits)", 64),
    wide("fnv-1_128", "FNV-1 (128 bits)", 128),
    wide("fnv-1_256", "FNV-1 (256 bits)", 256),
    wide("fnv-1_512", "FNV-1 (512 bits)", 512),
    wide("fnv-1_1024", "FNV-1 (1024 bits)", 1024),
];

const FNV1A_DESCRIPTORS: [AlgorithmDescriptor; 6] = [
    native("fnv-1a_32", "FNV-1a (32 bits)", 32),
    native("fnv-1a_64", "FNV-1a (64 bits)", 64),
    wide("fnv-1a_128", "FNV-1a (128 bits)", 128),
    wide("fnv-1a_256", "FNV-1a (256 bits)", 256),
    wide("fnv-1a_512", "FNV-1a (512 bits)", 512),
    wide("fnv-1a_1024", "FNV-1a (1024 bits)", 1024),
];

/// Selector for one FNV variant across all sizes
///
/// Any `<prefix><digits>` name is claimed so that an unsupported size is
/// reported as such instead of as an unknown algorithm.
pub struct FnvSelector {
    variant: FnvVariant,
}

impl FnvSelector {
    pub fn new(variant: FnvVariant) -> Self {
        Self { variant }
    }

    fn width_suffix<'a>(&self, name: &'a str) -> Option<&'a str> {
        let prefix = self.variant.prefix();
        let head = name.get(..prefix.len())?;
        let suffix = name.get(prefix.len()..)?;
        (head.eq_ignore_ascii_case(prefix)
            && !suffix.starts_with('0')
            && !suffix.is_empty()
            && suffix.bytes().all(|b| b.is_ascii_digit()))
        .then_some(suffix)
    }
}

impl Selector for FnvSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        self.variant.descriptors()
    }

    fn matches(&self, name: &str) -> bool {
        self.width_suffix(name).is_some()
    }

    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        let prime = self
            .width_suffix(name)
            .and_then(|suffix| suffix.parse::<usize>().ok())
            .and_then(|width| PRIMES.iter().copied().find(|(bits, _, _)| *bits == width))
            .ok_or_else(|| {
                ResolutionError::unsupported_parametrization(
                    name,
                    "FNV is defined for 32, 64, 128, 256, 512 and 1024 bits",
                )
            })?;

        let (hasher, used_alternate): (Box<dyn StreamingHasher>, bool) =
            match (prime.0, alternate) {
                (32, false) => (Box::new(Fnv32::new(self.variant)), false),
                (64, false) => (Box::new(Fnv64::new(self.variant)), false),
                (32 | 64, true) => (Box::new(FnvN::new(self.variant, prime)), true),
                _ => (Box::new(FnvN::new(self.variant, prime)), false),
            };
        Ok(Checksum::new(name, hasher)
            .with_alternate_used(used_alternate)
            .into())
    }
}

struct Fnv32 {
    variant: FnvVariant,
    hash: u32,
}

impl Fnv32 {
    fn new(variant: FnvVariant) -> Self {
        Self {
            variant,
            hash: Self::basis(variant),
        }
    }

    fn basis(variant: FnvVariant) -> u32 {
        match variant {
            FnvVariant::Fnv0 => 0,
            FnvVariant::Fnv1 | FnvVariant::Fnv1a => FNV32_OFFSET,
        }
    }
}

impl StreamingHasher for Fnv32 {
    fn reset(&mut self) {
        self.hash = Self::basis(self.variant);
    }

    fn update(&mut self, data: &[u8]) {
        let mut hash = self.hash;
        if self.variant == FnvVariant::Fnv1a {
            for &byte in data {
                hash = (hash ^ u32::from(byte)).wrapping_mul(FNV32_PRIME);
            }
        } else {
            for &byte in data {
                hash = hash.wrapping_mul(FNV32_PRIME) ^ u32::from(byte);
            }
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

struct Fnv64 {
    variant: FnvVariant,
    hash: u64,
}

impl Fnv64 {
    fn new(variant: FnvVariant) -> Self {
        Self {
            variant,
            hash: Self::basis(variant),
        }
    }

    fn basis(variant: FnvVariant) -> u64 {
        match variant {
            FnvVariant::Fnv0 => 0,
            FnvVariant::Fnv1 | FnvVariant::Fnv1a => FNV64_OFFSET,
        }
    }
}

impl StreamingHasher for Fnv64 {
    fn reset(&mut self) {
        self.hash = Self::basis(self.variant);
    }

    fn update(&mut self, data: &[u8]) {
        let mut hash = self.hash;
        if self.variant == FnvVariant::Fnv1a {
            for &byte in data {
                hash = (hash ^ u64::from(byte)).wrapping_mul(FNV64_PRIME);
            }
        } else {
            for &byte in data {
                hash = hash.wrapping_mul(FNV64_PRIME) ^ u64::from(byte);
            }
        }
        self.hash = hash;
    }

    fn digest(&self) -> Vec<u8> {
        self.hash.to_be_bytes().to_vec()
    }

    fn bit_width(&self) -> usize {
        64
    }
}

/// Fixed-width unsigned integer of little-endian 32-bit limbs, arithmetic
/// modulo 2^(32 * limbs)
#[derive(Clone, Debug, PartialEq, Eq)]
struct Limbs(Vec<u32>);

impl Limbs {
    fn zero(width: usize) -> Self {
        Self(vec![0; width / 32])
    }

    fn xor_byte(&mut self, byte: u8) {
        self.0[0] ^= u32::from(byte);
    }

    /// Multiply by `2^shift + 2^8 + small`
    fn mul_prime(&mut self, shift: u32, small: u32) {
        let shifted = self.shifted_left(shift);
        let factor = u64::from(0x100 + small);

        let mut carry = 0u64;
        for (limb, high) in self.0.iter_mut().zip(shifted.iter()) {
            let sum = u64::from(*limb) * factor + u64::from(*high) + carry;
            *limb = sum as u32;
            carry = sum >> 32;
        }
    }

    fn shifted_left(&self, shift: u32) -> Vec<u32> {
        let len = self.0.len();
        let limb_shift = (shift / 32) as usize;
        let bit_shift = shift % 32;
        let mut out = vec![0u32; len];
        for index in limb_shift..len {
            let source = index - limb_shift;
            let mut value = self.0[source] << bit_shift;
            if bit_shift > 0 && source > 0 {
                value |= self.0[source - 1] >> (32 - bit_shift);
            }
            out[index] = value;
        }
        out
    }

    fn to_be_bytes(&self) -> Vec<u8> {
        self.0.iter().rev().flat_map(|limb| limb.to_be_bytes()).collect()
    }
}

/// FNV at any supported width using multi-limb arithmetic
struct FnvN {
    variant: FnvVariant,
    width: usize,
    shift: u32,
    small: u32,
    basis: Limbs,
    hash: Limbs,
}

impl FnvN {
    fn new(variant: FnvVariant, (width, shift, small): Prime) -> Self {
        let mut hasher = Self {
            variant: FnvVariant::Fnv0,
            width,
            shift,
            small,
            basis: Limbs::zero(width),
            hash: Limbs::zero(width),
        };
        if variant != FnvVariant::Fnv0 {
            hasher.update(OFFSET_BASIS_SOURCE);
            hasher.basis = hasher.hash.clone();
        }
        hasher.variant = variant;
        hasher
    }
}

impl StreamingHasher for FnvN {
    fn reset(&mut self) {
        self.hash = self.basis.clone();
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            if self.variant == FnvVariant::Fnv1a {
                self.hash.xor_byte(byte);
                self.hash.mul_prime(self.shift, self.small);
            } else {
                self.hash.mul_prime(self.shift, self.small);
                self.hash.xor_byte(byte);
            }
        }
    }

    fn digest(&self) -> Vec<u8> {
        self.hash.to_be_bytes()
    }

    fn bit_width(&self) -> usize {
        self.width
    }
}
