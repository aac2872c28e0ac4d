//! Adler-32 checksum

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;

const MOD_ADLER: u32 = 65_521;

/// Largest run of bytes whose sums cannot overflow a u32 before reduction
const NMAX: usize = 5_552;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("adler32", "Adler-32", &["adler-32"], 32);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Adler32::new()))
        .with_alternate(|| Box::new(Adler32Reference::new()))
}

fn digest(a: u32, b: u32) -> Vec<u8> {
    ((b << 16) | a).to_be_bytes().to_vec()
}

/// Adler-32 reducing modulo once per `NMAX` bytes
struct Adler32 {
    a: u32,
    b: u32,
}

impl Adler32 {
    fn new() -> Self {
        Self { a: 1, b: 0 }
    }
}

impl StreamingHasher for Adler32 {
    fn reset(&mut self) {
        self.a = 1;
        self.b = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for chunk in data.chunks(NMAX) {
            for &byte in chunk {
                self.a += u32::from(byte);
                self.b += self.a;
            }
            self.a %= MOD_ADLER;
            self.b %= MOD_ADLER;
        }
    }

    fn digest(&self) -> Vec<u8> {
        digest(self.a, self.b)
    }

    fn bit_width(&self) -> usize {
        32
    }
}

/// Adler-32 reducing after every byte
struct Adler32Reference {
    a: u32,
    b: u32,
}

impl Adler32Reference {
    fn new() -> Self {
        Self { a: 1, b: 0 }
    }
}

impl StreamingHasher for Adler32Reference {
    fn reset(&mut self) {
        self.a = 1;
        self.b = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.a = (self.a + u32::from(byte)) % MOD_ADLER;
            self.b = (self.b + self.a) % MOD_ADLER;
        }
    }

    fn digest(&self) -> Vec<u8> {
        digest(self.a, self.b)
    }

    fn bit_width(&self) -> usize {
        32
    }
}
