//! eDonkey2000 hash
//!
//! Data is split into 9 728 000-byte chunks, each hashed with MD4. Input of
//! at most one chunk yields that chunk's MD4 directly, otherwise the result
//! is the MD4 of the concatenated chunk hashes. When a multi-chunk input
//! ends exactly on a chunk boundary the hash of an empty trailing chunk is
//! appended as well (the "red" convention).

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;
use md4::{Digest, Md4};

pub(super) const CHUNK_SIZE: usize = 9_728_000;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("ed2k", "eDonkey2000", &["edonkey", "emule"], 128);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Ed2k::new()))
}

/// ED2K hasher streaming through a running MD4 instead of buffering chunks
struct Ed2k {
    current: Md4,
    in_chunk: usize,
    chunk_hashes: Vec<u8>,
}

impl Ed2k {
    const HASH_SIZE: usize = 16;

    fn new() -> Self {
        Self {
            current: Md4::new(),
            in_chunk: 0,
            chunk_hashes: Vec::new(),
        }
    }
}

impl StreamingHasher for Ed2k {
    fn reset(&mut self) {
        self.current = Md4::new();
        self.in_chunk = 0;
        self.chunk_hashes.clear();
    }

    fn update(&mut self, data: &[u8]) {
        let mut remaining = data;
        while !remaining.is_empty() {
            let take = remaining.len().min(CHUNK_SIZE - self.in_chunk);
            Digest::update(&mut self.current, &remaining[..take]);
            self.in_chunk += take;
            remaining = &remaining[take..];

            if self.in_chunk == CHUNK_SIZE {
                let hash = self.current.finalize_reset();
                self.chunk_hashes.extend_from_slice(&hash);
                self.in_chunk = 0;
            }
        }
    }

    fn digest(&self) -> Vec<u8> {
        let completed = self.chunk_hashes.len() / Self::HASH_SIZE;
        match (completed, self.in_chunk) {
            (0, _) => self.current.clone().finalize().to_vec(),
            (1, 0) => self.chunk_hashes.clone(),
            _ => {
                let mut root = Md4::new();
                Digest::update(&mut root, &self.chunk_hashes);
                Digest::update(&mut root, self.current.clone().finalize());
                root.finalize().to_vec()
            }
        }
    }

    fn bit_width(&self) -> usize {
        128
    }
}
