//! Tiger Tree Hash
//!
//! A Merkle tree over 1024-byte leaves. Leaves are hashed with a `0x00`
//! prefix and inner nodes with `0x01`. An unpaired node is promoted to the
//! next level unchanged. The digest is the raw 24-byte root.

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;
use tiger::{Digest, Tiger};

const LEAF_SIZE: usize = 1024;
const HASH_SIZE: usize = 24;

const DESCRIPTOR: AlgorithmDescriptor =
    AlgorithmDescriptor::new("tree:tiger", "Tiger Tree Hash", &["tth", "tiger-tree"], 192);

pub(super) fn selector() -> FixedSelector {
    FixedSelector::new(DESCRIPTOR, || Box::new(Tth::new()))
}

struct Tth {
    leaf: Vec<u8>,
    leaf_hashes: Vec<[u8; HASH_SIZE]>,
}

impl Tth {
    fn new() -> Self {
        Self {
            leaf: Vec::with_capacity(LEAF_SIZE),
            leaf_hashes: Vec::new(),
        }
    }
}

fn leaf_hash(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Tiger::new();
    Digest::update(&mut hasher, [0x00]);
    Digest::update(&mut hasher, data);
    finish(hasher)
}

fn node_hash(left: &[u8; HASH_SIZE], right: &[u8; HASH_SIZE]) -> [u8; HASH_SIZE] {
    let mut hasher = Tiger::new();
    Digest::update(&mut hasher, [0x01]);
    Digest::update(&mut hasher, left);
    Digest::update(&mut hasher, right);
    finish(hasher)
}

fn finish(hasher: Tiger) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn merkle_root(mut level: Vec<[u8; HASH_SIZE]>) -> [u8; HASH_SIZE] {
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => node_hash(left, right),
                _ => pair[0],
            })
            .collect();
    }
    level[0]
}

impl StreamingHasher for Tth {
    fn reset(&mut self) {
        self.leaf.clear();
        self.leaf_hashes.clear();
    }

    fn update(&mut self, data: &[u8]) {
        let mut remaining = data;
        while !remaining.is_empty() {
            let take = remaining.len().min(LEAF_SIZE - self.leaf.len());
            self.leaf.extend_from_slice(&remaining[..take]);
            remaining = &remaining[take..];

            if self.leaf.len() == LEAF_SIZE {
                self.leaf_hashes.push(leaf_hash(&self.leaf));
                self.leaf.clear();
            }
        }
    }

    fn digest(&self) -> Vec<u8> {
        let mut leaves = self.leaf_hashes.clone();
        // empty input still hashes as one empty leaf
        if !self.leaf.is_empty() || leaves.is_empty() {
            leaves.push(leaf_hash(&self.leaf));
        }
        merkle_root(leaves).to_vec()
    }

    fn bit_width(&self) -> usize {
        HASH_SIZE * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn tth(data: &[u8]) -> Vec<u8> {
        let mut hasher = Tth::new();
        hasher.update(data);
        hasher.digest()
    }

    #[test]
    fn test_known_roots() {
        assert_eq!(hex(&tth(b"")), "5d9ed00a030e638bdb753a6a24fb900e5a63b8e73e6c25b6");
        assert_eq!(hex(&tth(b"a")), "16614b1f68c5c25eaf6136286c9c12932f4f73e87e90a273");
        assert_eq!(hex(&tth(b"abc")), "0487ca26443f59cfbc780f3ca0ce509c8c352c27c5dcca20");
    }

    #[test]
    fn test_two_leaves() {
        let data = vec![0x61; LEAF_SIZE + 1];
        let expected = node_hash(&leaf_hash(&data[..LEAF_SIZE]), &leaf_hash(&data[LEAF_SIZE..]));
        assert_eq!(tth(&data), expected.to_vec());
    }

    #[test]
    fn test_odd_leaf_is_promoted() {
        let data = vec![0x33; LEAF_SIZE * 3];
        let leaf = leaf_hash(&data[..LEAF_SIZE]);
        let expected = node_hash(&node_hash(&leaf, &leaf), &leaf);
        assert_eq!(tth(&data), expected.to_vec());
    }

    #[test]
    fn test_exact_leaf_boundary_adds_no_empty_leaf() {
        let data = vec![0x10; LEAF_SIZE];
        assert_eq!(tth(&data), leaf_hash(&data).to_vec());
    }
}
