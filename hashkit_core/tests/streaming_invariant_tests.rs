//! Feeding the same bytes in different pieces must not change any digest

mod common;

use common::test_registry;
use hashkit_core::{AlgorithmRegistry, ChecksumEngine};
use once_cell::sync::Lazy;
use proptest::prelude::*;

static REGISTRY: Lazy<AlgorithmRegistry> = Lazy::new(test_registry);

/// Every listed id plus parametrized names that are not listed
static NAMES: Lazy<Vec<String>> = Lazy::new(|| {
    let mut names: Vec<String> = REGISTRY.list().iter().map(|d| d.id.to_string()).collect();
    names.extend(
        [
            "fnv-1_512",
            "fnv-0_1024",
            "crc:8,9B,FF,false,true,5A",
            "crc:40,0004820009,0,false,false,FFFFFFFFFF",
            "crc:64,42F0E1EBA9EA3693,0,true,false,0",
            "adler32+crc32+sha1",
        ]
        .map(String::from),
    );
    names
});

fn resolve(name: &str, alternate: bool) -> ChecksumEngine {
    REGISTRY.resolve(name, alternate).unwrap()
}

fn bulk(name: &str, alternate: bool, data: &[u8]) -> Vec<u8> {
    let mut engine = resolve(name, alternate);
    engine.update(data);
    engine.digest_bytes()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_bytewise_equals_bulk(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        for name in NAMES.iter() {
            let mut engine = resolve(name, false);
            for &byte in &data {
                engine.update_byte(byte);
            }
            prop_assert_eq!(engine.digest_bytes(), bulk(name, false, &data), "{}", name);
            prop_assert_eq!(engine.processed_length(), data.len() as u64);
        }
    }

    #[test]
    fn prop_chunking_is_irrelevant(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        chunk in 1usize..700,
    ) {
        for name in NAMES.iter() {
            let mut engine = resolve(name, false);
            for piece in data.chunks(chunk) {
                engine.update(piece);
            }
            prop_assert_eq!(engine.digest_bytes(), bulk(name, false, &data), "{}", name);
        }
    }

    #[test]
    fn prop_alternate_agrees_with_primary(data in prop::collection::vec(any::<u8>(), 0..3000)) {
        for name in NAMES.iter() {
            prop_assert_eq!(bulk(name, true, &data), bulk(name, false, &data), "{}", name);
        }
    }

    #[test]
    fn prop_update_range_matches_slice(
        data in prop::collection::vec(any::<u8>(), 1..512),
        start in any::<prop::sample::Index>(),
        len in any::<prop::sample::Index>(),
    ) {
        let offset = start.index(data.len());
        let length = len.index(data.len() - offset + 1);
        for name in ["crc32", "sha256", "fnv-1a_64", "tree:tiger"] {
            let mut engine = resolve(name, false);
            engine.update_range(&data, offset, length);
            prop_assert_eq!(
                engine.digest_bytes(),
                bulk(name, false, &data[offset..offset + length])
            );
        }
    }

    #[test]
    fn prop_reset_restores_fresh_state(
        noise in prop::collection::vec(any::<u8>(), 1..256),
        data in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        for name in NAMES.iter() {
            let mut engine = resolve(name, false);
            engine.update(&noise);
            engine.reset();
            prop_assert_eq!(engine.processed_length(), 0);
            engine.update(&data);
            prop_assert_eq!(engine.digest_bytes(), bulk(name, false, &data), "{}", name);
        }
    }
}

#[test]
fn test_digest_width_matches_declared_width() {
    for name in NAMES.iter() {
        let engine = resolve(name, false);
        assert_eq!(engine.digest_bytes().len() * 8, engine.bit_width(), "{name}");
    }
}

#[test]
fn test_digest_number_is_big_endian_fold() {
    for name in NAMES.iter() {
        let mut engine = resolve(name, false);
        engine.update(b"123456");
        if engine.bit_width() > 64 {
            continue;
        }
        let expected = engine
            .digest_bytes()
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        assert_eq!(engine.digest_number().unwrap(), expected, "{name}");
    }
}
