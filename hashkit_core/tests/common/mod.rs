//! Shared helpers for integration tests

#![allow(dead_code)]

use hashkit_core::{AlgorithmRegistry, ChecksumEngine, RegistryConfig};

/// Install a test logger once per binary; `RUST_LOG` controls verbosity
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A private registry so tests do not share cache state
pub fn test_registry() -> AlgorithmRegistry {
    init_logging();
    AlgorithmRegistry::with_config(RegistryConfig::default())
}

pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Feed `data` in one call and return the digest as hex
pub fn digest_hex(engine: &mut ChecksumEngine, data: &[u8]) -> String {
    engine.reset();
    engine.update(data);
    hex(&engine.digest_bytes())
}
