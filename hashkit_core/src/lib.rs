//! Hashkit Core Library
//!
//! A pluggable checksum engine: resolve an algorithm by name, feed it bytes,
//! read back the digest. Names may combine several algorithms with `+`.
//!
//! ```
//! let mut engine = hashkit_core::resolve("crc32", false)?;
//! engine.update(b"123456");
//! assert_eq!(engine.digest_number()?, 158_520_161);
//! # Ok::<(), hashkit_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod hashing;

// Re-export main types
pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use hashing::{
    AlgorithmDescriptor, AlgorithmRegistry, Checksum, ChecksumEngine, CombinedChecksum,
    Selector, StreamingHasher, list_known_algorithms, resolve,
};
