//! Checksum and hash computation
//!
//! Algorithms are looked up by name through an [`AlgorithmRegistry`], which
//! asks each registered [`Selector`] in turn whether it recognises the name
//! and caches the answer. Every lookup yields a fresh [`ChecksumEngine`].

mod algorithms;
mod combined;
mod descriptor;
mod engine;
mod registry;
mod traits;

pub use algorithms::crc::{CrcGenericSelector, CrcSelector, GENERIC_PREFIX as CRC_GENERIC_PREFIX};
pub use algorithms::{CrcParams, FixedSelector, FnvVariant, HasherFactory};
pub use combined::{COMBINATION_SEPARATOR, CombinedChecksum, CombinedSelector};
pub use descriptor::AlgorithmDescriptor;
pub use engine::{Checksum, ChecksumEngine};
pub use registry::{AlgorithmRegistry, list_known_algorithms, resolve};
pub use traits::{Selector, StreamingHasher};
