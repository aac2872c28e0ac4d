//! Built-in algorithm families and the order they are tried in

use super::combined::CombinedSelector;
use super::descriptor::AlgorithmDescriptor;
use super::engine::{Checksum, ChecksumEngine};
use super::registry::AlgorithmRegistry;
use super::traits::{Selector, StreamingHasher};
use crate::Result;
use std::sync::Arc;

mod adler32;
mod cksum;
pub mod crc;
mod crc32;
mod digests;
mod ed2k;
mod elf;
mod fletcher16;
mod fnv;
mod joaat;
mod sums;
mod tth;

pub use crc::CrcParams;
pub use fnv::FnvVariant;

/// Builds a fresh hasher for one strategy of a family
pub type HasherFactory = fn() -> Box<dyn StreamingHasher>;

/// Selector for a family with one fixed name set and width
pub struct FixedSelector {
    descriptor: AlgorithmDescriptor,
    primary: HasherFactory,
    alternate: Option<HasherFactory>,
}

impl FixedSelector {
    pub fn new(descriptor: AlgorithmDescriptor, primary: HasherFactory) -> Self {
        Self {
            descriptor,
            primary,
            alternate: None,
        }
    }

    /// Provide an alternate strategy, marking the descriptor accordingly
    pub fn with_alternate(mut self, alternate: HasherFactory) -> Self {
        self.descriptor = self.descriptor.with_alternate();
        self.alternate = Some(alternate);
        self
    }
}

impl Selector for FixedSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        std::slice::from_ref(&self.descriptor)
    }

    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        let (hasher, used_alternate) = match (alternate, self.alternate) {
            (true, Some(factory)) => (factory(), true),
            _ => ((self.primary)(), false),
        };
        Ok(Checksum::new(name, hasher)
            .with_alternate_used(used_alternate)
            .into())
    }
}

/// Every built-in selector in resolution order
///
/// Combinations come first, then cheap checksums, then CRCs, then the
/// heavier digests.
pub(crate) fn builtin_selectors() -> Vec<Arc<dyn Selector>> {
    vec![
        Arc::new(CombinedSelector),
        // checksums
        Arc::new(adler32::selector()),
        Arc::new(cksum::selector()),
        Arc::new(cksum::minix()),
        Arc::new(sums::sum_bsd()),
        Arc::new(sums::sum_minix()),
        Arc::new(sums::sum_sysv()),
        Arc::new(elf::selector()),
        Arc::new(fnv::FnvSelector::new(FnvVariant::Fnv0)),
        Arc::new(fnv::FnvSelector::new(FnvVariant::Fnv1)),
        Arc::new(fnv::FnvSelector::new(FnvVariant::Fnv1a)),
        Arc::new(fletcher16::selector()),
        Arc::new(sums::sum_n::<56>()),
        Arc::new(sums::sum_n::<48>()),
        Arc::new(sums::sum_n::<40>()),
        Arc::new(sums::sum_n::<32>()),
        Arc::new(sums::sum_n::<24>()),
        Arc::new(sums::sum_n::<16>()),
        Arc::new(sums::sum_n::<8>()),
        Arc::new(sums::xor8()),
        Arc::new(joaat::selector()),
        // CRCs
        Arc::new(crc::CrcGenericSelector),
        Arc::new(crc::CRC64),
        Arc::new(crc::CRC64_ECMA182),
        Arc::new(crc::CRC64_GO_ISO),
        Arc::new(crc::CRC64_XZ),
        Arc::new(crc32::selector()),
        Arc::new(crc::CRC32_PHP),
        Arc::new(crc::CRC32_UBI),
        Arc::new(crc::CRC32_FDDI),
        Arc::new(crc::CRC32_MPEG2),
        Arc::new(crc::CRC32_BZIP2),
        Arc::new(crc::CRC32C),
        Arc::new(crc::CRC24),
        Arc::new(crc::CRC16),
        Arc::new(crc::FCS16),
        Arc::new(crc::CRC16_MINIX),
        Arc::new(crc::CRC8),
        // message digests
        Arc::new(ed2k::selector()),
        Arc::new(tth::selector()),
        Arc::new(digests::md4()),
        Arc::new(digests::md5()),
        Arc::new(digests::sha1()),
        Arc::new(digests::sha224()),
        Arc::new(digests::sha256()),
        Arc::new(digests::sha384()),
        Arc::new(digests::sha512()),
        Arc::new(digests::tiger()),
    ]
}
