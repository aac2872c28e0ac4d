//! Message digests from the RustCrypto `digest` ecosystem

use super::FixedSelector;
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::traits::StreamingHasher;
use digest::Digest;
use md4::Md4;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tiger::Tiger;

/// Adapts any `Digest` implementation to [`StreamingHasher`]
struct DigestHasher<D> {
    state: D,
}

impl<D: Digest> DigestHasher<D> {
    fn new() -> Self {
        Self { state: D::new() }
    }
}

impl<D> StreamingHasher for DigestHasher<D>
where
    D: Digest + Clone + Send,
{
    fn reset(&mut self) {
        self.state = D::new();
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.state, data);
    }

    fn digest(&self) -> Vec<u8> {
        self.state.clone().finalize().to_vec()
    }

    fn bit_width(&self) -> usize {
        <D as Digest>::output_size() * 8
    }
}

pub(super) fn md4() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("md4", "MD4", &["md-4"], 128),
        || Box::new(DigestHasher::<Md4>::new()),
    )
}

pub(super) fn md5() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("md5", "MD5", &["md-5"], 128),
        || Box::new(DigestHasher::<Md5>::new()),
    )
}

pub(super) fn sha1() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("sha1", "SHA-1", &["sha-1", "sha160", "sha-160"], 160),
        || Box::new(DigestHasher::<Sha1>::new()),
    )
}

pub(super) fn sha224() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("sha224", "SHA-224", &["sha-224"], 224),
        || Box::new(DigestHasher::<Sha224>::new()),
    )
}

pub(super) fn sha256() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("sha256", "SHA-256", &["sha-256"], 256),
        || Box::new(DigestHasher::<Sha256>::new()),
    )
}

pub(super) fn sha384() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("sha384", "SHA-384", &["sha-384"], 384),
        || Box::new(DigestHasher::<Sha384>::new()),
    )
}

pub(super) fn sha512() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("sha512", "SHA-512", &["sha-512"], 512),
        || Box::new(DigestHasher::<Sha512>::new()),
    )
}

pub(super) fn tiger() -> FixedSelector {
    FixedSelector::new(
        AlgorithmDescriptor::new("tiger", "Tiger", &["tiger192", "tiger-192"], 192),
        || Box::new(DigestHasher::<Tiger>::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_digest<D: Digest + Clone + Send>(data: &[u8]) -> String {
        let mut hasher = DigestHasher::<D>::new();
        hasher.update(data);
        hasher.digest().iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(hex_digest::<Md4>(b""), "31d6cfe0d16ae931b73c59d7e0c089c0");
        assert_eq!(hex_digest::<Md4>(b"abc"), "a448017aaf21d8525fc10ae87aa6729d");
        assert_eq!(hex_digest::<Md5>(b"123456"), "e10adc3949ba59abbe56e057f20f883e");
        assert_eq!(
            hex_digest::<Sha1>(b"123456"),
            "7c4a8d09ca3762af61e59520943dc26494f8941b"
        );
        assert_eq!(
            hex_digest::<Sha224>(b"123456"),
            "f8cdb04495ded47615258f9dc6a3f4707fd2405434fefc3cbf4ef4e6"
        );
        assert_eq!(
            hex_digest::<Sha256>(b"123456"),
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
        assert_eq!(
            hex_digest::<Sha384>(b"123456"),
            "0a989ebc4a77b56a6e2bb7b19d995d185ce44090c13e2984b7ecc6d446d4b61ea9991b76a4c2f04b1b4d244841449454"
        );
        assert_eq!(
            hex_digest::<Sha512>(b"123456"),
            "ba3253876aed6bc22d4a6ff53d8406c6ad864195ed144ab5c87621b6c233b548baeae6956df346ec8c17f5ea10f35ee3cbc514797ed7ddd3145464e2a0bab413"
        );
        assert_eq!(
            hex_digest::<Tiger>(b"abc"),
            "2aab1484e8c158f2bfb8c5ff41b57a525129131c957b5f93"
        );
    }

    #[test]
    fn test_widths_follow_output_size() {
        assert_eq!(DigestHasher::<Md5>::new().bit_width(), 128);
        assert_eq!(DigestHasher::<Sha384>::new().bit_width(), 384);
        assert_eq!(DigestHasher::<Tiger>::new().bit_width(), 192);
    }

    #[test]
    fn test_digest_then_continue() {
        let mut hasher = DigestHasher::<Sha256>::new();
        hasher.update(b"123");
        let partial = hasher.digest();
        hasher.update(b"456");
        assert_ne!(partial, hasher.digest());
        assert_eq!(hasher.digest(), Sha256::digest(b"123456").to_vec());
    }
}
