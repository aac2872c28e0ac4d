//! The runtime checksum engine every resolved algorithm exposes

use super::combined::CombinedChecksum;
use super::traits::StreamingHasher;
use crate::Result;
use crate::error::DigestError;
use std::borrow::Cow;
use std::fmt;
use std::io;

/// A resolved algorithm, either a single family or a combination of engines
///
/// Engines are driven by one stream consumer at a time; hashing independent
/// inputs in parallel takes one engine per input.
#[derive(Debug)]
pub enum ChecksumEngine {
    /// One algorithm family
    Single(Checksum),
    /// Several engines fed with the same stream
    Combined(CombinedChecksum),
}

impl ChecksumEngine {
    /// Clear the accumulator and the processed length
    pub fn reset(&mut self) {
        match self {
            Self::Single(checksum) => checksum.reset(),
            Self::Combined(combined) => combined.reset(),
        }
    }

    /// Feed a buffer into the engine
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Single(checksum) => checksum.update(data),
            Self::Combined(combined) => combined.update(data),
        }
    }

    /// Feed a single byte into the engine
    pub fn update_byte(&mut self, byte: u8) {
        self.update(std::slice::from_ref(&byte));
    }

    /// Feed `length` bytes of `data` starting at `offset`
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds for `data`.
    pub fn update_range(&mut self, data: &[u8], offset: usize, length: usize) {
        self.update(&data[offset..offset + length]);
    }

    /// The digest of everything consumed since the last reset
    pub fn digest_bytes(&self) -> Vec<u8> {
        match self {
            Self::Single(checksum) => checksum.digest_bytes(),
            Self::Combined(combined) => combined.digest_bytes(),
        }
    }

    /// The digest as a big-endian unsigned integer
    ///
    /// Fails with [`DigestError::NumericOverflow`] for widths above 64 bits.
    pub fn digest_number(&self) -> Result<u64> {
        let bit_width = self.bit_width();
        if bit_width > 64 {
            return Err(DigestError::numeric_overflow(bit_width).into());
        }

        Ok(self
            .digest_bytes()
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
    }

    /// Name the engine was requested under
    ///
    /// For a combination this is the `+`-join of the current children's
    /// names and is empty when there are no children.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Single(checksum) => Cow::Borrowed(checksum.name()),
            Self::Combined(combined) => Cow::Owned(combined.name()),
        }
    }

    /// Rename a single engine; a combination derives its name from its children
    pub(crate) fn set_name(&mut self, name: &str) {
        if let Self::Single(checksum) = self {
            checksum.set_name(name);
        }
    }

    /// Digest width in bits
    pub fn bit_width(&self) -> usize {
        match self {
            Self::Single(checksum) => checksum.bit_width(),
            Self::Combined(combined) => combined.bit_width(),
        }
    }

    /// Bytes consumed since the last reset
    pub fn processed_length(&self) -> u64 {
        match self {
            Self::Single(checksum) => checksum.processed_length(),
            Self::Combined(combined) => combined.processed_length(),
        }
    }

    /// True only if the alternate strategy was requested and provided
    pub fn used_alternate_implementation(&self) -> bool {
        match self {
            Self::Single(checksum) => checksum.used_alternate_implementation(),
            Self::Combined(combined) => combined.used_alternate_implementation(),
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, Self::Combined(_))
    }

    pub fn as_combined(&self) -> Option<&CombinedChecksum> {
        match self {
            Self::Combined(combined) => Some(combined),
            Self::Single(_) => None,
        }
    }

    pub fn as_combined_mut(&mut self) -> Option<&mut CombinedChecksum> {
        match self {
            Self::Combined(combined) => Some(combined),
            Self::Single(_) => None,
        }
    }
}

impl From<Checksum> for ChecksumEngine {
    fn from(checksum: Checksum) -> Self {
        Self::Single(checksum)
    }
}

impl From<CombinedChecksum> for ChecksumEngine {
    fn from(combined: CombinedChecksum) -> Self {
        Self::Combined(combined)
    }
}

/// Lets readers be streamed into an engine with [`std::io::copy`]
impl io::Write for ChecksumEngine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Engine state for a single algorithm family
pub struct Checksum {
    name: String,
    hasher: Box<dyn StreamingHasher>,
    processed_length: u64,
    used_alternate: bool,
}

impl Checksum {
    /// Wrap a family's hasher
    pub fn new(name: impl Into<String>, hasher: Box<dyn StreamingHasher>) -> Self {
        Self {
            name: name.into(),
            hasher,
            processed_length: 0,
            used_alternate: false,
        }
    }

    /// Record whether the hasher is the family's alternate strategy
    pub fn with_alternate_used(mut self, used: bool) -> Self {
        self.used_alternate = used;
        self
    }

    pub fn reset(&mut self) {
        self.hasher.reset();
        self.processed_length = 0;
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.processed_length += data.len() as u64;
    }

    pub fn digest_bytes(&self) -> Vec<u8> {
        self.hasher.digest()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn bit_width(&self) -> usize {
        self.hasher.bit_width()
    }

    pub fn processed_length(&self) -> u64 {
        self.processed_length
    }

    pub fn used_alternate_implementation(&self) -> bool {
        self.used_alternate
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checksum")
            .field("name", &self.name)
            .field("bit_width", &self.bit_width())
            .field("processed_length", &self.processed_length)
            .field("used_alternate", &self.used_alternate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Sums bytes into a 16-bit big-endian digest
    #[derive(Default)]
    struct Sum16 {
        value: u16,
    }

    impl StreamingHasher for Sum16 {
        fn reset(&mut self) {
            self.value = 0;
        }

        fn update(&mut self, data: &[u8]) {
            for &byte in data {
                self.value = self.value.wrapping_add(u16::from(byte));
            }
        }

        fn digest(&self) -> Vec<u8> {
            self.value.to_be_bytes().to_vec()
        }

        fn bit_width(&self) -> usize {
            16
        }
    }

    /// A 72-bit digest, too wide for `digest_number`
    struct Wide;

    impl StreamingHasher for Wide {
        fn reset(&mut self) {}
        fn update(&mut self, _data: &[u8]) {}
        fn digest(&self) -> Vec<u8> {
            vec![0xff; 9]
        }
        fn bit_width(&self) -> usize {
            72
        }
    }

    fn sum16_engine() -> ChecksumEngine {
        Checksum::new("sum16", Box::new(Sum16::default())).into()
    }

    #[test]
    fn test_update_forms_are_equivalent() {
        let data = b"123456";

        let mut bulk = sum16_engine();
        bulk.update(data);

        let mut bytewise = sum16_engine();
        for &byte in data {
            bytewise.update_byte(byte);
        }

        let mut ranged = sum16_engine();
        let padded = b"xx123456yy";
        ranged.update_range(padded, 2, 6);

        assert_eq!(bulk.digest_bytes(), bytewise.digest_bytes());
        assert_eq!(bulk.digest_bytes(), ranged.digest_bytes());
        assert_eq!(bulk.digest_number().unwrap(), 309);
    }

    #[test]
    fn test_processed_length_tracks_bytes_and_resets() {
        let mut engine = sum16_engine();
        engine.update(b"1234");
        engine.update_byte(b'5');
        assert_eq!(engine.processed_length(), 5);

        engine.reset();
        assert_eq!(engine.processed_length(), 0);
        assert_eq!(engine.digest_number().unwrap(), 0);
        assert_eq!(engine.name(), "sum16");
        assert_eq!(engine.bit_width(), 16);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = sum16_engine();
        engine.update(b"abc");
        engine.reset();
        engine.reset();
        engine.update(b"123456");
        assert_eq!(engine.digest_number().unwrap(), 309);
    }

    #[test]
    #[should_panic]
    fn test_update_range_out_of_bounds_panics() {
        let mut engine = sum16_engine();
        engine.update_range(b"abc", 2, 5);
    }

    #[test]
    fn test_digest_number_overflow() {
        let engine: ChecksumEngine = Checksum::new("wide", Box::new(Wide)).into();
        let error = engine.digest_number().unwrap_err();
        assert!(matches!(
            error,
            crate::Error::Digest(DigestError::NumericOverflow { bit_width: 72 })
        ));
    }

    #[test]
    fn test_io_write_feeds_engine() {
        let mut engine = sum16_engine();
        let mut reader: &[u8] = b"123456";
        let copied = std::io::copy(&mut reader, &mut engine).unwrap();
        engine.flush().unwrap();

        assert_eq!(copied, 6);
        assert_eq!(engine.processed_length(), 6);
        assert_eq!(engine.digest_number().unwrap(), 309);
    }

    #[test]
    fn test_set_name_and_alternate_flag() {
        let mut engine: ChecksumEngine = Checksum::new("sum16", Box::new(Sum16::default()))
            .with_alternate_used(true)
            .into();
        engine.set_name("SUM-16");

        assert_eq!(engine.name(), "SUM-16");
        assert!(engine.used_alternate_implementation());
        assert!(!engine.is_combined());
        assert!(engine.as_combined().is_none());
    }
}
