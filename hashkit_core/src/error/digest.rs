//! Digest extraction error types

use thiserror::Error;

/// Errors raised when reading a digest back from an engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestError {
    /// The digest does not fit the numeric representation
    #[error("Numeric overflow: a {bit_width}-bit digest does not fit into 64 bits")]
    NumericOverflow { bit_width: usize },
}

impl DigestError {
    /// Create a numeric overflow error
    pub fn numeric_overflow(bit_width: usize) -> Self {
        Self::NumericOverflow { bit_width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_overflow_error() {
        let error = DigestError::numeric_overflow(160);
        assert!(error.to_string().contains("Numeric overflow"));
        assert!(error.to_string().contains("160"));
    }
}
