//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// A selector failed to construct its engine
    #[error("Instantiation of algorithm '{name}' failed: {cause}")]
    InstantiationFailure { name: String, cause: String },
}

impl InternalError {
    /// Create an instantiation failure error
    pub fn instantiation_failure(name: &str, cause: impl Into<String>) -> Self {
        Self::InstantiationFailure {
            name: name.to_string(),
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiation_failure_error() {
        let error = InternalError::instantiation_failure("crc64", "width 12 is not byte aligned");
        assert!(error.to_string().contains("Instantiation of algorithm"));
        assert!(error.to_string().contains("crc64"));
        assert!(error.to_string().contains("width 12 is not byte aligned"));
    }
}
