//! Error types for the hashkit core library
//!
//! Errors are split into categories so callers can tell a bad algorithm
//! name apart from a digest that cannot be represented or a broken
//! configuration.

use thiserror::Error;

pub mod digest;
pub mod internal;
pub mod resolution;
pub mod validation;

pub use self::digest::DigestError;
pub use self::resolution::ResolutionError;
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hashkit core library
///
/// Errors are categorized into four main types:
/// - Resolution errors: an algorithm name could not be turned into an engine
/// - Digest errors: a digest was requested in a form its width cannot fit
/// - Validation errors: configuration and parameter validation
/// - Internal errors: selector construction failures
#[derive(Error, Debug)]
pub enum Error {
    /// Algorithm resolution errors
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Digest extraction errors
    #[error(transparent)]
    Digest(#[from] DigestError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Whether this error means the requested algorithm could not be resolved
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Validation(ValidationError::invalid_configuration(&err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_unknown_algorithm_error_creation() {
        let error = Error::Resolution(ResolutionError::unknown_algorithm("not-a-real-algorithm"));

        match error {
            Error::Resolution(ResolutionError::UnknownAlgorithm { name }) => {
                assert_eq!(name, "not-a-real-algorithm");
            }
            _ => panic!("Expected Resolution::UnknownAlgorithm error"),
        }
    }

    #[test]
    fn test_unsupported_parametrization_error_creation() {
        let error = Error::Resolution(ResolutionError::unsupported_parametrization(
            "fnv-1a_33",
            "unsupported width 33",
        ));

        assert!(matches!(
            error,
            Error::Resolution(ResolutionError::UnsupportedParametrization { .. })
        ));
        assert!(error.to_string().contains("fnv-1a_33"));
        assert!(error.to_string().contains("unsupported width 33"));
    }

    #[test]
    fn test_numeric_overflow_error() {
        let error = Error::Digest(DigestError::numeric_overflow(128));

        assert!(matches!(
            error,
            Error::Digest(DigestError::NumericOverflow { bit_width: 128 })
        ));
        assert!(error.to_string().contains("128"));
        assert!(!error.is_resolution_failure());
    }

    #[test]
    fn test_resolution_failures_are_flagged() {
        let unknown = Error::from(ResolutionError::unknown_algorithm("nope"));
        let unsupported =
            Error::from(ResolutionError::unsupported_parametrization("crc:7", "bad width"));

        assert!(unknown.is_resolution_failure());
        assert!(unsupported.is_resolution_failure());
    }

    #[test]
    fn test_error_display_identifies_algorithm() {
        let error = Error::from(ResolutionError::unknown_algorithm("whirlpool-9000"));
        let display_string = format!("{error}");

        assert!(display_string.contains("Unknown algorithm"));
        assert!(display_string.contains("whirlpool-9000"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Internal(InternalError::instantiation_failure("crc64", "bad table"));
        let debug_string = format!("{error:?}");

        assert!(debug_string.contains("Internal"));
        assert!(debug_string.contains("InstantiationFailure"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = Error::from(ResolutionError::unknown_algorithm("nope"));

        // Should compile if Error implements std::error::Error
        let _: &dyn StdError = &error;
    }

    #[test]
    fn test_from_figment_error() {
        let figment_error = figment::Error::from("invalid type: found string".to_string());
        let error: Error = figment_error.into();

        match error {
            Error::Validation(ValidationError::InvalidConfiguration { message }) => {
                assert!(message.contains("invalid type"));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(ResolutionError::unknown_algorithm("nope").into())
        }

        let result = returns_error();
        assert!(result.is_err());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::from(ResolutionError::unknown_algorithm("nope")),
            Error::from(ResolutionError::unsupported_parametrization("fnv-1_7", "width")),
            Error::from(DigestError::numeric_overflow(256)),
            Error::from(ValidationError::invalid_configuration("Invalid setting")),
            Error::from(InternalError::instantiation_failure("crc8", "broken")),
        ];

        for error in errors {
            let display_string = error.to_string();
            assert!(!display_string.is_empty());
        }
    }
}
