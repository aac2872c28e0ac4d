//! Algorithm resolution error types

use thiserror::Error;

/// Errors raised while turning an algorithm name into an engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No selector recognized the name
    #[error("Unknown algorithm: '{name}' is not a known algorithm")]
    UnknownAlgorithm { name: String },

    /// A parametrized family recognized the name but rejected its parameter
    #[error("Unsupported parametrization for '{name}': {detail}")]
    UnsupportedParametrization { name: String, detail: String },
}

impl ResolutionError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create an unsupported parametrization error
    pub fn unsupported_parametrization(name: &str, detail: impl Into<String>) -> Self {
        Self::UnsupportedParametrization {
            name: name.to_string(),
            detail: detail.into(),
        }
    }

    /// The algorithm name the caller asked for
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownAlgorithm { name } | Self::UnsupportedParametrization { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_algorithm_error() {
        let error = ResolutionError::unknown_algorithm("not-a-real-algorithm");
        assert!(error.to_string().contains("Unknown algorithm"));
        assert!(error.to_string().contains("not-a-real-algorithm"));
        assert_eq!(error.name(), "not-a-real-algorithm");
    }

    #[test]
    fn test_unsupported_parametrization_error() {
        let error = ResolutionError::unsupported_parametrization("fnv-1a_48", "width 48");
        assert!(error.to_string().contains("Unsupported parametrization"));
        assert!(error.to_string().contains("fnv-1a_48"));
        assert!(error.to_string().contains("width 48"));
        assert_eq!(error.name(), "fnv-1a_48");
    }
}
