//! Registry configuration
//!
//! Configuration is layered with figment: built-in defaults, then an
//! optional TOML file, then `HASHKIT_`-prefixed environment variables.

use crate::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that shape how an [`AlgorithmRegistry`](crate::hashing::AlgorithmRegistry)
/// resolves names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Remember which selector resolved a name so later lookups skip the scan
    pub cache_enabled: bool,
    /// Strategy used by `resolve_default` when the caller does not choose one
    pub prefer_alternate: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            prefer_alternate: false,
        }
    }
}

impl RegistryConfig {
    /// Prefix for environment variable overrides
    pub const ENV_PREFIX: &'static str = "HASHKIT_";

    /// Build the layered figment: defaults < TOML file < environment
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load configuration from an optional TOML file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    /// Load configuration from defaults and the environment only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert!(config.cache_enabled);
        assert!(!config.prefer_alternate);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = RegistryConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, RegistryConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("hashkit.toml", "cache_enabled = false")?;

            let config = RegistryConfig::load(Some(Path::new("hashkit.toml")))
                .map_err(|e| e.to_string())?;
            assert!(!config.cache_enabled);
            assert!(!config.prefer_alternate);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("hashkit.toml", "prefer_alternate = false")?;
            jail.set_env("HASHKIT_PREFER_ALTERNATE", "true");

            let config = RegistryConfig::load(Some(Path::new("hashkit.toml")))
                .map_err(|e| e.to_string())?;
            assert!(config.prefer_alternate);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_ignored() {
        Jail::expect_with(|_jail| {
            let config = RegistryConfig::load(Some(Path::new("does-not-exist.toml")))
                .map_err(|e| e.to_string())?;
            assert!(config.cache_enabled);
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value_is_validation_error() {
        Jail::expect_with(|jail| {
            jail.create_file("hashkit.toml", "cache_enabled = \"sometimes\"")?;

            let result = RegistryConfig::load(Some(Path::new("hashkit.toml")));
            assert!(matches!(
                result,
                Err(crate::Error::Validation(
                    crate::error::ValidationError::InvalidConfiguration { .. }
                ))
            ));
            Ok(())
        });
    }
}
