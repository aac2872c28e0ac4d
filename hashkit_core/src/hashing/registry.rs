//! Central registry resolving algorithm names to engines

use super::descriptor::AlgorithmDescriptor;
use super::engine::ChecksumEngine;
use super::traits::Selector;
use crate::Result;
use crate::config::RegistryConfig;
use crate::error::{Error, InternalError, ResolutionError};
use log::{debug, error, trace, warn};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// Priority-ordered selectors plus a cache of names already resolved
///
/// The cache is shared between threads. Lookups and inserts take the lock
/// separately, so two threads resolving a new name at once may both scan
/// and both insert the same mapping.
pub struct AlgorithmRegistry {
    selectors: Vec<Arc<dyn Selector>>,
    cache: RwLock<HashMap<String, Arc<dyn Selector>>>,
    config: RegistryConfig,
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("selectors_count", &self.selectors.len())
            .field("cached_names", &self.read_cache().len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgorithmRegistry {
    /// Create a registry with every built-in algorithm and default settings
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with every built-in algorithm
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            selectors: super::algorithms::builtin_selectors(),
            cache: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Get the global registry instance
    ///
    /// Built on first use from the `HASHKIT_*` environment; an unreadable
    /// environment falls back to the defaults.
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(|| {
            let config = RegistryConfig::from_env().unwrap_or_else(|err| {
                warn!("Ignoring registry configuration from environment: {err}");
                RegistryConfig::default()
            });
            Self::with_config(config)
        })
    }

    /// Register an additional selector at the lowest priority
    pub fn register(&mut self, selector: impl Selector + 'static) {
        self.selectors.push(Arc::new(selector));
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Resolve with the configured default strategy
    pub fn resolve_default(&self, name: &str) -> Result<ChecksumEngine> {
        self.resolve(name, self.config.prefer_alternate)
    }

    /// Resolve `name` to a fresh engine
    ///
    /// Matching ignores case; the engine keeps the caller's spelling as its
    /// name. Requesting the alternate strategy of a family without one falls
    /// back to the primary implementation.
    pub fn resolve(&self, name: &str, alternate: bool) -> Result<ChecksumEngine> {
        let key = name.to_ascii_lowercase();

        let cached = self.cached(&key);
        let candidates = match &cached {
            Some(selector) => {
                debug!("Cache hit for algorithm '{name}'");
                std::slice::from_ref(selector)
            }
            None => {
                debug!("Cache miss for algorithm '{name}', scanning selectors");
                self.selectors.as_slice()
            }
        };

        for selector in candidates {
            trace!(
                "Trying selector {:?} for '{name}'",
                selector.descriptors().first().map(|d| d.id)
            );
            if !selector.matches(name) {
                continue;
            }

            let mut engine = match selector.instantiate(name, alternate, self) {
                Ok(engine) => engine,
                Err(Error::Internal(InternalError::InstantiationFailure { cause, .. })) => {
                    error!("Failed to instantiate algorithm '{name}': {cause}");
                    return Err(ResolutionError::unknown_algorithm(name).into());
                }
                Err(err) => return Err(err),
            };

            if alternate && !engine.used_alternate_implementation() {
                warn!("Algorithm '{name}' has no alternate implementation, using the primary one");
            }

            self.remember(key, selector);
            engine.set_name(name);
            debug!("Resolved '{name}' to a {}-bit engine", engine.bit_width());
            return Ok(engine);
        }

        Err(ResolutionError::unknown_algorithm(name).into())
    }

    /// Descriptors of every registered algorithm in priority order
    pub fn list(&self) -> Vec<AlgorithmDescriptor> {
        self.selectors
            .iter()
            .flat_map(|selector| selector.descriptors().iter().copied())
            .collect()
    }

    /// Whether `name` currently short-circuits the selector scan
    pub fn is_cached(&self, name: &str) -> bool {
        self.read_cache().contains_key(&name.to_ascii_lowercase())
    }

    fn cached(&self, key: &str) -> Option<Arc<dyn Selector>> {
        if !self.config.cache_enabled {
            return None;
        }
        self.read_cache().get(key).cloned()
    }

    fn remember(&self, key: String, selector: &Arc<dyn Selector>) {
        if !self.config.cache_enabled {
            return;
        }

        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(key, Arc::clone(selector));
        for descriptor in selector.descriptors() {
            for alias in descriptor.names() {
                cache.insert(alias.to_ascii_lowercase(), Arc::clone(selector));
            }
        }
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Selector>>> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Resolve `name` through the global registry
pub fn resolve(name: &str, alternate: bool) -> Result<ChecksumEngine> {
    AlgorithmRegistry::global().resolve(name, alternate)
}

/// Descriptors of every algorithm known to the global registry
pub fn list_known_algorithms() -> Vec<AlgorithmDescriptor> {
    AlgorithmRegistry::global().list()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry() -> AlgorithmRegistry {
        AlgorithmRegistry::with_config(RegistryConfig::default())
    }

    #[test]
    fn test_resolve_known_vectors() {
        let registry = registry();
        let cases: [(&str, u64); 5] = [
            ("adler32", 70123830),
            ("cksum", 2743226970),
            ("crc32", 158520161),
            ("sum56", 309),
            ("xor8", 7),
        ];

        for (name, expected) in cases {
            let mut engine = registry.resolve(name, false).unwrap();
            engine.update(b"123456");
            assert_eq!(engine.digest_number().unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let registry = registry();
        let error = registry.resolve("not-a-real-algorithm", false).unwrap_err();
        match error {
            Error::Resolution(ResolutionError::UnknownAlgorithm { name }) => {
                assert_eq!(name, "not-a-real-algorithm");
            }
            other => panic!("Expected UnknownAlgorithm, got {other:?}"),
        }
        assert!(!registry.is_cached("not-a-real-algorithm"));
    }

    #[test]
    fn test_name_keeps_caller_spelling() {
        let registry = registry();
        let engine = registry.resolve("ADLER-32", false).unwrap();
        assert_eq!(engine.name(), "ADLER-32");
        assert_eq!(engine.bit_width(), 32);
    }

    #[test]
    fn test_resolution_populates_cache_with_aliases() {
        let registry = registry();
        assert!(!registry.is_cached("sum_sysv"));

        registry.resolve("sysv", false).unwrap();
        assert!(registry.is_cached("sysv"));
        assert!(registry.is_cached("sum_sysv"));
        assert!(registry.is_cached("SYSVSUM"));
    }

    #[test]
    fn test_cache_disabled() {
        let registry = AlgorithmRegistry::with_config(RegistryConfig {
            cache_enabled: false,
            ..RegistryConfig::default()
        });
        registry.resolve("crc32", false).unwrap();
        assert!(!registry.is_cached("crc32"));
        assert!(registry.resolve("crc32", false).is_ok());
    }

    #[test]
    fn test_alternate_flag() {
        let registry = registry();

        let primary = registry.resolve("crc32", false).unwrap();
        assert!(!primary.used_alternate_implementation());

        let alternate = registry.resolve("crc32", true).unwrap();
        assert!(alternate.used_alternate_implementation());

        let fallback = registry.resolve("xor8", true).unwrap();
        assert!(!fallback.used_alternate_implementation());
    }

    #[test]
    fn test_resolve_default_uses_configured_strategy() {
        let registry = AlgorithmRegistry::with_config(RegistryConfig {
            prefer_alternate: true,
            ..RegistryConfig::default()
        });
        let engine = registry.resolve_default("adler32").unwrap();
        assert!(engine.used_alternate_implementation());
    }

    #[test]
    fn test_combined_name_resolution() {
        let registry = registry();
        let mut engine = registry.resolve("adler32+crc32", false).unwrap();
        assert!(engine.is_combined());
        assert_eq!(engine.name(), "adler32+crc32");
        assert_eq!(engine.bit_width(), 64);

        engine.update(b"123456");
        assert_eq!(engine.digest_bytes().len(), 8);
    }

    #[test]
    fn test_ids_and_aliases_are_unique() {
        let registry = registry();
        let mut seen = HashSet::new();
        for descriptor in registry.list() {
            for name in descriptor.names() {
                assert!(
                    seen.insert(name.to_ascii_lowercase()),
                    "'{name}' is claimed by more than one algorithm"
                );
            }
        }
    }

    #[test]
    fn test_every_listed_algorithm_resolves_to_its_width() {
        let registry = registry();
        for descriptor in registry.list() {
            for name in descriptor.names() {
                let engine = registry.resolve(name, false).unwrap();
                assert_eq!(engine.bit_width(), descriptor.bit_width, "{name}");
                assert_eq!(engine.digest_bytes().len(), descriptor.bit_width / 8, "{name}");
            }
        }
    }

    #[test]
    fn test_global_registry_is_shared() {
        let first = AlgorithmRegistry::global() as *const AlgorithmRegistry;
        let second = AlgorithmRegistry::global() as *const AlgorithmRegistry;
        assert_eq!(first, second);
        assert!(resolve("crc32", false).is_ok());
        assert!(!list_known_algorithms().is_empty());
    }
}
