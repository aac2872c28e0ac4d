//! Static metadata describing one algorithm family

use serde::Serialize;

/// Immutable description of an algorithm: its canonical id, the aliases
/// that resolve to it and the width of the digest it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    /// Canonical lowercase id, unique across the registry
    pub id: &'static str,
    /// Display name for user interfaces
    pub display_name: &'static str,
    /// Alternate spellings resolving to `id`
    pub aliases: &'static [&'static str],
    /// Digest width in bits
    pub bit_width: usize,
    /// Whether an alternate implementation strategy exists
    pub has_alternate: bool,
}

impl AlgorithmDescriptor {
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        aliases: &'static [&'static str],
        bit_width: usize,
    ) -> Self {
        Self {
            id,
            display_name,
            aliases,
            bit_width,
            has_alternate: false,
        }
    }

    /// Mark the descriptor as providing an alternate implementation
    pub const fn with_alternate(mut self) -> Self {
        self.has_alternate = true;
        self
    }

    /// Case-insensitive match against the id and every alias
    pub fn matches(&self, name: &str) -> bool {
        self.names().any(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    /// The canonical id followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.id).chain(self.aliases.iter().copied())
    }
}
