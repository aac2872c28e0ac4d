//! Composite engine feeding one stream into several child engines

use super::descriptor::AlgorithmDescriptor;
use super::engine::ChecksumEngine;
use super::registry::AlgorithmRegistry;
use super::traits::Selector;
use crate::Result;
use log::trace;

/// Separator between algorithm names in a combined name
pub const COMBINATION_SEPARATOR: char = '+';

/// Ordered collection of engines driven as one
///
/// Every update is broadcast to all children in insertion order, and the
/// digest is the concatenation of the children's digests in that order.
#[derive(Debug, Default)]
pub struct CombinedChecksum {
    children: Vec<ChecksumEngine>,
    bit_width: usize,
    processed_length: u64,
}

impl CombinedChecksum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child engine
    pub fn add_child(&mut self, engine: ChecksumEngine) {
        self.bit_width += engine.bit_width();
        self.children.push(engine);
    }

    /// Resolve `name` through `registry` and append the resulting engine
    pub fn add_algorithm(
        &mut self,
        name: &str,
        alternate: bool,
        registry: &AlgorithmRegistry,
    ) -> Result<()> {
        let engine = registry.resolve(name, alternate)?;
        self.add_child(engine);
        Ok(())
    }

    /// Remove the first child named `name`, returning it
    pub fn remove_child(&mut self, name: &str) -> Option<ChecksumEngine> {
        let index = self
            .children
            .iter()
            .position(|child| child.name() == name)?;
        let child = self.children.remove(index);
        self.bit_width -= child.bit_width();
        Some(child)
    }

    pub fn children(&self) -> &[ChecksumEngine] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
        self.processed_length = 0;
    }

    pub fn update(&mut self, data: &[u8]) {
        for child in &mut self.children {
            child.update(data);
        }
        self.processed_length += data.len() as u64;
    }

    /// Children's digests concatenated in order; zero-width children add nothing
    pub fn digest_bytes(&self) -> Vec<u8> {
        let mut digest = Vec::with_capacity(self.bit_width / 8);
        for child in &self.children {
            digest.extend_from_slice(&child.digest_bytes());
        }
        digest
    }

    /// `+`-join of the children's names, empty without children
    pub fn name(&self) -> String {
        let mut name = String::new();
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                name.push(COMBINATION_SEPARATOR);
            }
            name.push_str(&child.name());
        }
        name
    }

    /// Sum of the children's widths
    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    pub fn processed_length(&self) -> u64 {
        self.processed_length
    }

    pub fn used_alternate_implementation(&self) -> bool {
        self.children
            .iter()
            .any(ChecksumEngine::used_alternate_implementation)
    }
}

/// Routes `+`-joined names to a [`CombinedChecksum`]
///
/// Must sit first in the registry so a combination is never mistaken for
/// one of its parts.
pub struct CombinedSelector;

impl Selector for CombinedSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        &[]
    }

    fn matches(&self, name: &str) -> bool {
        name.contains(COMBINATION_SEPARATOR)
    }

    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        let mut combined = CombinedChecksum::new();
        for segment in name.split(COMBINATION_SEPARATOR) {
            trace!("Adding '{segment}' to combination '{name}'");
            combined.add_algorithm(segment, alternate, registry)?;
        }
        Ok(combined.into())
    }
}
