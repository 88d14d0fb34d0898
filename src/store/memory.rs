//! In-memory result store for testing.

use std::collections::BTreeMap;

use super::document::StoreError;
use super::ResultStore;
use crate::types::HarnessResult;

/// In-memory result store.
///
/// Uses a BTreeMap for deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    results: BTreeMap<String, HarnessResult>,
}

impl InMemoryResultStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultStore for InMemoryResultStore {
    type Error = StoreError;

    fn save(&mut self, result: &HarnessResult) -> Result<(), Self::Error> {
        result.check_consistency()?;
        self.results.insert(result.variant.clone(), result.clone());
        Ok(())
    }

    fn load(&self, variant: &str) -> Result<HarnessResult, Self::Error> {
        self.results
            .get(variant)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(variant.to_string()))
    }

    fn variants(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.results.keys().cloned().collect())
    }
}
