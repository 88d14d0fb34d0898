//! Result storage backends.

pub mod document;
pub mod file;
pub mod memory;

use crate::types::HarnessResult;

/// Trait for harness result storage, keyed by variant name.
///
/// Implementations must list variants in a deterministic order.
pub trait ResultStore {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Store a result, replacing any previous result for the same variant.
    fn save(&mut self, result: &HarnessResult) -> Result<(), Self::Error>;

    /// Fetch the result for a variant.
    fn load(&self, variant: &str) -> Result<HarnessResult, Self::Error>;

    /// All stored variant names, sorted.
    fn variants(&self) -> Result<Vec<String>, Self::Error>;
}

pub use document::{from_json, load_result, save_result, to_json, StoreError};
pub use file::FileResultStore;
pub use memory::InMemoryResultStore;
