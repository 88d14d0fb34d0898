//! Versioned JSON documents for harness results.
//!
//! ```json
//! {
//!   "version": "0.1",
//!   "variant": "baseline",
//!   "raw_text": "...",
//!   "checkpoints": [{"index": 0, "type": "ASSUME", "text": "..."}],
//!   "metrics": {"commitment_latency": 0.0, ...}
//! }
//! ```
//!
//! Loading is strict: a missing or mistyped field, an unknown version, or a
//! document whose metrics disagree with its checkpoints is rejected rather
//! than patched with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{Checkpoint, ConsistencyError, HarnessResult, Metrics};
use crate::SPEC_VERSION;

/// Error type for result persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON or missing/mistyped field.
    #[error("Malformed result document: {0}")]
    Json(#[from] serde_json::Error),
    /// Document written by an incompatible schema version.
    #[error("Unsupported result version {found:?} (expected {expected:?})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: String,
        /// Version this crate reads.
        expected: &'static str,
    },
    /// Document violates a data-model invariant.
    #[error("Inconsistent result document: {0}")]
    Inconsistent(#[from] ConsistencyError),
    /// Stored document belongs to a different variant than its key.
    #[error("Stored variant {found:?} does not match key {expected:?}")]
    VariantMismatch {
        /// Variant the document was loaded under.
        expected: String,
        /// Variant recorded in the document.
        found: String,
    },
    /// Variant name cannot be used as a storage key.
    #[error("Invalid variant name: {0:?}")]
    InvalidVariant(String),
    /// No result stored for the variant.
    #[error("No result stored for variant {0:?}")]
    NotFound(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: &'a str,
    variant: &'a str,
    raw_text: &'a str,
    checkpoints: &'a [Checkpoint],
    metrics: &'a Metrics,
}

#[derive(Deserialize)]
struct Document {
    version: String,
    variant: String,
    raw_text: String,
    checkpoints: Vec<Checkpoint>,
    metrics: Metrics,
}

/// Serialize a result to a pretty-printed versioned JSON document.
pub fn to_json(result: &HarnessResult) -> Result<String, StoreError> {
    let doc = DocumentRef {
        version: SPEC_VERSION,
        variant: &result.variant,
        raw_text: &result.raw_text,
        checkpoints: &result.checkpoints,
        metrics: &result.metrics,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse and validate a versioned JSON document.
pub fn from_json(json: &str) -> Result<HarnessResult, StoreError> {
    let doc: Document = serde_json::from_str(json)?;

    if doc.version != SPEC_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: doc.version,
            expected: SPEC_VERSION,
        });
    }

    let result = HarnessResult {
        variant: doc.variant,
        raw_text: doc.raw_text,
        checkpoints: doc.checkpoints,
        metrics: doc.metrics,
    };
    result.check_consistency()?;
    Ok(result)
}

/// Write a result to `path`, creating parent directories as needed.
pub fn save_result(result: &HarnessResult, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let json = to_json(result)?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))?;

    tracing::info!(variant = %result.variant, path = %path.display(), "saved harness result");
    Ok(())
}

/// Read and validate a result from `path`.
pub fn load_result(path: impl AsRef<Path>) -> Result<HarnessResult, StoreError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    match from_json(&json) {
        Ok(result) => Ok(result),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "rejected harness result");
            Err(e)
        }
    }
}
