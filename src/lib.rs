//! # epistemic-harness
//!
//! Measures how annotated reasoning traces deform under stress.
//!
//! Models annotate their output with checkpoint tags marking epistemic
//! events. The harness answers one question:
//!
//! > Given a baseline trace and a perturbed trace, how far did the
//! > **structure** of the reasoning move?
//!
//! ## Core Contract
//!
//! 1. Extract typed checkpoints from raw text ([`parse_checkpoints`])
//! 2. Compute integrity metrics for one run ([`compute_metrics`])
//! 3. Compare the checkpoint topology of two runs ([`compare_topology`])
//!
//! ## Architecture
//!
//! ```text
//! raw text → parse_checkpoints → [Checkpoint] → compute_metrics → Metrics
//!                                      ↓
//!            baseline + variant → compare_topology → TopologyMetrics
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same text → identical checkpoints and metrics
//! - `compare_topology(a, a)` is exactly `1.0 / 1.0 / 1.0`
//! - No I/O, no shared mutable state in the core; every ratio has a fallback
//!   value instead of failing on empty input

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod canonical;
pub mod extract;
pub mod metrics;
pub mod topology;
pub mod policy;
pub mod store;
pub mod suite;
pub mod logging;

// Re-exports
pub use types::{
    Checkpoint, CheckpointCounts, CheckpointType, ConsistencyError, HarnessResult, Metrics,
    TopologyMetrics,
};
pub use extract::parse_checkpoints;
pub use metrics::{
    claim_select_ratio, commitment_latency, compute_metrics, count_by_type, estimate_tokens,
    explain_metrics, extract_metrics, tokens_per_checkpoint, TOKENS_PER_WORD,
};
pub use topology::{
    checkpoint_sequence, compare_topology, depth_ratio, edit_distance, node_overlap,
    sequence_similarity,
};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use policy::{HarnessPolicyV1, PolicyError};
pub use store::{
    load_result, save_result, FileResultStore, InMemoryResultStore, ResultStore, StoreError,
};
pub use suite::{
    analyze_deformation, analyze_suite, run_negative_controls, ControlsReport,
    DeformationReport, DiagnosticSignature,
};
pub use logging::{init_tracing, LogFormat};

/// Schema version of persisted result documents.
/// Increment on breaking changes to any serialized type.
pub const SPEC_VERSION: &str = "0.1";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "harness_policy_v1";
