//! Complete result of a single harness run.

use serde::{Deserialize, Serialize};

use super::checkpoint::{Checkpoint, CheckpointCounts, CheckpointType};
use super::metrics::Metrics;
use crate::canonical::canonical_hash_hex;

/// Result of running the harness over one variant's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessResult {
    /// Name of the perturbation variant ("baseline" for the reference run).
    pub variant: String,
    /// Annotated model output the checkpoints were parsed from.
    pub raw_text: String,
    /// Extracted checkpoints in order of occurrence.
    pub checkpoints: Vec<Checkpoint>,
    /// Metrics computed from `raw_text` and `checkpoints`.
    pub metrics: Metrics,
}

/// A result whose fields contradict each other.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsistencyError {
    /// Checkpoint indices are not 0..N-1 in order.
    #[error("Checkpoint at position {position} has index {index}")]
    IndexMismatch {
        /// Position in the checkpoint list.
        position: usize,
        /// Index recorded on the checkpoint.
        index: usize,
    },
    /// A recorded count disagrees with the checkpoint list.
    #[error("Metric {field} is {recorded} but checkpoints give {actual}")]
    CountMismatch {
        /// Metric field name.
        field: &'static str,
        /// Value stored in the metrics.
        recorded: usize,
        /// Value derived from the checkpoints.
        actual: usize,
    },
}

impl HarnessResult {
    /// Ordered checkpoint types.
    pub fn sequence(&self) -> Vec<CheckpointType> {
        self.checkpoints.iter().map(|cp| cp.checkpoint_type).collect()
    }

    /// Hex fingerprint of the ordered type sequence.
    ///
    /// Two results share a fingerprint exactly when their topologies match.
    pub fn topology_fingerprint(&self) -> String {
        canonical_hash_hex(&self.sequence())
    }

    /// Verify that indices and counts agree with the checkpoint list.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for (position, cp) in self.checkpoints.iter().enumerate() {
            if cp.index != position {
                return Err(ConsistencyError::IndexMismatch {
                    position,
                    index: cp.index,
                });
            }
        }

        let actual = CheckpointCounts::from_checkpoints(&self.checkpoints);
        let recorded = self.metrics.counts();
        let fields = [
            ("assume_count", recorded.assume, actual.assume),
            ("claim_count", recorded.claim, actual.claim),
            ("branch_count", recorded.branch, actual.branch),
            ("select_count", recorded.select, actual.select),
            ("conclude_count", recorded.conclude, actual.conclude),
            ("total_checkpoints", self.metrics.total_checkpoints, self.checkpoints.len()),
        ];

        for (field, recorded, actual) in fields {
            if recorded != actual {
                return Err(ConsistencyError::CountMismatch {
                    field,
                    recorded,
                    actual,
                });
            }
        }

        Ok(())
    }
}
