//! Metric and topology records.
//!
//! Both records are plain values with no link back to the checkpoints that
//! produced them. Field names are the serialized keys.

use serde::{Deserialize, Serialize};

use super::checkpoint::{CheckpointCounts, CheckpointType};

/// Core integrity metrics for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Fraction of checkpoints before the first SELECT or CONCLUDE.
    pub commitment_latency: f64,
    /// ASSUME checkpoints.
    pub assume_count: usize,
    /// CLAIM checkpoints.
    pub claim_count: usize,
    /// BRANCH checkpoints.
    pub branch_count: usize,
    /// SELECT checkpoints.
    pub select_count: usize,
    /// CONCLUDE checkpoints.
    pub conclude_count: usize,
    /// All checkpoints.
    pub total_checkpoints: usize,
    /// Estimated tokens divided by checkpoint count.
    pub tokens_per_checkpoint: f64,
    /// CLAIM count per SELECT.
    pub claim_select_ratio: f64,
    /// Estimated tokens in the whole text.
    pub total_tokens: usize,
}

impl Metrics {
    /// Per-type counts as a tally.
    pub fn counts(&self) -> CheckpointCounts {
        CheckpointCounts {
            assume: self.assume_count,
            claim: self.claim_count,
            branch: self.branch_count,
            select: self.select_count,
            conclude: self.conclude_count,
        }
    }

    /// Count for a single type.
    pub fn count(&self, checkpoint_type: CheckpointType) -> usize {
        self.counts().get(checkpoint_type)
    }
}

/// Baseline-relative structural comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopologyMetrics {
    /// Multiset Jaccard similarity of checkpoint types, in [0, 1].
    pub node_overlap: f64,
    /// One minus normalized edit distance of the type sequences, in [0, 1].
    pub sequence_similarity: f64,
    /// Variant length over baseline length.
    pub depth_ratio: f64,
}

impl TopologyMetrics {
    /// Whether both runs share exactly the same topology.
    pub fn is_identical(&self) -> bool {
        self.node_overlap == 1.0 && self.sequence_similarity == 1.0 && self.depth_ratio == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metrics {
        Metrics {
            commitment_latency: 0.25,
            assume_count: 1,
            claim_count: 2,
            branch_count: 0,
            select_count: 1,
            conclude_count: 0,
            total_checkpoints: 4,
            tokens_per_checkpoint: 6.5,
            claim_select_ratio: 2.0,
            total_tokens: 26,
        }
    }

    #[test]
    fn test_metrics_json_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        for key in [
            "commitment_latency",
            "assume_count",
            "claim_count",
            "branch_count",
            "select_count",
            "conclude_count",
            "total_checkpoints",
            "tokens_per_checkpoint",
            "claim_select_ratio",
            "total_tokens",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(obj.len(), 10);
    }

    #[test]
    fn test_metrics_missing_field_rejected() {
        let result: Result<Metrics, _> = serde_json::from_str(r#"{"commitment_latency": 0.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_counts_view() {
        let m = sample();
        assert_eq!(m.counts().total(), m.total_checkpoints);
        assert_eq!(m.count(CheckpointType::Claim), 2);
    }

    #[test]
    fn test_topology_json_keys() {
        let t = TopologyMetrics {
            node_overlap: 1.0,
            sequence_similarity: 1.0,
            depth_ratio: 1.0,
        };
        assert!(t.is_identical());
        let json = serde_json::to_value(t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"node_overlap": 1.0, "sequence_similarity": 1.0, "depth_ratio": 1.0})
        );
    }
}
