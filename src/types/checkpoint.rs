//! Checkpoint types for the harness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of epistemic event a checkpoint marks.
///
/// Serialized as the uppercase tag (`"ASSUME"`, `"CLAIM"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckpointType {
    /// Explicit starting assumption.
    Assume,
    /// Intermediate assertion.
    Claim,
    /// Alternatives under consideration.
    Branch,
    /// Choice between alternatives.
    Select,
    /// Final conclusion.
    Conclude,
}

impl CheckpointType {
    /// All checkpoint types in canonical order.
    pub const ALL: [CheckpointType; 5] = [
        Self::Assume,
        Self::Claim,
        Self::Branch,
        Self::Select,
        Self::Conclude,
    ];

    /// Look up a type by its tag, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
    }

    /// Canonical uppercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assume => "ASSUME",
            Self::Claim => "CLAIM",
            Self::Branch => "BRANCH",
            Self::Select => "SELECT",
            Self::Conclude => "CONCLUDE",
        }
    }

    /// Whether this checkpoint commits to a decision (SELECT or CONCLUDE).
    pub fn is_commitment(&self) -> bool {
        matches!(self, Self::Select | Self::Conclude)
    }
}

impl fmt::Display for CheckpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged event extracted from annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Zero-based position among the checkpoints of the same text.
    pub index: usize,
    /// Checkpoint kind.
    #[serde(rename = "type")]
    pub checkpoint_type: CheckpointType,
    /// Trimmed content after the tag, empty when absent.
    pub text: String,
}

impl Checkpoint {
    /// Create a new checkpoint.
    pub fn new(index: usize, checkpoint_type: CheckpointType, text: impl Into<String>) -> Self {
        Self {
            index,
            checkpoint_type,
            text: text.into(),
        }
    }
}

/// Per-type checkpoint tally.
///
/// Also serves as the multiset representation used for node overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointCounts {
    /// ASSUME checkpoints.
    pub assume: usize,
    /// CLAIM checkpoints.
    pub claim: usize,
    /// BRANCH checkpoints.
    pub branch: usize,
    /// SELECT checkpoints.
    pub select: usize,
    /// CONCLUDE checkpoints.
    pub conclude: usize,
}

impl CheckpointCounts {
    /// Tally a checkpoint sequence.
    pub fn from_checkpoints(checkpoints: &[Checkpoint]) -> Self {
        Self::from_types(checkpoints.iter().map(|cp| cp.checkpoint_type))
    }

    /// Tally a sequence of types.
    pub fn from_types(types: impl IntoIterator<Item = CheckpointType>) -> Self {
        let mut counts = Self::default();
        for t in types {
            counts.increment(t);
        }
        counts
    }

    /// Increment count for a type.
    pub fn increment(&mut self, checkpoint_type: CheckpointType) {
        match checkpoint_type {
            CheckpointType::Assume => self.assume += 1,
            CheckpointType::Claim => self.claim += 1,
            CheckpointType::Branch => self.branch += 1,
            CheckpointType::Select => self.select += 1,
            CheckpointType::Conclude => self.conclude += 1,
        }
    }

    /// Count for a type.
    pub fn get(&self, checkpoint_type: CheckpointType) -> usize {
        match checkpoint_type {
            CheckpointType::Assume => self.assume,
            CheckpointType::Claim => self.claim,
            CheckpointType::Branch => self.branch,
            CheckpointType::Select => self.select,
            CheckpointType::Conclude => self.conclude,
        }
    }

    /// Total count across all types.
    pub fn total(&self) -> usize {
        self.assume + self.claim + self.branch + self.select + self.conclude
    }

    /// Size of the multiset intersection (per-type minimum).
    pub fn intersection_size(&self, other: &Self) -> usize {
        CheckpointType::ALL
            .iter()
            .map(|&t| self.get(t).min(other.get(t)))
            .sum()
    }

    /// Size of the multiset union (per-type maximum).
    pub fn union_size(&self, other: &Self) -> usize {
        CheckpointType::ALL
            .iter()
            .map(|&t| self.get(t).max(other.get(t)))
            .sum()
    }
}
