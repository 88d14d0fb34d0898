//! Core types for the harness.

pub mod checkpoint;
pub mod metrics;
pub mod result;

pub use checkpoint::{Checkpoint, CheckpointCounts, CheckpointType};
pub use metrics::{Metrics, TopologyMetrics};
pub use result::{ConsistencyError, HarnessResult};
