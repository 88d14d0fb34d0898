//! Harness policy definitions.

pub mod v1;

pub use v1::{HarnessPolicyV1, PolicyError, ENV_DENSITY_COLLAPSE_RATIO, ENV_MAX_TRIVIAL_LATENCY};
