//! HarnessPolicy v1: thresholds for controls and deformation signatures.
//!
//! ## Float Normalization for Deterministic Hashing
//!
//! Floats are quantized to integers before hashing so that `params_hash` does
//! not depend on float formatting. The quantization factor is 1e6.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_POLICY_VERSION;

/// Quantization factor for float normalization.
const FLOAT_QUANTIZATION_FACTOR: f64 = 1_000_000.0;

/// Environment variable overriding [`HarnessPolicyV1::max_trivial_latency`].
pub const ENV_MAX_TRIVIAL_LATENCY: &str = "HARNESS_MAX_TRIVIAL_LATENCY";

/// Environment variable overriding [`HarnessPolicyV1::density_collapse_ratio`].
pub const ENV_DENSITY_COLLAPSE_RATIO: &str = "HARNESS_DENSITY_COLLAPSE_RATIO";

/// Error when loading a policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    /// A variable was set but could not be parsed.
    #[error("Invalid value for {variable}: {value:?} ({reason})")]
    InvalidValue {
        /// Environment variable name.
        variable: String,
        /// Raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

fn quantize_float(value: f64) -> i64 {
    (value * FLOAT_QUANTIZATION_FACTOR).round() as i64
}

#[derive(Debug, Clone, Serialize)]
struct QuantizedPolicyParams {
    version: String,
    max_trivial_latency: i64,
    density_collapse_ratio: i64,
}

/// Harness policy version 1.
///
/// ## Parameters
///
/// - `max_trivial_latency`: highest commitment latency the trivial-query
///   control may show and still pass
/// - `density_collapse_ratio`: a variant whose tokens-per-checkpoint falls
///   below this fraction of the baseline's counts as compressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessPolicyV1 {
    /// Policy version identifier.
    pub version: String,
    /// Upper bound on commitment latency for the trivial control (0.0-1.0).
    pub max_trivial_latency: f64,
    /// Density fraction marking justification collapse (0.0-1.0).
    pub density_collapse_ratio: f64,
}

impl HarnessPolicyV1 {
    /// Create a new policy; values are clamped to [0, 1].
    pub fn new(max_trivial_latency: f64, density_collapse_ratio: f64) -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            max_trivial_latency: max_trivial_latency.clamp(0.0, 1.0),
            density_collapse_ratio: density_collapse_ratio.clamp(0.0, 1.0),
        }
    }

    /// Default policy with overrides from the process environment.
    pub fn from_env() -> Result<Self, PolicyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default policy with overrides from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PolicyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_trivial_latency = read_fraction(&lookup, ENV_MAX_TRIVIAL_LATENCY)?
            .unwrap_or(defaults.max_trivial_latency);
        let density_collapse_ratio = read_fraction(&lookup, ENV_DENSITY_COLLAPSE_RATIO)?
            .unwrap_or(defaults.density_collapse_ratio);

        Ok(Self::new(max_trivial_latency, density_collapse_ratio))
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Compute a hash of the policy parameters.
    ///
    /// Floats are multiplied by 1e6 and rounded to i64 before hashing.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(&QuantizedPolicyParams {
            version: self.version.clone(),
            max_trivial_latency: quantize_float(self.max_trivial_latency),
            density_collapse_ratio: quantize_float(self.density_collapse_ratio),
        })
    }
}

fn read_fraction<F>(lookup: &F, variable: &str) -> Result<Option<f64>, PolicyError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(variable) else {
        return Ok(None);
    };

    let invalid = |reason: &str| PolicyError::InvalidValue {
        variable: variable.to_string(),
        value: raw.clone(),
        reason: reason.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid("not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid("must be within [0, 1]"));
    }
    Ok(Some(value))
}

impl Default for HarnessPolicyV1 {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            max_trivial_latency: 0.5,
            density_collapse_ratio: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let policy = HarnessPolicyV1::default();
        assert_eq!(policy.max_trivial_latency, 0.5);
        assert_eq!(policy.density_collapse_ratio, 0.5);
        assert_eq!(policy.policy_id(), DEFAULT_POLICY_VERSION);
    }

    #[test]
    fn test_new_clamps() {
        let policy = HarnessPolicyV1::new(1.5, -0.2);
        assert_eq!(policy.max_trivial_latency, 1.0);
        assert_eq!(policy.density_collapse_ratio, 0.0);
    }

    #[test]
    fn test_lookup_overrides() {
        let policy = HarnessPolicyV1::from_lookup(lookup_from(&[
            (ENV_MAX_TRIVIAL_LATENCY, "0.25"),
        ]))
        .unwrap();
        assert_eq!(policy.max_trivial_latency, 0.25);
        assert_eq!(policy.density_collapse_ratio, 0.5);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = HarnessPolicyV1::from_lookup(lookup_from(&[
            (ENV_DENSITY_COLLAPSE_RATIO, "half"),
        ]))
        .unwrap_err();
        match err {
            PolicyError::InvalidValue { variable, value, .. } => {
                assert_eq!(variable, ENV_DENSITY_COLLAPSE_RATIO);
                assert_eq!(value, "half");
            }
        }
    }

    #[test]
    fn test_lookup_rejects_out_of_range() {
        let result = HarnessPolicyV1::from_lookup(lookup_from(&[
            (ENV_MAX_TRIVIAL_LATENCY, "2.0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_params_hash_determinism() {
        assert_eq!(
            HarnessPolicyV1::default().params_hash(),
            HarnessPolicyV1::default().params_hash()
        );
    }

    #[test]
    fn test_params_hash_changes() {
        let policy1 = HarnessPolicyV1::default();
        let mut policy2 = HarnessPolicyV1::default();
        policy2.density_collapse_ratio = 0.4;
        assert_ne!(policy1.params_hash(), policy2.params_hash());
    }
}
