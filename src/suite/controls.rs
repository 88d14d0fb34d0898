//! Negative controls.
//!
//! Three fixtures with known expected measurements. If any control fails,
//! the harness is producing unreliable measurements and no variant result
//! should be trusted.
//!
//! | Control | Fixture | Expectation |
//! |---------|---------|-------------|
//! | A | Trivial factual query | No BRANCH, early commitment |
//! | B | Gibberish | No checkpoints at all |
//! | C | Same trace parsed twice | Identical topology |

use serde::{Deserialize, Serialize};

use crate::metrics::extract_metrics;
use crate::policy::HarnessPolicyV1;
use crate::topology::compare_topology;

/// Trivial factual answer: one assumption, immediate selection.
pub const CONTROL_A_TEXT: &str = "\
[ASSUME: user asks a simple factual question]

The capital of France is Paris.

[SELECT: Paris | because: well-established geographical fact]

[CONCLUDE: The capital of France is Paris.]
";

/// Nonsense text with no checkpoint structure.
pub const CONTROL_B_TEXT: &str = "\
Flurble gax mentrip wobzang kleep. Vornish platch sneedle. Quambo
frizzle tung yelb norquat. Bixly wompus tren jazzle flicknort
spangdoodle wub.
";

/// Full reasoning trace used for the determinism control.
pub const CONTROL_C_TEXT: &str = "\
[ASSUME: nodes may behave arbitrarily, network is partially synchronous]

Byzantine consensus requires f < n/3.

[CLAIM: rotating-leader BFT balances coordination with fault tolerance]

[BRANCH: single leader vs rotating leader]

[SELECT: rotating leader | because: avoids single point of failure]

[CLAIM: quorum certificates ensure safety]

[CONCLUDE: use rotating-leader BFT with quorum certificates]
";

/// A single measured expectation inside a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCheck {
    /// Metric being checked.
    pub label: String,
    /// Observed value.
    pub observed: f64,
    /// Expected condition, human-readable.
    pub expectation: String,
    /// Whether the observation met the expectation.
    pub passed: bool,
}

impl ControlCheck {
    fn new(label: &str, observed: f64, expectation: String, passed: bool) -> Self {
        Self {
            label: label.to_string(),
            observed,
            expectation,
            passed,
        }
    }
}

/// Outcome of one negative control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlOutcome {
    /// Control name.
    pub name: String,
    /// Individual checks.
    pub checks: Vec<ControlCheck>,
}

impl ControlOutcome {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Outcome of the full negative-control run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsReport {
    /// Hash of the policy the controls ran under.
    pub policy_hash: String,
    /// Per-control outcomes, in order A, B, C.
    pub outcomes: Vec<ControlOutcome>,
}

impl ControlsReport {
    /// Whether every control passed.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ControlOutcome::passed)
    }

    /// Names of failed controls.
    pub fn failures(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed())
            .map(|o| o.name.as_str())
            .collect()
    }
}

/// Control A: trivial factual query must not branch and must commit early.
pub fn control_trivial(policy: &HarnessPolicyV1) -> ControlOutcome {
    let result = extract_metrics(CONTROL_A_TEXT, "control_a_trivial");
    let m = &result.metrics;

    ControlOutcome {
        name: "control_a_trivial".to_string(),
        checks: vec![
            ControlCheck::new(
                "branch_count",
                m.branch_count as f64,
                "== 0".to_string(),
                m.branch_count == 0,
            ),
            ControlCheck::new(
                "commitment_latency",
                m.commitment_latency,
                format!("<= {}", policy.max_trivial_latency),
                m.commitment_latency <= policy.max_trivial_latency,
            ),
        ],
    }
}

/// Control B: nonsense text must yield no structure.
pub fn control_nonsense() -> ControlOutcome {
    let result = extract_metrics(CONTROL_B_TEXT, "control_b_nonsense");
    let total = result.metrics.total_checkpoints;

    ControlOutcome {
        name: "control_b_nonsense".to_string(),
        checks: vec![ControlCheck::new(
            "total_checkpoints",
            total as f64,
            "== 0".to_string(),
            total == 0,
        )],
    }
}

/// Control C: the same trace twice must compare as identical.
pub fn control_identical() -> ControlOutcome {
    let run1 = extract_metrics(CONTROL_C_TEXT, "control_c_run1");
    let run2 = extract_metrics(CONTROL_C_TEXT, "control_c_run2");
    let topo = compare_topology(&run1.checkpoints, &run2.checkpoints);
    let same_fingerprint = run1.topology_fingerprint() == run2.topology_fingerprint();

    ControlOutcome {
        name: "control_c_identical".to_string(),
        checks: vec![
            ControlCheck::new(
                "node_overlap",
                topo.node_overlap,
                "== 1.0".to_string(),
                topo.node_overlap == 1.0,
            ),
            ControlCheck::new(
                "sequence_similarity",
                topo.sequence_similarity,
                "== 1.0".to_string(),
                topo.sequence_similarity == 1.0,
            ),
            ControlCheck::new(
                "depth_ratio",
                topo.depth_ratio,
                "== 1.0".to_string(),
                topo.depth_ratio == 1.0,
            ),
            ControlCheck::new(
                "fingerprint_match",
                if same_fingerprint { 1.0 } else { 0.0 },
                "== 1".to_string(),
                same_fingerprint,
            ),
        ],
    }
}

/// Run all negative controls under a policy.
pub fn run_negative_controls(policy: &HarnessPolicyV1) -> ControlsReport {
    let outcomes = vec![control_trivial(policy), control_nonsense(), control_identical()];

    for outcome in &outcomes {
        for check in &outcome.checks {
            tracing::debug!(
                control = %outcome.name,
                label = %check.label,
                observed = check.observed,
                expectation = %check.expectation,
                passed = check.passed,
                "control check"
            );
        }
        if outcome.passed() {
            tracing::info!(control = %outcome.name, "negative control passed");
        } else {
            tracing::warn!(control = %outcome.name, "negative control failed");
        }
    }

    ControlsReport {
        policy_hash: policy.params_hash(),
        outcomes,
    }
}
