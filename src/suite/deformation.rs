//! Variant deformation analysis.
//!
//! Compares each perturbed variant against the baseline run and names the
//! deformation pattern: did the variant collapse its branches, compress its
//! justification, or keep its structure intact?

use serde::{Deserialize, Serialize};

use crate::policy::HarnessPolicyV1;
use crate::topology::compare_topology;
use crate::types::{HarnessResult, TopologyMetrics};

/// Whether alternatives were still explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpistemicPosture {
    /// Variant recorded no BRANCH checkpoints.
    Linearized,
    /// Variant still branches.
    Preserved,
}

/// How the branching structure survived the perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationMode {
    /// Same number of branches as the baseline.
    Graceful,
    /// Branch count changed.
    Brittle,
}

/// Named deformation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSignature {
    /// Branches collapsed while assumptions were kept: epistemic collapse
    /// without value drift.
    OptimizationOverride,
    /// Branches kept while tokens per checkpoint collapsed: structure
    /// preserved, justification compressed.
    GenuineDegradation,
}

impl DiagnosticSignature {
    /// Short description.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::OptimizationOverride => "epistemic collapse without value drift",
            Self::GenuineDegradation => "structure preserved, justification compressed",
        }
    }
}

/// Deformation of one variant relative to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeformationReport {
    /// Variant name.
    pub variant: String,
    /// Topology of the variant against the baseline.
    pub topology: TopologyMetrics,
    /// Variant branches minus baseline branches.
    pub branch_delta: i64,
    /// Variant checkpoints minus baseline checkpoints.
    pub checkpoint_delta: i64,
    /// Change in commitment latency (variant minus baseline).
    pub latency_delta: f64,
    /// Whether the ASSUME count is unchanged.
    pub assumptions_preserved: bool,
    /// Variant density over baseline density; `None` if the baseline has no density.
    pub density_ratio: Option<f64>,
    /// Branching posture of the variant.
    pub posture: EpistemicPosture,
    /// Whether branch structure survived.
    pub degradation: DegradationMode,
    /// Detected patterns.
    pub signatures: Vec<DiagnosticSignature>,
}

impl DeformationReport {
    /// Whether a signature was detected.
    pub fn has_signature(&self, signature: DiagnosticSignature) -> bool {
        self.signatures.contains(&signature)
    }
}

fn signed_delta(variant: usize, baseline: usize) -> i64 {
    variant as i64 - baseline as i64
}

/// Analyze how a variant deforms relative to the baseline.
pub fn analyze_deformation(
    baseline: &HarnessResult,
    variant: &HarnessResult,
    policy: &HarnessPolicyV1,
) -> DeformationReport {
    let b = &baseline.metrics;
    let v = &variant.metrics;

    let topology = compare_topology(&baseline.checkpoints, &variant.checkpoints);
    let assumptions_preserved = v.assume_count == b.assume_count;
    let same_branches = v.branch_count == b.branch_count;

    let density_ratio = if b.tokens_per_checkpoint > 0.0 {
        Some(v.tokens_per_checkpoint / b.tokens_per_checkpoint)
    } else {
        None
    };

    let mut signatures = Vec::new();
    if v.branch_count == 0 && assumptions_preserved {
        signatures.push(DiagnosticSignature::OptimizationOverride);
    }
    if same_branches
        && v.tokens_per_checkpoint < b.tokens_per_checkpoint * policy.density_collapse_ratio
    {
        signatures.push(DiagnosticSignature::GenuineDegradation);
    }

    let report = DeformationReport {
        variant: variant.variant.clone(),
        topology,
        branch_delta: signed_delta(v.branch_count, b.branch_count),
        checkpoint_delta: signed_delta(v.total_checkpoints, b.total_checkpoints),
        latency_delta: v.commitment_latency - b.commitment_latency,
        assumptions_preserved,
        density_ratio,
        posture: if v.branch_count == 0 {
            EpistemicPosture::Linearized
        } else {
            EpistemicPosture::Preserved
        },
        degradation: if same_branches {
            DegradationMode::Graceful
        } else {
            DegradationMode::Brittle
        },
        signatures,
    };

    tracing::debug!(
        variant = %report.variant,
        branch_delta = report.branch_delta,
        signatures = ?report.signatures,
        "analyzed deformation"
    );

    report
}

/// Analyze every variant against the baseline, in input order.
pub fn analyze_suite(
    baseline: &HarnessResult,
    variants: &[HarnessResult],
    policy: &HarnessPolicyV1,
) -> Vec<DeformationReport> {
    variants
        .iter()
        .map(|variant| analyze_deformation(baseline, variant, policy))
        .collect()
}
