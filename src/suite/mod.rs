//! Suite-level analysis over several harness runs.
//!
//! 1. **Controls**: validate the harness itself on fixtures with known answers
//! 2. **Deformation**: compare each perturbed variant against the baseline
//!
//! ```text
//! baseline ─┐
//! variant  ─┴→ compare_topology + metric deltas → DeformationReport
//! ```

pub mod controls;
pub mod deformation;

pub use controls::{
    run_negative_controls, ControlCheck, ControlOutcome, ControlsReport,
    CONTROL_A_TEXT, CONTROL_B_TEXT, CONTROL_C_TEXT,
};
pub use deformation::{
    analyze_deformation, analyze_suite, DegradationMode, DeformationReport,
    DiagnosticSignature, EpistemicPosture,
};
