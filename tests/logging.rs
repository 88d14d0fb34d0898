//! Global subscriber installation.
//!
//! Runs in its own test binary so the installed subscriber does not print
//! log output from the library's unit tests.

use epistemic_harness::logging::{init_tracing_with, LogFormat};

#[test]
fn test_second_init_fails() {
    init_tracing_with(LogFormat::Json).unwrap();
    assert!(init_tracing_with(LogFormat::Pretty).is_err());
}
