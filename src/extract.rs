//! Checkpoint extraction.
//!
//! Deterministic parser for the checkpoint grammar:
//!
//! ```text
//! [TYPE]            TYPE = ASSUME | CLAIM | BRANCH | SELECT | CONCLUDE
//! [TYPE: content]   content = any characters except ']'
//! ```
//!
//! Tags are matched case-insensitively and normalized to uppercase. Content
//! capture stops at the first `]` after the tag, so content never contains a
//! closing bracket. Matches never overlap and are indexed in order of
//! occurrence. Text without any tag yields an empty list; malformed or
//! unknown bracketed tokens are skipped silently.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::types::{Checkpoint, CheckpointType};

const CHECKPOINT_PATTERN: &str = r"(?i)\[(ASSUME|CLAIM|BRANCH|SELECT|CONCLUDE):?\s*([^\]]*)\]";

fn checkpoint_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(CHECKPOINT_PATTERN).expect("checkpoint pattern is valid"))
}

/// Extract checkpoints from annotated text.
///
/// # Example
///
/// ```rust
/// use epistemic_harness::{parse_checkpoints, CheckpointType};
///
/// let cps = parse_checkpoints("[assume: x > 0] so [CONCLUDE]");
/// assert_eq!(cps.len(), 2);
/// assert_eq!(cps[0].checkpoint_type, CheckpointType::Assume);
/// assert_eq!(cps[0].text, "x > 0");
/// assert_eq!(cps[1].text, "");
/// ```
pub fn parse_checkpoints(text: &str) -> Vec<Checkpoint> {
    let checkpoints: Vec<Checkpoint> = checkpoint_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let checkpoint_type = CheckpointType::from_tag(caps.get(1)?.as_str())?;
            let content = caps.get(2).map_or("", |m| m.as_str()).trim();
            Some((checkpoint_type, content))
        })
        .enumerate()
        .map(|(index, (checkpoint_type, content))| Checkpoint::new(index, checkpoint_type, content))
        .collect();

    tracing::trace!(count = checkpoints.len(), "extracted checkpoints");

    checkpoints
}
