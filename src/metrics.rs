//! Metric computation.
//!
//! Pure functions over a checkpoint list and its source text. Every ratio has
//! an explicit fallback, so no input makes these functions fail.

use std::collections::BTreeMap;

use crate::extract::parse_checkpoints;
use crate::types::{Checkpoint, CheckpointCounts, CheckpointType, HarnessResult, Metrics};

/// Tokens assumed per whitespace-separated word.
pub const TOKENS_PER_WORD: f64 = 1.3;

/// Fraction of checkpoints before the first SELECT or CONCLUDE.
///
/// `0.0` means immediate commitment, `1.0` means no commitment was made.
/// An empty list yields `0.0`.
pub fn commitment_latency(checkpoints: &[Checkpoint]) -> f64 {
    if checkpoints.is_empty() {
        return 0.0;
    }

    checkpoints
        .iter()
        .position(|cp| cp.checkpoint_type.is_commitment())
        .map_or(1.0, |first| first as f64 / checkpoints.len() as f64)
}

/// Count checkpoints of a specific type.
pub fn count_by_type(checkpoints: &[Checkpoint], checkpoint_type: CheckpointType) -> usize {
    checkpoints
        .iter()
        .filter(|cp| cp.checkpoint_type == checkpoint_type)
        .count()
}

/// Ratio of CLAIM to SELECT checkpoints.
///
/// Without any SELECT the claim count itself is returned, so claims with no
/// decision still register as a positive ratio.
pub fn claim_select_ratio(checkpoints: &[Checkpoint]) -> f64 {
    ratio_from_counts(
        count_by_type(checkpoints, CheckpointType::Claim),
        count_by_type(checkpoints, CheckpointType::Select),
    )
}

fn ratio_from_counts(claims: usize, selects: usize) -> f64 {
    if selects == 0 {
        return claims as f64;
    }
    claims as f64 / selects as f64
}

/// Rough token estimate: word count times [`TOKENS_PER_WORD`], rounded half to even.
///
/// Words are separated by Unicode whitespace or the ASCII information
/// separators U+001C..U+001F.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count();
    (words as f64 * TOKENS_PER_WORD).round_ties_even() as usize
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Estimated tokens per checkpoint; `0.0` when there are no checkpoints.
pub fn tokens_per_checkpoint(text: &str, checkpoints: &[Checkpoint]) -> f64 {
    density(estimate_tokens(text), checkpoints.len())
}

fn density(tokens: usize, checkpoints: usize) -> f64 {
    if checkpoints == 0 {
        return 0.0;
    }
    tokens as f64 / checkpoints as f64
}

/// Compute all core metrics from text and its checkpoints.
pub fn compute_metrics(text: &str, checkpoints: &[Checkpoint]) -> Metrics {
    let counts = CheckpointCounts::from_checkpoints(checkpoints);
    let total_tokens = estimate_tokens(text);

    let metrics = Metrics {
        commitment_latency: commitment_latency(checkpoints),
        assume_count: counts.assume,
        claim_count: counts.claim,
        branch_count: counts.branch,
        select_count: counts.select,
        conclude_count: counts.conclude,
        total_checkpoints: checkpoints.len(),
        tokens_per_checkpoint: density(total_tokens, checkpoints.len()),
        claim_select_ratio: ratio_from_counts(counts.claim, counts.select),
        total_tokens,
    };

    tracing::debug!(
        total_checkpoints = metrics.total_checkpoints,
        commitment_latency = metrics.commitment_latency,
        total_tokens = metrics.total_tokens,
        "computed metrics"
    );

    metrics
}

/// Parse checkpoints and compute all metrics for one variant.
pub fn extract_metrics(text: &str, variant: impl Into<String>) -> HarnessResult {
    let checkpoints = parse_checkpoints(text);
    let metrics = compute_metrics(text, &checkpoints);
    HarnessResult {
        variant: variant.into(),
        raw_text: text.to_string(),
        checkpoints,
        metrics,
    }
}

/// Human-readable explanation for each metric value, keyed by field name.
pub fn explain_metrics(metrics: &Metrics) -> BTreeMap<&'static str, String> {
    let mut out = BTreeMap::new();
    out.insert(
        "commitment_latency",
        format!(
            "Commitment latency is {:.2}, the fraction of checkpoints before the first SELECT or CONCLUDE. \
             Lower values indicate earlier commitment.",
            metrics.commitment_latency
        ),
    );
    out.insert(
        "assume_count",
        format!(
            "ASSUME count is {}, representing explicit starting assumptions.",
            metrics.assume_count
        ),
    );
    out.insert(
        "claim_count",
        format!(
            "CLAIM count is {}, capturing intermediate assertions.",
            metrics.claim_count
        ),
    );
    out.insert(
        "branch_count",
        format!(
            "Branch count is {}, the number of BRANCH checkpoints that record alternatives.",
            metrics.branch_count
        ),
    );
    out.insert(
        "select_count",
        format!(
            "SELECT count is {}, the number of explicit choice points.",
            metrics.select_count
        ),
    );
    out.insert(
        "conclude_count",
        format!(
            "CONCLUDE count is {}, the number of final conclusions.",
            metrics.conclude_count
        ),
    );
    out.insert(
        "total_checkpoints",
        format!(
            "Total checkpoints is {}, the total number of annotated checkpoints.",
            metrics.total_checkpoints
        ),
    );
    out.insert(
        "tokens_per_checkpoint",
        format!(
            "Tokens per checkpoint is {:.1}, a rough density estimate based on word count multiplied by {}. \
             Higher values mean more justification per checkpoint.",
            metrics.tokens_per_checkpoint, TOKENS_PER_WORD
        ),
    );
    out.insert(
        "claim_select_ratio",
        format!(
            "CLAIM/SELECT ratio is {:.2}, comparing intermediate claims to selections. \
             Higher values imply more justificatory steps per commitment.",
            metrics.claim_select_ratio
        ),
    );
    out.insert(
        "total_tokens",
        format!(
            "Total tokens is {}, a rough estimate derived from word count.",
            metrics.total_tokens
        ),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use CheckpointType::*;

    fn cps(types: &[CheckpointType]) -> Vec<Checkpoint> {
        types
            .iter()
            .enumerate()
            .map(|(i, &t)| Checkpoint::new(i, t, ""))
            .collect()
    }

    #[test]
    fn test_commitment_latency_early() {
        assert_eq!(commitment_latency(&cps(&[Select, Claim])), 0.0);
    }

    #[test]
    fn test_commitment_latency_late() {
        assert_eq!(commitment_latency(&cps(&[Assume, Claim, Branch, Select])), 0.75);
    }

    #[test]
    fn test_commitment_latency_conclude_counts() {
        assert_eq!(commitment_latency(&cps(&[Assume, Conclude])), 0.5);
    }

    #[test]
    fn test_commitment_latency_no_commitment() {
        assert_eq!(commitment_latency(&cps(&[Assume, Claim])), 1.0);
    }

    #[test]
    fn test_commitment_latency_empty() {
        assert_eq!(commitment_latency(&[]), 0.0);
    }

    #[test]
    fn test_count_by_type() {
        let list = cps(&[Claim, Claim, Branch]);
        assert_eq!(count_by_type(&list, Claim), 2);
        assert_eq!(count_by_type(&list, Branch), 1);
        assert_eq!(count_by_type(&list, Assume), 0);
    }

    #[test]
    fn test_claim_select_ratio() {
        assert_eq!(claim_select_ratio(&cps(&[Claim, Claim, Select])), 2.0);
        assert_eq!(claim_select_ratio(&cps(&[Claim, Select, Select])), 0.5);
        assert_eq!(claim_select_ratio(&cps(&[Claim])), 1.0);
        assert_eq!(claim_select_ratio(&cps(&[Claim, Claim])), 2.0);
        assert_eq!(claim_select_ratio(&cps(&[Select])), 0.0);
        assert_eq!(claim_select_ratio(&[]), 0.0);
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n\t "), 0);
        // 10 words * 1.3 = 13
        assert_eq!(estimate_tokens("a b c d e f g h i j"), 13);
        // 3 words * 1.3 = 3.9 -> 4
        assert_eq!(estimate_tokens("one\ttwo\nthree"), 4);
        // 2 words * 1.3 = 2.6 -> 3
        assert_eq!(estimate_tokens("  two   words "), 3);
    }

    #[test]
    fn test_estimate_tokens_ties_round_to_even() {
        let words = |n: usize| vec!["w"; n].join(" ");
        // 5 * 1.3 = 6.5
        assert_eq!(estimate_tokens("a b c d e"), 6);
        // 15 * 1.3 = 19.5
        assert_eq!(estimate_tokens(&words(15)), 20);
        // 25 * 1.3 = 32.5
        assert_eq!(estimate_tokens(&words(25)), 32);
    }

    #[test]
    fn test_estimate_tokens_information_separators() {
        assert_eq!(estimate_tokens("a\u{1c}b"), 2);
        assert_eq!(estimate_tokens("a\u{1d}b\u{1e}c\u{1f}d"), 4);
        assert_eq!(estimate_tokens("a\u{a0}b\u{2003}c"), 3);
    }

    #[test]
    fn test_tokens_per_checkpoint() {
        let text = "a b c d e f g h i j";
        assert_eq!(tokens_per_checkpoint(text, &cps(&[Assume, Claim])), 6.5);
        assert_eq!(tokens_per_checkpoint(text, &[]), 0.0);
    }

    #[test]
    fn test_compute_metrics_counts_sum_to_total() {
        let list = cps(&[Assume, Claim, Branch, Select, Claim, Conclude]);
        let m = compute_metrics("", &list);
        assert_eq!(m.total_checkpoints, 6);
        assert_eq!(
            m.assume_count + m.claim_count + m.branch_count + m.select_count + m.conclude_count,
            m.total_checkpoints
        );
        for t in CheckpointType::ALL {
            assert_eq!(m.count(t), count_by_type(&list, t));
        }
    }

    #[test]
    fn test_compute_metrics_no_checkpoints() {
        let m = compute_metrics("plain words only", &[]);
        assert_eq!(m.total_checkpoints, 0);
        assert_eq!(m.commitment_latency, 0.0);
        assert_eq!(m.tokens_per_checkpoint, 0.0);
        assert_eq!(m.claim_select_ratio, 0.0);
        assert_eq!(m.total_tokens, 4);
    }

    #[test]
    fn test_extract_metrics_integration() {
        let text = "
            [ASSUME: starting point]
            Some reasoning here.
            [CLAIM: intermediate]
            More reasoning.
            [BRANCH: option A vs option B]
            [SELECT: option A | because: better]
            [CONCLUDE: final answer]
        ";
        let result = extract_metrics(text, "test");
        assert_eq!(result.variant, "test");
        assert_eq!(result.raw_text, text);
        assert_eq!(result.metrics.total_checkpoints, 5);
        assert_eq!(result.metrics.assume_count, 1);
        assert_eq!(result.metrics.claim_count, 1);
        assert_eq!(result.metrics.branch_count, 1);
        assert_eq!(result.metrics.select_count, 1);
        assert_eq!(result.metrics.conclude_count, 1);
        assert_eq!(result.metrics.commitment_latency, 0.6);
        assert_eq!(result.metrics.claim_select_ratio, 1.0);
    }

    #[test]
    fn test_explain_metrics_covers_every_field() {
        let m = compute_metrics("a b c", &cps(&[Claim, Select]));
        let explained = explain_metrics(&m);
        assert_eq!(explained.len(), 10);
        assert!(explained["commitment_latency"].starts_with("Commitment latency is 0.50"));
        assert!(explained["tokens_per_checkpoint"].starts_with("Tokens per checkpoint is 2.0"));
        assert!(explained["claim_select_ratio"].starts_with("CLAIM/SELECT ratio is 1.00"));
    }
}
