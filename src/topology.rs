//! Topology comparison.
//!
//! Baseline-relative structural metrics over checkpoint type sequences.
//! Checkpoint text and indices are ignored; only which types occur, how
//! often, and in what order.

use crate::types::{Checkpoint, CheckpointCounts, CheckpointType, TopologyMetrics};

/// Extract the ordered sequence of checkpoint types.
pub fn checkpoint_sequence(checkpoints: &[Checkpoint]) -> Vec<CheckpointType> {
    checkpoints.iter().map(|cp| cp.checkpoint_type).collect()
}

/// Jaccard similarity of two type multisets: |A ∩ B| / |A ∪ B|.
///
/// Intersection and union take the per-type minimum and maximum count.
/// Two empty sequences are identical (`1.0`); one empty sequence shares
/// nothing with a non-empty one (`0.0`).
pub fn node_overlap(seq1: &[CheckpointType], seq2: &[CheckpointType]) -> f64 {
    match (seq1.is_empty(), seq2.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let counts1 = CheckpointCounts::from_types(seq1.iter().copied());
    let counts2 = CheckpointCounts::from_types(seq2.iter().copied());

    let union = counts1.union_size(&counts2);
    if union == 0 {
        return 0.0;
    }
    counts1.intersection_size(&counts2) as f64 / union as f64
}

/// Levenshtein distance with unit insert, delete and substitute costs.
///
/// Full dynamic programming over a flat `(m + 1) × (n + 1)` table with
/// `dp[i][0] = i` and `dp[0][j] = j`. Transpositions cost two edits.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (m, n) = (a.len(), b.len());
    let width = n + 1;
    let mut dp = vec![0usize; (m + 1) * width];

    for i in 0..=m {
        dp[i * width] = i;
    }
    for j in 0..=n {
        dp[j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let diagonal = dp[(i - 1) * width + (j - 1)];
            dp[i * width + j] = if a[i - 1] == b[j - 1] {
                diagonal
            } else {
                let deletion = dp[(i - 1) * width + j];
                let insertion = dp[i * width + (j - 1)];
                1 + deletion.min(insertion).min(diagonal)
            };
        }
    }

    dp[m * width + n]
}

/// One minus the normalized Levenshtein distance between type sequences.
///
/// `1.0` means identical ordering. Sequences with the same types in a
/// different order score below `1.0`. Two empty sequences give `1.0`; one
/// empty sequence gives `0.0`.
pub fn sequence_similarity(seq1: &[CheckpointType], seq2: &[CheckpointType]) -> f64 {
    match (seq1.is_empty(), seq2.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let max_len = seq1.len().max(seq2.len());
    1.0 - edit_distance(seq1, seq2) as f64 / max_len as f64
}

/// Ratio of reasoning depth (variant / baseline), approximated by checkpoint count.
///
/// With an empty baseline the ratio is `1.0` if the variant is also empty,
/// otherwise `0.0`. The ratio is unbounded above.
pub fn depth_ratio(baseline: &[Checkpoint], variant: &[Checkpoint]) -> f64 {
    if baseline.is_empty() {
        return if variant.is_empty() { 1.0 } else { 0.0 };
    }
    variant.len() as f64 / baseline.len() as f64
}

/// Compare the topology of a variant checkpoint list against a baseline.
pub fn compare_topology(baseline: &[Checkpoint], variant: &[Checkpoint]) -> TopologyMetrics {
    let seq_baseline = checkpoint_sequence(baseline);
    let seq_variant = checkpoint_sequence(variant);

    let topology = TopologyMetrics {
        node_overlap: node_overlap(&seq_baseline, &seq_variant),
        sequence_similarity: sequence_similarity(&seq_baseline, &seq_variant),
        depth_ratio: depth_ratio(baseline, variant),
    };

    tracing::debug!(
        baseline_len = baseline.len(),
        variant_len = variant.len(),
        node_overlap = topology.node_overlap,
        sequence_similarity = topology.sequence_similarity,
        depth_ratio = topology.depth_ratio,
        "compared topology"
    );

    topology
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
    fn test_node_overlap_identical() {
        let seq = [Assume, Claim, Select];
        assert_eq!(node_overlap(&seq, &seq), 1.0);
    }

    #[test]
    fn test_node_overlap_disjoint() {
        assert_eq!(node_overlap(&[Assume], &[Conclude]), 0.0);
    }

    #[test]
    fn test_node_overlap_empty() {
        assert_eq!(node_overlap(&[], &[]), 1.0);
        assert_eq!(node_overlap(&[Assume], &[]), 0.0);
        assert_eq!(node_overlap(&[], &[Assume]), 0.0);
    }

    #[test]
    fn test_node_overlap_multiset() {
        // min: claim 1 = 1; max: claim 3 = 3
        assert!((node_overlap(&[Claim, Claim, Claim], &[Claim]) - 1.0 / 3.0).abs() < 1e-12);
        // Same multiset, different order
        assert_eq!(node_overlap(&[Assume, Claim, Select], &[Select, Assume, Claim]), 1.0);
    }

    #[test]
    fn test_edit_distance_known_values() {
        assert_eq!(edit_distance::<CheckpointType>(&[], &[]), 0);
        assert_eq!(edit_distance(&[Assume, Claim], &[]), 2);
        assert_eq!(edit_distance(&[], &[Assume, Claim, Select]), 3);
        assert_eq!(edit_distance(&[Assume, Claim, Select], &[Assume, Branch, Select]), 1);
        // Transposition is two substitutions
        assert_eq!(edit_distance(&[Assume, Claim], &[Claim, Assume]), 2);
        // Insertion in the middle
        assert_eq!(edit_distance(&[Assume, Select], &[Assume, Branch, Select]), 1);
        assert_eq!(edit_distance(&b"kitten"[..], &b"sitting"[..]), 3);
        assert_eq!(edit_distance(&b"flaw"[..], &b"lawn"[..]), 2);
    }

    #[test]
    fn test_sequence_similarity_identical() {
        let seq = [Assume, Claim, Branch, Select];
        assert_eq!(sequence_similarity(&seq, &seq), 1.0);
    }

    #[test]
    fn test_sequence_similarity_one_substitution() {
        let a = [Assume, Claim, Branch, Select];
        let b = [Assume, Claim, Claim, Select];
        assert_eq!(sequence_similarity(&a, &b), 0.75);
    }

    #[test]
    fn test_sequence_similarity_order_matters() {
        let a = [Assume, Claim, Select];
        let b = [Select, Claim, Assume];
        let sim = sequence_similarity(&a, &b);
        assert!(sim < 1.0);
        assert!((sim - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sequence_similarity_bounds_and_empty() {
        let sim = sequence_similarity(&[Assume, Claim, Select], &[Branch, Conclude]);
        assert!((0.0..=1.0).contains(&sim));
        assert_eq!(sim, 0.0);
        assert_eq!(sequence_similarity(&[], &[]), 1.0);
        assert_eq!(sequence_similarity(&[Claim], &[]), 0.0);
        assert_eq!(sequence_similarity(&[], &[Claim]), 0.0);
    }

    #[test]
    fn test_depth_ratio() {
        assert_eq!(depth_ratio(&[], &[]), 1.0);
        assert_eq!(depth_ratio(&[], &cps(&[Assume])), 0.0);
        assert_eq!(depth_ratio(&cps(&[Assume]), &[]), 0.0);
        assert_eq!(depth_ratio(&cps(&[Assume, Claim]), &cps(&[Assume, Claim, Select, Conclude])), 2.0);
        assert_eq!(depth_ratio(&cps(&[Assume, Claim, Select, Conclude]), &cps(&[Assume])), 0.25);
    }

    #[test]
    fn test_compare_topology_identical() {
        let list = cps(&[Assume, Claim, Select, Conclude]);
        let topo = compare_topology(&list, &list);
        assert!(topo.is_identical());
    }

    #[test]
    fn test_compare_topology_baseline_only() {
        let topo = compare_topology(&cps(&[Assume]), &[]);
        assert_eq!(topo.node_overlap, 0.0);
        assert_eq!(topo.sequence_similarity, 0.0);
        assert_eq!(topo.depth_ratio, 0.0);
    }

    #[test]
    fn test_compare_topology_ignores_text() {
        let a = vec![Checkpoint::new(0, Claim, "one"), Checkpoint::new(1, Select, "two")];
        let b = vec![Checkpoint::new(0, Claim, "other"), Checkpoint::new(1, Select, "")];
        assert!(compare_topology(&a, &b).is_identical());
    }
}
