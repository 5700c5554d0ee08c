// aligner.rs - Global pairwise alignment (Needleman-Wunsch)

use serde::Serialize;

use crate::core::alignment::AlignmentConfig;
use crate::core::diff::{extract_substitutions, AlignedPair, DiffResult, Substitution, GAP};
use crate::core::error::{AlignError, SequenceSide};
use crate::data::sequence::check_sequence;

/// Dense (m+1) x (n+1) score matrix stored row-major
struct ScoreMatrix {
    cols: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    fn fill(reference: &[u8], query: &[u8], config: &AlignmentConfig) -> Self {
        let rows = reference.len() + 1;
        let cols = query.len() + 1;
        let mut cells = vec![0i32; rows * cols];
        let gap = config.gap_score;

        for (j, cell) in cells.iter_mut().enumerate().take(cols) {
            *cell = j as i32 * gap;
        }

        for i in 1..rows {
            let (prev_rows, current) = cells.split_at_mut(i * cols);
            let prev = &prev_rows[(i - 1) * cols..];
            let current = &mut current[..cols];
            let r = reference[i - 1];

            current[0] = i as i32 * gap;
            for j in 1..cols {
                let diag = prev[j - 1] + config.similarity(r, query[j - 1]);
                let up = prev[j] + gap;
                let left = current[j - 1] + gap;
                current[j] = diag.max(up).max(left);
            }
        }

        Self { cols, cells }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.cols + j]
    }
}

/// Walk back from (m, n) to (0, 0). Ties prefer diagonal, then up, then left.
fn traceback(
    matrix: &ScoreMatrix,
    reference: &[u8],
    query: &[u8],
    config: &AlignmentConfig,
) -> Result<Vec<(u8, u8)>, AlignError> {
    let gap = config.gap_score;
    let (mut i, mut j) = (reference.len(), query.len());
    let mut columns = Vec::with_capacity(i + j);

    while i > 0 || j > 0 {
        let current = matrix.get(i, j);

        if i > 0
            && j > 0
            && current == matrix.get(i - 1, j - 1) + config.similarity(reference[i - 1], query[j - 1])
        {
            columns.push((reference[i - 1], query[j - 1]));
            i -= 1;
            j -= 1;
        } else if i > 0 && current == matrix.get(i - 1, j) + gap {
            columns.push((reference[i - 1], GAP));
            i -= 1;
        } else if j > 0 && current == matrix.get(i, j - 1) + gap {
            columns.push((GAP, query[j - 1]));
            j -= 1;
        } else {
            return Err(AlignError::Alignment(format!(
                "traceback stalled at cell ({}, {}) with score {}",
                i, j, current
            )));
        }
    }

    columns.reverse();
    Ok(columns)
}

/// Confirm the aligned pair reproduces both inputs
fn verify(aligned: &AlignedPair, reference: &str, query: &str) -> Result<(), AlignError> {
    if aligned.reference.len() != aligned.query.len() {
        return Err(AlignError::Alignment(format!(
            "aligned sequences differ in length ({} vs {})",
            aligned.reference.len(),
            aligned.query.len()
        )));
    }
    if aligned.ungapped_reference() != reference {
        return Err(AlignError::Alignment(
            "aligned reference does not reproduce the input reference".to_string(),
        ));
    }
    if aligned.ungapped_query() != query {
        return Err(AlignError::Alignment(
            "aligned query does not reproduce the input query".to_string(),
        ));
    }
    Ok(())
}

/// Globally align `reference` against `query` and list the point substitutions.
///
/// The scoring policy and both inputs (alphabet, length ceiling) are
/// validated before any matrix is allocated. Output symbols keep the case they were
/// supplied in; comparison follows `config.case_sensitive`.
pub fn align(
    reference: &str,
    query: &str,
    config: &AlignmentConfig,
) -> Result<DiffResult, AlignError> {
    config.validate().map_err(AlignError::InvalidConfig)?;

    let ref_bytes = reference.as_bytes();
    let query_bytes = query.as_bytes();

    check_sequence(ref_bytes, SequenceSide::Reference, config)?;
    check_sequence(query_bytes, SequenceSide::Query, config)?;

    let matrix = ScoreMatrix::fill(ref_bytes, query_bytes, config);
    let columns = traceback(&matrix, ref_bytes, query_bytes, config)?;

    let aligned = AlignedPair::from_columns(&columns);
    verify(&aligned, reference, query)?;

    let substitutions = extract_substitutions(&aligned, config.case_sensitive);
    let score = matrix.get(ref_bytes.len(), query_bytes.len());

    Ok(DiffResult {
        aligned,
        substitutions,
        reference: reference.to_string(),
        query: query.to_string(),
        score,
    })
}

/// Alignment result, or the raw pair when alignment could not be computed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlignmentOutcome {
    Aligned(DiffResult),
    Unaligned {
        reference: String,
        query: String,
        notice: String,
    },
}

impl AlignmentOutcome {
    pub fn is_aligned(&self) -> bool {
        matches!(self, AlignmentOutcome::Aligned(_))
    }

    pub fn diff(&self) -> Option<&DiffResult> {
        match self {
            AlignmentOutcome::Aligned(diff) => Some(diff),
            AlignmentOutcome::Unaligned { .. } => None,
        }
    }

    /// Substitutions found; always empty for an unaligned pair
    pub fn substitutions(&self) -> &[Substitution] {
        match self {
            AlignmentOutcome::Aligned(diff) => &diff.substitutions,
            AlignmentOutcome::Unaligned { .. } => &[],
        }
    }

    /// Sequences to display: gapped when aligned, raw otherwise
    pub fn display_pair(&self) -> (&str, &str) {
        match self {
            AlignmentOutcome::Aligned(diff) => (&diff.aligned.reference, &diff.aligned.query),
            AlignmentOutcome::Unaligned {
                reference, query, ..
            } => (reference, query),
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            AlignmentOutcome::Aligned(_) => None,
            AlignmentOutcome::Unaligned { notice, .. } => Some(notice),
        }
    }
}

/// Align, degrading to the unaligned pair with a notice on any failure
pub fn align_or_fallback(reference: &str, query: &str, config: &AlignmentConfig) -> AlignmentOutcome {
    match align(reference, query, config) {
        Ok(diff) => AlignmentOutcome::Aligned(diff),
        Err(e) => AlignmentOutcome::Unaligned {
            reference: reference.to_string(),
            query: query.to_string(),
            notice: format!("Alignment could not be computed: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_align(reference: &str, query: &str) -> DiffResult {
        align(reference, query, &AlignmentConfig::default()).unwrap()
    }

    fn assert_invariants(reference: &str, query: &str, diff: &DiffResult) {
        assert_eq!(diff.aligned.reference.len(), diff.aligned.query.len());
        assert!(diff.aligned.len() >= reference.len().max(query.len()));
        assert_eq!(diff.aligned.ungapped_reference(), reference);
        assert_eq!(diff.aligned.ungapped_query(), query);
        assert!(diff
            .substitutions
            .windows(2)
            .all(|w| w[0].reference_position < w[1].reference_position));
        for sub in &diff.substitutions {
            assert_ne!(sub.reference_symbol, '-');
            assert_ne!(sub.query_symbol, '-');
        }
    }

    #[test]
    fn test_single_substitution() {
        let diff = default_align("AUGCUAUGGA", "AUGCUAUGGU");
        assert_eq!(diff.aligned.reference, "AUGCUAUGGA");
        assert_eq!(diff.aligned.query, "AUGCUAUGGU");
        assert_eq!(diff.substitutions, vec![Substitution::new('A', 10, 'U')]);
        assert_eq!(diff.score, 9);
        assert!(!diff.has_indels());
    }

    #[test]
    fn test_identity() {
        let seq = "GGCACCUGCAUGCA";
        let diff = default_align(seq, seq);
        assert_eq!(diff.aligned.reference, seq);
        assert_eq!(diff.aligned.query, seq);
        assert!(diff.substitutions.is_empty());
        assert_eq!(diff.score, seq.len() as i32);
    }

    #[test]
    fn test_empty_reference() {
        let diff = default_align("", "ACGU");
        assert_eq!(diff.aligned.reference, "----");
        assert_eq!(diff.aligned.query, "ACGU");
        assert!(diff.substitutions.is_empty());
        assert_eq!(diff.score, -12);
    }

    #[test]
    fn test_empty_query_and_both_empty() {
        let diff = default_align("ACG", "");
        assert_eq!(diff.aligned.reference, "ACG");
        assert_eq!(diff.aligned.query, "---");
        assert!(diff.substitutions.is_empty());

        let diff = default_align("", "");
        assert!(diff.aligned.is_empty());
        assert_eq!(diff.score, 0);
    }

    #[test]
    fn test_internal_substitution_in_100mer() {
        let unit = "GGCACCUGCAUGCA";
        let reference: String = unit.repeat(8)[..100].to_string();
        let k = 47;
        let mut query = reference.clone().into_bytes();
        let original = query[k - 1];
        let replacement = if original == b'A' { b'C' } else { b'A' };
        query[k - 1] = replacement;
        let query = String::from_utf8(query).unwrap();

        let diff = default_align(&reference, &query);
        assert_eq!(diff.aligned.reference, reference);
        assert_eq!(diff.aligned.query, query);
        assert_eq!(
            diff.substitutions,
            vec![Substitution::new(original as char, k, replacement as char)]
        );
    }

    #[test]
    fn test_deletion_is_not_a_substitution() {
        let diff = default_align("ACGUACGU", "ACGACGU");
        assert_invariants("ACGUACGU", "ACGACGU", &diff);
        assert!(diff.substitutions.is_empty());
        assert_eq!(diff.aligned.query.matches('-').count(), 1);
    }

    #[test]
    fn test_insertion_keeps_reference_positions() {
        let diff = default_align("GGGAAACCC", "GGGAAAUCCC");
        assert_invariants("GGGAAACCC", "GGGAAAUCCC", &diff);
        assert!(diff.substitutions.is_empty());
        assert_eq!(diff.aligned.reference.matches('-').count(), 1);
    }

    #[test]
    fn test_tie_break_prefers_up_over_left() {
        // "A" vs "C": diag = 0 beats both gap paths (-6), one mismatch column
        let diff = default_align("A", "C");
        assert_eq!(diff.aligned.reference, "A");
        assert_eq!(diff.substitutions, vec![Substitution::new('A', 1, 'C')]);

        // Mismatch costlier than two gaps: up and left tie at (1, 1), up wins,
        // so the reference symbol is consumed first on the way back
        let config = AlignmentConfig::custom(1, -3, -1);
        let diff = align("A", "C", &config).unwrap();
        assert_eq!(diff.aligned.reference, "-A");
        assert_eq!(diff.aligned.query, "C-");
        assert!(diff.substitutions.is_empty());
        assert_eq!(diff.score, -2);
    }

    #[test]
    fn test_tie_break_prefers_diagonal() {
        // Mismatch equals two gaps: diag, up and left all reach -1 at (2, 2)
        let config = AlignmentConfig::custom(1, -2, -1);
        let diff = align("AC", "AG", &config).unwrap();
        assert_eq!(diff.aligned.reference, "AC");
        assert_eq!(diff.aligned.query, "AG");
        assert_eq!(diff.substitutions, vec![Substitution::new('C', 2, 'G')]);
        assert_eq!(diff.score, -1);
    }

    #[test]
    fn test_case_insensitive_keeps_input_case() {
        let diff = default_align("acgu", "ACGA");
        assert_eq!(diff.aligned.reference, "acgu");
        assert_eq!(diff.aligned.query, "ACGA");
        assert_eq!(diff.substitutions, vec![Substitution::new('u', 4, 'A')]);
    }

    #[test]
    fn test_case_sensitive_comparison() {
        let config = AlignmentConfig::default().with_case_sensitive(true);
        let diff = align("acGU", "ACGU", &config).unwrap();
        assert_eq!(diff.substitutions.len(), 2);
        assert_eq!(diff.substitutions[0].reference_position, 1);
        assert_eq!(diff.substitutions[1].reference_position, 2);
    }

    #[test]
    fn test_deterministic() {
        let a = default_align("AUGGCUACGUAGC", "AUGCUACGAAGCU");
        let b = default_align("AUGGCUACGUAGC", "AUGCUACGAAGCU");
        assert_eq!(a, b);
        assert_invariants("AUGGCUACGUAGC", "AUGCUACGAAGCU", &a);
    }

    #[test]
    fn test_invariants_on_assorted_pairs() {
        let pairs = [
            ("AUGCUAUGGAUGCUAGC", "AUGCAUGGAUGCUUAGCA"),
            ("GGGG", "CCCC"),
            ("A", "UUUUUUUU"),
            ("ACGUACGUACGU", "UGCAUGCA"),
            ("CCCAAAGGG", "GGGAAACCC"),
        ];
        for (reference, query) in pairs {
            let diff = default_align(reference, query);
            assert_invariants(reference, query, &diff);
            let swapped = default_align(query, reference);
            assert_invariants(query, reference, &swapped);
        }
    }

    #[test]
    fn test_rejects_invalid_symbol() {
        let err = align("ACGU", "AC-U", &AlignmentConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AlignError::InvalidInput {
                side: SequenceSide::Query,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_long_input_before_alignment() {
        let config = AlignmentConfig::default().with_max_length(5);
        let err = align("ACGUAC", "ACG", &config).unwrap_err();
        assert_eq!(
            err,
            AlignError::LengthLimitExceeded {
                side: SequenceSide::Reference,
                length: 6,
                max_length: 5
            }
        );
    }

    #[test]
    fn test_fallback_on_error() {
        let outcome = align_or_fallback("ACGU", "ACGX", &AlignmentConfig::default());
        assert!(!outcome.is_aligned());
        assert!(outcome.substitutions().is_empty());
        assert_eq!(outcome.display_pair(), ("ACGU", "ACGX"));
        assert!(outcome.notice().unwrap().contains("could not be computed"));
    }

    #[test]
    fn test_rejects_unusable_scoring_policy() {
        for config in [
            AlignmentConfig::custom(1, 0, i32::MIN / 2),
            AlignmentConfig::custom(1, 0, i32::MIN),
            AlignmentConfig::custom(i32::MAX, 0, -1),
            AlignmentConfig::custom(1, 0, 3),
            AlignmentConfig::default().with_max_length(usize::MAX),
        ] {
            match align("ACGU", "ACGA", &config) {
                Err(AlignError::InvalidConfig(_)) => {}
                other => panic!("expected InvalidConfig for {:?}, got {:?}", config, other),
            }

            let outcome = align_or_fallback("ACGU", "ACGA", &config);
            assert!(!outcome.is_aligned());
            assert_eq!(outcome.display_pair(), ("ACGU", "ACGA"));
            assert!(outcome.notice().unwrap().contains("invalid alignment parameters"));
        }
    }

    #[test]
    fn test_substitution_positions_strictly_increase() {
        let diff = default_align("AAAAAAAAAA", "CACACACACA");
        let positions: Vec<usize> = diff.substitutions.iter().map(|s| s.reference_position).collect();
        assert_eq!(positions, vec![1, 3, 5, 7, 9]);
        assert_invariants("AAAAAAAAAA", "CACACACACA", &diff);
    }

    #[test]
    fn test_fallback_passes_through_success() {
        let outcome = align_or_fallback("ACGU", "ACGA", &AlignmentConfig::default());
        assert!(outcome.is_aligned());
        assert_eq!(outcome.substitutions().len(), 1);
        assert!(outcome.notice().is_none());
    }

    #[test]
    fn test_verify_detects_malformed_alignment() {
        let aligned = AlignedPair::new("AC-".to_string(), "A-G".to_string());
        assert!(verify(&aligned, "AC", "AG").is_ok());
        assert!(matches!(
            verify(&aligned, "AG", "AG"),
            Err(AlignError::Alignment(_))
        ));
        let uneven = AlignedPair::new("ACG".to_string(), "AC".to_string());
        assert!(verify(&uneven, "ACG", "AC").is_err());
    }
}
