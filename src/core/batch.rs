// batch.rs - Parallel alignment of one reference against many queries

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::core::aligner::{align_or_fallback, AlignmentOutcome};
use crate::core::alignment::AlignmentConfig;

/// Align `reference` against every query on the rayon pool.
///
/// Each alignment owns its score matrix, so calls share nothing but the
/// read-only inputs. Output order matches `queries`.
pub fn align_many<S>(
    reference: &str,
    queries: &[S],
    config: &AlignmentConfig,
    progress: Option<&ProgressBar>,
) -> Vec<AlignmentOutcome>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| {
            let outcome = align_or_fallback(reference, query.as_ref(), config);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            outcome
        })
        .collect()
}
