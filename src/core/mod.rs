// mod.rs - Core logic module

pub mod aligner;
pub mod alignment;
pub mod batch;
pub mod diff;
pub mod error;
pub mod mutations;
pub mod ranking;

// Re-export main types for convenience
pub use aligner::{align, align_or_fallback, AlignmentOutcome};
pub use alignment::{compute_alignment_stats, AlignmentConfig, AlignmentStats};
pub use batch::align_many;
pub use diff::{extract_substitutions, match_line, AlignedPair, DiffResult, Substitution, GAP};
pub use error::{AlignError, SequenceSide};
pub use mutations::{apply_all, enumerate_mutations, mutation_count, MutantSequence, Mutation};
pub use ranking::{rank_mutations, zscores, MutationScore, RankedMutation, DEFAULT_TOP};
