// lib.rs - rnadiff library root

//! # rnadiff - Global alignment and point-mutation diff for RNA sequences
//!
//! This library aligns a wild-type (reference) RNA sequence against a mutant
//! (query) with Needleman-Wunsch global alignment and reports every aligned
//! position where the two differ as a point substitution such as `A_10_U`.
//!
//! ## Features
//!
//! - **Global alignment**: Linear gap scoring with deterministic tie-breaking
//! - **Substitution diff**: 1-based reference coordinates that skip gap columns
//! - **Graceful fallback**: Failed alignments yield the raw pair plus a notice
//! - **Mutation enumeration**: Every substitution, deletion and insertion of a sequence
//! - **Z-score ranking**: Combine structural distance scores and keep the top mutations
//! - **Batch alignment**: Parallel alignment of many mutants against one reference
//!
//! ## Basic Usage
//!
//! ```rust
//! use rnadiff::prelude::*;
//!
//! let config = AlignmentConfig::default();
//! let diff = align("AUGCUAUGGAUGCUAGCUAUGG", "AUGCUAUGGUUGCUAGCUAUGG", &config)
//!     .map_err(|e| e.to_string())?;
//!
//! let keys: Vec<String> = diff.substitutions.iter().map(|s| s.to_string()).collect();
//! assert_eq!(keys, vec!["A_10_U"]);
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, RunMode, ValidationResult};
    pub use crate::core::{align, align_many, align_or_fallback, AlignmentOutcome};
    pub use crate::core::{AlignError, AlignmentConfig, DiffResult, SequenceSide, Substitution};
    pub use crate::core::{apply_all, enumerate_mutations, rank_mutations, MutantSequence, Mutation};
    pub use crate::data::{load_mutation_scores, load_sequences, normalize_sequence, Alphabet};
    pub use crate::output::{render_report, write_report, ReportEntry, ReportFormat};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{align, align_or_fallback, AlignError, AlignmentConfig, AlignmentOutcome, DiffResult};
pub use data::{Alphabet, SequenceRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "rnadiff v{} - Global alignment and point-mutation diff for RNA sequences",
        VERSION
    )
}
