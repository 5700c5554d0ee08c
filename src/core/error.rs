// error.rs - Aligner error taxonomy

use std::fmt;
use thiserror::Error;

/// Which input an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSide {
    Reference,
    Query,
}

impl fmt::Display for SequenceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceSide::Reference => write!(f, "reference"),
            SequenceSide::Query => write!(f, "query"),
        }
    }
}

/// Errors raised by the pairwise aligner.
///
/// All variants are recoverable: callers that cannot fix their input use
/// [`crate::core::align_or_fallback`] to degrade to an unaligned pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// A symbol outside the configured alphabet, or an otherwise unusable sequence
    #[error("invalid {side} sequence: {reason}")]
    InvalidInput { side: SequenceSide, reason: String },

    /// Sequence longer than the configured ceiling; raised before the score matrix is allocated
    #[error("{side} sequence is too long: {length} symbols (maximum {max_length})")]
    LengthLimitExceeded {
        side: SequenceSide,
        length: usize,
        max_length: usize,
    },

    /// Scoring policy rejected by `AlignmentConfig::validate`
    #[error("invalid alignment parameters: {0}")]
    InvalidConfig(String),

    /// Traceback produced an alignment that does not reproduce the inputs
    #[error("alignment failed: {0}")]
    Alignment(String),
}

impl AlignError {
    pub fn invalid_input(side: SequenceSide, reason: impl Into<String>) -> Self {
        AlignError::InvalidInput {
            side,
            reason: reason.into(),
        }
    }
}
