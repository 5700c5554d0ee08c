// alignment.rs - Alignment configuration and utilities

use serde::{Deserialize, Serialize};

use crate::core::diff::{AlignedPair, GAP};
use crate::data::Alphabet;

/// Largest absolute value accepted for any single score
pub const MAX_ABS_SCORE: i32 = 1000;

/// Largest accepted `max_length`; with `MAX_ABS_SCORE` every matrix cell fits in i32
pub const MAX_SEQUENCE_LENGTH: usize = 1_000_000;

/// Configuration for global sequence alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Score of one gap column ("indel score"), never positive
    pub gap_score: i32,
    pub case_sensitive: bool,
    /// Inputs longer than this are rejected before the score matrix is allocated
    pub max_length: usize,
    pub alphabet: Alphabet,
    pub description: Option<String>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_score: 0,
            gap_score: -3,
            case_sensitive: false,
            max_length: 5_000,
            alphabet: Alphabet::Nucleotide,
            description: Some("Default RNA alignment parameters".to_string()),
        }
    }
}

impl AlignmentConfig {
    /// Create configuration from mode string
    pub fn from_mode(mode: &str) -> Result<Self, String> {
        match mode {
            "rna" => Ok(Self {
                description: Some("Standard RNA alignment".to_string()),
                ..Self::default()
            }),
            "rna-strict" => Ok(Self {
                match_score: 2,
                mismatch_score: -1,
                gap_score: -4,
                description: Some("Strict RNA alignment (mismatches penalized)".to_string()),
                ..Self::default()
            }),
            "rna-permissive" => Ok(Self {
                match_score: 1,
                mismatch_score: 0,
                gap_score: -2,
                description: Some("Permissive RNA alignment (cheaper gaps)".to_string()),
                ..Self::default()
            }),
            _ => Err(format!(
                "Unknown alignment mode: {}. Use: rna, rna-strict, rna-permissive",
                mode
            )),
        }
    }

    /// Create custom configuration
    pub fn custom(match_score: i32, mismatch_score: i32, gap_score: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_score,
            description: Some("Custom alignment parameters".to_string()),
            ..Self::default()
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Check that the scoring policy is usable
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("match score", self.match_score),
            ("mismatch score", self.mismatch_score),
            ("gap score", self.gap_score),
        ] {
            if value.unsigned_abs() > MAX_ABS_SCORE.unsigned_abs() {
                return Err(format!(
                    "{} {} is out of range (-{}..={})",
                    name, value, MAX_ABS_SCORE, MAX_ABS_SCORE
                ));
            }
        }
        if self.gap_score > 0 {
            return Err(format!("Gap score must not be positive (got {})", self.gap_score));
        }
        if self.match_score <= self.mismatch_score {
            return Err(format!(
                "Match score ({}) must be greater than mismatch score ({})",
                self.match_score, self.mismatch_score
            ));
        }
        if self.max_length == 0 {
            return Err("Maximum sequence length must be at least 1".to_string());
        }
        if self.max_length > MAX_SEQUENCE_LENGTH {
            return Err(format!(
                "Maximum sequence length {} exceeds the supported limit of {}",
                self.max_length, MAX_SEQUENCE_LENGTH
            ));
        }
        Ok(())
    }

    /// Symbol equality under the configured case convention
    #[inline]
    pub fn symbols_equal(&self, a: u8, b: u8) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(&b)
        }
    }

    #[inline]
    pub fn similarity(&self, a: u8, b: u8) -> i32 {
        if self.symbols_equal(a, b) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// Summary statistics of an aligned pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub snps: usize,
    pub indel_events: usize,
    pub indel_bases: usize,
    pub alignment_length: usize,
    pub identity_percent: f64,
}

/// Compute alignment statistics from an aligned pair
pub fn compute_alignment_stats(aligned: &AlignedPair, case_sensitive: bool) -> AlignmentStats {
    let mut snps = 0;
    let mut matches = 0;
    let mut indel_events = 0;
    let mut indel_bases = 0;
    let mut in_gap = false;

    for (r, q) in aligned.columns() {
        if r == GAP || q == GAP {
            if !in_gap {
                indel_events += 1;
                in_gap = true;
            }
            indel_bases += 1;
        } else {
            in_gap = false;
            let equal = if case_sensitive {
                r == q
            } else {
                r.eq_ignore_ascii_case(&q)
            };
            if equal {
                matches += 1;
            } else {
                snps += 1;
            }
        }
    }

    let alignment_length = aligned.len();
    let identity_percent = if alignment_length == 0 {
        100.0
    } else {
        matches as f64 * 100.0 / alignment_length as f64
    };

    AlignmentStats {
        snps,
        indel_events,
        indel_bases,
        alignment_length,
        identity_percent,
    }
}
