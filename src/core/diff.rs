// diff.rs - Aligned pairs, substitutions and diff results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::alignment::{compute_alignment_stats, AlignmentStats};

/// Gap symbol inserted into aligned sequences
pub const GAP: u8 = b'-';

/// A point substitution anchored to a 1-based reference coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub reference_symbol: char,
    pub reference_position: usize,
    pub query_symbol: char,
}

impl Substitution {
    pub fn new(reference_symbol: char, reference_position: usize, query_symbol: char) -> Self {
        Self {
            reference_symbol,
            reference_position,
            query_symbol,
        }
    }

    /// Human-readable key, e.g. `A_10_U`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.reference_symbol, self.reference_position, self.query_symbol
        )
    }
}

/// Two gapped sequences of equal length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub reference: String,
    pub query: String,
}

impl AlignedPair {
    pub fn new(reference: String, query: String) -> Self {
        Self { reference, query }
    }

    /// Build from forward-ordered alignment columns
    pub fn from_columns(columns: &[(u8, u8)]) -> Self {
        let reference: String = columns.iter().map(|&(r, _)| r as char).collect();
        let query: String = columns.iter().map(|&(_, q)| q as char).collect();
        Self { reference, query }
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Iterate over (reference, query) symbol columns
    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.reference.bytes().zip(self.query.bytes())
    }

    pub fn ungapped_reference(&self) -> String {
        ungap(&self.reference)
    }

    pub fn ungapped_query(&self) -> String {
        ungap(&self.query)
    }
}

fn ungap(aligned: &str) -> String {
    aligned.chars().filter(|&c| c != GAP as char).collect()
}

/// Result of aligning a reference against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub aligned: AlignedPair,
    pub substitutions: Vec<Substitution>,
    pub reference: String,
    pub query: String,
    pub score: i32,
}

impl DiffResult {
    pub fn stats(&self, case_sensitive: bool) -> AlignmentStats {
        compute_alignment_stats(&self.aligned, case_sensitive)
    }

    pub fn mutation_keys(&self) -> Vec<String> {
        self.substitutions.iter().map(Substitution::key).collect()
    }

    pub fn has_indels(&self) -> bool {
        self.aligned.columns().any(|(r, q)| r == GAP || q == GAP)
    }
}

/// Walk aligned columns and record every non-gap mismatch
pub fn extract_substitutions(aligned: &AlignedPair, case_sensitive: bool) -> Vec<Substitution> {
    let mut substitutions = Vec::new();
    let mut reference_position = 0;

    for (r, q) in aligned.columns() {
        if r != GAP {
            reference_position += 1;
        }
        if r == GAP || q == GAP {
            continue;
        }
        let equal = if case_sensitive {
            r == q
        } else {
            r.eq_ignore_ascii_case(&q)
        };
        if !equal {
            substitutions.push(Substitution::new(r as char, reference_position, q as char));
        }
    }

    substitutions
}

/// Marker line for highlighting: `|` match, `*` substitution, blank for gap columns
pub fn match_line(aligned: &AlignedPair, case_sensitive: bool) -> String {
    aligned
        .columns()
        .map(|(r, q)| {
            if r == GAP || q == GAP {
                ' '
            } else if (case_sensitive && r == q) || (!case_sensitive && r.eq_ignore_ascii_case(&q)) {
                '|'
            } else {
                '*'
            }
        })
        .collect()
}
