// mutations.rs - Single-point mutation keys: enumeration, parsing and application

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Marker used in mutation keys for the missing side of an indel
const INDEL_MARKER: char = '-';

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i)([ACGTU-])_([1-9][0-9]*)_([ACGTU-])$").expect("mutation key regex is valid")
    })
}

/// One point mutation of a wild-type sequence; positions are 1-based.
///
/// Insertions at position `p` place the new symbol before the `p`-th symbol,
/// so `len + 1` appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Substitution { position: usize, from: u8, to: u8 },
    Deletion { position: usize, from: u8 },
    Insertion { position: usize, to: u8 },
}

impl Mutation {
    pub fn position(&self) -> usize {
        match *self {
            Mutation::Substitution { position, .. }
            | Mutation::Deletion { position, .. }
            | Mutation::Insertion { position, .. } => position,
        }
    }

    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Apply to `sequence`, checking the position and the expected wild-type symbol
    pub fn apply(&self, sequence: &str) -> Result<String, String> {
        let bytes = sequence.as_bytes();
        let mut mutated = Vec::with_capacity(bytes.len() + 1);

        match *self {
            Mutation::Substitution { position, from, to } => {
                let index = self.site_index(bytes)?;
                check_symbol(bytes[index], from, position)?;
                mutated.extend_from_slice(bytes);
                mutated[index] = to;
            }
            Mutation::Deletion { position, from } => {
                let index = self.site_index(bytes)?;
                check_symbol(bytes[index], from, position)?;
                mutated.extend_from_slice(&bytes[..index]);
                mutated.extend_from_slice(&bytes[index + 1..]);
            }
            Mutation::Insertion { position, to } => {
                if position == 0 || position > bytes.len() + 1 {
                    return Err(format!(
                        "Insertion position {} is outside 1..={} for a sequence of length {}",
                        position,
                        bytes.len() + 1,
                        bytes.len()
                    ));
                }
                let index = position - 1;
                mutated.extend_from_slice(&bytes[..index]);
                mutated.push(to);
                mutated.extend_from_slice(&bytes[index..]);
            }
        }

        String::from_utf8(mutated).map_err(|_| "Mutated sequence is not valid ASCII".to_string())
    }

    fn site_index(&self, bytes: &[u8]) -> Result<usize, String> {
        let position = self.position();
        if position == 0 || position > bytes.len() {
            return Err(format!(
                "Mutation {} targets position {} of a sequence of length {}",
                self,
                position,
                bytes.len()
            ));
        }
        Ok(position - 1)
    }
}

fn check_symbol(actual: u8, expected: u8, position: usize) -> Result<(), String> {
    if actual.eq_ignore_ascii_case(&expected) {
        Ok(())
    } else {
        Err(format!(
            "Expected '{}' at position {} but found '{}'",
            expected as char, position, actual as char
        ))
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mutation::Substitution { position, from, to } => {
                write!(f, "{}_{}_{}", from as char, position, to as char)
            }
            Mutation::Deletion { position, from } => {
                write!(f, "{}_{}_{}", from as char, position, INDEL_MARKER)
            }
            Mutation::Insertion { position, to } => {
                write!(f, "{}_{}_{}", INDEL_MARKER, position, to as char)
            }
        }
    }
}

impl FromStr for Mutation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = key_pattern()
            .captures(s.trim())
            .ok_or_else(|| format!("Invalid mutation key: '{}'. Expected e.g. A_10_U, A_10_-, -_10_U", s))?;

        let from = caps[1].as_bytes()[0].to_ascii_uppercase();
        let to = caps[3].as_bytes()[0].to_ascii_uppercase();
        let position = caps[2]
            .parse::<usize>()
            .map_err(|e| format!("Invalid position in mutation key '{}': {}", s, e))?;

        let marker = INDEL_MARKER as u8;
        match (from == marker, to == marker) {
            (false, false) if from == to => Err(format!(
                "Mutation key '{}' does not change the sequence",
                s
            )),
            (false, false) => Ok(Mutation::Substitution { position, from, to }),
            (false, true) => Ok(Mutation::Deletion { position, from }),
            (true, false) => Ok(Mutation::Insertion { position, to }),
            (true, true) => Err(format!("Mutation key '{}' has no nucleotide", s)),
        }
    }
}

/// A mutation together with the sequence it produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutantSequence {
    pub mutation: Mutation,
    pub sequence: String,
}

/// Number of point mutations `enumerate_mutations` yields for a sequence of `length`
/// whose symbols all belong to a `symbols`-letter alphabet
pub fn mutation_count(length: usize, symbols: usize) -> usize {
    symbols.saturating_sub(1) * length + length + symbols * (length + 1)
}

/// Every single-point mutation of `sequence`: substitutions, then deletions, then insertions.
///
/// Symbols are compared case-insensitively and keys are always uppercase, so
/// every key parses back to the same `Mutation`. Unmutated symbols keep their case.
pub fn enumerate_mutations(sequence: &str, nucleotides: &[u8]) -> Vec<MutantSequence> {
    let bytes = sequence.as_bytes();
    let mut mutants = Vec::with_capacity(mutation_count(bytes.len(), nucleotides.len()));

    let mut push = |mutation: Mutation, mutated: Vec<u8>| {
        // Inputs are ASCII, so slicing and splicing never breaks UTF-8
        let sequence = String::from_utf8_lossy(&mutated).into_owned();
        mutants.push(MutantSequence { mutation, sequence });
    };

    for (i, &symbol) in bytes.iter().enumerate() {
        let from = symbol.to_ascii_uppercase();
        for &to in nucleotides {
            if !to.eq_ignore_ascii_case(&from) {
                let mut mutated = bytes.to_vec();
                mutated[i] = to;
                let to = to.to_ascii_uppercase();
                push(Mutation::Substitution { position: i + 1, from, to }, mutated);
            }
        }
    }

    for (i, &symbol) in bytes.iter().enumerate() {
        let mut mutated = Vec::with_capacity(bytes.len() - 1);
        mutated.extend_from_slice(&bytes[..i]);
        mutated.extend_from_slice(&bytes[i + 1..]);
        let from = symbol.to_ascii_uppercase();
        push(Mutation::Deletion { position: i + 1, from }, mutated);
    }

    for i in 0..=bytes.len() {
        for &to in nucleotides {
            let mut mutated = Vec::with_capacity(bytes.len() + 1);
            mutated.extend_from_slice(&bytes[..i]);
            mutated.push(to);
            mutated.extend_from_slice(&bytes[i..]);
            let to = to.to_ascii_uppercase();
            push(Mutation::Insertion { position: i + 1, to }, mutated);
        }
    }

    mutants
}

/// Apply each key independently to `sequence`, preserving order
pub fn apply_all(sequence: &str, keys: &[String]) -> Result<Vec<MutantSequence>, String> {
    keys.iter()
        .map(|key| {
            let mutation: Mutation = key.parse()?;
            let mutated = mutation.apply(sequence)?;
            Ok(MutantSequence {
                mutation,
                sequence: mutated,
            })
        })
        .collect()
}
