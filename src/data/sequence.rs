// sequence.rs - Input sequences: alphabets, normalization and file loading

use bio::io::fasta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::{AlignError, SequenceSide};
use crate::core::AlignmentConfig;

/// Symbol alphabet accepted by the aligner. Membership is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// A, C, G, U
    Rna,
    /// A, C, G, T
    Dna,
    /// A, C, G, T, U with T and U never mixed in one sequence
    Nucleotide,
}

impl Alphabet {
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Rna => b"ACGU",
            Alphabet::Dna => b"ACGT",
            Alphabet::Nucleotide => b"ACGTU",
        }
    }

    /// Nucleotides used when enumerating point mutations of `sequence`;
    /// the nucleotide alphabet follows whichever of T or U the sequence uses
    pub fn mutation_symbols(&self, sequence: &[u8]) -> &'static [u8] {
        match self {
            Alphabet::Dna => b"ACGT",
            Alphabet::Rna => b"ACGU",
            Alphabet::Nucleotide => {
                if sequence.iter().any(|s| s.eq_ignore_ascii_case(&b'T')) {
                    b"ACGT"
                } else {
                    b"ACGU"
                }
            }
        }
    }

    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols().contains(&symbol.to_ascii_uppercase())
    }

    /// Check every symbol of `sequence`, reporting the first offender with its 1-based position
    pub fn check(&self, sequence: &[u8], side: SequenceSide) -> Result<(), AlignError> {
        if let Some(index) = sequence.iter().position(|&s| !self.contains(s)) {
            let symbol = sequence[index];
            return Err(AlignError::invalid_input(
                side,
                format!(
                    "symbol '{}' at position {} is not in the {} alphabet",
                    symbol.escape_ascii(),
                    index + 1,
                    self
                ),
            ));
        }

        if *self == Alphabet::Nucleotide {
            let has_t = sequence.iter().any(|s| s.eq_ignore_ascii_case(&b'T'));
            let has_u = sequence.iter().any(|s| s.eq_ignore_ascii_case(&b'U'));
            if has_t && has_u {
                return Err(AlignError::invalid_input(
                    side,
                    "sequence cannot contain both T and U",
                ));
            }
        }

        Ok(())
    }

    pub fn description(&self) -> &str {
        match self {
            Alphabet::Rna => "RNA (A, C, G, U)",
            Alphabet::Dna => "DNA (A, C, G, T)",
            Alphabet::Nucleotide => "Nucleotides (A, C, G, T/U, not mixed)",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Rna => write!(f, "rna"),
            Alphabet::Dna => write!(f, "dna"),
            Alphabet::Nucleotide => write!(f, "nucleotide"),
        }
    }
}

impl FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rna" => Ok(Alphabet::Rna),
            "dna" => Ok(Alphabet::Dna),
            "nucleotide" | "nt" => Ok(Alphabet::Nucleotide),
            _ => Err(format!("Invalid alphabet: {}. Use: rna, dna, nucleotide", s)),
        }
    }
}

/// Check the length ceiling and alphabet of one aligner input
pub fn check_sequence(
    sequence: &[u8],
    side: SequenceSide,
    config: &AlignmentConfig,
) -> Result<(), AlignError> {
    if sequence.len() > config.max_length {
        return Err(AlignError::LengthLimitExceeded {
            side,
            length: sequence.len(),
            max_length: config.max_length,
        });
    }
    config.alphabet.check(sequence, side)
}

/// Strip whitespace and, unless comparing case-sensitively, uppercase
pub fn clean_sequence(raw: &str, case_sensitive: bool) -> String {
    let trimmed: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if case_sensitive {
        trimmed
    } else {
        trimmed.to_ascii_uppercase()
    }
}

/// Clean and validate raw user input
pub fn normalize_sequence(
    raw: &str,
    side: SequenceSide,
    config: &AlignmentConfig,
) -> Result<String, AlignError> {
    let normalized = clean_sequence(raw, config.case_sensitive);
    check_sequence(normalized.as_bytes(), side, config)?;
    Ok(normalized)
}

/// A named sequence read from an input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }
}

/// Load sequences from a `.fasta`/`.fa` file (all records) or a `.txt` file (first non-empty line)
pub fn load_sequences(path: &Path) -> Result<Vec<SequenceRecord>, String> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "fasta" | "fa" | "fna" => load_fasta(path),
        "txt" => load_txt(path),
        _ => Err(format!(
            "Unsupported sequence file '{}': only .fasta or .txt files are allowed",
            path.display()
        )),
    }
}

fn load_fasta(path: &Path) -> Result<Vec<SequenceRecord>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open FASTA file {}: {}", path.display(), e))?;

    let reader = fasta::Reader::new(BufReader::new(file));
    let mut records = Vec::new();

    for record_result in reader.records() {
        let record = record_result
            .map_err(|e| format!("Invalid FASTA record in {}: {}", path.display(), e))?;
        let sequence = String::from_utf8(record.seq().to_vec())
            .map_err(|_| format!("Non-ASCII sequence '{}' in {}", record.id(), path.display()))?;
        records.push(SequenceRecord::new(record.id(), sequence));
    }

    if records.is_empty() {
        return Err(format!("No FASTA records found in {}", path.display()));
    }
    Ok(records)
}

fn load_txt(path: &Path) -> Result<Vec<SequenceRecord>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read sequence file {}: {}", path.display(), e))?;

    let sequence = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| format!("No sequence found in {}", path.display()))?;

    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sequence")
        .to_string();

    Ok(vec![SequenceRecord::new(id, sequence)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_membership() {
        assert!(Alphabet::Rna.contains(b'u'));
        assert!(!Alphabet::Rna.contains(b'T'));
        assert!(Alphabet::Dna.contains(b'T'));
        assert!(!Alphabet::Nucleotide.contains(b'-'));
        assert!(!Alphabet::Nucleotide.contains(b'N'));
    }

    #[test]
    fn test_alphabet_check_reports_position() {
        let err = Alphabet::Rna.check(b"ACGXU", SequenceSide::Query).unwrap_err();
        match err {
            AlignError::InvalidInput { side, reason } => {
                assert_eq!(side, SequenceSide::Query);
                assert!(reason.contains("'X' at position 4"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_nucleotide_rejects_mixed_t_and_u() {
        assert!(Alphabet::Nucleotide.check(b"ACGT", SequenceSide::Reference).is_ok());
        assert!(Alphabet::Nucleotide.check(b"ACGU", SequenceSide::Reference).is_ok());
        assert!(Alphabet::Nucleotide.check(b"ACtU", SequenceSide::Reference).is_err());
        assert!(Alphabet::Dna.check(b"ACGU", SequenceSide::Reference).is_err());
    }

    #[test]
    fn test_normalize_sequence() {
        let config = AlignmentConfig::default();
        let seq = normalize_sequence("  augc\nuaug \n", SequenceSide::Reference, &config).unwrap();
        assert_eq!(seq, "AUGCUAUG");

        let sensitive = AlignmentConfig::default().with_case_sensitive(true);
        let seq = normalize_sequence("augC", SequenceSide::Reference, &sensitive).unwrap();
        assert_eq!(seq, "augC");
    }

    #[test]
    fn test_mutation_symbols_follow_input() {
        assert_eq!(Alphabet::Nucleotide.mutation_symbols(b"ACGT"), b"ACGT");
        assert_eq!(Alphabet::Nucleotide.mutation_symbols(b"ACGU"), b"ACGU");
        assert_eq!(Alphabet::Nucleotide.mutation_symbols(b"ACG"), b"ACGU");
        assert_eq!(Alphabet::Dna.mutation_symbols(b"ACG"), b"ACGT");
    }

    #[test]
    fn test_check_sequence_length_limit() {
        let config = AlignmentConfig::default().with_max_length(4);
        let err = check_sequence(b"ACGUA", SequenceSide::Query, &config).unwrap_err();
        assert_eq!(
            err,
            AlignError::LengthLimitExceeded {
                side: SequenceSide::Query,
                length: 5,
                max_length: 4
            }
        );
        assert!(check_sequence(b"ACGU", SequenceSide::Query, &config).is_ok());
    }

    #[test]
    fn test_alphabet_from_str() {
        assert_eq!("RNA".parse::<Alphabet>().unwrap(), Alphabet::Rna);
        assert_eq!("nt".parse::<Alphabet>().unwrap(), Alphabet::Nucleotide);
        assert!("protein".parse::<Alphabet>().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_sequences(Path::new("input.csv")).unwrap_err();
        assert!(err.contains("only .fasta or .txt"));
    }
}
