// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub reference: Option<String>,
    pub query: Option<String>,
    pub reference_file: Option<String>,
    pub query_file: Option<String>,
    pub scores: Option<String>,
    pub top: Option<usize>,
    pub output: Option<String>,
    pub format: Option<String>,

    // Alignment settings
    pub alignment_mode: Option<String>,
    pub match_score: Option<i32>,
    pub mismatch_score: Option<i32>,
    pub gap_score: Option<i32>,
    pub case_sensitive: Option<bool>,
    pub max_length: Option<usize>,
    pub alphabet: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        eprintln!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        eprintln!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# rnadiff.toml - Configuration file for rnadiff
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Wild-type sequence, inline or from a .fasta/.txt file
# reference = "AUGCUAUGGAUGCUAGCUAUGG"
reference_file = "wild_type.fasta"

# Mutant sequence(s), inline or from a .fasta/.txt file (every FASTA record is aligned)
# query = "AUGCUAUGGAUGCUAGCUAUGU"
query_file = "mutants.fasta"

# CSV of per-mutation scores to rank (columns: Mutation, RNApdist, RNAdistance(f))
# scores = "mutation_results.csv"

# Number of top-ranked mutations to keep
top = 10

# Output file (omit to print to stdout)
output = "alignment.txt"

# Output format: text, tsv, json
format = "text"

# =============================================================================
# ALIGNMENT SETTINGS
# =============================================================================

# Alignment mode: rna, rna-strict, rna-permissive
alignment_mode = "rna"

# Custom scores (override preset mode)
# match_score = 1
# mismatch_score = 0
# gap_score = -3

# Compare symbols case-sensitively
case_sensitive = false

# Reject sequences longer than this
max_length = 5000

# Input alphabet: rna, dna, nucleotide (T or U, never both)
alphabet = "nucleotide"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.reference_file.as_deref(), Some("wild_type.fasta"));
        assert_eq!(config.top, Some(10));
        assert_eq!(config.alignment_mode.as_deref(), Some("rna"));
        assert_eq!(config.case_sensitive, Some(false));
        assert_eq!(config.max_length, Some(5000));
        assert!(config.match_score.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::new());
    }
}
