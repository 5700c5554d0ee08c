// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.reference.is_none() {
            self.reference = config.reference;
        }
        if self.query.is_none() {
            self.query = config.query;
        }
        if self.reference_file.is_none() {
            self.reference_file = config.reference_file;
        }
        if self.query_file.is_none() {
            self.query_file = config.query_file;
        }
        if self.scores.is_none() {
            self.scores = config.scores;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Settings with defaults (only override defaults, not explicit CLI values)
        if self.top == 10 {
            if let Some(top) = config.top {
                self.top = top;
            }
        }
        if self.format == "text" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.alignment_mode == "rna" {
            if let Some(mode) = config.alignment_mode {
                self.alignment_mode = mode;
            }
        }
        if self.alphabet == "nucleotide" {
            if let Some(alphabet) = config.alphabet {
                self.alphabet = alphabet;
            }
        }

        // Alignment scores
        if self.match_score.is_none() {
            self.match_score = config.match_score;
        }
        if self.mismatch_score.is_none() {
            self.mismatch_score = config.mismatch_score;
        }
        if self.gap_score.is_none() {
            self.gap_score = config.gap_score;
        }
        if self.max_length.is_none() {
            self.max_length = config.max_length;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.case_sensitive && config.case_sensitive.unwrap_or(false) {
            self.case_sensitive = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
