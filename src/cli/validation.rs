// validation.rs - Input validation utilities

use std::str::FromStr;

use crate::cli::args::Args;
use crate::core::AlignmentConfig;
use crate::data::Alphabet;
use crate::output::ReportFormat;

/// What a run computes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Align the reference against one or more mutants
    Pair,
    /// List every point mutation of the reference
    Enumerate,
    /// Rank scored mutations and align the top ones against the reference
    Rank { scores_path: String },
}

impl RunMode {
    pub fn description(&self) -> &str {
        match self {
            RunMode::Pair => "pairwise alignment",
            RunMode::Enumerate => "point mutation enumeration",
            RunMode::Rank { .. } => "Z-score ranking of mutations",
        }
    }
}

pub struct ValidationResult {
    pub run_mode: RunMode,
    pub alignment_config: AlignmentConfig,
    pub format: ReportFormat,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    // Exactly one reference source
    match (&args.reference, &args.reference_file) {
        (None, None) => return Err("--reference or --reference-file is required".to_string()),
        (Some(_), Some(_)) => {
            return Err("--reference and --reference-file are mutually exclusive".to_string())
        }
        _ => {}
    }

    if args.query.is_some() && args.query_file.is_some() {
        return Err("--query and --query-file are mutually exclusive".to_string());
    }

    // Validate run mode
    let run_mode = if args.enumerate {
        if args.scores.is_some() {
            return Err("--enumerate is not compatible with --scores".to_string());
        }
        RunMode::Enumerate
    } else if let Some(scores_path) = &args.scores {
        if args.top == 0 {
            return Err("--top must be at least 1".to_string());
        }
        RunMode::Rank {
            scores_path: scores_path.clone(),
        }
    } else {
        if args.query.is_none() && args.query_file.is_none() {
            return Err("--query or --query-file is required for pairwise alignment".to_string());
        }
        RunMode::Pair
    };

    let format = ReportFormat::from_str(&args.format)?;
    let alphabet = Alphabet::from_str(&args.alphabet)?;

    // Validate and create alignment config
    let base = if args.match_score.is_some()
        || args.mismatch_score.is_some()
        || args.gap_score.is_some()
    {
        // Custom mode
        let defaults = AlignmentConfig::default();
        AlignmentConfig::custom(
            args.match_score.unwrap_or(defaults.match_score),
            args.mismatch_score.unwrap_or(defaults.mismatch_score),
            args.gap_score.unwrap_or(defaults.gap_score),
        )
    } else {
        // Preset mode
        AlignmentConfig::from_mode(&args.alignment_mode)?
    };

    let mut alignment_config = base
        .with_case_sensitive(args.case_sensitive)
        .with_alphabet(alphabet);
    if let Some(max_length) = args.max_length {
        alignment_config = alignment_config.with_max_length(max_length);
    }
    alignment_config.validate()?;

    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }

    Ok(ValidationResult {
        run_mode,
        alignment_config,
        format,
    })
}
