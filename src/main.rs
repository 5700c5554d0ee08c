// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rnadiff::cli::Config;
use rnadiff::core::{mutation_count, MutationScore, RankedMutation};
use rnadiff::data::{clean_sequence, SequenceRecord};
use rnadiff::output::{render_mutations, write_mutations, write_rankings};
use rnadiff::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        eprintln!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation = validate_args(&args)?;
    let config = &validation.alignment_config;

    eprintln!("🚀 rnadiff v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("🎯 Mode: {}", validation.run_mode.description());
    eprintln!(
        "⚙️  Scoring: {} (match {}, mismatch {}, gap {})",
        config.description.as_deref().unwrap_or("Custom parameters"),
        config.match_score, config.mismatch_score, config.gap_score
    );
    eprintln!("🔤 Alphabet: {}", config.alphabet.description());

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        eprintln!("🧵 Threads: {}", n);
    } else {
        eprintln!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let reference = load_reference(&args, config)?;
    eprintln!(
        "🧬 Reference '{}': {} nt",
        reference.id,
        reference.sequence.len()
    );

    let start = Instant::now();
    match &validation.run_mode {
        RunMode::Enumerate => run_enumerate(&args, &reference, config)?,
        RunMode::Rank { scores_path } => {
            run_rank(&args, &validation, &reference, scores_path, &command_line)?
        }
        RunMode::Pair => run_pair(&args, &validation, &reference, &command_line)?,
    }

    if !args.dry_run {
        eprintln!("⏱️  Completed in {:.2?}", start.elapsed());
    }
    Ok(())
}

/// Load and validate the wild-type sequence; only the first record of a file is used
fn load_reference(args: &Args, config: &AlignmentConfig) -> Result<SequenceRecord, String> {
    let record = match (&args.reference, &args.reference_file) {
        (Some(sequence), _) => SequenceRecord::new("reference", sequence.as_str()),
        (None, Some(path)) => {
            let mut records = load_sequences(Path::new(path))?;
            if records.len() > 1 {
                eprintln!(
                    "⚠️  {} contains {} records, using the first ('{}')",
                    path,
                    records.len(),
                    records[0].id
                );
            }
            records.swap_remove(0)
        }
        (None, None) => return Err("--reference or --reference-file is required".to_string()),
    };

    let sequence = normalize_sequence(&record.sequence, SequenceSide::Reference, config)
        .map_err(|e| e.to_string())?;
    Ok(SequenceRecord::new(record.id, sequence))
}

/// Queries are cleaned but not validated: invalid ones surface as unaligned entries
fn load_queries(args: &Args, config: &AlignmentConfig) -> Result<Vec<SequenceRecord>, String> {
    let records = match (&args.query, &args.query_file) {
        (Some(sequence), _) => vec![SequenceRecord::new("query", sequence.as_str())],
        (None, Some(path)) => load_sequences(Path::new(path))?,
        (None, None) => return Err("--query or --query-file is required".to_string()),
    };

    Ok(records
        .into_iter()
        .map(|r| {
            let sequence = clean_sequence(&r.sequence, config.case_sensitive);
            SequenceRecord::new(r.id, sequence)
        })
        .collect())
}

fn progress_bar(len: usize) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} alignments ({eta})")
            .map_err(|e| format!("Invalid progress template: {}", e))?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Align the reference against every sequence, with a progress bar for batches
fn align_batch(
    reference: &str,
    sequences: &[&str],
    config: &AlignmentConfig,
) -> Result<Vec<AlignmentOutcome>, String> {
    if sequences.len() <= 1 {
        return Ok(align_many(reference, sequences, config, None));
    }

    let pb = progress_bar(sequences.len())?;
    let outcomes = align_many(reference, sequences, config, Some(&pb));
    pb.finish_and_clear();
    Ok(outcomes)
}

fn summarize(entries: &[ReportEntry]) {
    let failed = entries.iter().filter(|e| !e.outcome.is_aligned()).count();
    for entry in entries {
        match entry.outcome.notice() {
            Some(notice) => eprintln!("⚠️  {}: {}", entry.label, notice),
            None => eprintln!(
                "🔍 {}: {} substitution(s)",
                entry.label,
                entry.outcome.substitutions().len()
            ),
        }
    }
    if failed == 0 {
        eprintln!("✅ {} alignment(s) completed", entries.len());
    } else {
        eprintln!(
            "✅ {} alignment(s) completed, {} shown unaligned",
            entries.len() - failed,
            failed
        );
    }
}

fn emit_report(
    args: &Args,
    validation: &ValidationResult,
    entries: &[ReportEntry],
    command_line: &str,
) -> Result<(), String> {
    let case_sensitive = validation.alignment_config.case_sensitive;
    match &args.output {
        Some(path) => write_report(path, entries, validation.format, case_sensitive, command_line),
        None => {
            let report = render_report(entries, validation.format, case_sensitive, command_line)?;
            println!("{}", report);
            Ok(())
        }
    }
}

fn run_pair(
    args: &Args,
    validation: &ValidationResult,
    reference: &SequenceRecord,
    command_line: &str,
) -> Result<(), String> {
    let config = &validation.alignment_config;
    let queries = load_queries(args, config)?;
    eprintln!("📊 Queries: {}", queries.len());

    if args.dry_run {
        eprintln!("✅ Dry run completed successfully");
        return Ok(());
    }

    let sequences: Vec<&str> = queries.iter().map(|q| q.sequence.as_str()).collect();
    let outcomes = align_batch(&reference.sequence, &sequences, config)?;

    let entries: Vec<ReportEntry> = queries
        .iter()
        .zip(outcomes)
        .map(|(query, outcome)| ReportEntry::new(query.id.as_str(), outcome))
        .collect();

    summarize(&entries);
    emit_report(args, validation, &entries, command_line)
}

fn run_enumerate(
    args: &Args,
    reference: &SequenceRecord,
    config: &AlignmentConfig,
) -> Result<(), String> {
    let symbols = config.alphabet.mutation_symbols(reference.sequence.as_bytes());
    eprintln!(
        "🧪 Nucleotides: {} ({} mutations expected)",
        String::from_utf8_lossy(symbols),
        mutation_count(reference.sequence.len(), symbols.len())
    );

    if args.dry_run {
        eprintln!("✅ Dry run completed successfully");
        return Ok(());
    }

    let mutants = enumerate_mutations(&reference.sequence, symbols);
    match &args.output {
        Some(path) => write_mutations(path, &mutants),
        None => {
            print!("{}", render_mutations(&mutants));
            Ok(())
        }
    }
}

fn run_rank(
    args: &Args,
    validation: &ValidationResult,
    reference: &SequenceRecord,
    scores_path: &str,
    command_line: &str,
) -> Result<(), String> {
    let scores: Vec<MutationScore> = load_mutation_scores(Path::new(scores_path))?;
    eprintln!("📊 Scored mutations: {} (from {})", scores.len(), scores_path);

    if args.dry_run {
        eprintln!("✅ Dry run completed successfully");
        return Ok(());
    }

    let ranked: Vec<RankedMutation> = rank_mutations(&scores, args.top);
    if ranked.is_empty() {
        return Err(format!(
            "No mutation in {} has both RNApdist and RNAdistance(f) scores with non-zero spread",
            scores_path
        ));
    }
    eprintln!("🏆 Top {} mutations by combined Z-score", ranked.len());

    let keys: Vec<String> = ranked.iter().map(|r| r.key.clone()).collect();
    let mutants = apply_all(&reference.sequence, &keys)?;

    let sequences: Vec<&str> = mutants.iter().map(|m| m.sequence.as_str()).collect();
    let outcomes = align_batch(&reference.sequence, &sequences, &validation.alignment_config)?;

    match &args.output {
        Some(path) => write_rankings(path, &ranked, &mutants, &outcomes),
        None => {
            let entries: Vec<ReportEntry> = ranked
                .iter()
                .zip(outcomes)
                .map(|(r, outcome)| {
                    let label = format!("#{} {} (Z={:.3})", r.rank, r.key, r.z_score);
                    ReportEntry::new(label, outcome)
                })
                .collect();
            summarize(&entries);
            emit_report(args, validation, &entries, command_line)
        }
    }
}
