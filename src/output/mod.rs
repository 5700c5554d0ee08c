// mod.rs - Output formatters module

use serde::Serialize;
use std::fmt::Write as _;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::core::{match_line, AlignmentOutcome, AlignmentStats, MutantSequence, RankedMutation};

/// Columns per block in text reports
const TEXT_LINE_WIDTH: usize = 60;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Tsv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "tsv" => Ok(ReportFormat::Tsv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unsupported output format: {}. Use: text, tsv, json", s)),
        }
    }
}

/// One labelled alignment in a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub outcome: AlignmentOutcome,
}

impl ReportEntry {
    pub fn new(label: impl Into<String>, outcome: AlignmentOutcome) -> Self {
        Self {
            label: label.into(),
            outcome,
        }
    }

    fn stats(&self, case_sensitive: bool) -> Option<AlignmentStats> {
        self.outcome.diff().map(|d| d.stats(case_sensitive))
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'a str,
    generated: String,
    command: &'a str,
    entries: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    label: &'a str,
    outcome: &'a AlignmentOutcome,
    stats: Option<AlignmentStats>,
    mutations: Vec<String>,
}

fn generated_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

fn write_file(file_path: &str, content: &str) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Render one entry as a highlighted, block-wrapped alignment
fn render_text_entry(out: &mut String, entry: &ReportEntry, case_sensitive: bool) {
    let _ = writeln!(out, ">{}", entry.label);

    match &entry.outcome {
        AlignmentOutcome::Aligned(diff) => {
            let stats = diff.stats(case_sensitive);
            let _ = writeln!(
                out,
                "Score: {}  Length: {}  Substitutions: {}  Indels: {} events ({} bases)  Identity: {:.1}%",
                diff.score,
                stats.alignment_length,
                stats.snps,
                stats.indel_events,
                stats.indel_bases,
                stats.identity_percent
            );

            let markers = match_line(&diff.aligned, case_sensitive);
            let reference = diff.aligned.reference.as_bytes();
            let query = diff.aligned.query.as_bytes();
            let markers = markers.as_bytes();

            for start in (0..reference.len()).step_by(TEXT_LINE_WIDTH) {
                let end = (start + TEXT_LINE_WIDTH).min(reference.len());
                let _ = writeln!(out, "WT   {:>6} {}", start + 1, String::from_utf8_lossy(&reference[start..end]));
                let _ = writeln!(out, "            {}", String::from_utf8_lossy(&markers[start..end]));
                let _ = writeln!(out, "MUT  {:>6} {}", start + 1, String::from_utf8_lossy(&query[start..end]));
                let _ = writeln!(out);
            }

            if diff.substitutions.is_empty() {
                let _ = writeln!(out, "Substitutions: none");
            } else {
                let _ = writeln!(out, "Substitutions: {}", diff.mutation_keys().join(", "));
            }
        }
        AlignmentOutcome::Unaligned {
            reference,
            query,
            notice,
        } => {
            let _ = writeln!(out, "⚠️  {}", notice);
            let _ = writeln!(out, "WT   {}", reference);
            let _ = writeln!(out, "MUT  {}", query);
            let _ = writeln!(out, "Substitutions: none detected");
        }
    }
    let _ = writeln!(out);
}

fn render_text(entries: &[ReportEntry], case_sensitive: bool) -> String {
    let mut out = String::new();
    for entry in entries {
        render_text_entry(&mut out, entry, case_sensitive);
    }
    out
}

fn render_tsv(entries: &[ReportEntry], case_sensitive: bool, command_line: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Command: {}", command_line);
    let _ = writeln!(out, "# Generated: {}", generated_timestamp());
    let _ = writeln!(out, "# rnadiff v{}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(
        out,
        "Label\tStatus\tScore\tAlignedReference\tAlignedQuery\tSubstitutions\tSNPs\tIndelEvents\tIndelBases\tIdentity\tNotice"
    );

    for entry in entries {
        let (reference, query) = entry.outcome.display_pair();
        let keys: Vec<String> = entry.outcome.substitutions().iter().map(|s| s.key()).collect();
        let stats = entry.stats(case_sensitive);
        let score = entry
            .outcome
            .diff()
            .map(|d| d.score.to_string())
            .unwrap_or_else(|| "NA".to_string());
        let (snps, events, bases, identity) = match stats {
            Some(s) => (
                s.snps.to_string(),
                s.indel_events.to_string(),
                s.indel_bases.to_string(),
                format!("{:.2}", s.identity_percent),
            ),
            None => ("NA".into(), "NA".into(), "NA".into(), "NA".into()),
        };

        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            entry.label,
            if entry.outcome.is_aligned() { "aligned" } else { "unaligned" },
            score,
            reference,
            query,
            if keys.is_empty() { "-".to_string() } else { keys.join(",") },
            snps,
            events,
            bases,
            identity,
            entry.outcome.notice().unwrap_or("")
        );
    }
    out
}

fn render_json(
    entries: &[ReportEntry],
    case_sensitive: bool,
    command_line: &str,
) -> Result<String, String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        generated: generated_timestamp(),
        command: command_line,
        entries: entries
            .iter()
            .map(|entry| JsonEntry {
                label: &entry.label,
                outcome: &entry.outcome,
                stats: entry.stats(case_sensitive),
                mutations: entry.outcome.substitutions().iter().map(|s| s.key()).collect(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).map_err(|e| format!("Failed to serialize report: {}", e))
}

/// Render a report in the requested format
pub fn render_report(
    entries: &[ReportEntry],
    format: ReportFormat,
    case_sensitive: bool,
    command_line: &str,
) -> Result<String, String> {
    match format {
        ReportFormat::Text => Ok(render_text(entries, case_sensitive)),
        ReportFormat::Tsv => Ok(render_tsv(entries, case_sensitive, command_line)),
        ReportFormat::Json => render_json(entries, case_sensitive, command_line),
    }
}

/// Write an alignment report to a file
pub fn write_report(
    file_path: &str,
    entries: &[ReportEntry],
    format: ReportFormat,
    case_sensitive: bool,
    command_line: &str,
) -> Result<(), String> {
    let mut content = String::new();
    if format == ReportFormat::Text {
        let _ = writeln!(content, "# Command: {}", command_line);
        let _ = writeln!(content, "# Generated: {}", generated_timestamp());
        let _ = writeln!(content, "# rnadiff v{}", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(content);
    }
    content.push_str(&render_report(entries, format, case_sensitive, command_line)?);
    write_file(file_path, &content)?;
    eprintln!("✅ Alignment report written to: {}", file_path);
    Ok(())
}

/// Render enumerated mutants as `Mutation<TAB>Sequence` lines
pub fn render_mutations(mutants: &[MutantSequence]) -> String {
    let mut out = String::with_capacity(mutants.len() * 32);
    let _ = writeln!(out, "Mutation\tSequence");
    for mutant in mutants {
        let _ = writeln!(out, "{}\t{}", mutant.mutation, mutant.sequence);
    }
    out
}

/// Write enumerated mutants as TSV
pub fn write_mutations(file_path: &str, mutants: &[MutantSequence]) -> Result<(), String> {
    write_file(file_path, &render_mutations(mutants))?;
    eprintln!("✅ {} mutations written to: {}", mutants.len(), file_path);
    Ok(())
}

/// Write ranked mutations as CSV, with the mutant sequence and its aligned substitutions
pub fn write_rankings(
    file_path: &str,
    ranked: &[RankedMutation],
    mutants: &[MutantSequence],
    outcomes: &[AlignmentOutcome],
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::Writer::from_path(file_path)
        .map_err(|e| format!("Failed to create rankings file '{}': {}", file_path, e))?;

    writer
        .write_record(["rank", "Mutation", "RNApdist_z", "RNAdistance_z", "Z-score", "MutantSequence", "Substitutions"])
        .map_err(|e| format!("Write error: {}", e))?;

    for (i, entry) in ranked.iter().enumerate() {
        let sequence = mutants.get(i).map(|m| m.sequence.as_str()).unwrap_or("");
        let substitutions = outcomes
            .get(i)
            .map(|o| o.substitutions().iter().map(|s| s.key()).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        writer
            .write_record([
                entry.rank.to_string(),
                entry.key.clone(),
                format!("{:.6}", entry.pdist_z),
                format!("{:.6}", entry.distance_z),
                format!("{:.6}", entry.z_score),
                sequence.to_string(),
                substitutions,
            ])
            .map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    eprintln!("✅ Top {} mutations written to: {}", ranked.len(), file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{align_or_fallback, AlignmentConfig};

    fn entries() -> Vec<ReportEntry> {
        let config = AlignmentConfig::default();
        vec![
            ReportEntry::new("mutant_1", align_or_fallback("AUGCUAUGGA", "AUGCUAUGGU", &config)),
            ReportEntry::new("broken", align_or_fallback("AUGC", "AUGX", &config)),
        ]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TSV".parse::<ReportFormat>().unwrap(), ReportFormat::Tsv);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("phylip".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_text_report_highlights_substitution() {
        let text = render_report(&entries(), ReportFormat::Text, false, "rnadiff").unwrap();
        assert!(text.contains(">mutant_1"));
        assert!(text.contains("|||||||||*"));
        assert!(text.contains("Substitutions: A_10_U"));
        assert!(text.contains("Alignment could not be computed"));
    }

    #[test]
    fn test_text_report_wraps_long_alignments() {
        let reference = "ACGU".repeat(20);
        let outcome = align_or_fallback(&reference, &reference, &AlignmentConfig::default());
        let text = render_report(&[ReportEntry::new("long", outcome)], ReportFormat::Text, false, "").unwrap();
        assert!(text.contains("WT        1 "));
        assert!(text.contains("WT       61 "));
    }

    #[test]
    fn test_tsv_report_rows() {
        let tsv = render_report(&entries(), ReportFormat::Tsv, false, "rnadiff --format tsv").unwrap();
        let rows: Vec<&str> = tsv.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("mutant_1\taligned\t9\t"));
        assert!(rows[1].contains("\tA_10_U\t"));
        assert!(rows[2].starts_with("broken\tunaligned\tNA\tAUGC\tAUGX\t-\t"));
    }

    #[test]
    fn test_json_report() {
        let json = render_report(&entries(), ReportFormat::Json, false, "rnadiff").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value["entries"][0];
        assert_eq!(first["label"], "mutant_1");
        assert_eq!(first["outcome"]["status"], "aligned");
        assert_eq!(first["mutations"][0], "A_10_U");
        assert_eq!(first["stats"]["snps"], 1);
        assert_eq!(value["entries"][1]["outcome"]["status"], "unaligned");
        assert!(value["entries"][1]["stats"].is_null());
    }

    #[test]
    fn test_render_mutations() {
        let mutants = crate::core::enumerate_mutations("A", b"ACGU");
        let text = render_mutations(&mutants);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Mutation\tSequence");
        assert_eq!(lines[1], "A_1_C\tC");
        assert_eq!(lines.len(), 1 + mutants.len());
    }
}
