// scores.rs - CSV loader for per-mutation structural distance scores

use crate::core::ranking::MutationScore;
use std::path::Path;

const MUTATION_COLUMN: &str = "Mutation";
const PDIST_COLUMN: &str = "RNApdist";
const DISTANCE_COLUMN: &str = "RNAdistance(f)";

/// Parse a score cell as an unsigned decimal (`12`, `0.25`, `.5`).
/// Anything else, including signs, exponents, NA and tool error text, counts as missing.
fn parse_score(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_matches('"');
    let digits = cleaned.bytes().filter(u8::is_ascii_digit).count();
    let dots = cleaned.bytes().filter(|&b| b == b'.').count();
    if digits == 0 || dots > 1 || digits + dots != cleaned.len() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load mutation scores from a CSV with `Mutation`, `RNApdist` and `RNAdistance(f)` columns.
/// Extra columns are ignored.
pub fn load_mutation_scores(file_path: &Path) -> Result<Vec<MutationScore>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(file_path)
        .map_err(|e| format!("Failed to open scores file '{}': {}", file_path.display(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read scores header: {}", e))?
        .clone();

    let column = |name: &str| -> Result<usize, String> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| format!("Scores file is missing the '{}' column", name))
    };
    let mutation_idx = column(MUTATION_COLUMN)?;
    let pdist_idx = column(PDIST_COLUMN)?;
    let distance_idx = column(DISTANCE_COLUMN)?;

    let mut scores = Vec::new();
    for (line_num, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| format!("Invalid scores record at line {}: {}", line_num + 2, e))?;

        let key = record
            .get(mutation_idx)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| format!("Missing mutation key at line {}", line_num + 2))?;

        scores.push(MutationScore {
            key: key.to_string(),
            pdist: record.get(pdist_idx).and_then(parse_score),
            distance: record.get(distance_idx).and_then(parse_score),
        });
    }

    Ok(scores)
}
