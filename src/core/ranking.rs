// ranking.rs - Z-score ranking of mutations by structural impact

use serde::{Deserialize, Serialize};

/// Default number of mutations kept by `rank_mutations`
pub const DEFAULT_TOP: usize = 10;

/// Externally computed structural distances for one mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationScore {
    pub key: String,
    /// Base-pair probability distance (RNApdist)
    pub pdist: Option<f64>,
    /// Secondary structure distance, full representation (RNAdistance -Df)
    pub distance: Option<f64>,
}

/// A mutation with its standardized scores and 1-based rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMutation {
    pub rank: usize,
    pub key: String,
    pub pdist_z: f64,
    pub distance_z: f64,
    pub z_score: f64,
}

/// Standard scores over the present values (population standard deviation).
/// Missing inputs stay missing; a sample with no spread yields all missing.
pub fn zscores(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return vec![None; values.len()];
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return vec![None; values.len()];
    }

    values
        .iter()
        .map(|v| v.map(|x| (x - mean) / std_dev))
        .collect()
}

/// Rank by `z(pdist) + z(distance)`, highest first, keeping at most `top` entries.
/// Mutations missing either standardized score are dropped; ties keep input order.
pub fn rank_mutations(scores: &[MutationScore], top: usize) -> Vec<RankedMutation> {
    let pdist: Vec<Option<f64>> = scores.iter().map(|s| s.pdist).collect();
    let distance: Vec<Option<f64>> = scores.iter().map(|s| s.distance).collect();
    let pdist_z = zscores(&pdist);
    let distance_z = zscores(&distance);

    let mut ranked: Vec<RankedMutation> = scores
        .iter()
        .zip(pdist_z.into_iter().zip(distance_z))
        .filter_map(|(score, (p, d))| {
            let (p, d) = (p?, d?);
            Some(RankedMutation {
                rank: 0,
                key: score.key.clone(),
                pdist_z: p,
                distance_z: d,
                z_score: p + d,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
    ranked.truncate(top);
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(key: &str, pdist: Option<f64>, distance: Option<f64>) -> MutationScore {
        MutationScore {
            key: key.to_string(),
            pdist,
            distance,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zscores_population_std() {
        let z = zscores(&[Some(1.0), Some(2.0), Some(3.0)]);
        let expected = 1.0 / (2.0f64 / 3.0).sqrt();
        assert!(approx(z[0].unwrap(), -expected));
        assert!(approx(z[1].unwrap(), 0.0));
        assert!(approx(z[2].unwrap(), expected));
    }

    #[test]
    fn test_zscores_omit_missing() {
        let z = zscores(&[Some(2.0), None, Some(4.0)]);
        assert!(approx(z[0].unwrap(), -1.0));
        assert!(z[1].is_none());
        assert!(approx(z[2].unwrap(), 1.0));
    }

    #[test]
    fn test_zscores_degenerate() {
        assert!(zscores(&[Some(5.0), Some(5.0)]).iter().all(Option::is_none));
        assert!(zscores(&[None, None]).iter().all(Option::is_none));
        assert!(zscores(&[]).is_empty());
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let scores = vec![
            score("A_1_C", Some(0.1), Some(2.0)),
            score("A_1_G", Some(0.9), Some(8.0)),
            score("A_1_U", Some(0.5), Some(5.0)),
            score("A_1_-", Some(0.3), None),
        ];
        let ranked = rank_mutations(&scores, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "A_1_G");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].key, "A_1_U");
        assert_eq!(ranked[1].rank, 2);
        assert!(ranked[0].z_score > ranked[1].z_score);
        assert!(approx(ranked[0].z_score, ranked[0].pdist_z + ranked[0].distance_z));
    }

    #[test]
    fn test_rank_drops_incomplete_and_keeps_tie_order() {
        let scores = vec![
            score("C_2_A", Some(1.0), Some(1.0)),
            score("C_2_G", Some(1.0), Some(1.0)),
            score("C_2_U", Some(3.0), Some(3.0)),
            score("C_2_-", None, Some(9.0)),
        ];
        let ranked = rank_mutations(&scores, DEFAULT_TOP);
        let keys: Vec<&str> = ranked.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["C_2_U", "C_2_A", "C_2_G"]);
    }
}
