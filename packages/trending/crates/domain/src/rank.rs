use crate::metric::RepositoryMetric;
use crate::normalize::{final_score, BatchStats, Tier};
use crate::score::{age_days, raw_score, star_velocity};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Size of a ranked listing.
pub const RESULT_LIMIT: usize = 25;

const TOP_RESULTS: usize = 10;

/// A repository with its scores for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRepository {
    #[serde(flatten)]
    pub metric: RepositoryMetric,
    #[serde(rename = "raw_trending_score")]
    pub raw_score: f64,
    pub z_score: f64,
    #[serde(rename = "stars_velocity")]
    pub star_velocity: f64,
    #[serde(rename = "final_trending_score")]
    pub final_score: f64,
}

/// Scores every metric against the batch's own statistics, keeping input
/// order.
pub fn score_batch(metrics: Vec<RepositoryMetric>, now: DateTime<Utc>) -> Vec<ScoredRepository> {
    let raws: Vec<f64> = metrics.iter().map(|m| raw_score(m, now)).collect();
    let stats = BatchStats::from_scores(&raws);

    metrics
        .into_iter()
        .zip(raws)
        .map(|(metric, raw)| {
            let z = stats.z_score(raw);
            ScoredRepository {
                star_velocity: star_velocity(&metric, now),
                raw_score: raw,
                z_score: z,
                final_score: final_score(raw, z),
                metric,
            }
        })
        .collect()
}

/// Orders by final score, highest first, and keeps the top `limit`.
/// Equal scores keep their batch order.
pub fn rank(mut scored: Vec<ScoredRepository>, limit: usize) -> Vec<ScoredRepository> {
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    scored.truncate(limit);
    scored
}

/// Read-only statistics about one ranking, attached in development mode.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub algorithm: &'static str,
    pub z_score_explanation: &'static str,
    pub scoring_rules: Vec<ScoringRule>,
    pub dataset_stats: DatasetStats,
    pub top_results: Vec<TopResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringRule {
    pub condition: &'static str,
    pub effect: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_repos: usize,
    pub mean_z_score: f64,
    pub positive_z_count: usize,
    pub highly_trending_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopResult {
    pub name: String,
    pub z_score: f64,
    pub stars_velocity: f64,
    pub stars: u64,
    pub age_days: i64,
    pub final_score: f64,
}

impl DatasetStats {
    /// Computed over the whole scored batch, before truncation.
    pub fn from_batch(batch: &[ScoredRepository]) -> Self {
        let total = batch.len();
        let mean_z_score = if total == 0 {
            0.0
        } else {
            batch.iter().map(|r| r.z_score).sum::<f64>() / total as f64
        };

        Self {
            total_repos: total,
            mean_z_score,
            positive_z_count: batch.iter().filter(|r| r.z_score > 0.0).count(),
            highly_trending_count: batch
                .iter()
                .filter(|r| Tier::of(r.z_score) == Tier::Exceptional)
                .count(),
        }
    }
}

impl Diagnostics {
    pub fn new(
        dataset_stats: DatasetStats,
        ranked: &[ScoredRepository],
        now: DateTime<Utc>,
    ) -> Self {
        let top_results = ranked
            .iter()
            .take(TOP_RESULTS)
            .map(|r| TopResult {
                name: r.metric.full_name.clone(),
                z_score: r.z_score,
                stars_velocity: r.star_velocity,
                stars: r.metric.stars,
                age_days: age_days(&r.metric, now).floor() as i64,
                final_score: r.final_score,
            })
            .collect();

        Self {
            algorithm: "Z-score based trending detection",
            z_score_explanation: "z = (x - μ) / σ where x=score, μ=mean, σ=std_dev",
            scoring_rules: Tier::ALL
                .iter()
                .map(|t| ScoringRule {
                    condition: t.condition(),
                    effect: t.description(),
                })
                .collect(),
            dataset_stats,
            top_results,
        }
    }
}
