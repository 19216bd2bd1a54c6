//! Trending engine: turns a batch of repository metrics into a ranked list.
//!
//! Every stage is a pure function of its inputs and a captured `now`, so a
//! whole request is scored against one instant and its own batch statistics.

pub mod error;
pub mod metric;
pub mod normalize;
pub mod rank;
pub mod score;
pub mod window;

pub use error::DomainError;
pub use metric::{dedup_by_id, License, Owner, RepositoryMetric};
pub use normalize::{final_score, z_scores, BatchStats, Tier};
pub use rank::{
    rank, score_batch, DatasetStats, Diagnostics, ScoredRepository, ScoringRule, TopResult,
    RESULT_LIMIT,
};
pub use score::{age_days, raw_score, star_velocity};
pub use window::{DateRange, ListingType, TimeWindow};
