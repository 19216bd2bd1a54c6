//! Per-repository raw trending score.
//!
//! Depends only on the repository and the instant it is scored at; nothing
//! here looks at the rest of the batch.

use crate::metric::RepositoryMetric;
use chrono::{DateTime, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days from `earlier` to `later`.
fn days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / MS_PER_DAY
}

/// Repository age in days, never below one.
pub fn age_days(metric: &RepositoryMetric, now: DateTime<Utc>) -> f64 {
    days_between(now, metric.created_at).max(1.0)
}

/// Stars gained per day of age.
pub fn star_velocity(metric: &RepositoryMetric, now: DateTime<Utc>) -> f64 {
    metric.stars as f64 / age_days(metric, now)
}

/// Pushes decay over three days, other updates over a week; the stronger
/// of the two wins. A repository never pushed to only has its update term.
fn recency_boost(metric: &RepositoryMetric, now: DateTime<Utc>) -> f64 {
    // Timestamps after `now` count as "just now".
    let since_update = days_between(now, metric.updated_at).max(0.0);
    let update_boost = 1.0 / (1.0 + since_update / 7.0);

    match metric.pushed_at {
        Some(pushed_at) => {
            let since_push = days_between(now, pushed_at).max(0.0);
            f64::max(update_boost, 1.0 / (1.0 + since_push / 3.0))
        }
        None => update_boost,
    }
}

fn engagement_ratio(metric: &RepositoryMetric) -> f64 {
    if metric.stars == 0 {
        return 0.0;
    }
    (metric.forks + metric.watchers) as f64 / metric.stars as f64
}

/// Younger repositories get their velocity weighted up.
fn velocity_weight(age_days: f64) -> f64 {
    if age_days < 30.0 {
        2.0
    } else if age_days < 90.0 {
        1.5
    } else {
        1.0
    }
}

/// Raw trending score before batch normalization. Always non-negative.
pub fn raw_score(metric: &RepositoryMetric, now: DateTime<Utc>) -> f64 {
    let age = age_days(metric, now);
    let velocity = metric.stars as f64 / age;

    velocity
        * velocity_weight(age)
        * recency_boost(metric, now)
        * (1.0 + engagement_ratio(metric) * 0.3)
}
