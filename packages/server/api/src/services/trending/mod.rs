pub mod developers;
pub mod fetcher;

use crate::config::Config;
use crate::services::github::{GithubApi, GithubError};
use chrono::{DateTime, Utc};
use fetcher::MetricFetcher;
use shared::dto::{DeveloperListing, FallbackListing, RepositoryListing, UnscoredRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use trending_domain::{
    rank, score_batch, DatasetStats, DateRange, Diagnostics, TimeWindow, RESULT_LIMIT,
};

/// Result of a repository listing request.
#[derive(Debug)]
pub enum RepositoryOutcome {
    Ranked(RepositoryListing),
    /// The dual search was unavailable; items are unscored upstream order.
    Fallback(FallbackListing),
}

pub struct TrendingService {
    github: Arc<dyn GithubApi>,
    fetcher: MetricFetcher,
    debug: bool,
    repo_lookup_timeout: Duration,
}

impl TrendingService {
    pub fn new(github: Arc<dyn GithubApi>, config: &Config) -> Self {
        Self {
            fetcher: MetricFetcher::new(github.clone(), config.upstream_timeout),
            github,
            debug: config.debug,
            repo_lookup_timeout: config.repo_lookup_timeout,
        }
    }

    /// Fetch, score, normalize and rank one batch. Everything is measured
    /// against the single instant `now`.
    pub async fn repositories(
        &self,
        language: Option<&str>,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> Result<RepositoryOutcome, GithubError> {
        let date_range = DateRange::new(window, now);

        let batch = match self.fetcher.fetch_batch(language, date_range.from_date).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(error = %e, "Advanced trending search failed, falling back to simple search");
                return self.fallback(language, date_range, now).await;
            }
        };

        let scored = score_batch(batch, now);
        let stats = DatasetStats::from_batch(&scored);
        let items = rank(scored, RESULT_LIMIT);
        let debug = self.debug.then(|| Diagnostics::new(stats, &items, now));

        info!(
            language = language.unwrap_or("any"),
            since = %window,
            count = items.len(),
            "Ranked trending repositories"
        );

        Ok(RepositoryOutcome::Ranked(RepositoryListing {
            total_count: items.len(),
            items,
            generated_at: now,
            date_range,
            debug,
        }))
    }

    async fn fallback(
        &self,
        language: Option<&str>,
        date_range: DateRange,
        now: DateTime<Utc>,
    ) -> Result<RepositoryOutcome, GithubError> {
        let page = self.fetcher.fetch_fallback(language).await?;

        Ok(RepositoryOutcome::Fallback(FallbackListing {
            items: page.items.into_iter().map(UnscoredRepository::from).collect(),
            total_count: page.total_count,
            generated_at: now,
            date_range,
            degraded: true,
        }))
    }

    pub async fn developers(
        &self,
        language: Option<&str>,
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> DeveloperListing {
        developers::trending_developers(
            self.github.as_ref(),
            language,
            window,
            now,
            self.repo_lookup_timeout,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::fetcher::tests::{at, Canned, FakeGithub};
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0).unwrap()
    }

    fn service(canned: Vec<(&'static str, Canned)>, debug: bool) -> TrendingService {
        let github = FakeGithub {
            by_sort: canned.into_iter().collect(),
        };
        let config = Config {
            upstream_timeout: Duration::from_millis(100),
            debug,
            ..Config::default()
        };
        TrendingService::new(Arc::new(github), &config)
    }

    #[tokio::test]
    async fn test_ranked_listing() {
        let now = now();
        let service = service(
            vec![
                ("updated", Canned::Page(vec![at(now, 1, 10, 100), at(now, 2, 100, 10)])),
                ("stars", Canned::Page(vec![at(now, 2, 100, 10)])),
            ],
            false,
        );

        let outcome = service
            .repositories(Some("rust"), TimeWindow::Weekly, now)
            .await
            .unwrap();
        let RepositoryOutcome::Ranked(listing) = outcome else {
            panic!("expected a ranked listing");
        };

        assert_eq!(listing.total_count, 2);
        assert_eq!(listing.items[0].metric.id, 2);
        assert!(listing.items[0].z_score > 0.0);
        assert!(listing.debug.is_none());
        assert_eq!(listing.date_range.from_date.to_string(), "2024-05-13");
    }

    #[tokio::test]
    async fn test_debug_block_in_development() {
        let now = now();
        let service = service(
            vec![("updated", Canned::Page(vec![at(now, 1, 10, 100), at(now, 2, 100, 10)]))],
            true,
        );

        let RepositoryOutcome::Ranked(listing) = service
            .repositories(None, TimeWindow::Daily, now)
            .await
            .unwrap()
        else {
            panic!("expected a ranked listing");
        };

        let debug = listing.debug.unwrap();
        assert_eq!(debug.dataset_stats.total_repos, 2);
        assert_eq!(debug.dataset_stats.positive_z_count, 1);
        assert_eq!(debug.top_results[0].name, "org/r2");
    }

    #[tokio::test]
    async fn test_fallback_failure_keeps_upstream_status() {
        // The fallback query also sorts by "updated", so it fails too.
        let now = now();
        let service = service(
            vec![("updated", Canned::Fail(500)), ("stars", Canned::Fail(500))],
            false,
        );

        let err = service
            .repositories(None, TimeWindow::Daily, now)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_empty_branches_are_not_a_failure() {
        let service = service(vec![], false);

        let RepositoryOutcome::Ranked(listing) = service
            .repositories(None, TimeWindow::Monthly, now())
            .await
            .unwrap()
        else {
            panic!("expected a ranked listing");
        };

        assert!(listing.items.is_empty());
        assert_eq!(listing.total_count, 0);
    }
}
