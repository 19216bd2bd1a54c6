use crate::services::github::models::SearchPage;
use crate::services::github::{GithubApi, GithubError, SearchRequest};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use trending_domain::{dedup_by_id, RepositoryMetric, RESULT_LIMIT};

/// Items requested from each search branch.
pub const BRANCH_PAGE_SIZE: u32 = 15;

const PUSHED_MIN_STARS: u32 = 10;
const CREATED_MIN_STARS: u32 = 5;
const FALLBACK_MIN_STARS: u32 = 10;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Both search branches failed (recently pushed: {pushed}; recently created: {created})")]
    AllBranchesFailed {
        pushed: GithubError,
        created: GithubError,
    },
}

fn with_language(mut q: String, language: Option<&str>) -> String {
    if let Some(language) = language {
        q.push_str(" language:");
        q.push_str(language);
    }
    q
}

/// Repositories pushed inside the window, most recently updated first.
pub fn recently_pushed_query(language: Option<&str>, cutoff: NaiveDate) -> SearchRequest {
    SearchRequest {
        q: with_language(
            format!("pushed:>={} stars:>={}", cutoff, PUSHED_MIN_STARS),
            language,
        ),
        sort: "updated",
        order: "desc",
        per_page: BRANCH_PAGE_SIZE,
    }
}

/// Repositories created inside the window, most starred first.
pub fn recently_created_query(language: Option<&str>, cutoff: NaiveDate) -> SearchRequest {
    SearchRequest {
        q: with_language(
            format!("created:>={} stars:>={}", cutoff, CREATED_MIN_STARS),
            language,
        ),
        sort: "stars",
        order: "desc",
        per_page: BRANCH_PAGE_SIZE,
    }
}

/// The single query served when the dual search is unavailable.
pub fn fallback_query(language: Option<&str>) -> SearchRequest {
    SearchRequest {
        q: with_language(format!("stars:>={}", FALLBACK_MIN_STARS), language),
        sort: "updated",
        order: "desc",
        per_page: RESULT_LIMIT as u32,
    }
}

/// Pulls one batch of candidate repositories from the search API.
pub struct MetricFetcher {
    github: Arc<dyn GithubApi>,
    timeout: Duration,
}

impl MetricFetcher {
    pub fn new(github: Arc<dyn GithubApi>, timeout: Duration) -> Self {
        Self { github, timeout }
    }

    /// Runs both branches concurrently. A failed or timed-out branch adds
    /// nothing; only when both fail is the batch unavailable.
    pub async fn fetch_batch(
        &self,
        language: Option<&str>,
        cutoff: NaiveDate,
    ) -> Result<Vec<RepositoryMetric>, FetchError> {
        let pushed = recently_pushed_query(language, cutoff);
        let created = recently_created_query(language, cutoff);

        let (pushed, created) = tokio::join!(
            self.settle("recently_pushed", &pushed),
            self.settle("recently_created", &created),
        );

        let (pushed, created) = match (pushed, created) {
            (Err(pushed), Err(created)) => {
                return Err(FetchError::AllBranchesFailed { pushed, created })
            }
            (pushed, created) => (pushed.unwrap_or_default(), created.unwrap_or_default()),
        };

        let fetched = pushed.len() + created.len();
        let batch = dedup_by_id(pushed.into_iter().chain(created));
        info!(fetched, unique = batch.len(), "Fetched trending batch");

        Ok(batch)
    }

    async fn settle(
        &self,
        branch: &'static str,
        request: &SearchRequest,
    ) -> Result<Vec<RepositoryMetric>, GithubError> {
        match self.search(request).await {
            Ok(page) => Ok(page.items),
            Err(e) => {
                warn!(branch, error = %e, "Search branch failed, contributing no results");
                Err(e)
            }
        }
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<RepositoryMetric>, GithubError> {
        tokio::time::timeout(self.timeout, self.github.search_repositories(request))
            .await
            .map_err(|_| GithubError::Timeout(self.timeout))?
    }

    /// Single simplified search, returned as-is.
    pub async fn fetch_fallback(
        &self,
        language: Option<&str>,
    ) -> Result<SearchPage<RepositoryMetric>, GithubError> {
        self.search(&fallback_query(language)).await
    }
}
