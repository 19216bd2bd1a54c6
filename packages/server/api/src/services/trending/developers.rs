use crate::services::github::models::UserRepo;
use crate::services::github::{GithubApi, SearchRequest};
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use shared::dto::{Developer, DeveloperListing, PopularRepo};
use std::time::Duration;
use tracing::{info, warn};
use trending_domain::{DateRange, TimeWindow, RESULT_LIMIT};

const USER_PAGE_SIZE: u32 = 30;
const RECENT_REPOS: u32 = 5;

pub fn users_query(language: Option<&str>) -> SearchRequest {
    let q = match language {
        Some(language) => format!("{} in:readme type:user", language),
        None => "type:user".to_string(),
    };

    SearchRequest {
        q,
        sort: "repositories",
        order: "desc",
        per_page: USER_PAGE_SIZE,
    }
}

/// Most starred repository updated since `cutoff`; otherwise the most
/// recently updated one. Later entries win star ties.
pub fn pick_popular(repos: &[UserRepo], cutoff: NaiveDate) -> Option<PopularRepo> {
    repos
        .iter()
        .filter(|r| r.updated_at.date_naive() >= cutoff)
        .reduce(|best, r| {
            if best.stargazers_count > r.stargazers_count {
                best
            } else {
                r
            }
        })
        .or_else(|| repos.first())
        .map(PopularRepo::from)
}

/// Active developers decorated with their profile and a standout recent
/// repository. No statistical ranking is applied.
pub async fn trending_developers(
    github: &dyn GithubApi,
    language: Option<&str>,
    window: TimeWindow,
    now: DateTime<Utc>,
    repo_timeout: Duration,
) -> DeveloperListing {
    let page = match github.search_users(&users_query(language)).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Developer search failed");
            return DeveloperListing::empty();
        }
    };

    let cutoff = window.cutoff(now);
    let lookups = page
        .items
        .into_iter()
        .take(RESULT_LIMIT)
        .map(|user| decorate(github, user.login, cutoff, repo_timeout));

    let items: Vec<Developer> = join_all(lookups).await.into_iter().flatten().collect();
    info!(count = items.len(), "Built developer listing");

    DeveloperListing {
        total_count: items.len(),
        items,
        generated_at: Some(now),
        date_range: Some(DateRange::new(window, now)),
    }
}

async fn decorate(
    github: &dyn GithubApi,
    login: String,
    cutoff: NaiveDate,
    repo_timeout: Duration,
) -> Option<Developer> {
    let mut developer = match github.user(&login).await {
        Ok(developer) => developer,
        Err(e) => {
            warn!(%login, error = %e, "Skipping developer, profile lookup failed");
            return None;
        }
    };

    developer.popular_repo =
        match tokio::time::timeout(repo_timeout, github.recent_repos(&login, RECENT_REPOS)).await {
            Ok(Ok(repos)) => pick_popular(&repos, cutoff),
            Ok(Err(e)) => {
                warn!(%login, error = %e, "Could not fetch repositories");
                None
            }
            Err(_) => {
                warn!(%login, "Repository lookup timed out");
                None
            }
        };

    Some(developer)
}
