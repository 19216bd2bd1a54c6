use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::dto::PopularRepo;

/// One page of a `/search/*` response.
#[derive(Debug, Deserialize)]
pub struct SearchPage<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub login: String,
}

/// Entry of `/users/{login}/repos`. Only what the popular-repo pick reads.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub html_url: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserRepo> for PopularRepo {
    fn from(repo: &UserRepo) -> Self {
        PopularRepo {
            name: repo.name.clone(),
            description: repo.description.clone(),
            stargazers_count: repo.stargazers_count,
            html_url: repo.html_url.clone(),
        }
    }
}

/// Error body GitHub sends with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorMessage {
    pub message: String,
}
