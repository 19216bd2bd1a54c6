//! Thin client for the parts of the GitHub REST API the listings use.

pub mod models;

use models::{ErrorMessage, SearchPage, UserRepo, UserSummary};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use shared::dto::Developer;
use std::time::Duration;
use thiserror::Error;
use trending_domain::RepositoryMetric;

const USER_AGENT: &str = "Trending-Service";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub request timed out after {0:?}")]
    Timeout(Duration),

    #[error("GitHub responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid GitHub token")]
    InvalidToken,
}

impl GithubError {
    /// Upstream HTTP status, when GitHub answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GithubError::Status { status, .. } => Some(*status),
            GithubError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The message GitHub attached to its error response.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            GithubError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Parameters of one `/search/*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub q: String,
    pub sort: &'static str,
    pub order: &'static str,
    pub per_page: u32,
}

impl SearchRequest {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("sort", self.sort.to_string()),
            ("order", self.order.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// The GitHub calls the trending listings depend on.
#[async_trait::async_trait]
pub trait GithubApi: Send + Sync {
    async fn search_repositories(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<RepositoryMetric>, GithubError>;

    async fn search_users(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<UserSummary>, GithubError>;

    async fn user(&self, login: &str) -> Result<Developer, GithubError>;

    /// Most recently updated repositories of a user.
    async fn recent_repos(&self, login: &str, per_page: u32) -> Result<Vec<UserRepo>, GithubError>;
}

pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| GithubError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, GithubError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let res = self.http.get(&url).query(params).send().await?;

        let status = res.status();
        if !status.is_success() {
            let message = res
                .json::<ErrorMessage>()
                .await
                .map(|e| e.message)
                .unwrap_or_default();
            return Err(GithubError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(res.json().await?)
    }
}

#[async_trait::async_trait]
impl GithubApi for GithubClient {
    async fn search_repositories(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<RepositoryMetric>, GithubError> {
        self.get_json("/search/repositories", &request.params()).await
    }

    async fn search_users(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<UserSummary>, GithubError> {
        self.get_json("/search/users", &request.params()).await
    }

    async fn user(&self, login: &str) -> Result<Developer, GithubError> {
        self.get_json(&format!("/users/{}", login), &[]).await
    }

    async fn recent_repos(&self, login: &str, per_page: u32) -> Result<Vec<UserRepo>, GithubError> {
        let params = [
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", per_page.to_string()),
        ];
        self.get_json(&format!("/users/{}/repos", login), &params)
            .await
    }
}
