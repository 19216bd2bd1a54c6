use crate::config::Config;
use crate::services::github::{GithubApi, GithubClient, GithubError};
use crate::services::trending::TrendingService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub trending: Arc<TrendingService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, GithubError> {
        let github = GithubClient::new(&config.github_api_url, config.github_token.as_deref())?;
        Ok(Self::with_github(config, Arc::new(github)))
    }

    pub fn with_github(config: Config, github: Arc<dyn GithubApi>) -> Self {
        let trending = Arc::new(TrendingService::new(github, &config));
        Self {
            config: Arc::new(config),
            trending,
        }
    }
}
