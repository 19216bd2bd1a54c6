use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_api_url: String,
    pub github_token: Option<String>,
    /// Budget for each outbound search before it counts as failed.
    pub upstream_timeout: Duration,
    /// Budget for a developer's repository lookup.
    pub repo_lookup_timeout: Duration,
    /// Attach ranking diagnostics to responses.
    pub debug: bool,
    pub bind_addr: SocketAddr,
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            upstream_timeout: Duration::from_secs(10),
            repo_lookup_timeout: Duration::from_secs(5),
            debug: false,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable lookup. Unset or blank values keep
    /// their defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get("GITHUB_API_URL") {
            config.github_api_url = url.trim_end_matches('/').to_string();
        }
        config.github_token = get("GITHUB_TOKEN");

        if let Some(secs) = get("GITHUB_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("GITHUB_TIMEOUT_SECS must be whole seconds, got '{}'", secs))?;
            config.upstream_timeout = Duration::from_secs(secs);
        }

        if let Some(env) = get("APP_ENV") {
            config.debug = env.eq_ignore_ascii_case("development");
        }

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: '{}'", addr))?;
        }

        config.cors_origin = get("CORS_ORIGIN");

        Ok(config)
    }
}
