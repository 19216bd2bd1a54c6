use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trending_domain::{DateRange, Diagnostics, RepositoryMetric, ScoredRepository};

/// `GET /trending` query string. Values are parsed leniently by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct TrendingQuery {
    pub language: Option<String>,
    pub since: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl TrendingQuery {
    /// The language filter, with blank values treated as absent.
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct RepositoryListing {
    pub items: Vec<ScoredRepository>,
    pub total_count: usize,
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Diagnostics>,
}

/// An item served when scoring was skipped. Score fields are always null.
#[derive(Debug, Serialize)]
pub struct UnscoredRepository {
    #[serde(flatten)]
    pub metric: RepositoryMetric,
    pub z_score: Option<f64>,
    pub stars_velocity: Option<f64>,
    pub final_trending_score: Option<f64>,
}

impl From<RepositoryMetric> for UnscoredRepository {
    fn from(metric: RepositoryMetric) -> Self {
        Self {
            metric,
            z_score: None,
            stars_velocity: None,
            final_trending_score: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FallbackListing {
    pub items: Vec<UnscoredRepository>,
    pub total_count: u64,
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Developer {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub popular_repo: Option<PopularRepo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularRepo {
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub html_url: String,
}

#[derive(Debug, Serialize)]
pub struct DeveloperListing {
    pub items: Vec<Developer>,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl DeveloperListing {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            generated_at: None,
            date_range: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
