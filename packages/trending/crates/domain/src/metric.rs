use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A repository as returned by the search endpoint, narrowed to what the
/// trending engine scores plus the descriptive fields echoed to clients.
///
/// Counter fields keep the upstream names on the wire so the listing reads
/// the same as a plain search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetric {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    #[serde(rename = "forks_count")]
    pub forks: u64,
    #[serde(rename = "watchers_count")]
    pub watchers: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Null for repositories that were never pushed to.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub default_branch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl RepositoryMetric {
    /// A bare metric with zero counters whose activity timestamps all equal
    /// the creation time.
    pub fn new(id: u64, full_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let full_name = full_name.into();
        let name = full_name
            .rsplit('/')
            .next()
            .unwrap_or(full_name.as_str())
            .to_string();

        Self {
            id,
            html_url: format!("https://github.com/{}", full_name),
            name,
            full_name,
            description: None,
            stars: 0,
            forks: 0,
            watchers: 0,
            language: None,
            topics: Vec::new(),
            created_at,
            updated_at: created_at,
            pushed_at: Some(created_at),
            open_issues_count: 0,
            license: None,
            owner: Owner::default(),
            homepage: None,
            size: 0,
            default_branch: "main".to_string(),
        }
    }

    pub fn with_counts(mut self, stars: u64, forks: u64, watchers: u64) -> Self {
        self.stars = stars;
        self.forks = forks;
        self.watchers = watchers;
        self
    }

    pub fn with_activity(mut self, updated_at: DateTime<Utc>, pushed_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self.pushed_at = Some(pushed_at);
        self
    }

    pub fn never_pushed(mut self) -> Self {
        self.pushed_at = None;
        self
    }
}

/// Drops repeated identities, keeping the first occurrence and the
/// original relative order.
pub fn dedup_by_id<I>(items: I) -> Vec<RepositoryMetric>
where
    I: IntoIterator<Item = RepositoryMetric>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|m| seen.insert(m.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let a = RepositoryMetric::new(1, "octo/a", at(1)).with_counts(10, 0, 0);
        let b = RepositoryMetric::new(2, "octo/b", at(1));
        let a_again = RepositoryMetric::new(1, "octo/a", at(1)).with_counts(99, 0, 0);

        let unique = dedup_by_id(vec![a, b, a_again]);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].id, 1);
        assert_eq!(unique[0].stars, 10);
        assert_eq!(unique[1].id, 2);
    }

    #[test]
    fn test_decodes_search_item() {
        let raw = serde_json::json!({
            "id": 42,
            "name": "rocket",
            "full_name": "space/rocket",
            "description": null,
            "html_url": "https://github.com/space/rocket",
            "stargazers_count": 120,
            "forks_count": 7,
            "watchers_count": 120,
            "language": "Rust",
            "topics": ["web"],
            "created_at": "2024-03-01T00:00:00Z",
            "updated_at": "2024-03-05T12:00:00Z",
            "pushed_at": "2024-03-05T11:00:00Z",
            "open_issues_count": 3,
            "license": { "name": "MIT License", "spdx_id": "MIT" },
            "owner": { "login": "space", "avatar_url": "", "html_url": "", "type": "Organization" },
            "size": 512,
            "default_branch": "master",
            "score": 1.0
        });

        let metric: RepositoryMetric = serde_json::from_value(raw).unwrap();

        assert_eq!(metric.id, 42);
        assert_eq!(metric.stars, 120);
        assert_eq!(metric.owner.kind, "Organization");
        assert_eq!(metric.license.unwrap().spdx_id.as_deref(), Some("MIT"));
        assert_eq!(metric.name, "rocket");
    }

    #[test]
    fn test_decodes_never_pushed_item() {
        let raw = serde_json::json!({
            "id": 3,
            "full_name": "space/empty",
            "stargazers_count": 8,
            "forks_count": 0,
            "watchers_count": 8,
            "created_at": "2024-03-01T00:00:00Z",
            "updated_at": "2024-03-02T00:00:00Z",
            "pushed_at": null
        });

        let metric: RepositoryMetric = serde_json::from_value(raw).unwrap();
        assert_eq!(metric.pushed_at, None);
    }

    #[test]
    fn test_new_derives_short_name() {
        let metric = RepositoryMetric::new(7, "octo/widgets", at(2));
        assert_eq!(metric.name, "widgets");
        assert_eq!(metric.updated_at, metric.created_at);
    }
}
