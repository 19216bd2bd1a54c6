use crate::error::DomainError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window a listing is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TimeWindow {
    pub fn days(self) -> i64 {
        match self {
            TimeWindow::Daily => 1,
            TimeWindow::Weekly => 7,
            TimeWindow::Monthly => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Daily => "daily",
            TimeWindow::Weekly => "weekly",
            TimeWindow::Monthly => "monthly",
        }
    }

    /// First day (UTC) inside the window.
    pub fn cutoff(self, now: DateTime<Utc>) -> NaiveDate {
        (now - Duration::days(self.days())).date_naive()
    }

    /// Query-string parsing: absent or unrecognised values mean daily.
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for TimeWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(TimeWindow::Daily),
            "weekly" => Ok(TimeWindow::Weekly),
            "monthly" => Ok(TimeWindow::Monthly),
            _ => Err(DomainError::UnknownWindow(s.to_string())),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a listing ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Repositories,
    Developers,
}

impl ListingType {
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for ListingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repositories" => Ok(ListingType::Repositories),
            "developers" => Ok(ListingType::Developers),
            _ => Err(DomainError::UnknownListing(s.to_string())),
        }
    }
}

/// The calendar span a listing covers, echoed back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: TimeWindow,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DateRange {
    pub fn new(since: TimeWindow, now: DateTime<Utc>) -> Self {
        Self {
            since,
            from_date: since.cutoff(now),
            to_date: now.date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cutoff_per_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 30, 0).unwrap();

        assert_eq!(TimeWindow::Daily.cutoff(now).to_string(), "2024-03-30");
        assert_eq!(TimeWindow::Weekly.cutoff(now).to_string(), "2024-03-24");
        assert_eq!(TimeWindow::Monthly.cutoff(now).to_string(), "2024-03-01");
    }

    #[test]
    fn test_cutoff_crosses_year_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 1).unwrap();
        assert_eq!(TimeWindow::Weekly.cutoff(now).to_string(), "2023-12-27");
    }

    #[test]
    fn test_lenient_param_defaults_to_daily() {
        assert_eq!(TimeWindow::from_param(None), TimeWindow::Daily);
        assert_eq!(TimeWindow::from_param(Some("yearly")), TimeWindow::Daily);
        assert_eq!(TimeWindow::from_param(Some("Weekly")), TimeWindow::Weekly);
    }

    #[test]
    fn test_strict_parse_reports_value() {
        let err = "fortnightly".parse::<TimeWindow>().unwrap_err();
        assert_eq!(err, DomainError::UnknownWindow("fortnightly".to_string()));
    }

    #[test]
    fn test_listing_type_param() {
        assert_eq!(ListingType::from_param(None), ListingType::Repositories);
        assert_eq!(
            ListingType::from_param(Some("developers")),
            ListingType::Developers
        );
        assert_eq!(
            ListingType::from_param(Some("orgs")),
            ListingType::Repositories
        );
    }

    #[test]
    fn test_date_range_serializes_as_dates() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 0).unwrap();
        let range = DateRange::new(TimeWindow::Monthly, now);
        let json = serde_json::to_value(&range).unwrap();

        assert_eq!(json["since"], "monthly");
        assert_eq!(json["from_date"], "2024-03-01");
        assert_eq!(json["to_date"], "2024-03-31");
    }
}
