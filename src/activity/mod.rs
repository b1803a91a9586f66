//! Activity feed
//!
//! Types for the timestamped events shown in the "Recent Activity" panel and
//! the read-only operations the panel needs: filtering by type, per-type
//! counts and coarse relative-time labels.

pub mod aggregate;
pub mod time;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;

pub use aggregate::{count_by_type, filter_by_type, ActivityCounts};
pub use time::{format_relative_time, format_relative_time_now};

/// Severity-like tag carried by every activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Success,
    Warning,
    Danger,
    Info,
}

impl ActivityType {
    pub fn all() -> &'static [ActivityType] {
        &[
            ActivityType::Success,
            ActivityType::Warning,
            ActivityType::Danger,
            ActivityType::Info,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Success => "success",
            ActivityType::Warning => "warning",
            ActivityType::Danger => "danger",
            ActivityType::Info => "info",
        }
    }

    /// Filter button label
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Success => "Success",
            ActivityType::Warning => "Warning",
            ActivityType::Danger => "Error",
            ActivityType::Info => "Info",
        }
    }

    /// Badge glyph shown when an activity has no user
    pub fn badge(&self) -> &'static str {
        match self {
            ActivityType::Success => "✓",
            ActivityType::Warning => "⚠",
            ActivityType::Danger => "✕",
            ActivityType::Info => "i",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(ActivityType::Success),
            "warning" => Ok(ActivityType::Warning),
            "danger" => Ok(ActivityType::Danger),
            "info" => Ok(ActivityType::Info),
            _ => Err(ParseError::new(
                "activity type",
                s,
                "success, warning, danger, info",
            )),
        }
    }
}

/// Author of an activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityUser {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A discrete event in the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<ActivityUser>,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        kind: ActivityType,
        title: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: description.into(),
            timestamp,
            user: None,
        }
    }

    /// Builder method: attach an author
    pub fn user(mut self, name: impl Into<String>) -> Self {
        self.user = Some(ActivityUser {
            name: name.into(),
            avatar_url: None,
        });
        self
    }

    /// Builder method: attach an author with an avatar
    pub fn user_with_avatar(mut self, name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        self.user = Some(ActivityUser {
            name: name.into(),
            avatar_url: Some(avatar_url.into()),
        });
        self
    }
}

/// Which activities the feed shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ActivityFilter {
    #[default]
    All,
    Only(ActivityType),
    /// A filter value that names no type; matches nothing
    Unrecognized(String),
}

impl ActivityFilter {
    /// Filter buttons in display order
    pub fn buttons() -> [ActivityFilter; 5] {
        [
            ActivityFilter::All,
            ActivityFilter::Only(ActivityType::Success),
            ActivityFilter::Only(ActivityType::Info),
            ActivityFilter::Only(ActivityType::Warning),
            ActivityFilter::Only(ActivityType::Danger),
        ]
    }

    /// Parse a filter without failing; unknown names become `Unrecognized`
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            return ActivityFilter::All;
        }
        match s.parse::<ActivityType>() {
            Ok(kind) => ActivityFilter::Only(kind),
            Err(_) => {
                tracing::debug!(filter = s, "Unrecognized activity filter");
                ActivityFilter::Unrecognized(s.to_string())
            }
        }
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Only(kind) => activity.kind == *kind,
            ActivityFilter::Unrecognized(_) => false,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActivityFilter::All => "All",
            ActivityFilter::Only(kind) => kind.label(),
            ActivityFilter::Unrecognized(name) => name,
        }
    }
}

impl From<ActivityType> for ActivityFilter {
    fn from(kind: ActivityType) -> Self {
        ActivityFilter::Only(kind)
    }
}

impl std::fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityFilter::All => f.write_str("all"),
            ActivityFilter::Only(kind) => write!(f, "{}", kind),
            ActivityFilter::Unrecognized(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parse() {
        assert_eq!("danger".parse::<ActivityType>().unwrap(), ActivityType::Danger);
        assert_eq!("INFO".parse::<ActivityType>().unwrap(), ActivityType::Info);
        assert!("error".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_lenient_filter_parse() {
        assert_eq!(ActivityFilter::parse_lenient("all"), ActivityFilter::All);
        assert_eq!(
            ActivityFilter::parse_lenient("warning"),
            ActivityFilter::Only(ActivityType::Warning)
        );
        assert_eq!(
            ActivityFilter::parse_lenient("critical"),
            ActivityFilter::Unrecognized("critical".to_string())
        );
    }

    #[test]
    fn test_labels() {
        let buttons = ActivityFilter::buttons();
        let labels: Vec<&str> = buttons.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["All", "Success", "Info", "Warning", "Error"]);
        assert_eq!(ActivityType::Danger.badge(), "✕");
    }

    #[test]
    fn test_serde_shape() {
        let json = r#"{
            "id": "6",
            "type": "danger",
            "title": "Failed Login Attempts",
            "description": "Multiple failed login attempts detected",
            "timestamp": "2024-03-01T12:00:00Z"
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.kind, ActivityType::Danger);
        assert!(activity.user.is_none());
    }
}
