//! Mock dashboard datasets
//!
//! Static sales series, KPI definitions and a sample activity feed. The KPI
//! display strings are produced by the formatters rather than hard-coded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::activity::{Activity, ActivityType};
use crate::error::ParseError;
use crate::format::ValueFormat;

/// Which precomputed series the sales chart shows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Weekly,
    Monthly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Timeframe::Weekly),
            "monthly" | "month" | "m" => Ok(Timeframe::Monthly),
            _ => Err(ParseError::new("timeframe", s, "weekly, monthly")),
        }
    }
}

/// One point of a sales series
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ChartPoint {
    /// Short axis label ("Mon", "Jan")
    pub x_label: &'static str,
    pub value: f64,
    /// Long label for tooltips ("Monday")
    pub label: &'static str,
}

const fn point(x_label: &'static str, value: f64, label: &'static str) -> ChartPoint {
    ChartPoint {
        x_label,
        value,
        label,
    }
}

static WEEKLY_SALES: [ChartPoint; 7] = [
    point("Mon", 12000.0, "Monday"),
    point("Tue", 15000.0, "Tuesday"),
    point("Wed", 18000.0, "Wednesday"),
    point("Thu", 14000.0, "Thursday"),
    point("Fri", 22000.0, "Friday"),
    point("Sat", 19000.0, "Saturday"),
    point("Sun", 16000.0, "Sunday"),
];

static MONTHLY_SALES: [ChartPoint; 12] = [
    point("Jan", 45000.0, "January"),
    point("Feb", 52000.0, "February"),
    point("Mar", 48000.0, "March"),
    point("Apr", 61000.0, "April"),
    point("May", 55000.0, "May"),
    point("Jun", 67000.0, "June"),
    point("Jul", 71000.0, "July"),
    point("Aug", 69000.0, "August"),
    point("Sep", 58000.0, "September"),
    point("Oct", 63000.0, "October"),
    point("Nov", 72000.0, "November"),
    point("Dec", 78000.0, "December"),
];

/// Chronological sales series for a timeframe
pub fn select_series(timeframe: Timeframe) -> &'static [ChartPoint] {
    match timeframe {
        Timeframe::Weekly => &WEEKLY_SALES,
        Timeframe::Monthly => &MONTHLY_SALES,
    }
}

/// Direction of a KPI trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Neutral => "−",
        }
    }
}

/// Change indicator attached to a KPI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Display string such as "+12.5%"
    pub value: String,
    /// Comparison window such as "vs last month"
    pub label: String,
}

/// A key performance indicator card
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiDatum {
    pub id: &'static str,
    pub title: &'static str,
    pub value: f64,
    pub formatted_value: String,
    pub trend: Option<Trend>,
}

fn kpi(
    id: &'static str,
    title: &'static str,
    value: f64,
    format: ValueFormat,
    currency: &str,
    trend: (TrendDirection, &str, &str),
) -> KpiDatum {
    let (direction, change, label) = trend;
    KpiDatum {
        id,
        title,
        value,
        formatted_value: format.apply(value, currency),
        trend: Some(Trend {
            direction,
            value: change.to_string(),
            label: label.to_string(),
        }),
    }
}

/// The four headline KPIs
pub fn mock_kpis(currency: &str) -> Vec<KpiDatum> {
    use TrendDirection::*;

    vec![
        kpi(
            "total-users",
            "Total Users",
            24567.0,
            ValueFormat::Compact,
            currency,
            (Up, "+12.5%", "vs last month"),
        ),
        kpi(
            "sales-today",
            "Sales Today",
            89432.0,
            ValueFormat::CompactCurrency,
            currency,
            (Up, "+8.2%", "vs yesterday"),
        ),
        kpi(
            "conversion-rate",
            "Conversion Rate",
            3.24,
            ValueFormat::Percentage(2),
            currency,
            (Down, "-0.3%", "vs last week"),
        ),
        kpi(
            "active-sessions",
            "Active Sessions",
            1847.0,
            ValueFormat::Grouped,
            currency,
            (Neutral, "0.0%", "vs last hour"),
        ),
    ]
}

/// Sample activity feed, timestamped relative to `now`
pub fn mock_activities(now: DateTime<Utc>) -> Vec<Activity> {
    let minutes = |m: i64| now - Duration::minutes(m);
    let hours = |h: i64| now - Duration::hours(h);

    vec![
        Activity::new(
            "1",
            ActivityType::Success,
            "New User Registration",
            "John Smith successfully registered and completed profile setup",
            minutes(5),
        )
        .user_with_avatar("John Smith", "https://images.example.com/avatars/john-smith.jpg"),
        Activity::new(
            "2",
            ActivityType::Info,
            "System Backup Completed",
            "Daily system backup completed successfully. All data secured.",
            minutes(15),
        ),
        Activity::new(
            "3",
            ActivityType::Warning,
            "High Memory Usage Alert",
            "Server memory usage has exceeded 85% threshold. Consider scaling resources.",
            minutes(30),
        ),
        Activity::new(
            "4",
            ActivityType::Success,
            "Payment Processed",
            "Payment of $299.99 processed successfully for Premium Plan upgrade",
            minutes(45),
        )
        .user("Sarah Johnson"),
        Activity::new(
            "5",
            ActivityType::Info,
            "Feature Update Deployed",
            "New dashboard analytics features have been deployed to production",
            hours(1),
        )
        .user("DevOps Team"),
        Activity::new(
            "6",
            ActivityType::Danger,
            "Failed Login Attempts",
            "Multiple failed login attempts detected from IP 192.168.1.100",
            hours(2),
        ),
        Activity::new(
            "7",
            ActivityType::Success,
            "Database Optimization",
            "Database queries optimized, performance improved by 40%",
            hours(3),
        )
        .user_with_avatar("Database Admin", "https://images.example.com/avatars/db-admin.jpg"),
        Activity::new(
            "8",
            ActivityType::Info,
            "Scheduled Maintenance",
            "Routine server maintenance completed. All systems operational.",
            hours(4),
        ),
        Activity::new(
            "9",
            ActivityType::Warning,
            "SSL Certificate Expiring",
            "SSL certificate for api.example.com expires in 7 days",
            hours(6),
        ),
        Activity::new(
            "10",
            ActivityType::Success,
            "API Rate Limit Increased",
            "API rate limits increased to handle growing traffic demands",
            hours(8),
        )
        .user("API Team"),
    ]
}

/// Signed-in user shown in the header menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    pub fn initials(&self) -> String {
        crate::format::generate_initials(&self.name)
    }
}

/// The demo account
pub fn demo_user() -> UserProfile {
    UserProfile {
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        avatar_url: None,
    }
}
