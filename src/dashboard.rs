//! Dashboard application state
//!
//! Ties the theme resolver, sidebar, chart timeframe and activity filter
//! together and produces a [`DashboardView`] for the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::activity::{
    count_by_type, filter_by_type, format_relative_time, Activity, ActivityCounts, ActivityFilter,
    ActivityType,
};
use crate::config::DisplayConfig;
use crate::data::{
    demo_user, mock_activities, mock_kpis, select_series, ChartPoint, KpiDatum, Timeframe,
    UserProfile,
};
use crate::format::generate_initials;
use crate::preferences::{keys, PreferenceStore};
use crate::sidebar::SidebarState;
use crate::theme::{ColorSchemeSource, DocumentRoot, ResolvedTheme, Theme, ThemeResolver};

pub const DASHBOARD_TITLE: &str = "Dashboard Overview";

/// Mutable dashboard state
pub struct Dashboard {
    theme: ThemeResolver,
    root: Arc<DocumentRoot>,
    sidebar: SidebarState,
    timeframe: Timeframe,
    activity_filter: ActivityFilter,
    activities: Vec<Activity>,
    kpis: Vec<KpiDatum>,
    user: UserProfile,
}

impl Dashboard {
    /// Build the dashboard over the mock datasets
    pub fn new(
        store: PreferenceStore,
        source: Arc<dyn ColorSchemeSource>,
        display: &DisplayConfig,
    ) -> Self {
        let root = Arc::new(DocumentRoot::new());
        let theme =
            ThemeResolver::with_default(store.clone(), source, root.clone(), display.default_theme);

        Self {
            theme,
            root,
            user: store.get(keys::USER_PREFERENCES, demo_user()),
            sidebar: SidebarState::load(store),
            timeframe: Timeframe::default(),
            activity_filter: ActivityFilter::All,
            activities: mock_activities(Utc::now()),
            kpis: mock_kpis(&display.currency),
        }
    }

    /// Builder method: replace the activity feed
    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    /// Document root carrying the applied theme marker
    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut SidebarState {
        &mut self.sidebar
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    pub fn activity_filter(&self) -> &ActivityFilter {
        &self.activity_filter
    }

    pub fn set_activity_filter(&mut self, filter: ActivityFilter) {
        tracing::debug!(%filter, "Activity filter changed");
        self.activity_filter = filter;
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn kpis(&self) -> &[KpiDatum] {
        &self.kpis
    }

    /// Snapshot everything the renderer needs
    pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
        let rows = filter_by_type(&self.activities, &self.activity_filter)
            .into_iter()
            .map(|activity| ActivityRow::new(activity, now))
            .collect();

        DashboardView {
            title: DASHBOARD_TITLE,
            user: self.user.clone(),
            theme: self.theme.theme(),
            resolved_theme: self.theme.resolved_theme(),
            root_classes: self.root.classes(),
            sidebar_collapsed: self.sidebar.is_collapsed(),
            active_nav: self.sidebar.active_item(),
            kpis: self.kpis.clone(),
            timeframe: self.timeframe,
            series: select_series(self.timeframe),
            filter: self.activity_filter.to_string(),
            counts: count_by_type(&self.activities),
            total_activities: self.activities.len(),
            activities: rows,
        }
    }
}

/// Render-ready activity entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityRow {
    pub id: String,
    pub kind: ActivityType,
    pub title: String,
    pub description: String,
    pub time_label: String,
    pub author: Option<String>,
    /// Avatar URL, author initials or the type badge, in that order
    pub avatar: String,
}

impl ActivityRow {
    pub fn new(activity: &Activity, now: DateTime<Utc>) -> Self {
        let avatar = match &activity.user {
            Some(user) => user
                .avatar_url
                .clone()
                .unwrap_or_else(|| generate_initials(&user.name)),
            None => activity.kind.badge().to_string(),
        };

        Self {
            id: activity.id.clone(),
            kind: activity.kind,
            title: activity.title.clone(),
            description: activity.description.clone(),
            time_label: format_relative_time(activity.timestamp, now),
            author: activity.user.as_ref().map(|u| u.name.clone()),
            avatar,
        }
    }
}

/// Everything shown on one dashboard screen
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub user: UserProfile,
    pub theme: Theme,
    pub resolved_theme: ResolvedTheme,
    pub root_classes: Vec<String>,
    pub sidebar_collapsed: bool,
    pub active_nav: &'static str,
    pub kpis: Vec<KpiDatum>,
    pub timeframe: Timeframe,
    pub series: &'static [ChartPoint],
    pub filter: String,
    pub counts: ActivityCounts,
    pub total_activities: usize,
    pub activities: Vec<ActivityRow>,
}
