//! # Vantage
//!
//! Analytics dashboard core - theme resolution, preference persistence,
//! activity aggregation and KPI formatting, with a terminal front end.
//!
//! ## Features
//!
//! - **Preferences**: string-keyed JSON store with file and in-memory backends
//! - **Theming**: light/dark/system preference resolved against the desktop color scheme
//! - **Activity feed**: filtering, per-type counts and relative-time labels
//! - **Formatting**: compact numbers, currency, percentages and initials
//!
//! ## Modules
//!
//! - [`preferences`]: Preference store and backends
//! - [`theme`]: Theme resolver, color-scheme sources and presentation marker
//! - [`activity`]: Activity types, aggregation and relative time
//! - [`format`]: Display formatters
//! - [`data`]: Mock KPI, chart and activity datasets
//! - [`dashboard`]: Application state and view model
//! - [`render`]: Terminal rendering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vantage::preferences::PreferenceStore;
//! use vantage::theme::{DocumentRoot, FixedColorScheme, Theme, ThemeResolver};
//!
//! let store = PreferenceStore::in_memory();
//! let root = Arc::new(DocumentRoot::new());
//! let resolver = ThemeResolver::new(store, Arc::new(FixedColorScheme::dark()), root.clone());
//!
//! resolver.set_theme(Theme::System);
//! assert!(resolver.resolved_theme().is_dark());
//! assert!(root.has_class("dark"));
//! ```

pub mod activity;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod format;
pub mod preferences;
pub mod render;
pub mod sidebar;
pub mod theme;

// Re-export top-level types for convenience
pub use activity::{
    count_by_type, filter_by_type, format_relative_time, Activity, ActivityCounts,
    ActivityFilter, ActivityType, ActivityUser,
};

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, PreferencesConfig};

pub use dashboard::{ActivityRow, Dashboard, DashboardView};

pub use data::{select_series, ChartPoint, KpiDatum, Timeframe, Trend, TrendDirection, UserProfile};

pub use error::ParseError;

pub use format::{
    format_currency, format_grouped, format_number, format_percentage, generate_initials,
};

pub use preferences::{Lookup, PreferenceError, PreferenceResult, PreferenceStore};

pub use render::Renderer;

pub use sidebar::SidebarState;

pub use theme::{
    resolve, ColorSchemeSource, DocumentRoot, ResolvedTheme, Theme, ThemeApplier, ThemeResolver,
};
