//! Vantage CLI
//!
//! Terminal front end for the analytics dashboard:
//! - Render the dashboard or a single panel
//! - Read and change the theme preference
//! - Collapse or expand the sidebar
//! - Follow desktop color-scheme changes live

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vantage::activity::ActivityFilter;
use vantage::config::{generate_default_config, Config, LoggingConfig};
use vantage::dashboard::Dashboard;
use vantage::data::Timeframe;
use vantage::preferences::PreferenceStore;
use vantage::render::Renderer;
use vantage::theme::{
    detect_color_scheme, ColorSchemeSource, FixedColorScheme, PolledColorScheme, ResolvedTheme,
    Theme,
};

#[derive(Parser)]
#[command(name = "vantage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analytics dashboard in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/vantage/config.toml, ./vantage.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Pretend the desktop prefers this color scheme
    #[arg(long, global = true)]
    pub scheme: Option<SchemeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemeArg {
    Light,
    Dark,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the whole dashboard (default)
    Show {
        /// Chart timeframe (weekly, monthly)
        #[arg(short, long, default_value = "weekly")]
        timeframe: Timeframe,
        /// Activity filter (all, success, warning, danger, info)
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Show or change the sidebar state
    Sidebar {
        #[command(subcommand)]
        action: SidebarAction,
    },

    /// Render the activity feed
    Activity {
        /// Activity filter (all, success, warning, danger, info)
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Render the sales chart
    Chart {
        /// Chart timeframe (weekly, monthly)
        #[arg(short, long, default_value = "weekly")]
        timeframe: Timeframe,
    },

    /// Render the KPI cards
    Kpis,

    /// Re-render the header whenever the desktop color scheme changes
    Watch {
        /// Probe interval in milliseconds (default: display.poll_interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print preference, environment and resolved theme
    Get,
    /// Store a new preference (light, dark, system)
    Set { theme: Theme },
    /// Advance light -> dark -> system
    Toggle,
    /// Print only the resolved theme
    Resolve,
}

#[derive(Subcommand)]
pub enum SidebarAction {
    Status,
    Toggle,
    Collapse,
    Expand,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    tracing::debug!("Vantage v{}", env!("CARGO_PKG_VERSION"));

    let store = PreferenceStore::open(&config.preferences);
    tracing::debug!(backend = store.backend_name(), "Preference store ready");

    let color = config.display.color && !cli.no_color;
    let command = cli.command.unwrap_or(Commands::Show {
        timeframe: Timeframe::default(),
        filter: "all".to_string(),
    });

    if let Commands::Watch { interval_ms } = command {
        let interval =
            Duration::from_millis(interval_ms.unwrap_or(config.display.poll_interval_ms).max(50));
        return watch(store, &config, cli.scheme, interval, color).await;
    }

    let source = static_source(&config, cli.scheme);
    let mut dashboard = Dashboard::new(store, source, &config.display);
    let json = cli.format == OutputFormat::Json;

    match command {
        Commands::Show { timeframe, filter } => {
            dashboard.set_timeframe(timeframe);
            dashboard.set_activity_filter(ActivityFilter::parse_lenient(&filter));
            let view = dashboard.view(Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", renderer(&dashboard, color).dashboard(&view));
            }
        }

        Commands::Theme { action } => {
            let resolver = dashboard.theme();
            match action {
                ThemeAction::Get => {}
                ThemeAction::Set { theme } => resolver.set_theme(theme),
                ThemeAction::Toggle => {
                    resolver.cycle_theme();
                }
                ThemeAction::Resolve => {
                    println!("{}", resolver.resolved_theme());
                    return Ok(());
                }
            }

            if json {
                let status = serde_json::json!({
                    "theme": resolver.theme(),
                    "environment": resolver.environment(),
                    "resolved": resolver.resolved_theme(),
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Theme:       {}", resolver.theme());
                println!("Environment: {}", resolver.environment());
                println!("Resolved:    {}", resolver.resolved_theme());
            }
        }

        Commands::Sidebar { action } => {
            let sidebar = dashboard.sidebar_mut();
            match action {
                SidebarAction::Status => {}
                SidebarAction::Toggle => {
                    sidebar.toggle();
                }
                SidebarAction::Collapse => sidebar.set_collapsed(true),
                SidebarAction::Expand => sidebar.set_collapsed(false),
            }

            if json {
                let status = serde_json::json!({ "collapsed": sidebar.is_collapsed() });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else if sidebar.is_collapsed() {
                println!("Sidebar: collapsed");
            } else {
                println!("Sidebar: expanded");
            }
        }

        Commands::Activity { filter } => {
            dashboard.set_activity_filter(ActivityFilter::parse_lenient(&filter));
            let view = dashboard.view(Utc::now());
            if json {
                let feed = serde_json::json!({
                    "filter": view.filter,
                    "counts": view.counts,
                    "activities": view.activities,
                });
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                print!("{}", renderer(&dashboard, color).activity(&view));
            }
        }

        Commands::Chart { timeframe } => {
            dashboard.set_timeframe(timeframe);
            let series = vantage::data::select_series(timeframe);
            if json {
                println!("{}", serde_json::to_string_pretty(series)?);
            } else {
                print!("{}", renderer(&dashboard, color).chart(timeframe, series));
            }
        }

        Commands::Kpis => {
            if json {
                println!("{}", serde_json::to_string_pretty(dashboard.kpis())?);
            } else {
                print!("{}", renderer(&dashboard, color).kpis(dashboard.kpis()));
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }

        Commands::Watch { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Follow the desktop color scheme until Ctrl-C
async fn watch(
    store: PreferenceStore,
    config: &Config,
    scheme: Option<SchemeArg>,
    interval: Duration,
    color: bool,
) -> anyhow::Result<()> {
    let source: Arc<dyn ColorSchemeSource> = match scheme {
        Some(_) => static_source(config, scheme),
        None => {
            let display = config.display.clone();
            Arc::new(PolledColorScheme::spawn(
                move || detect_color_scheme(&display),
                interval,
            ))
        }
    };

    let dashboard = Dashboard::new(store, source, &config.display);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ResolvedTheme>();
    dashboard.theme().subscribe(Box::new(move |resolved| {
        let _ = tx.send(resolved);
    }));

    print!("{}", renderer(&dashboard, color).header(&dashboard.view(Utc::now())));
    tracing::info!(?interval, "Watching color scheme (Ctrl-C to stop)");

    loop {
        tokio::select! {
            Some(resolved) = rx.recv() => {
                tracing::info!(%resolved, "Theme changed");
                let view = dashboard.view(Utc::now());
                print!("{}", Renderer::new(resolved, color).header(&view));
            }
            result = tokio::signal::ctrl_c() => {
                result.context("waiting for Ctrl-C")?;
                break;
            }
        }
    }

    Ok(())
}

fn static_source(config: &Config, scheme: Option<SchemeArg>) -> Arc<dyn ColorSchemeSource> {
    let prefers_dark = match scheme {
        Some(SchemeArg::Dark) => Some(true),
        Some(SchemeArg::Light) => Some(false),
        None => detect_color_scheme(&config.display),
    };
    Arc::new(FixedColorScheme(prefers_dark))
}

fn renderer(dashboard: &Dashboard, color: bool) -> Renderer {
    Renderer::new(dashboard.theme().resolved_theme(), color)
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("vantage={}", logging.level).into());

    // Logs go to stderr so rendered output stays clean
    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
