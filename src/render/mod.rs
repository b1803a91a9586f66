//! Terminal presentation
//!
//! Turns a [`DashboardView`] into text: header with theme toggle and user
//! menu, sidebar navigation, KPI cards, the sales chart and the activity
//! feed with its filter bar. Colors come from the [`Palette`] of the resolved
//! theme.

pub mod palette;

use std::fmt::{self, Write};

use crate::activity::ActivityFilter;
use crate::dashboard::{ActivityRow, DashboardView};
use crate::data::{ChartPoint, KpiDatum, Timeframe};
use crate::format::{axis_tick, format_grouped};
use crate::sidebar::NAVIGATION;
use crate::theme::ResolvedTheme;

pub use palette::{Palette, Role};

const CHART_WIDTH: usize = 40;

/// Renders dashboard sections with a fixed palette
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(theme: ResolvedTheme, color: bool) -> Self {
        Self {
            palette: Palette::new(theme, color),
        }
    }

    /// Full dashboard screen
    pub fn dashboard(&self, view: &DashboardView) -> String {
        self.collect(|out| {
            self.write_header(out, view)?;
            self.write_sidebar(out, view)?;
            writeln!(out)?;
            self.write_kpis(out, &view.kpis)?;
            writeln!(out)?;
            self.write_chart(out, view.timeframe, view.series)?;
            writeln!(out)?;
            self.write_activity(out, view)
        })
    }

    /// Header line only
    pub fn header(&self, view: &DashboardView) -> String {
        self.collect(|out| self.write_header(out, view))
    }

    pub fn kpis(&self, kpis: &[KpiDatum]) -> String {
        self.collect(|out| self.write_kpis(out, kpis))
    }

    pub fn chart(&self, timeframe: Timeframe, series: &[ChartPoint]) -> String {
        self.collect(|out| self.write_chart(out, timeframe, series))
    }

    pub fn activity(&self, view: &DashboardView) -> String {
        self.collect(|out| self.write_activity(out, view))
    }

    fn collect(&self, f: impl FnOnce(&mut String) -> fmt::Result) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = f(&mut out);
        out
    }

    fn paint(&self, text: &str, role: Role) -> String {
        self.palette.paint(text, role)
    }

    fn write_header(&self, out: &mut String, view: &DashboardView) -> fmt::Result {
        let toggle = format!(
            "[{} → {}]",
            view.theme.label(),
            view.resolved_theme.as_str()
        );
        writeln!(
            out,
            "{}  {}  {} {}",
            self.paint(view.title, Role::Heading),
            self.paint(&toggle, Role::Muted),
            self.paint(&format!("({})", view.user.initials()), Role::Primary),
            self.paint(&view.user.name, Role::Text),
        )
    }

    fn write_sidebar(&self, out: &mut String, view: &DashboardView) -> fmt::Result {
        let items: Vec<String> = NAVIGATION
            .iter()
            .map(|item| {
                let text = if view.sidebar_collapsed {
                    item.label[..1].to_string()
                } else {
                    item.label.to_string()
                };
                if item.id == view.active_nav {
                    self.paint(&format!("▸{}", text), Role::Primary)
                } else {
                    self.paint(&format!(" {}", text), Role::Muted)
                }
            })
            .collect();
        writeln!(out, "{}", items.join("  "))
    }

    fn write_kpis(&self, out: &mut String, kpis: &[KpiDatum]) -> fmt::Result {
        for kpi in kpis {
            // Pad before painting; escape codes would count toward the width
            write!(
                out,
                "{} {}",
                self.paint(&format!("{:<18}", kpi.title), Role::Text),
                self.paint(&format!("{:>10}", kpi.formatted_value), Role::Heading),
            )?;
            if let Some(trend) = &kpi.trend {
                let badge = format!("{} {}", trend.direction.arrow(), trend.value);
                write!(
                    out,
                    "  {} {}",
                    self.paint(&badge, trend.direction.into()),
                    self.paint(&trend.label, Role::Muted),
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_chart(&self, out: &mut String, timeframe: Timeframe, series: &[ChartPoint]) -> fmt::Result {
        let (weekly, monthly) = match timeframe {
            Timeframe::Weekly => ("[Weekly]", " Monthly "),
            Timeframe::Monthly => (" Weekly ", "[Monthly]"),
        };
        writeln!(
            out,
            "{}  {}{}",
            self.paint("Sales Overview", Role::Heading),
            self.paint(weekly, Role::Primary),
            self.paint(monthly, Role::Muted),
        )?;

        let max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        if series.is_empty() || max <= 0.0 {
            return writeln!(out, "{}", self.paint("No sales data", Role::Muted));
        }

        for point in series {
            let filled = ((point.value / max) * CHART_WIDTH as f64).round() as usize;
            let bar = format!(
                "{}{}",
                "█".repeat(filled),
                " ".repeat(CHART_WIDTH - filled.min(CHART_WIDTH))
            );
            writeln!(
                out,
                "{:>3} {}{} ${}",
                point.x_label,
                self.paint("│", Role::Grid),
                self.paint(&bar, Role::Primary),
                format_grouped(point.value),
            )?;
        }

        writeln!(
            out,
            "    {}{}",
            self.paint("└", Role::Grid),
            self.paint(&format!("0k{:>width$}", axis_tick(max), width = CHART_WIDTH - 2), Role::Muted),
        )
    }

    fn write_activity(&self, out: &mut String, view: &DashboardView) -> fmt::Result {
        writeln!(out, "{}", self.paint("Recent Activity", Role::Heading))?;

        if view.total_activities == 0 {
            return writeln!(out, "{}", self.paint("No recent activities", Role::Muted));
        }

        let buttons: Vec<String> = ActivityFilter::buttons()
            .iter()
            .map(|filter| {
                let text = format!("{} {}", filter.label(), view.counts.get(filter));
                if filter.to_string() == view.filter {
                    self.paint(&format!("[{}]", text), Role::Primary)
                } else {
                    self.paint(&format!(" {} ", text), Role::Muted)
                }
            })
            .collect();
        writeln!(out, "{}", buttons.join(" "))?;

        if view.activities.is_empty() {
            return writeln!(
                out,
                "{}",
                self.paint("No activities found for the selected filter", Role::Muted)
            );
        }

        for row in &view.activities {
            self.write_activity_row(out, row)?;
        }
        Ok(())
    }

    fn write_activity_row(&self, out: &mut String, row: &ActivityRow) -> fmt::Result {
        // URLs do not fit in a terminal; show initials or the badge instead
        let avatar = if row.avatar.starts_with("http") {
            row.author
                .as_deref()
                .map(crate::format::generate_initials)
                .unwrap_or_default()
        } else {
            row.avatar.clone()
        };

        writeln!(
            out,
            "{} {}  {}",
            self.paint(&format!("{:>2}", avatar), row.kind.into()),
            self.paint(&row.title, Role::Text),
            self.paint(&row.time_label, Role::Muted),
        )?;
        writeln!(out, "   {}", self.paint(&row.description, Role::Muted))?;
        if let Some(author) = &row.author {
            writeln!(out, "   {}", self.paint(&format!("by {}", author), Role::Muted))?;
        }
        Ok(())
    }
}
