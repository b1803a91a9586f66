//! Theme resolution
//!
//! The user picks a tri-state [`Theme`]; the desktop reports whether it
//! prefers dark colors. [`resolve`] combines the two into the
//! [`ResolvedTheme`] actually painted:
//!
//! | preference | environment | resolved |
//! |------------|-------------|----------|
//! | light      | *           | light    |
//! | dark       | *           | dark     |
//! | system     | light       | light    |
//! | system     | dark        | dark     |
//!
//! - **environment**: color-scheme sources (fixed, manual, polled) and probing
//! - **marker**: the `ThemeApplier` seam and the `DocumentRoot` marker
//! - **resolver**: `ThemeResolver`, the observable store tying it together

pub mod environment;
pub mod listeners;
pub mod marker;
pub mod resolver;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;

pub use environment::{
    detect_color_scheme, probe_scheme, ColorSchemeSource, FixedColorScheme, ManualColorScheme,
    PolledColorScheme,
};
pub use listeners::SubscriptionId;
pub use marker::{DocumentRoot, ThemeApplier};
pub use resolver::ThemeResolver;

/// Stored theme preference
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the desktop color scheme
    #[default]
    System,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Next value of the header toggle: light -> dark -> system -> light
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }

    /// Human label for the toggle button
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(ParseError::new("theme", s, "light, dark, system")),
        }
    }
}

/// Concrete scheme applied to the presentation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ResolvedTheme::Dark)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a preference against the environment's scheme
pub fn resolve(preference: Theme, environment: ResolvedTheme) -> ResolvedTheme {
    match preference {
        Theme::Light => ResolvedTheme::Light,
        Theme::Dark => ResolvedTheme::Dark,
        Theme::System => environment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table() {
        use ResolvedTheme as R;

        for env in [R::Light, R::Dark] {
            assert_eq!(resolve(Theme::Light, env), R::Light);
            assert_eq!(resolve(Theme::Dark, env), R::Dark);
        }
        assert_eq!(resolve(Theme::System, R::Light), R::Light);
        assert_eq!(resolve(Theme::System, R::Dark), R::Dark);
    }

    #[test]
    fn test_theme_parse_and_display() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" system ".parse::<Theme>().unwrap(), Theme::System);
        assert!("sepia".parse::<Theme>().is_err());

        for theme in Theme::all() {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), *theme);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_strings() {
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
        let t: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(t, Theme::Light);
        assert_eq!(serde_json::to_string(&ResolvedTheme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_toggle_cycle() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::System);
        assert_eq!(Theme::System.next(), Theme::Light);
    }

    #[test]
    fn test_default_is_system() {
        assert_eq!(Theme::default(), Theme::System);
        assert_eq!(ResolvedTheme::default(), ResolvedTheme::Light);
    }
}
