//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preferences: PreferencesConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Preference store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_dir")]
    pub dir: String,

    #[serde(default = "default_preferences_file")]
    pub file: String,
}

fn default_preferences_dir() -> String {
    dirs::config_dir()
        .map(|p| p.join("vantage").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.vantage".to_string())
}

fn default_preferences_file() -> String {
    "preferences.json".to_string()
}

impl PreferencesConfig {
    /// Full path of the preference file (`~/` expands to the home directory)
    pub fn file_path(&self) -> PathBuf {
        let dir = match (self.dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.dir),
        };
        dir.join(&self.file)
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            dir: default_preferences_dir(),
            file: default_preferences_file(),
        }
    }
}

/// Display and theming configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Theme used until the user picks one
    #[serde(default)]
    pub default_theme: Theme,

    /// ISO currency code for money values
    #[serde(default = "default_currency")]
    pub currency: String,

    /// File holding the desktop color scheme (`dark` or `light`)
    #[serde(default)]
    pub scheme_file: Option<String>,

    /// How often `watch` re-probes the environment (ms)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Emit ANSI colors
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::default(),
            currency: default_currency(),
            scheme_file: None,
            poll_interval_ms: default_poll_interval(),
            color: default_color(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("vantage").join("config.toml")),
            Some(PathBuf::from("./vantage.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Preference overrides
        if let Ok(dir) = std::env::var("VANTAGE_PREFERENCES_DIR") {
            self.preferences.dir = dir;
        }

        // Display overrides
        if let Ok(theme) = std::env::var("VANTAGE_DEFAULT_THEME") {
            match theme.parse() {
                Ok(t) => self.display.default_theme = t,
                Err(e) => tracing::warn!("Ignoring VANTAGE_DEFAULT_THEME: {}", e),
            }
        }
        if let Ok(currency) = std::env::var("VANTAGE_CURRENCY") {
            self.display.currency = currency;
        }
        if let Ok(file) = std::env::var("VANTAGE_SCHEME_FILE") {
            self.display.scheme_file = Some(file);
        }
        if std::env::var_os("NO_COLOR").is_some() {
            self.display.color = false;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("VANTAGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("VANTAGE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Vantage Configuration
#
# Environment variables override these settings:
# - VANTAGE_PREFERENCES_DIR
# - VANTAGE_DEFAULT_THEME
# - VANTAGE_CURRENCY
# - VANTAGE_SCHEME_FILE
# - VANTAGE_LOG_LEVEL
# - VANTAGE_LOG_FORMAT
# - NO_COLOR (disables ANSI colors)

[preferences]
# Directory holding the preference file
dir = "~/.config/vantage"

# Preference file name
file = "preferences.json"

[display]
# Theme used until one is chosen: light, dark or system
default_theme = "system"

# Currency code for money values
currency = "USD"

# Optional file containing the desktop color scheme ("dark" or "light")
# scheme_file = "/run/user/1000/color-scheme"

# How often `vantage watch` re-reads the color scheme (ms)
poll_interval_ms = 1000

# Emit ANSI colors
color = true

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.default_theme, Theme::System);
        assert_eq!(config.display.currency, "USD");
        assert_eq!(config.preferences.file, "preferences.json");
        assert!(config.display.scheme_file.is_none());
        assert!(config.display.color);
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            [display]
            default_theme = "dark"
            currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.default_theme, Theme::Dark);
        assert_eq!(config.display.currency, "EUR");
        assert_eq!(config.display.poll_interval_ms, 1000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.preferences.dir, "~/.config/vantage");
        assert_eq!(config.display.default_theme, Theme::System);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vantage.toml");
        std::fs::write(&path, "[display]\ndefault_theme = \"sepia\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("vantage.toml"));

        let missing = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn test_preference_file_path() {
        let prefs = PreferencesConfig {
            dir: "/tmp/vantage".to_string(),
            file: "prefs.json".to_string(),
        };
        assert_eq!(prefs.file_path(), PathBuf::from("/tmp/vantage/prefs.json"));

        if let Some(home) = dirs::home_dir() {
            let prefs = PreferencesConfig {
                dir: "~/.config/vantage".to_string(),
                file: "preferences.json".to_string(),
            };
            assert_eq!(
                prefs.file_path(),
                home.join(".config/vantage/preferences.json")
            );
        }
    }
}
