//! Desktop color-scheme sources
//!
//! A source answers "does the environment prefer dark colors?" and pushes a
//! notification whenever that answer changes. `None` means the signal is
//! unavailable (headless session, unknown terminal); callers treat it as light.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::listeners::{Listeners, SubscriptionId};
use crate::config::DisplayConfig;

/// Source of the environment's "prefers dark" signal
pub trait ColorSchemeSource: Send + Sync {
    /// Current value, `None` when unavailable
    fn prefers_dark(&self) -> Option<bool>;

    /// Register a change listener
    fn subscribe(&self, listener: Box<dyn Fn(bool) + Send + Sync>) -> SubscriptionId;

    /// Remove a listener registered with [`subscribe`](Self::subscribe)
    fn unsubscribe(&self, id: SubscriptionId);
}

/// A signal that never changes
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColorScheme(pub Option<bool>);

impl FixedColorScheme {
    pub fn light() -> Self {
        Self(Some(false))
    }

    pub fn dark() -> Self {
        Self(Some(true))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl ColorSchemeSource for FixedColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }

    fn subscribe(&self, _listener: Box<dyn Fn(bool) + Send + Sync>) -> SubscriptionId {
        SubscriptionId::INERT
    }

    fn unsubscribe(&self, _id: SubscriptionId) {}
}

/// A signal driven by explicit `set` calls
pub struct ManualColorScheme {
    current: Mutex<Option<bool>>,
    listeners: Listeners<bool>,
}

impl ManualColorScheme {
    pub fn new(initial: Option<bool>) -> Self {
        Self {
            current: Mutex::new(initial),
            listeners: Listeners::new(),
        }
    }

    /// Update the signal, notifying listeners if it changed
    pub fn set(&self, prefers_dark: bool) {
        let changed = {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            let changed = *current != Some(prefers_dark);
            *current = Some(prefers_dark);
            changed
        };

        if changed {
            tracing::debug!(prefers_dark, "Environment color scheme changed");
            self.listeners.notify(prefers_dark);
        }
    }

    /// Number of active listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool) + Send + Sync>) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.remove(id);
    }
}

/// A signal refreshed by a background task that polls a probe
///
/// Must be created inside a tokio runtime. The task is aborted on drop.
pub struct PolledColorScheme {
    inner: Arc<ManualColorScheme>,
    task: JoinHandle<()>,
}

impl PolledColorScheme {
    /// Probe once now, then every `interval`
    ///
    /// A probe returning `None` keeps the last known value.
    pub fn spawn<F>(probe: F, interval: Duration) -> Self
    where
        F: Fn() -> Option<bool> + Send + Sync + 'static,
    {
        let inner = Arc::new(ManualColorScheme::new(probe()));
        let target = inner.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately; the initial value is already set
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Some(prefers_dark) = probe() {
                    target.set(prefers_dark);
                }
            }
        });

        Self { inner, task }
    }
}

impl ColorSchemeSource for PolledColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.inner.prefers_dark()
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool) + Send + Sync>) -> SubscriptionId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.unsubscribe(id)
    }
}

impl Drop for PolledColorScheme {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Probe the environment described by `display`
///
/// Checks, in order: the configured scheme file, `VANTAGE_COLOR_SCHEME`,
/// and the terminal's `COLORFGBG`.
pub fn detect_color_scheme(display: &DisplayConfig) -> Option<bool> {
    let env_override = std::env::var("VANTAGE_COLOR_SCHEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();

    probe_scheme(
        display.scheme_file.as_deref().map(Path::new),
        env_override.as_deref(),
        colorfgbg.as_deref(),
    )
}

/// Pure part of [`detect_color_scheme`]
pub fn probe_scheme(
    scheme_file: Option<&Path>,
    env_override: Option<&str>,
    colorfgbg: Option<&str>,
) -> Option<bool> {
    if let Some(path) = scheme_file {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                if let Some(value) = content.lines().next().and_then(parse_scheme_name) {
                    return Some(value);
                }
            }
            Err(e) => tracing::trace!(?path, "Scheme file unreadable: {}", e),
        }
    }

    if let Some(value) = env_override.and_then(parse_scheme_name) {
        return Some(value);
    }

    colorfgbg.and_then(parse_colorfgbg)
}

/// `dark`/`light` plus the GNOME `prefer-dark`/`default` spellings
fn parse_scheme_name(name: &str) -> Option<bool> {
    match name.trim().trim_matches('\'').to_ascii_lowercase().as_str() {
        "dark" | "prefer-dark" => Some(true),
        "light" | "prefer-light" | "default" => Some(false),
        _ => None,
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); dark backgrounds are
/// the ANSI indices 0-6 and 8
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[test]
    fn test_fixed_scheme() {
        assert_eq!(FixedColorScheme::dark().prefers_dark(), Some(true));
        assert_eq!(FixedColorScheme::light().prefers_dark(), Some(false));
        assert_eq!(FixedColorScheme::unavailable().prefers_dark(), None);
    }

    #[test]
    fn test_manual_scheme_notifies_on_change_only() {
        let source = ManualColorScheme::new(Some(false));
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let id = source.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        source.set(false);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        source.set(true);
        source.set(true);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.prefers_dark(), Some(true));

        source.unsubscribe(id);
        source.set(false);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_probe_prefers_scheme_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("color-scheme");
        std::fs::write(&path, "dark\n").unwrap();

        assert_eq!(probe_scheme(Some(&path), Some("light"), None), Some(true));

        std::fs::write(&path, "'prefer-light'\n").unwrap();
        assert_eq!(probe_scheme(Some(&path), Some("dark"), None), Some(false));
    }

    #[test]
    fn test_probe_falls_through_sources() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert_eq!(probe_scheme(Some(&missing), Some("DARK"), None), Some(true));
        assert_eq!(probe_scheme(None, Some("nonsense"), Some("15;0")), Some(true));
        assert_eq!(probe_scheme(None, None, Some("0;15")), Some(false));
        assert_eq!(probe_scheme(None, None, Some("15;default;0")), Some(true));
        assert_eq!(probe_scheme(None, None, Some("garbage")), None);
        assert_eq!(probe_scheme(None, None, None), None);
    }

    #[tokio::test]
    async fn test_polled_scheme_picks_up_changes() {
        let flag = Arc::new(AtomicBool::new(false));
        let probe_flag = flag.clone();

        let source = PolledColorScheme::spawn(
            move || Some(probe_flag.load(Ordering::SeqCst)),
            Duration::from_millis(10),
        );
        assert_eq!(source.prefers_dark(), Some(false));

        let seen = Arc::new(AtomicBool::new(false));
        let seen_in_listener = seen.clone();
        source.subscribe(Box::new(move |dark| {
            seen_in_listener.store(dark, Ordering::SeqCst);
        }));

        flag.store(true, Ordering::SeqCst);
        for _ in 0..100 {
            if seen.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(seen.load(Ordering::SeqCst));
        assert_eq!(source.prefers_dark(), Some(true));
    }
}
