//! Presentation marker for the resolved theme

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use super::ResolvedTheme;

/// Receives the resolved theme whenever it is (re)applied
pub trait ThemeApplier: Send + Sync {
    fn apply(&self, theme: ResolvedTheme);
}

impl<F> ThemeApplier for F
where
    F: Fn(ResolvedTheme) + Send + Sync,
{
    fn apply(&self, theme: ResolvedTheme) {
        self(theme)
    }
}

#[derive(Debug, Default)]
struct RootState {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

/// Root element of the rendered document
///
/// Carries a class list and attributes the same way an `<html>` element does.
/// Applying a theme swaps the `light`/`dark` class and sets `data-theme`.
#[derive(Debug, Default)]
pub struct DocumentRoot {
    state: Mutex<RootState>,
}

impl DocumentRoot {
    pub const THEME_ATTRIBUTE: &'static str = "data-theme";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&self, class: &str) {
        self.lock().classes.insert(class.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.lock().classes.iter().cloned().collect()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.lock().attributes.get(name).cloned()
    }

    /// Theme currently marked on the root, if any
    pub fn theme(&self) -> Option<ResolvedTheme> {
        match self.attribute(Self::THEME_ATTRIBUTE)?.as_str() {
            "dark" => Some(ResolvedTheme::Dark),
            "light" => Some(ResolvedTheme::Light),
            _ => None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RootState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ThemeApplier for DocumentRoot {
    fn apply(&self, theme: ResolvedTheme) {
        let mut state = self.lock();
        state.classes.remove("light");
        state.classes.remove("dark");
        state.classes.insert(theme.as_str().to_string());
        state
            .attributes
            .insert(Self::THEME_ATTRIBUTE.to_string(), theme.as_str().to_string());
    }
}
