//! Observable theme store

use std::sync::{Arc, Mutex, Weak};

use super::listeners::{Listeners, SubscriptionId};
use super::{resolve, ColorSchemeSource, ResolvedTheme, Theme, ThemeApplier};
use crate::preferences::{keys, PreferenceStore};

#[derive(Debug, Clone, Copy)]
struct ThemeState {
    preference: Theme,
    environment: ResolvedTheme,
    resolved: ResolvedTheme,
    /// Set once the source has pushed a value; pushed values beat the initial read
    environment_pushed: bool,
    generation: u64,
}

struct Shared {
    state: Mutex<ThemeState>,
    applier: Arc<dyn ThemeApplier>,
    listeners: Listeners<ResolvedTheme>,
}

impl Shared {
    fn lock(&self) -> std::sync::MutexGuard<'_, ThemeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mutate the state, then re-apply the marker and notify on change
    ///
    /// The applier and listeners run without the state lock held, so they may
    /// call back into the resolver.
    fn update(&self, f: impl FnOnce(&mut ThemeState)) {
        let (previous, resolved, generation) = {
            let mut state = self.lock();
            let previous = state.resolved;
            f(&mut state);
            state.resolved = resolve(state.preference, state.environment);
            state.generation += 1;
            (previous, state.resolved, state.generation)
        };

        // A newer update dispatches the latest value instead
        if self.lock().generation != generation {
            return;
        }

        self.applier.apply(resolved);
        if previous != resolved {
            tracing::debug!(from = %previous, to = %resolved, "Resolved theme changed");
            self.listeners.notify(resolved);
        }
    }
}

/// Owns the theme preference and keeps the resolved theme current
///
/// Reads the preference from the [`PreferenceStore`], tracks the environment
/// through a [`ColorSchemeSource`] subscription and pushes every resolution
/// to a [`ThemeApplier`].
pub struct ThemeResolver {
    shared: Arc<Shared>,
    store: PreferenceStore,
    source: Arc<dyn ColorSchemeSource>,
    source_subscription: SubscriptionId,
}

impl ThemeResolver {
    /// Create a resolver whose preference defaults to `system`
    pub fn new(
        store: PreferenceStore,
        source: Arc<dyn ColorSchemeSource>,
        applier: Arc<dyn ThemeApplier>,
    ) -> Self {
        Self::with_default(store, source, applier, Theme::default())
    }

    /// Create a resolver with an explicit default preference
    pub fn with_default(
        store: PreferenceStore,
        source: Arc<dyn ColorSchemeSource>,
        applier: Arc<dyn ThemeApplier>,
        default: Theme,
    ) -> Self {
        let preference = store.get(keys::THEME, default);
        let shared = Arc::new(Shared {
            state: Mutex::new(ThemeState {
                preference,
                environment: ResolvedTheme::Light,
                resolved: resolve(preference, ResolvedTheme::Light),
                environment_pushed: false,
                generation: 0,
            }),
            applier,
            listeners: Listeners::new(),
        });

        // Subscribe before reading so a flip in between is not lost
        let weak: Weak<Shared> = Arc::downgrade(&shared);
        let source_subscription = source.subscribe(Box::new(move |prefers_dark| {
            if let Some(shared) = weak.upgrade() {
                shared.update(|state| {
                    state.environment = ResolvedTheme::from_prefers_dark(prefers_dark);
                    state.environment_pushed = true;
                });
            }
        }));

        let initial = ResolvedTheme::from_prefers_dark(source.prefers_dark().unwrap_or(false));
        shared.update(|state| {
            if !state.environment_pushed {
                state.environment = initial;
            }
        });

        {
            let state = shared.lock();
            tracing::debug!(
                %preference,
                environment = %state.environment,
                resolved = %state.resolved,
                "Theme resolver initialized"
            );
        }

        Self {
            shared,
            store,
            source,
            source_subscription,
        }
    }

    /// Current preference
    pub fn theme(&self) -> Theme {
        self.shared.lock().preference
    }

    /// Persist a new preference and re-apply the resolved theme
    pub fn set_theme(&self, theme: Theme) {
        self.store.set(keys::THEME, &theme);
        self.shared.update(|state| state.preference = theme);
        tracing::debug!(%theme, "Theme preference set");
    }

    /// Advance the preference one step along the toggle cycle
    pub fn cycle_theme(&self) -> Theme {
        let next = self.theme().next();
        self.set_theme(next);
        next
    }

    /// Concrete theme for the current preference and environment
    pub fn resolved_theme(&self) -> ResolvedTheme {
        let state = self.shared.lock();
        resolve(state.preference, state.environment)
    }

    /// Last environment signal seen (light when unavailable)
    pub fn environment(&self) -> ResolvedTheme {
        self.shared.lock().environment
    }

    /// Call `listener` with the new resolved theme each time it changes
    pub fn subscribe(&self, listener: Box<dyn Fn(ResolvedTheme) + Send + Sync>) -> SubscriptionId {
        self.shared.listeners.add(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.listeners.remove(id)
    }
}

impl Drop for ThemeResolver {
    fn drop(&mut self) {
        self.source.unsubscribe(self.source_subscription);
    }
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = *self.shared.lock();
        f.debug_struct("ThemeResolver")
            .field("preference", &state.preference)
            .field("environment", &state.environment)
            .field("resolved", &state.resolved)
            .finish()
    }
}
