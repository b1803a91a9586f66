//! Typed get/set over a preference backend

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::backend::{FileBackend, MemoryBackend, PreferenceBackend};
use super::error::{PreferenceError, PreferenceResult};
use crate::config::PreferencesConfig;

/// Outcome of a preference read at the public boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<T> {
    pub value: T,
    /// True when the value is the caller's default (absent, corrupt or unreadable)
    pub used_default: bool,
}

/// JSON-encoding preference store
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn PreferenceBackend>,
}

impl PreferenceStore {
    /// Create a store over an explicit backend
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a store that only lives as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open the durable store described by `config`
    ///
    /// Falls back to an in-memory store when the preference directory cannot
    /// be prepared, so callers always get a working store.
    pub fn open(config: &PreferencesConfig) -> Self {
        let path = config.file_path();
        match FileBackend::open(&path) {
            Ok(backend) => {
                tracing::debug!(path = ?backend.path(), "Opened preference file");
                Self::new(backend)
            }
            Err(e) => {
                tracing::warn!("Preferences unavailable ({}); using in-memory store", e);
                Self::in_memory()
            }
        }
    }

    /// Name of the active backend ("file" or "memory")
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Read and decode `key`, surfacing every failure
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> PreferenceResult<Option<T>> {
        match self.backend.get_raw(key)? {
            Some(encoded) => serde_json::from_str(&encoded)
                .map(Some)
                .map_err(|e| PreferenceError::serialization(key, e)),
            None => Ok(None),
        }
    }

    /// Encode and write `value` under `key`, surfacing every failure
    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PreferenceResult<()> {
        let encoded =
            serde_json::to_string(value).map_err(|e| PreferenceError::serialization(key, e))?;
        self.backend.set_raw(key, encoded)
    }

    /// Read `key`, reporting whether the default had to be used
    pub fn lookup<T: DeserializeOwned>(&self, key: &str, default: T) -> Lookup<T> {
        match self.try_get(key) {
            Ok(Some(value)) => Lookup {
                value,
                used_default: false,
            },
            Ok(None) => Lookup {
                value: default,
                used_default: true,
            },
            Err(e) => {
                match e {
                    PreferenceError::Serialization { .. } => {
                        tracing::debug!("Ignoring malformed preference: {}", e)
                    }
                    _ => tracing::warn!("Preference read failed: {}", e),
                }
                Lookup {
                    value: default,
                    used_default: true,
                }
            }
        }
    }

    /// Read `key`, falling back to `default` on any failure
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.lookup(key, default).value
    }

    /// Write `value` under `key`; failures are logged and swallowed
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!(backend = self.backend.name(), "Preference write failed: {}", e);
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::keys;
    use tempfile::tempdir;

    /// Backend whose writes always fail
    struct ReadOnlyBackend;

    impl PreferenceBackend for ReadOnlyBackend {
        fn name(&self) -> &'static str {
            "read-only"
        }

        fn get_raw(&self, _key: &str) -> PreferenceResult<Option<String>> {
            Ok(None)
        }

        fn set_raw(&self, _key: &str, _encoded: String) -> PreferenceResult<()> {
            Err(PreferenceError::io(
                "/dev/full",
                std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
            ))
        }
    }

    #[test]
    fn test_round_trip_supported_values() {
        let store = PreferenceStore::in_memory();

        store.set(keys::THEME, "dark");
        store.set(keys::SIDEBAR_COLLAPSED, &true);

        assert_eq!(store.get(keys::THEME, "system".to_string()), "dark");
        assert!(store.get(keys::SIDEBAR_COLLAPSED, false));
    }

    #[test]
    fn test_missing_key_returns_default() {
        let store = PreferenceStore::in_memory();
        let lookup = store.lookup("missing", 42u32);
        assert_eq!(lookup.value, 42);
        assert!(lookup.used_default);
    }

    #[test]
    fn test_malformed_value_treated_as_absent() {
        let backend = MemoryBackend::new();
        backend
            .set_raw(keys::SIDEBAR_COLLAPSED, "{not json".to_string())
            .unwrap();
        let store = PreferenceStore::new(backend);

        assert!(store.try_get::<bool>(keys::SIDEBAR_COLLAPSED).is_err());
        let lookup = store.lookup(keys::SIDEBAR_COLLAPSED, false);
        assert!(!lookup.value);
        assert!(lookup.used_default);
    }

    #[test]
    fn test_type_mismatch_falls_back() {
        let store = PreferenceStore::in_memory();
        store.set("k", "a string");
        assert!(store.get("k", true));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let store = PreferenceStore::new(ReadOnlyBackend);
        store.set(keys::THEME, "dark");
        assert!(store.try_set(keys::THEME, "dark").is_err());
        assert_eq!(store.get(keys::THEME, "light".to_string()), "light");
    }

    #[test]
    fn test_encoded_layout_is_json() {
        let backend = MemoryBackend::new();
        let store = PreferenceStore::new(backend);
        store.set(keys::THEME, "light");

        let raw = store.backend.get_raw(keys::THEME).unwrap();
        assert_eq!(raw.as_deref(), Some("\"light\""));
    }

    #[test]
    fn test_open_durable_store() {
        let dir = tempdir().unwrap();
        let config = PreferencesConfig {
            dir: dir.path().to_string_lossy().to_string(),
            file: "prefs.json".to_string(),
        };

        let store = PreferenceStore::open(&config);
        assert_eq!(store.backend_name(), "file");
        store.set(keys::SIDEBAR_COLLAPSED, &true);

        let reopened = PreferenceStore::open(&config);
        assert!(reopened.get(keys::SIDEBAR_COLLAPSED, false));
    }

    #[test]
    fn test_open_falls_back_to_memory() {
        let dir = tempdir().unwrap();
        // A regular file where the directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let config = PreferencesConfig {
            dir: blocker.join("sub").to_string_lossy().to_string(),
            file: "prefs.json".to_string(),
        };

        let store = PreferenceStore::open(&config);
        assert_eq!(store.backend_name(), "memory");
        store.set("k", &1);
        assert_eq!(store.get("k", 0), 1);
    }
}
