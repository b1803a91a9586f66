//! Key-value backends for the preference store
//!
//! A backend only moves already-encoded strings around. JSON encoding and the
//! default-value policy live in [`PreferenceStore`](super::PreferenceStore).
//!
//! # File layout
//!
//! ```text
//! ~/.config/vantage/preferences.json
//! {
//!   "dashboard-theme": "\"dark\"",
//!   "sidebar-collapsed": "true"
//! }
//! ```
//!
//! Each value is the JSON encoding of the preference, stored as a string, so a
//! single corrupt entry cannot poison its neighbours.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{PreferenceError, PreferenceResult};

/// Storage medium for encoded preference values
pub trait PreferenceBackend: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Read the encoded value stored under `key`
    fn get_raw(&self, key: &str) -> PreferenceResult<Option<String>>;

    /// Store an encoded value under `key`, replacing any previous value
    fn set_raw(&self, key: &str, encoded: String) -> PreferenceResult<()>;
}

/// Durable backend: one JSON document on disk
pub struct FileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open (or prepare) the preference file at `path`
    ///
    /// The parent directory is created if needed. The file itself is created
    /// on the first write.
    pub fn open(path: impl Into<PathBuf>) -> PreferenceResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PreferenceError::io(parent, e))?;
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> PreferenceResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(PreferenceError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| PreferenceError::CorruptFile {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> PreferenceResult<()> {
        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            PreferenceError::CorruptFile {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        // Write-then-rename so a crash never leaves a half-written document
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|e| PreferenceError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| PreferenceError::io(&self.path, e))?;
        Ok(())
    }
}

impl PreferenceBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get_raw(&self, key: &str) -> PreferenceResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_raw(&self, key: &str, encoded: String) -> PreferenceResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;

        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(PreferenceError::CorruptFile { path, message }) => {
                tracing::warn!(?path, %message, "Discarding corrupt preference file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        entries.insert(key.to_string(), encoded);
        self.write_all(&entries)
    }
}

/// Volatile backend used for tests and when no durable medium is available
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get_raw(&self, key: &str) -> PreferenceResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, encoded: String) -> PreferenceResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        {
            let backend = FileBackend::open(&path).unwrap();
            backend.set_raw("dashboard-theme", "\"dark\"".to_string()).unwrap();
            backend.set_raw("sidebar-collapsed", "true".to_string()).unwrap();
        }

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(
            backend.get_raw("dashboard-theme").unwrap().as_deref(),
            Some("\"dark\"")
        );
        assert_eq!(
            backend.get_raw("sidebar-collapsed").unwrap().as_deref(),
            Some("true")
        );
        assert!(backend.get_raw("missing").unwrap().is_none());
    }

    #[test]
    fn test_file_backend_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.path(), path.as_path());
        backend.set_raw("k", "1".to_string()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_backend_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ this is not json").unwrap();

        let backend = FileBackend::open(&path).unwrap();
        assert!(matches!(
            backend.get_raw("k"),
            Err(PreferenceError::CorruptFile { .. })
        ));

        // A write replaces the corrupt document
        backend.set_raw("k", "false".to_string()).unwrap();
        assert_eq!(backend.get_raw("k").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_memory_backend_last_write_wins() {
        let backend = MemoryBackend::new();
        backend.set_raw("k", "1".to_string()).unwrap();
        backend.set_raw("k", "2".to_string()).unwrap();
        assert_eq!(backend.get_raw("k").unwrap().as_deref(), Some("2"));
    }
}
