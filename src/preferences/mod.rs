//! Preference persistence
//!
//! A small string-keyed store for user settings. Values are JSON-encoded on the
//! way in and decoded on the way out; every failure degrades to the caller's
//! default so the dashboard never refuses to start over a bad settings file.
//!
//! - **backend**: `PreferenceBackend` trait, file and in-memory media
//! - **store**: typed `PreferenceStore` with default fallback
//! - **error**: Error types

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, PreferenceBackend};
pub use error::{PreferenceError, PreferenceResult};
pub use store::{Lookup, PreferenceStore};

/// Well-known preference keys
pub mod keys {
    /// Tri-state theme preference (`"light"`, `"dark"`, `"system"`)
    pub const THEME: &str = "dashboard-theme";
    /// Sidebar collapse flag (JSON boolean)
    pub const SIDEBAR_COLLAPSED: &str = "sidebar-collapsed";
    /// Signed-in user profile shown in the header menu
    pub const USER_PREFERENCES: &str = "user-preferences";
}
