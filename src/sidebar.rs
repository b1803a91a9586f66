//! Sidebar and navigation state
//!
//! The collapse flag is a persisted preference; the mobile drawer is
//! transient and closes when the viewport grows to desktop width or the user
//! presses Escape.

use serde::Serialize;

use crate::preferences::{keys, PreferenceStore};

/// Viewport width at which the layout switches to the desktop sidebar
pub const DESKTOP_BREAKPOINT: u32 = 1024;

/// Entry in the sidebar navigation
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NavigationItem {
    pub id: &'static str,
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: [NavigationItem; 3] = [
    NavigationItem {
        id: "dashboard",
        label: "Dashboard",
        href: "/",
    },
    NavigationItem {
        id: "analytics",
        label: "Analytics",
        href: "/analytics",
    },
    NavigationItem {
        id: "settings",
        label: "Settings",
        href: "/settings",
    },
];

#[derive(Debug)]
pub struct SidebarState {
    store: PreferenceStore,
    collapsed: bool,
    mobile_menu_open: bool,
    active_item: &'static str,
}

impl SidebarState {
    /// Load the persisted collapse flag (expanded when unset)
    pub fn load(store: PreferenceStore) -> Self {
        let collapsed = store.get(keys::SIDEBAR_COLLAPSED, false);
        Self {
            store,
            collapsed,
            mobile_menu_open: false,
            active_item: NAVIGATION[0].id,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
        self.store.set(keys::SIDEBAR_COLLAPSED, &collapsed);
        tracing::debug!(collapsed, "Sidebar collapse changed");
    }

    /// Flip the collapse flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.set_collapsed(!self.collapsed);
        self.collapsed
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    /// React to a viewport resize
    pub fn handle_resize(&mut self, width: u32) {
        if width >= DESKTOP_BREAKPOINT {
            self.close_mobile_menu();
        }
    }

    /// Escape closes the mobile drawer
    pub fn handle_escape(&mut self) {
        self.close_mobile_menu();
    }

    pub fn active_item(&self) -> &'static str {
        self.active_item
    }

    /// Select a navigation item; unknown ids are ignored
    pub fn select(&mut self, id: &str) -> bool {
        match NAVIGATION.iter().find(|item| item.id == id) {
            Some(item) => {
                self.active_item = item.id;
                self.close_mobile_menu();
                true
            }
            None => false,
        }
    }
}
