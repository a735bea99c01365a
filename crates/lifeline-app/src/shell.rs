//! App-shell start routine.
//!
//! Shared by the hydration gate (cold start) and the session reset
//! coordinator (restart after a server change).

use lifeline_core::AppStore;

use crate::{AppAction, action::Animation};

/// Root screen and its fixed chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootScreen {
    /// Registered screen name.
    pub name: &'static str,
    /// Hide the navigation bar.
    pub nav_bar_hidden: bool,
    /// Hide the status bar.
    pub status_bar_hidden: bool,
    /// Hide the status bar together with the navigation bar.
    pub status_bar_hide_with_nav_bar: bool,
}

/// The single navigable root of the app.
pub const ROOT_SCREEN: RootScreen = RootScreen {
    name: "Root",
    nav_bar_hidden: true,
    status_bar_hidden: false,
    status_bar_hide_with_nav_bar: false,
};

/// Actions that start the app shell.
///
/// Push registration is requested first if it has not completed yet.
pub fn start_app(store: &AppStore, animation: Animation) -> Vec<AppAction> {
    let mut actions = Vec::with_capacity(2);
    if !store.push_configured() {
        actions.push(AppAction::ConfigurePushNotifications);
    }
    actions.push(AppAction::StartApp { animation, screen: ROOT_SCREEN });
    actions
}
