//! Teardown when the active server or session is reset.

use lifeline_core::AppStore;

use crate::{AppAction, action::Animation, shell};

/// Clears server-bound state and restarts the app shell.
#[derive(Debug, Clone)]
pub struct SessionResetCoordinator {
    store: AppStore,
}

impl SessionResetCoordinator {
    /// Create the coordinator over the shared store.
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Handle a reset signal.
    ///
    /// The server version is gone from the store before any action runs, so
    /// the restarted shell can never observe the previous server's version.
    /// Deferred work queued for the previous server is discarded first. Effects
    /// are then ordered: drop the client's pinned version, cancel local
    /// notifications, restart the shell with a fade.
    pub fn on_reset(&mut self) -> Vec<AppAction> {
        tracing::info!("navigation reset, clearing server binding");
        self.store.reset_server_binding();

        let mut actions = vec![
            AppAction::CancelDeferred,
            AppAction::ClearClientServerVersion,
            AppAction::CancelLocalNotifications,
        ];
        actions.extend(shell::start_app(&self.store, Animation::Fade));
        actions
    }
}
