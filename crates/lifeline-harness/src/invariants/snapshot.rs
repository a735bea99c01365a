//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the lifecycle at a point in
//! time. Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use lifeline_core::{AppStore, Compatibility, PendingNotification, Platform};

use crate::sim_driver::Effect;

/// Snapshot of the store plus every effect the platform has seen.
#[derive(Debug, Clone, Default)]
pub struct LifecycleSnapshot {
    /// Platform the coordinator was configured for.
    pub platform: Platform,
    /// Platform effects in execution order.
    pub effects: Vec<Effect>,
    /// Tagged device token, if registered.
    pub device_token: Option<String>,
    /// Root initializer still running.
    pub app_initializing: bool,
    /// Notification waiting for initialization.
    pub queued_notification: Option<PendingNotification>,
    /// Compatibility verdict.
    pub compatibility: Compatibility,
    /// Accepted server version.
    pub server_version: Option<String>,
}

impl LifecycleSnapshot {
    /// Capture the store together with recorded effects.
    pub fn capture(store: &AppStore, platform: Platform, effects: Vec<Effect>) -> Self {
        let state = store.snapshot();
        Self {
            platform,
            effects,
            device_token: state.device_token,
            app_initializing: state.app_initializing,
            queued_notification: state.queued_notification,
            compatibility: state.compatibility,
            server_version: state.server_version,
        }
    }

    /// Add an effect, for hand-built snapshots.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
