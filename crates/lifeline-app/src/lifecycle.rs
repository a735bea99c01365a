//! Lifecycle coordinator.
//!
//! This module defines [`Lifecycle`], the single router over the
//! [`AppEvent`] bus. It owns the five lifecycle components and forwards each
//! event to exactly one of them. Components never call each other; they
//! communicate only through the shared [`AppStore`].
//!
//! This is a pure state machine: it consumes [`AppEvent`] inputs and produces
//! [`AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Seeds activity state at construction.
//! - Polls the hydration gate after every event, and on request after store
//!   writes made outside the event bus.
//! - Records push registration and the default channel name.

use lifeline_core::{ActivityState, AppStore, Platform};

use crate::{
    AppAction, AppEvent, LifecycleConfig,
    activity::AppActivityObserver,
    compatibility::ServerCompatibilityGate,
    hydration::HydrationGate,
    reset::SessionResetCoordinator,
    router::NotificationRouter,
};

/// Application lifecycle state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies; fully testable without a runtime.
#[derive(Debug)]
pub struct Lifecycle {
    store: AppStore,
    platform: Platform,
    activity: AppActivityObserver,
    hydration: HydrationGate,
    compatibility: ServerCompatibilityGate,
    router: NotificationRouter,
    reset: SessionResetCoordinator,
}

impl Lifecycle {
    /// Create the coordinator.
    ///
    /// The hydration gate subscribes before activity is seeded, so the
    /// seeding write counts as a state change for the first poll.
    pub fn new(store: AppStore, config: &LifecycleConfig, current: &ActivityState) -> Self {
        let hydration = HydrationGate::new(store.clone());
        let activity = AppActivityObserver::new(store.clone(), current);

        Self {
            platform: config.platform,
            activity,
            hydration,
            compatibility: ServerCompatibilityGate::new(store.clone(), config),
            router: NotificationRouter::new(store.clone()),
            reset: SessionResetCoordinator::new(store.clone()),
            store,
        }
    }

    /// Initial hydration check. Call once before handling events.
    pub fn start(&mut self) -> Vec<AppAction> {
        self.hydration.on_state_change()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        let mut actions = match event {
            AppEvent::ActivityChanged(state) => {
                self.activity.on_change(&state);
                vec![]
            },
            AppEvent::Hydrated => {
                self.store.mark_hydrated();
                vec![]
            },
            AppEvent::ConfigChanged { server_version } => {
                self.compatibility.on_config_changed(&server_version)
            },
            AppEvent::ConfigLoaded { server_version } => {
                self.store.set_config_version(server_version);
                vec![]
            },
            AppEvent::UpgradePromptAcknowledged => self.compatibility.on_upgrade_acknowledged(),
            AppEvent::NavigationReset => self.reset.on_reset(),
            AppEvent::DefaultChannelNamed { display_name } => {
                self.store.set_channel_display_name(display_name);
                vec![]
            },
            AppEvent::PushRegistered { token } => {
                tracing::info!(platform = %self.platform, "push device registered");
                self.store.register_device(self.platform.tag_device_token(&token));
                vec![]
            },
            AppEvent::Notification(notification) => self.router.on_notification(notification),
            AppEvent::InitializationFinished => self.router.on_initialized(),
            AppEvent::InteractionsSettled => vec![],
        };

        actions.extend(self.hydration.on_state_change());
        actions
    }

    /// Re-check the hydration gate after a store write that arrived without
    /// an event.
    pub fn on_store_changed(&mut self) -> Vec<AppAction> {
        self.hydration.on_state_change()
    }

    /// Shared application state.
    pub fn store(&self) -> &AppStore {
        &self.store
    }

    /// True until the hydration gate has started the app shell.
    pub fn awaiting_hydration(&self) -> bool {
        self.hydration.is_armed()
    }
}
