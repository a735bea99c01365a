//! One-shot gate on persisted-state restoration.
//!
//! The gate subscribes to the store when constructed. Each time it is polled
//! after a store change it checks the hydration flag; the first time the flag
//! is set it drops its subscription and starts the app shell. With the
//! subscription gone it can never fire again.
//!
//! Polls happen after every [`crate::AppEvent`]. The runtime also watches the
//! store while the gate is armed, so a persistence layer may call
//! [`AppStore::mark_hydrated`] directly instead of sending
//! [`crate::AppEvent::Hydrated`].

use lifeline_core::{AppStore, StoreSubscription};

use crate::{AppAction, action::Animation, shell};

/// Starts the app shell exactly once, after hydration completes.
#[derive(Debug)]
pub struct HydrationGate {
    store: AppStore,
    /// `None` once the gate has fired.
    subscription: Option<StoreSubscription>,
}

impl HydrationGate {
    /// Create the gate, subscribed to `store`.
    pub fn new(store: AppStore) -> Self {
        let subscription = Some(store.subscribe());
        Self { store, subscription }
    }

    /// Evaluate the gate after a possible state change.
    pub fn on_state_change(&mut self) -> Vec<AppAction> {
        let Some(subscription) = self.subscription.as_mut() else {
            return vec![];
        };

        if !subscription.changed() || !self.store.hydration_complete() {
            return vec![];
        }

        self.subscription = None;
        tracing::info!("hydration complete, starting app shell");
        shell::start_app(&self.store, Animation::None)
    }

    /// True until the gate fires.
    pub fn is_armed(&self) -> bool {
        self.subscription.is_some()
    }
}
