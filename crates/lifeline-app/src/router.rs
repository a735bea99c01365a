//! Inbound notification routing.
//!
//! Every notification is classified by [`classify`], a pure function of the
//! notification and a [`RoutingContext`] snapshot. The router then applies
//! the resulting [`Route`], which is exactly one of: mark a channel read,
//! display in-app, navigate, queue, or nothing.
//!
//! Priority order (first match wins):
//!
//! 1. `data.type == "clear"` marks the channel read.
//! 2. Foreground delivery shows an in-app banner.
//! 3. A tap on a remote notification navigates, or is queued while the app
//!    initializes with a logged-in user, or is dropped otherwise.
//! 4. Anything else is ignored.

use lifeline_core::{AppStore, DeviceNotification, PendingNotification};

use crate::{AppAction, action::UiSignal};

/// Shared-state inputs to classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingContext {
    /// Root initializer is still running.
    pub app_initializing: bool,
    /// An authentication token is present.
    pub has_credentials: bool,
}

impl RoutingContext {
    /// Read the context from the store.
    pub fn from_store(store: &AppStore) -> Self {
        Self {
            app_initializing: store.app_initializing(),
            has_credentials: store.has_credentials(),
        }
    }
}

/// Routing decision for a single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Mark the channel read.
    MarkChannelRead {
        /// Channel named by the notification.
        channel_id: String,
    },
    /// Show an in-app banner.
    DisplayInApp,
    /// Navigate to the notification's content.
    Navigate,
    /// Hold until initialization finishes.
    Queue,
    /// Tapped during initialization without credentials.
    Drop,
    /// Background delivery, local notification tap, or nothing to act on.
    Ignore,
}

/// Classify a notification. Pure and deterministic.
pub fn classify(notification: &PendingNotification, ctx: RoutingContext) -> Route {
    if notification.data.is_clear() {
        return match notification.data.channel_id() {
            Some(channel_id) => Route::MarkChannelRead { channel_id: channel_id.to_string() },
            None => Route::Ignore,
        };
    }

    if notification.foreground {
        return Route::DisplayInApp;
    }

    if notification.user_interaction && !notification.local_notification {
        return match ctx {
            RoutingContext { app_initializing: false, .. } => Route::Navigate,
            RoutingContext { app_initializing: true, has_credentials: true } => Route::Queue,
            RoutingContext { app_initializing: true, has_credentials: false } => Route::Drop,
        };
    }

    Route::Ignore
}

/// Applies routing decisions to shared state and actions.
#[derive(Debug, Clone)]
pub struct NotificationRouter {
    store: AppStore,
}

impl NotificationRouter {
    /// Create a router over the shared store.
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Route a raw inbound notification.
    pub fn on_notification(&mut self, raw: DeviceNotification) -> Vec<AppAction> {
        if raw.data.is_none() {
            tracing::debug!("notification without data, ignoring");
            return vec![];
        }

        let notification = PendingNotification::from_device(raw);
        let route = classify(&notification, RoutingContext::from_store(&self.store));
        tracing::debug!(?route, kind = ?notification.data.kind(), "routing notification");

        match route {
            Route::MarkChannelRead { channel_id } => vec![AppAction::MarkChannelRead { channel_id }],
            Route::DisplayInApp => {
                vec![AppAction::Signal(UiSignal::NotificationReceived(notification))]
            },
            Route::Navigate => navigate(notification),
            Route::Queue => {
                if let Some(replaced) = self.store.queue_notification(notification) {
                    tracing::debug!(
                        message = %replaced.message,
                        "queued notification replaced before initialization finished"
                    );
                }
                vec![]
            },
            Route::Drop => {
                tracing::debug!("dropping notification tapped while logged out and initializing");
                vec![]
            },
            Route::Ignore => {
                if notification.data.is_clear() {
                    tracing::warn!("clear notification without channel_id");
                }
                vec![]
            },
        }
    }

    /// Finish initialization and drain the queued notification, if any.
    pub fn on_initialized(&mut self) -> Vec<AppAction> {
        self.store.set_app_initializing(false);
        match self.store.take_queued_notification() {
            Some(notification) => {
                tracing::info!("delivering notification queued during initialization");
                navigate(notification)
            },
            None => vec![],
        }
    }
}

fn navigate(notification: PendingNotification) -> Vec<AppAction> {
    vec![AppAction::GoToNotification(notification), AppAction::Signal(UiSignal::NotificationTapped)]
}
