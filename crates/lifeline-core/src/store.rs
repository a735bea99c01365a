//! Shared application-state context.
//!
//! [`AppStore`] is a cheap-to-clone handle to a single [`AppState`]. Every
//! coordinator component receives a clone at construction and reads or
//! writes state only through the typed accessors below. All components run
//! on one logical thread and handle one event to completion before the next,
//! so the state lives in an `Rc<RefCell<_>>` and no borrow ever escapes an
//! accessor.
//!
//! Every write bumps a revision counter published on a
//! [`tokio::sync::watch`] channel. Components that need to react to state
//! changes hold a [`StoreSubscription`]; dropping it unsubscribes.

use std::{cell::RefCell, rc::Rc};

use tokio::sync::watch;

use crate::{notification::PendingNotification, version::Compatibility};

/// Plain application state shared by all coordinator components.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// App is in the foreground.
    pub active: bool,
    /// Persisted state has been restored.
    pub hydration_complete: bool,
    /// Root initializer has not finished yet.
    pub app_initializing: bool,
    /// Authentication token. `None` if logged out.
    pub credentials_token: Option<String>,
    /// Platform-tagged push device token. `None` until registered.
    pub device_token: Option<String>,
    /// Push registration completed.
    pub push_configured: bool,
    /// Server version the app is bound to. `None` if unknown or cleared.
    pub server_version: Option<String>,
    /// Server version the cached configuration/license was loaded for.
    pub config_version: Option<String>,
    /// Outcome of the last version announcement.
    pub compatibility: Compatibility,
    /// Display name of the default channel.
    pub channel_display_name: Option<String>,
    /// Notification waiting for initialization to finish.
    pub queued_notification: Option<PendingNotification>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active: false,
            hydration_complete: false,
            app_initializing: true,
            credentials_token: None,
            device_token: None,
            push_configured: false,
            server_version: None,
            config_version: None,
            compatibility: Compatibility::Unknown,
            channel_display_name: None,
            queued_notification: None,
        }
    }
}

/// Handle to the shared [`AppState`].
///
/// Clones share the same state and revision channel.
#[derive(Debug, Clone)]
pub struct AppStore {
    state: Rc<RefCell<AppState>>,
    revision: Rc<watch::Sender<u64>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl AppStore {
    /// Create a store seeded with `state`.
    pub fn new(state: AppState) -> Self {
        let (revision, _) = watch::channel(0);
        Self { state: Rc::new(RefCell::new(state)), revision: Rc::new(revision) }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Number of writes since the store was created.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Subscribe to state changes made after this call.
    pub fn subscribe(&self) -> StoreSubscription {
        StoreSubscription { rx: self.revision.subscribe() }
    }

    fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.state.borrow())
    }

    fn write<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> T {
        let out = f(&mut self.state.borrow_mut());
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
        out
    }

    /// App is in the foreground.
    pub fn is_active(&self) -> bool {
        self.read(|s| s.active)
    }

    /// Record the foreground state.
    pub fn set_active(&self, active: bool) {
        self.write(|s| s.active = active);
    }

    /// Persisted state has been restored.
    pub fn hydration_complete(&self) -> bool {
        self.read(|s| s.hydration_complete)
    }

    /// Mark hydration complete. Hydration never reverts.
    pub fn mark_hydrated(&self) {
        self.write(|s| s.hydration_complete = true);
    }

    /// Root initializer is still running.
    pub fn app_initializing(&self) -> bool {
        self.read(|s| s.app_initializing)
    }

    /// Record whether the root initializer is running.
    pub fn set_app_initializing(&self, initializing: bool) {
        self.write(|s| s.app_initializing = initializing);
    }

    /// Authentication token, if logged in.
    pub fn credentials_token(&self) -> Option<String> {
        self.read(|s| s.credentials_token.clone())
    }

    /// True if an authentication token is present.
    pub fn has_credentials(&self) -> bool {
        self.read(|s| s.credentials_token.is_some())
    }

    /// Written by the authentication subsystem.
    pub fn set_credentials_token(&self, token: Option<String>) {
        self.write(|s| s.credentials_token = token);
    }

    /// Platform-tagged device token, if registered.
    pub fn device_token(&self) -> Option<String> {
        self.read(|s| s.device_token.clone())
    }

    /// Push registration completed.
    pub fn push_configured(&self) -> bool {
        self.read(|s| s.push_configured)
    }

    /// Store the tagged device token and mark push as configured.
    pub fn register_device(&self, tagged_token: String) {
        self.write(|s| {
            s.device_token = Some(tagged_token);
            s.push_configured = true;
        });
    }

    /// Server version the app is bound to.
    pub fn server_version(&self) -> Option<String> {
        self.read(|s| s.server_version.clone())
    }

    /// Bind the app to an announced server version.
    pub fn set_server_version(&self, version: String) {
        self.write(|s| s.server_version = Some(version));
    }

    /// Forget the bound server version.
    pub fn clear_server_version(&self) {
        self.write(|s| s.server_version = None);
    }

    /// Version the cached configuration was loaded for.
    pub fn config_version(&self) -> Option<String> {
        self.read(|s| s.config_version.clone())
    }

    /// Written by the configuration loader once config and license are in.
    pub fn set_config_version(&self, version: String) {
        self.write(|s| s.config_version = Some(version));
    }

    /// Invalidate the cached configuration placeholder.
    pub fn clear_config_version(&self) {
        self.write(|s| s.config_version = None);
    }

    /// Outcome of the last version announcement.
    pub fn compatibility(&self) -> Compatibility {
        self.read(|s| s.compatibility.clone())
    }

    /// Record the outcome of a version announcement.
    pub fn set_compatibility(&self, compatibility: Compatibility) {
        self.write(|s| s.compatibility = compatibility);
    }

    /// Display name of the default channel.
    pub fn channel_display_name(&self) -> Option<String> {
        self.read(|s| s.channel_display_name.clone())
    }

    /// Set the default channel's display name verbatim.
    pub fn set_channel_display_name(&self, name: String) {
        self.write(|s| s.channel_display_name = Some(name));
    }

    /// Notification waiting for initialization, if any.
    pub fn queued_notification(&self) -> Option<PendingNotification> {
        self.read(|s| s.queued_notification.clone())
    }

    /// Put a notification in the single queue slot.
    ///
    /// Returns the notification it replaced, if any.
    pub fn queue_notification(&self, notification: PendingNotification) -> Option<PendingNotification> {
        self.write(|s| s.queued_notification.replace(notification))
    }

    /// Remove and return the queued notification.
    pub fn take_queued_notification(&self) -> Option<PendingNotification> {
        self.write(|s| s.queued_notification.take())
    }

    /// Drop everything bound to the current server.
    ///
    /// Clears the server version before the configuration placeholder and
    /// returns compatibility to [`Compatibility::Unknown`].
    pub fn reset_server_binding(&self) {
        self.write(|s| {
            s.server_version = None;
            s.config_version = None;
            s.compatibility = Compatibility::Unknown;
        });
    }
}

/// Subscription to [`AppStore`] changes.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct StoreSubscription {
    rx: watch::Receiver<u64>,
}

impl StoreSubscription {
    /// True if the store was written since the last call (or since
    /// subscribing). Consumes the change.
    pub fn changed(&mut self) -> bool {
        match self.rx.has_changed() {
            Ok(true) => {
                let _ = self.rx.borrow_and_update();
                true
            },
            Ok(false) | Err(_) => false,
        }
    }

    /// Wait for the next store write, consuming it.
    ///
    /// Resolves immediately if a write is already unseen. Never resolves
    /// once every store handle is gone.
    pub async fn wait(&mut self) {
        if self.rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
