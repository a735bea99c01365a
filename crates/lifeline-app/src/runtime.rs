//! Generic runtime for lifecycle orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`Lifecycle`]: pure lifecycle state machine
//! - [`Driver`]: platform-specific I/O
//! - [`PushService`]: push registration and inbound notifications
//!
//! Deferred work is parked in an [`IdleQueue`] and run once the driver
//! reports no interaction in flight. While hydration is pending the runtime
//! also wakes on raw store writes.

use lifeline_core::{AppStore, DeviceNotification, StoreSubscription};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    AppAction, AppEvent, Driver, Lifecycle, LifecycleConfig,
    action::DeferredTask,
    deferred::IdleQueue,
    push::{PushOptions, PushRegistration, PushService, RegistrationHandle},
};

/// Fatal runtime failure.
#[derive(Debug, Error)]
pub enum RuntimeError<E: std::error::Error + 'static> {
    /// The driver could not deliver the next event.
    #[error("driver event source failed: {0}")]
    Driver(#[source] E),
}

/// Registration kept alive for the lifetime of the runtime.
#[derive(Debug)]
struct ActiveRegistration {
    _handle: RegistrationHandle,
    notifications: mpsc::UnboundedReceiver<DeviceNotification>,
}

/// Generic runtime that orchestrates [`Lifecycle`], a [`Driver`] and a
/// [`PushService`].
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `P`: Platform push service
pub struct Runtime<D, P>
where
    D: Driver,
    P: PushService,
{
    driver: D,
    push: P,
    lifecycle: Lifecycle,
    idle: IdleQueue,
    registration: Option<ActiveRegistration>,
    store_changes: StoreSubscription,
}

impl<D, P> Runtime<D, P>
where
    D: Driver,
    P: PushService,
{
    /// Create a runtime. Activity is seeded from the driver.
    pub fn new(driver: D, push: P, store: AppStore, config: &LifecycleConfig) -> Self {
        let current = driver.current_activity();
        let lifecycle = Lifecycle::new(store, config, &current);
        let store_changes = lifecycle.store().subscribe();
        Self {
            driver,
            push,
            lifecycle,
            idle: IdleQueue::new(),
            registration: None,
            store_changes,
        }
    }

    /// Run the main event loop.
    ///
    /// Performs the initial hydration check, then multiplexes driver events
    /// and push notifications until the driver returns `None`. Until the
    /// shell has started, store writes are watched too.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver's event source fails. Side-effect
    /// failures are logged and do not stop the loop.
    pub async fn run(mut self) -> Result<(), RuntimeError<D::Error>> {
        self.start().await;

        loop {
            let watching = self.lifecycle.awaiting_hydration();
            let event = tokio::select! {
                biased;
                () = self.store_changes.wait(), if watching => None,
                event = self.driver.next_event() => match event.map_err(RuntimeError::Driver)? {
                    Some(event) => Some(event),
                    None => break,
                },
                Some(notification) = next_notification(&mut self.registration) => {
                    Some(AppEvent::Notification(notification))
                },
            };

            match event {
                Some(event) => self.dispatch(event).await,
                None => self.on_store_changed().await,
            }
        }

        tracing::info!("event source closed, stopping");
        self.driver.stop();
        Ok(())
    }

    /// Initial hydration check. Call once before dispatching events.
    pub async fn start(&mut self) {
        let actions = self.lifecycle.start();
        self.process_actions(actions).await;
        self.drain_idle();
    }

    /// Dispatch a single event and execute everything it produces.
    pub async fn dispatch(&mut self, event: AppEvent) {
        tracing::trace!(?event, "dispatching event");
        let actions = self.lifecycle.handle(event);
        self.process_actions(actions).await;
        self.drain_idle();
    }

    /// Re-evaluate hydration after a store write made outside the event bus.
    pub async fn on_store_changed(&mut self) {
        let actions = self.lifecycle.on_store_changed();
        self.process_actions(actions).await;
        self.drain_idle();
    }

    /// Dispatch every notification the push service has already delivered.
    ///
    /// Returns the number of notifications dispatched.
    pub async fn pump_notifications(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(notification) =
            self.registration.as_mut().and_then(|active| active.notifications.try_recv().ok())
        {
            self.dispatch(AppEvent::Notification(notification)).await;
            delivered += 1;
        }
        delivered
    }

    /// Execute actions returned by the lifecycle.
    ///
    /// Push registration runs after the rest of its batch so the shell is
    /// started without waiting on the platform permission flow.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);
            let mut register = false;

            for action in actions {
                match action {
                    AppAction::ConfigurePushNotifications => register = true,
                    AppAction::Defer(task) => {
                        tracing::debug!(?task, "deferring until interactions settle");
                        self.idle.push(task);
                    },
                    AppAction::CancelDeferred => {
                        let dropped = self.idle.clear();
                        if dropped > 0 {
                            tracing::info!(dropped, "discarding deferred work for previous server");
                        }
                    },
                    action => self.perform(action),
                }
            }

            if register && let Some(event) = self.register_push().await {
                pending_actions.extend(self.lifecycle.handle(event));
            }
        }
    }

    /// Execute a single platform effect. Failures are logged.
    fn perform(&mut self, action: AppAction) {
        let name = action.name();
        let result = match action {
            AppAction::StartApp { animation, screen } => self.driver.start_app(animation, &screen),
            AppAction::MarkChannelRead { channel_id } => self.driver.mark_channel_read(&channel_id),
            AppAction::GoToNotification(notification) => {
                self.driver.go_to_notification(&notification)
            },
            AppAction::Signal(signal) => self.driver.emit(signal),
            AppAction::ShowUpgradePrompt(prompt) => self.driver.show_upgrade_prompt(&prompt),
            AppAction::SetBadgeCount(count) => self.driver.set_badge_count(count),
            AppAction::LoadConfigAndLicense { server_version } => {
                self.driver.load_config_and_license(&server_version)
            },
            AppAction::ClearClientServerVersion => self.driver.clear_client_server_version(),
            AppAction::CancelLocalNotifications => self.driver.cancel_local_notifications(),

            // Handled by process_actions
            AppAction::ConfigurePushNotifications
            | AppAction::Defer(_)
            | AppAction::CancelDeferred => {
                tracing::warn!(action = name, "unexpected action in effect path");
                Ok(())
            },
        };

        if let Err(e) = result {
            tracing::warn!(action = name, error = %e, "platform effect failed");
        }
    }

    /// Register with the push service unless a registration is already live.
    ///
    /// Returns the event carrying the raw device token on success.
    async fn register_push(&mut self) -> Option<AppEvent> {
        if self.registration.is_some() {
            tracing::debug!("push registration already active");
            return None;
        }

        match self.push.register(PushOptions::default()).await {
            Ok(PushRegistration { device_token, handle, notifications }) => {
                self.registration = Some(ActiveRegistration { _handle: handle, notifications });
                Some(AppEvent::PushRegistered { token: device_token })
            },
            Err(e) => {
                tracing::warn!(error = %e, "push registration failed");
                None
            },
        }
    }

    /// Run deferred tasks if no interaction is in flight.
    fn drain_idle(&mut self) {
        if self.idle.is_empty() || self.driver.interactions_pending() {
            return;
        }

        for task in self.idle.drain() {
            let result = match task {
                DeferredTask::Logout => {
                    tracing::info!("running deferred logout");
                    self.driver.logout()
                },
            };

            if let Err(e) = result {
                tracing::warn!(?task, error = %e, "deferred task failed");
            }
        }
    }

    /// Get a reference to the lifecycle.
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Shared application state.
    pub fn store(&self) -> &AppStore {
        self.lifecycle.store()
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Number of deferred tasks waiting for interactions to settle.
    pub fn deferred_len(&self) -> usize {
        self.idle.len()
    }

    /// True while a push registration is held.
    pub fn has_push_registration(&self) -> bool {
        self.registration.is_some()
    }

    /// Drop the push registration, cancelling delivery.
    pub fn cancel_push_registration(&mut self) {
        if self.registration.take().is_some() {
            tracing::info!("push registration cancelled");
        }
    }
}

/// Next inbound notification, or pending forever without a registration.
///
/// A closed stream releases the registration.
async fn next_notification(
    registration: &mut Option<ActiveRegistration>,
) -> Option<DeviceNotification> {
    let Some(active) = registration.as_mut() else {
        return std::future::pending().await;
    };

    let next = active.notifications.recv().await;
    if next.is_none() {
        tracing::debug!("push notification stream closed");
        *registration = None;
    }
    next
}
