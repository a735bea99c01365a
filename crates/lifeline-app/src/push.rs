//! Push notification registration.
//!
//! Registration is an explicit async call that returns a
//! [`PushRegistration`]: the device token, a [`RegistrationHandle`], and a
//! stream of inbound notifications. Dropping (or cancelling) the handle tells
//! the service to stop delivering.

use std::future::Future;

use lifeline_core::DeviceNotification;
use tokio::sync::{mpsc, oneshot};

/// Options passed to the push service on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushOptions {
    /// Deliver the notification that launched the app, if any.
    pub pop_initial_notification: bool,
    /// Ask the user for notification permissions.
    pub request_permissions: bool,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self { pop_initial_notification: true, request_permissions: true }
    }
}

/// Abstracts the platform push service.
pub trait PushService {
    /// Platform-specific error type.
    type Error: std::error::Error + 'static;

    /// Register the device for push notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses registration.
    fn register(
        &mut self,
        options: PushOptions,
    ) -> impl Future<Output = Result<PushRegistration, Self::Error>>;
}

/// Active push registration.
#[derive(Debug)]
pub struct PushRegistration {
    /// Raw device token, not yet tagged with the platform.
    pub device_token: String,
    /// Keeps delivery alive; drop to cancel.
    pub handle: RegistrationHandle,
    /// Inbound notifications.
    pub notifications: mpsc::UnboundedReceiver<DeviceNotification>,
}

/// Owner side of a registration. Dropping it cancels delivery.
#[derive(Debug)]
pub struct RegistrationHandle {
    _cancel: oneshot::Sender<()>,
}

impl RegistrationHandle {
    /// Create a handle and the service-side signal that observes it.
    pub fn new() -> (Self, CancelSignal) {
        let (tx, rx) = oneshot::channel();
        (Self { _cancel: tx }, CancelSignal { rx })
    }

    /// Cancel delivery explicitly.
    pub fn cancel(self) {
        drop(self);
    }
}

/// Service side of a [`RegistrationHandle`].
#[derive(Debug)]
pub struct CancelSignal {
    rx: oneshot::Receiver<()>,
}

impl CancelSignal {
    /// True once the handle has been dropped.
    pub fn is_cancelled(&mut self) -> bool {
        !matches!(self.rx.try_recv(), Err(oneshot::error::TryRecvError::Empty))
    }

    /// Resolves when the handle is dropped.
    pub async fn cancelled(self) {
        let _ = self.rx.await;
    }
}
