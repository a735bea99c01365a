//! Simulated push service.
//!
//! `SimPush` hands out a fixed device token and lets tests deliver
//! notifications into the registration stream, fail registration, and observe
//! cancellation.

use std::{cell::RefCell, rc::Rc};

use lifeline_app::{CancelSignal, PushOptions, PushRegistration, PushService, RegistrationHandle};
use lifeline_core::DeviceNotification;
use tokio::sync::mpsc;

/// Error type for the simulated push service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimPushError {
    /// Registration refused by the test.
    #[error("push registration refused")]
    Refused,
}

#[derive(Debug)]
struct PushState {
    device_token: String,
    refuse: bool,
    registrations: usize,
    last_options: Option<PushOptions>,
    sender: Option<mpsc::UnboundedSender<DeviceNotification>>,
    cancel: Option<CancelSignal>,
}

/// Simulated push service. Clones share state.
#[derive(Debug, Clone)]
pub struct SimPush {
    state: Rc<RefCell<PushState>>,
}

impl SimPush {
    /// Create a service that registers with `device_token`.
    pub fn new(device_token: impl Into<String>) -> Self {
        let state = PushState {
            device_token: device_token.into(),
            refuse: false,
            registrations: 0,
            last_options: None,
            sender: None,
            cancel: None,
        };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    /// Refuse subsequent registrations.
    pub fn refuse(&self, refuse: bool) {
        self.state.borrow_mut().refuse = refuse;
    }

    /// Deliver a notification to the current registration.
    ///
    /// Returns `false` if nothing is registered or the runtime dropped it.
    pub fn deliver(&self, notification: DeviceNotification) -> bool {
        match &self.state.borrow().sender {
            Some(sender) => sender.send(notification).is_ok(),
            None => false,
        }
    }

    /// Close the notification stream from the service side.
    pub fn close(&self) {
        self.state.borrow_mut().sender = None;
    }

    /// Number of successful registrations.
    pub fn registrations(&self) -> usize {
        self.state.borrow().registrations
    }

    /// Options passed to the most recent registration attempt.
    pub fn last_options(&self) -> Option<PushOptions> {
        self.state.borrow().last_options
    }

    /// True once the runtime dropped the registration handle.
    pub fn is_cancelled(&self) -> bool {
        self.state.borrow_mut().cancel.as_mut().is_some_and(CancelSignal::is_cancelled)
    }
}

impl PushService for SimPush {
    type Error = SimPushError;

    async fn register(&mut self, options: PushOptions) -> Result<PushRegistration, Self::Error> {
        let mut state = self.state.borrow_mut();
        state.last_options = Some(options);
        if state.refuse {
            return Err(SimPushError::Refused);
        }

        let (sender, notifications) = mpsc::unbounded_channel();
        let (handle, cancel) = RegistrationHandle::new();
        state.sender = Some(sender);
        state.cancel = Some(cancel);
        state.registrations += 1;
        tracing::debug!(registrations = state.registrations, "simulated push registration");

        Ok(PushRegistration { device_token: state.device_token.clone(), handle, notifications })
    }
}
