//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` records every platform effect instead of performing it. It
//! implements [`Driver`] so the same [`lifeline_app::Runtime`] orchestration
//! code runs in both production and simulation.
//!
//! The driver is a cheap handle over shared state: clone it before handing
//! it to the runtime and keep the clone to inject events and inspect effects.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use lifeline_app::{Animation, AppEvent, Driver, RootScreen, UiSignal, UpgradePrompt};
use lifeline_core::{ActivityState, AppStore, PendingNotification, Platform};
use tokio::sync::Notify;

use crate::invariants::{InvariantRegistry, LifecycleSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimDriverError {
    /// Effect failure injected by the test.
    #[error("injected failure: {0}")]
    Injected(&'static str),
}

/// Platform effect observed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Root screen launched.
    StartApp {
        /// Transition used.
        animation: Animation,
    },
    /// Upgrade prompt shown, identified by its title.
    UpgradePrompt(String),
    /// Channel marked read.
    MarkChannelRead(String),
    /// Navigated to a notification.
    GoToNotification(PendingNotification),
    /// In-app signal emitted.
    Signal(UiSignal),
    /// Badge set.
    BadgeCount(u32),
    /// Local notifications cancelled.
    CancelLocalNotifications,
    /// Network client version cleared.
    ClearClientServerVersion,
    /// Config and license requested for a version.
    LoadConfigAndLicense(String),
    /// User logged out.
    Logout,
}

/// Shared state for event injection and effect capture.
#[derive(Debug)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    effects: Vec<Effect>,
    activity: ActivityState,
    interactions_pending: bool,
    fail_effects: bool,
    open: bool,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// [`Driver::next_event`] pops injected events and returns `None` once the
/// queue is empty, which ends [`lifeline_app::Runtime::run`]. A driver kept
/// open waits for more events until [`SimDriver::close`] is called.
#[derive(Debug, Clone)]
pub struct SimDriver {
    state: Rc<RefCell<SharedState>>,
    wake: Rc<Notify>,
    invariants: Option<Rc<InvariantRegistry>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver that reports the app as active.
    pub fn new() -> Self {
        Self::with_activity(ActivityState::Active)
    }

    /// Create a driver reporting `activity` at startup.
    pub fn with_activity(activity: ActivityState) -> Self {
        let state = SharedState {
            pending_events: VecDeque::new(),
            effects: Vec::new(),
            activity,
            interactions_pending: false,
            fail_effects: false,
            open: false,
            stopped: false,
        };
        Self { state: Rc::new(RefCell::new(state)), wake: Rc::new(Notify::new()), invariants: None }
    }

    /// Enable invariant checking.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Rc::new(registry));
        self
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.state.borrow_mut().pending_events.push_back(event);
        self.wake.notify_one();
    }

    /// Inject several events in order.
    pub fn inject_events(&self, events: impl IntoIterator<Item = AppEvent>) {
        self.state.borrow_mut().pending_events.extend(events);
        self.wake.notify_one();
    }

    /// Keep the event source open when the queue runs dry.
    pub fn keep_open(&self) {
        self.state.borrow_mut().open = true;
    }

    /// End the event source once queued events are consumed.
    pub fn close(&self) {
        self.state.borrow_mut().open = false;
        self.wake.notify_one();
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.state.borrow().pending_events.is_empty()
    }

    /// Simulate UI transitions in flight.
    pub fn set_interactions_pending(&self, pending: bool) {
        self.state.borrow_mut().interactions_pending = pending;
    }

    /// Make every subsequent side effect fail.
    pub fn fail_effects(&self, fail: bool) {
        self.state.borrow_mut().fail_effects = fail;
    }

    /// All effects recorded so far.
    pub fn effects(&self) -> Vec<Effect> {
        self.state.borrow().effects.clone()
    }

    /// Take all recorded effects.
    pub fn take_effects(&self) -> Vec<Effect> {
        std::mem::take(&mut self.state.borrow_mut().effects)
    }

    /// True once the runtime has stopped the driver.
    pub fn stopped(&self) -> bool {
        self.state.borrow().stopped
    }

    /// Create a snapshot for invariant checking.
    pub fn snapshot(&self, store: &AppStore, platform: Platform) -> LifecycleSnapshot {
        LifecycleSnapshot::capture(store, platform, self.effects())
    }

    /// Check invariants against the current state.
    pub fn check_invariants(&self, store: &AppStore, platform: Platform, context: &str) {
        if let Some(registry) = &self.invariants {
            registry.assert_all(&self.snapshot(store, platform), context);
        }
    }

    fn record(&self, what: &'static str, effect: Effect) -> Result<(), SimDriverError> {
        let mut state = self.state.borrow_mut();
        if state.fail_effects {
            return Err(SimDriverError::Injected(what));
        }
        state.effects.push(effect);
        Ok(())
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn next_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            {
                let mut state = self.state.borrow_mut();
                if let Some(event) = state.pending_events.pop_front() {
                    return Ok(Some(event));
                }
                if !state.open {
                    return Ok(None);
                }
            }
            self.wake.notified().await;
        }
    }

    fn current_activity(&self) -> ActivityState {
        self.state.borrow().activity.clone()
    }

    fn interactions_pending(&self) -> bool {
        self.state.borrow().interactions_pending
    }

    fn start_app(&mut self, animation: Animation, _screen: &RootScreen) -> Result<(), Self::Error> {
        self.record("start_app", Effect::StartApp { animation })
    }

    fn show_upgrade_prompt(&mut self, prompt: &UpgradePrompt) -> Result<(), Self::Error> {
        self.record("show_upgrade_prompt", Effect::UpgradePrompt(prompt.title.clone()))
    }

    fn mark_channel_read(&mut self, channel_id: &str) -> Result<(), Self::Error> {
        self.record("mark_channel_read", Effect::MarkChannelRead(channel_id.to_string()))
    }

    fn go_to_notification(&mut self, notification: &PendingNotification) -> Result<(), Self::Error> {
        self.record("go_to_notification", Effect::GoToNotification(notification.clone()))
    }

    fn emit(&mut self, signal: UiSignal) -> Result<(), Self::Error> {
        self.record("emit", Effect::Signal(signal))
    }

    fn set_badge_count(&mut self, count: u32) -> Result<(), Self::Error> {
        self.record("set_badge_count", Effect::BadgeCount(count))
    }

    fn cancel_local_notifications(&mut self) -> Result<(), Self::Error> {
        self.record("cancel_local_notifications", Effect::CancelLocalNotifications)
    }

    fn clear_client_server_version(&mut self) -> Result<(), Self::Error> {
        self.record("clear_client_server_version", Effect::ClearClientServerVersion)
    }

    fn load_config_and_license(&mut self, server_version: &str) -> Result<(), Self::Error> {
        self.record(
            "load_config_and_license",
            Effect::LoadConfigAndLicense(server_version.to_string()),
        )
    }

    fn logout(&mut self) -> Result<(), Self::Error> {
        self.record("logout", Effect::Logout)
    }

    fn stop(&mut self) {
        self.state.borrow_mut().stopped = true;
    }
}
