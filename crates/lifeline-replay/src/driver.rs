//! Logging driver and push service for script replay.
//!
//! Implements [`Driver`] by feeding scripted events to the runtime and
//! logging every effect it is asked to perform. Nothing is rendered.

use std::convert::Infallible;

use lifeline_app::{
    Animation, AppEvent, CancelSignal, Driver, PushOptions, PushRegistration, PushService,
    RegistrationHandle, RootScreen, UiSignal, UpgradePrompt,
};
use lifeline_core::{ActivityState, DeviceNotification, PendingNotification};
use tokio::sync::mpsc;

use crate::script::Script;

/// Driver that replays a [`Script`] and logs effects.
#[derive(Debug)]
pub struct ReplayDriver {
    script: Script,
    activity: ActivityState,
    effects: usize,
}

impl ReplayDriver {
    /// Create a driver over `script`, reporting `activity` at startup.
    pub fn new(script: Script, activity: ActivityState) -> Self {
        Self { script, activity, effects: 0 }
    }

    /// Number of effects performed so far.
    pub fn effects(&self) -> usize {
        self.effects
    }

    fn effect(&mut self) -> Result<(), Infallible> {
        self.effects += 1;
        Ok(())
    }
}

impl Driver for ReplayDriver {
    type Error = Infallible;

    async fn next_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let event = self.script.next_event();
        if let Some(event) = &event {
            tracing::debug!(?event, remaining = self.script.len(), "replaying event");
        }
        Ok(event)
    }

    fn current_activity(&self) -> ActivityState {
        self.activity.clone()
    }

    fn interactions_pending(&self) -> bool {
        false
    }

    fn start_app(&mut self, animation: Animation, screen: &RootScreen) -> Result<(), Self::Error> {
        tracing::info!(?animation, screen = screen.name, "start app");
        self.effect()
    }

    fn show_upgrade_prompt(&mut self, prompt: &UpgradePrompt) -> Result<(), Self::Error> {
        tracing::info!(title = %prompt.title, message = %prompt.message, "show upgrade prompt");
        self.effect()
    }

    fn mark_channel_read(&mut self, channel_id: &str) -> Result<(), Self::Error> {
        tracing::info!(channel_id, "mark channel read");
        self.effect()
    }

    fn go_to_notification(&mut self, notification: &PendingNotification) -> Result<(), Self::Error> {
        tracing::info!(
            channel_id = ?notification.data.channel_id(),
            message = %notification.message,
            "go to notification"
        );
        self.effect()
    }

    fn emit(&mut self, signal: UiSignal) -> Result<(), Self::Error> {
        tracing::info!(?signal, "emit");
        self.effect()
    }

    fn set_badge_count(&mut self, count: u32) -> Result<(), Self::Error> {
        tracing::info!(count, "set badge count");
        self.effect()
    }

    fn cancel_local_notifications(&mut self) -> Result<(), Self::Error> {
        tracing::info!("cancel local notifications");
        self.effect()
    }

    fn clear_client_server_version(&mut self) -> Result<(), Self::Error> {
        tracing::info!("clear client server version");
        self.effect()
    }

    fn load_config_and_license(&mut self, server_version: &str) -> Result<(), Self::Error> {
        tracing::info!(server_version, "load config and license");
        self.effect()
    }

    fn logout(&mut self) -> Result<(), Self::Error> {
        tracing::info!("logout");
        self.effect()
    }

    fn stop(&mut self) {
        tracing::info!(effects = self.effects, "replay finished");
    }
}

/// Push service that registers immediately with a fixed token.
///
/// The notification stream stays open but silent; scripted notifications
/// arrive through the driver.
#[derive(Debug)]
pub struct ReplayPush {
    device_token: String,
    sender: Option<mpsc::UnboundedSender<DeviceNotification>>,
    cancel: Option<CancelSignal>,
}

impl ReplayPush {
    /// Create a service that hands out `device_token`.
    pub fn new(device_token: impl Into<String>) -> Self {
        Self { device_token: device_token.into(), sender: None, cancel: None }
    }

    /// True once the runtime released the registration.
    pub fn is_cancelled(&mut self) -> bool {
        self.cancel.as_mut().is_some_and(CancelSignal::is_cancelled)
    }
}

impl PushService for ReplayPush {
    type Error = Infallible;

    async fn register(&mut self, options: PushOptions) -> Result<PushRegistration, Self::Error> {
        tracing::info!(
            pop_initial = options.pop_initial_notification,
            request_permissions = options.request_permissions,
            "register for push notifications"
        );

        let (sender, notifications) = mpsc::unbounded_channel();
        let (handle, cancel) = RegistrationHandle::new();
        self.sender = Some(sender);
        self.cancel = Some(cancel);

        Ok(PushRegistration { device_token: self.device_token.clone(), handle, notifications })
    }
}

#[cfg(test)]
mod tests {
    use lifeline_app::{LifecycleConfig, Runtime};
    use lifeline_core::{AppStore, Platform};

    use super::*;

    #[tokio::test]
    async fn replays_script_to_completion() {
        let script = Script::parse(
            "{\"event\":\"hydrated\"}\n{\"event\":\"config_changed\",\"server_version\":\"4.1.0\"}",
        )
        .unwrap();
        let store = AppStore::default();
        let config = LifecycleConfig { platform: Platform::Android, ..Default::default() };
        let runtime = Runtime::new(
            ReplayDriver::new(script, ActivityState::Active),
            ReplayPush::new("tok"),
            store.clone(),
            &config,
        );

        runtime.run().await.unwrap();

        assert_eq!(store.device_token().as_deref(), Some("android_rn:tok"));
        assert_eq!(store.server_version().as_deref(), Some("4.1.0"));
    }

    #[tokio::test]
    async fn driver_counts_effects() {
        let mut driver = ReplayDriver::new(Script::default(), ActivityState::Background);
        driver.set_badge_count(0).unwrap();
        driver.logout().unwrap();

        assert_eq!(driver.effects(), 2);
        assert_eq!(driver.next_event().await.unwrap(), None);
    }
}
