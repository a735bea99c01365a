//! Driver trait for abstracting platform I/O.
//!
//! The [`Driver`] trait decouples the lifecycle runtime from the concrete
//! platform: navigation, alerts, the badge/local-notification side channel,
//! and the network client. Each frontend implements the trait, while the
//! generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use lifeline_core::{ActivityState, PendingNotification};

use crate::{
    AppEvent,
    action::{Animation, UiSignal},
    config::UpgradePrompt,
    shell::RootScreen,
};

/// Abstracts platform I/O for the lifecycle runtime.
///
/// Side-effect methods are fire-and-forget from the coordinator's point of
/// view: the runtime logs their errors and carries on.
///
/// # Implementations
///
/// - **Simulation**: `lifeline_harness::SimDriver` records every effect
/// - **Replay**: the `lifeline-replay` binary logs effects from a script
pub trait Driver {
    /// Platform-specific error type.
    type Error: std::error::Error + 'static;

    /// Wait for the next platform event.
    ///
    /// Returns `None` when the platform is shutting down.
    fn next_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>>;

    /// OS activity state at startup.
    fn current_activity(&self) -> ActivityState;

    /// True while UI transitions or animations are in flight.
    fn interactions_pending(&self) -> bool;

    /// Launch the root screen.
    fn start_app(&mut self, animation: Animation, screen: &RootScreen) -> Result<(), Self::Error>;

    /// Show the blocking upgrade prompt. Acknowledgment comes back as
    /// [`AppEvent::UpgradePromptAcknowledged`].
    fn show_upgrade_prompt(&mut self, prompt: &UpgradePrompt) -> Result<(), Self::Error>;

    /// Mark a channel as read on the server.
    fn mark_channel_read(&mut self, channel_id: &str) -> Result<(), Self::Error>;

    /// Navigate to a notification's content.
    fn go_to_notification(&mut self, notification: &PendingNotification) -> Result<(), Self::Error>;

    /// Deliver an in-app signal to the UI.
    fn emit(&mut self, signal: UiSignal) -> Result<(), Self::Error>;

    /// Set the app icon badge.
    fn set_badge_count(&mut self, count: u32) -> Result<(), Self::Error>;

    /// Cancel every scheduled local notification.
    fn cancel_local_notifications(&mut self) -> Result<(), Self::Error>;

    /// Drop the version pinned by the network client.
    fn clear_client_server_version(&mut self) -> Result<(), Self::Error>;

    /// Load configuration and license for an announced server version.
    fn load_config_and_license(&mut self, server_version: &str) -> Result<(), Self::Error>;

    /// Log the current user out.
    fn logout(&mut self) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
