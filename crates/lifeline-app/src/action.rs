//! Side effects produced by the lifecycle coordinator.
//!
//! This module defines [`AppAction`], the instructions the [`crate::Lifecycle`]
//! hands to the [`crate::Runtime`] for execution. Components never perform
//! I/O themselves; they write shared state and return actions.

use lifeline_core::PendingNotification;

use crate::{config::UpgradePrompt, shell::RootScreen};

/// Transition used when (re)starting the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    /// Cold start after hydration.
    #[default]
    None,
    /// Restart after the active server changed.
    Fade,
}

/// In-app signals for the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiSignal {
    /// A notification arrived in the foreground; render an in-app banner.
    NotificationReceived(PendingNotification),
    /// The user opened a notification and the app navigated to it.
    NotificationTapped,
}

/// Work that must wait until no UI transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Log the user out after an incompatible server was acknowledged.
    Logout,
}

/// Actions produced by the lifecycle coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Register with the push service.
    ConfigurePushNotifications,

    /// Launch the single root screen.
    StartApp {
        /// Transition style.
        animation: Animation,
        /// Root screen and its chrome.
        screen: RootScreen,
    },

    /// Mark a channel as read on the server.
    MarkChannelRead {
        /// Channel to mark.
        channel_id: String,
    },

    /// Navigate to the content a notification refers to.
    GoToNotification(PendingNotification),

    /// Emit an in-app signal.
    Signal(UiSignal),

    /// Show the blocking "server upgrade required" prompt.
    ShowUpgradePrompt(UpgradePrompt),

    /// Set the app icon badge.
    SetBadgeCount(u32),

    /// Schedule work for when interactions settle.
    Defer(DeferredTask),

    /// Discard deferred work queued against the previous server.
    CancelDeferred,

    /// Load server configuration and license for the announced version.
    LoadConfigAndLicense {
        /// Raw announcement as received.
        server_version: String,
    },

    /// Drop the server version pinned by the network client.
    ClearClientServerVersion,

    /// Cancel every scheduled local notification.
    CancelLocalNotifications,
}

impl AppAction {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigurePushNotifications => "configure_push_notifications",
            Self::StartApp { .. } => "start_app",
            Self::MarkChannelRead { .. } => "mark_channel_read",
            Self::GoToNotification(_) => "go_to_notification",
            Self::Signal(_) => "signal",
            Self::ShowUpgradePrompt(_) => "show_upgrade_prompt",
            Self::SetBadgeCount(_) => "set_badge_count",
            Self::Defer(_) => "defer",
            Self::CancelDeferred => "cancel_deferred",
            Self::LoadConfigAndLicense { .. } => "load_config_and_license",
            Self::ClearClientServerVersion => "clear_client_server_version",
            Self::CancelLocalNotifications => "cancel_local_notifications",
        }
    }
}
