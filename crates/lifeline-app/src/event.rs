//! Lifecycle input events.
//!
//! [`AppEvent`] is the typed message bus of the coordinator: one variant per
//! event kind, all dispatched through [`crate::Lifecycle::handle`].
//!
//! Events originate from several collaborators:
//! - The OS (activity changes, push delivery)
//! - The persistence layer (hydration)
//! - The configuration layer (version announcements, loaded config)
//! - The navigation/session layer (reset, default channel name)
//! - The UI (prompt acknowledgment, end of initialization)

use lifeline_core::{ActivityState, DeviceNotification};

/// Events processed by the lifecycle coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// OS activity state changed.
    ActivityChanged(ActivityState),

    /// Persisted state has been restored.
    Hydrated,

    /// Server announced its version. Empty means "no information".
    ConfigChanged {
        /// Raw announcement.
        server_version: String,
    },

    /// Configuration and license finished loading.
    ConfigLoaded {
        /// Version the configuration was loaded for.
        server_version: String,
    },

    /// User dismissed the upgrade prompt.
    UpgradePromptAcknowledged,

    /// Active server changed; tear down and restart.
    NavigationReset,

    /// Default channel display name changed.
    DefaultChannelNamed {
        /// New display name, used verbatim.
        display_name: String,
    },

    /// Push service handed out a device token.
    PushRegistered {
        /// Raw, untagged device token.
        token: String,
    },

    /// Push notification delivered.
    Notification(DeviceNotification),

    /// Root initializer finished.
    InitializationFinished,

    /// UI transitions and animations have settled. Deferred tasks may run.
    InteractionsSettled,
}
