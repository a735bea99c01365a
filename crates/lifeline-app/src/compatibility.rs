//! Server version compatibility gate.
//!
//! # State Machine
//!
//! ```text
//!             announcement >= min            ┌────────────┐
//!          ┌────────────────────────────────>│ Compatible │<─┐
//! ┌─────────┐                                └────────────┘  │ announcement >= min
//! │ Unknown │                                      │         │
//! └─────────┘                                      │ < min   │
//!          │  announcement < min          ┌──────────────┐   │
//!          └─────────────────────────────>│ Incompatible │───┘
//!                                         └──────────────┘
//! ```
//!
//! Empty or unmatched announcements leave the state untouched. Announcements
//! whose extracted text is not valid semver cannot be compared and take the
//! compatible path. Reset returns the gate to `Unknown`.
//!
//! Each incompatible verdict opens one prompt, and only the first
//! acknowledgment of that prompt is acted on.

use lifeline_core::{
    AppStore, Compatibility, ServerVersion, VersionError, version::parse_announcement,
};

use crate::{
    AppAction,
    action::DeferredTask,
    config::{LifecycleConfig, UpgradePrompt},
};

/// Gates server interaction on the announced version.
#[derive(Debug, Clone)]
pub struct ServerCompatibilityGate {
    store: AppStore,
    min_version: ServerVersion,
    prompt: UpgradePrompt,
    prompt_open: bool,
}

impl ServerCompatibilityGate {
    /// Create the gate with the configured minimum version.
    pub fn new(store: AppStore, config: &LifecycleConfig) -> Self {
        Self {
            store,
            min_version: config.min_server_version.clone(),
            prompt: config.upgrade_prompt.clone(),
            prompt_open: false,
        }
    }

    /// Handle a version announcement.
    pub fn on_config_changed(&mut self, announcement: &str) -> Vec<AppAction> {
        match parse_announcement(announcement) {
            Ok(version) if version < self.min_version => {
                tracing::warn!(
                    %version,
                    min = %self.min_version,
                    "server version unsupported, prompting for upgrade"
                );
                self.store.set_compatibility(Compatibility::Incompatible { announced: version });
                self.prompt_open = true;
                vec![AppAction::ShowUpgradePrompt(self.prompt.clone())]
            },
            Ok(version) => self.accept(announcement, version.to_string()),
            Err(VersionError::Invalid { candidate, reason }) => {
                tracing::debug!(%candidate, reason, "server version not comparable, skipping gate");
                self.accept(announcement, candidate)
            },
            Err(err) => {
                tracing::debug!(%err, "no server version in announcement");
                vec![]
            },
        }
    }

    fn accept(&mut self, announcement: &str, version: String) -> Vec<AppAction> {
        tracing::info!(%version, "server version accepted");
        self.prompt_open = false;
        self.store.set_compatibility(Compatibility::Compatible);
        self.store.set_server_version(version);
        self.store.clear_config_version();
        vec![AppAction::LoadConfigAndLicense { server_version: announcement.to_string() }]
    }

    /// Handle acknowledgment of the upgrade prompt.
    ///
    /// Clears the server version and badge, and schedules a logout for after
    /// the current interactions if the user is logged in. Acknowledgments
    /// arriving while the gate is not incompatible, or repeating one already
    /// handled, are stale and ignored.
    pub fn on_upgrade_acknowledged(&mut self) -> Vec<AppAction> {
        if !self.prompt_open || !self.store.compatibility().is_incompatible() {
            tracing::debug!("ignoring stale upgrade prompt acknowledgment");
            return vec![];
        }
        self.prompt_open = false;

        self.store.clear_server_version();
        let mut actions = vec![AppAction::ClearClientServerVersion, AppAction::SetBadgeCount(0)];

        if self.store.has_credentials() {
            tracing::info!("scheduling logout from unsupported server");
            actions.push(AppAction::Defer(DeferredTask::Logout));
        }

        actions
    }
}
