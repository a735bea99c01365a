//! Coordinator configuration.

use lifeline_core::{Platform, ServerVersion};

/// Oldest server version the app supports.
pub const DEFAULT_MIN_SERVER_VERSION: (u64, u64, u64) = (3, 10, 0);

/// Text of the blocking upgrade prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePrompt {
    /// Prompt title.
    pub title: String,
    /// Prompt body.
    pub message: String,
    /// Label of the single acknowledgment button.
    pub button: String,
}

impl Default for UpgradePrompt {
    fn default() -> Self {
        Self {
            title: "Server upgrade required".to_string(),
            message: "A server upgrade is required to use the Mattermost app. Please ask your \
                      System Administrator for details."
                .to_string(),
            button: "OK".to_string(),
        }
    }
}

/// Lifecycle coordinator configuration.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Announcements strictly below this version trigger the upgrade prompt.
    pub min_server_version: ServerVersion,
    /// Platform, used to tag the push device token.
    pub platform: Platform,
    /// Upgrade prompt text.
    pub upgrade_prompt: UpgradePrompt,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        let (major, minor, patch) = DEFAULT_MIN_SERVER_VERSION;
        Self {
            min_server_version: ServerVersion::new(major, minor, patch),
            platform: Platform::default(),
            upgrade_prompt: UpgradePrompt::default(),
        }
    }
}
