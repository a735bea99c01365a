//! Event scripts.
//!
//! A script is a JSON-lines file, one tagged event per line:
//!
//! ```text
//! {"event":"hydrated"}
//! {"event":"config_changed","server_version":"4.1.0"}
//! {"event":"notification","data":{"type":"message","channel_id":"c1"},"userInteraction":true}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::{collections::VecDeque, fs, path::Path};

use lifeline_app::AppEvent;
use lifeline_core::{ActivityState, DeviceNotification};
use serde::Deserialize;
use thiserror::Error;

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Script file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid event.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// OS activity changed.
    Activity {
        /// Raw OS state, e.g. `"background"`.
        state: String,
    },
    /// Persisted state restored.
    Hydrated,
    /// Server announced a version.
    ConfigChanged {
        /// Raw announcement.
        #[serde(default)]
        server_version: String,
    },
    /// Configuration finished loading.
    ConfigLoaded {
        /// Version the configuration belongs to.
        server_version: String,
    },
    /// User dismissed the upgrade prompt.
    UpgradeAcknowledged,
    /// Active server changed.
    NavigationReset,
    /// Default channel display name changed.
    DefaultChannel {
        /// New display name.
        display_name: String,
    },
    /// Push notification delivered.
    Notification(DeviceNotification),
    /// Root initializer finished.
    InitializationFinished,
    /// UI interactions settled.
    InteractionsSettled,
}

impl From<ScriptEvent> for AppEvent {
    fn from(event: ScriptEvent) -> Self {
        match event {
            ScriptEvent::Activity { state } => AppEvent::ActivityChanged(ActivityState::parse(&state)),
            ScriptEvent::Hydrated => AppEvent::Hydrated,
            ScriptEvent::ConfigChanged { server_version } => AppEvent::ConfigChanged { server_version },
            ScriptEvent::ConfigLoaded { server_version } => AppEvent::ConfigLoaded { server_version },
            ScriptEvent::UpgradeAcknowledged => AppEvent::UpgradePromptAcknowledged,
            ScriptEvent::NavigationReset => AppEvent::NavigationReset,
            ScriptEvent::DefaultChannel { display_name } => {
                AppEvent::DefaultChannelNamed { display_name }
            },
            ScriptEvent::Notification(notification) => AppEvent::Notification(notification),
            ScriptEvent::InitializationFinished => AppEvent::InitializationFinished,
            ScriptEvent::InteractionsSettled => AppEvent::InteractionsSettled,
        }
    }
}

/// Parsed script, in replay order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    events: VecDeque<AppEvent>,
}

impl Script {
    /// Parse a JSON-lines script.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] with the offending line number.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut events = VecDeque::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let event: ScriptEvent = serde_json::from_str(line)
                .map_err(|source| ScriptError::Parse { line: index + 1, source })?;
            events.push_back(event.into());
        }
        Ok(Self { events })
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Number of events left.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events are left.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take the next event.
    pub fn next_event(&mut self) -> Option<AppEvent> {
        self.events.pop_front()
    }
}
