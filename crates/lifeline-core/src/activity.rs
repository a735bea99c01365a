//! OS application activity state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel the OS reports while the app is in the foreground.
pub const ACTIVE: &str = "active";

/// Lifecycle state reported by the OS.
///
/// Only [`ActivityState::Active`] counts as active. Unrecognised strings are
/// kept verbatim so they can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityState {
    /// App is in the foreground and receiving events.
    Active,
    /// App is visible but not receiving events (e.g. during a system prompt).
    Inactive,
    /// App is in the background.
    Background,
    /// Any other state string.
    Other(String),
}

impl ActivityState {
    /// Parse the OS state string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            ACTIVE => Self::Active,
            "inactive" => Self::Inactive,
            "background" => Self::Background,
            other => Self::Other(other.to_string()),
        }
    }

    /// True iff the state is exactly `"active"`.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// OS state string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => ACTIVE,
            Self::Inactive => "inactive",
            Self::Background => "background",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ActivityState {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ActivityState> for String {
    fn from(state: ActivityState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
