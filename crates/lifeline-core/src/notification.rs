//! Push notification payloads.
//!
//! [`DeviceNotification`] is the raw payload delivered by the push layer.
//! [`PendingNotification`] is the normalized form the router works with; it
//! is never persisted except for the single queued notification kept while
//! the app initializes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `data.type` value asking the app to clear a channel's notifications.
pub const CLEAR_TYPE: &str = "clear";

/// Free-form `data` map attached to a notification by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationData(Map<String, Value>);

impl NotificationData {
    /// Empty data map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a string field.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), Value::String(value.into()));
        self
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// `type` field, if present and a string.
    pub fn kind(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    /// `channel_id` field, if present and a string.
    pub fn channel_id(&self) -> Option<&str> {
        self.get("channel_id").and_then(Value::as_str)
    }

    /// True if this is a "clear" notification.
    pub fn is_clear(&self) -> bool {
        self.kind() == Some(CLEAR_TYPE)
    }
}

impl From<Map<String, Value>> for NotificationData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Platform-specific extras delivered alongside a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Notification was scheduled by the device rather than pushed.
    #[serde(default)]
    pub local_notification: bool,
}

/// Raw inbound notification as delivered by the push layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceNotification {
    /// Server-provided data. `None` if the payload carried none.
    #[serde(default)]
    pub data: Option<NotificationData>,
    /// Delivered while the app was in the foreground.
    #[serde(default)]
    pub foreground: bool,
    /// Human-readable message body.
    #[serde(default)]
    pub message: String,
    /// Platform extras. `None` if absent.
    #[serde(default)]
    pub user_info: Option<UserInfo>,
    /// Delivered because the user tapped the notification.
    #[serde(default)]
    pub user_interaction: bool,
}

/// Normalized notification consumed by the router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingNotification {
    /// Server-provided data.
    pub data: NotificationData,
    /// Human-readable message body.
    pub message: String,
    /// Delivered while the app was in the foreground.
    pub foreground: bool,
    /// Delivered because the user tapped the notification.
    pub user_interaction: bool,
    /// Copied from [`UserInfo::local_notification`]; false if absent.
    pub local_notification: bool,
}

impl PendingNotification {
    /// Normalize a raw notification. Absent `data` becomes an empty map.
    pub fn from_device(raw: DeviceNotification) -> Self {
        Self {
            data: raw.data.unwrap_or_default(),
            message: raw.message,
            foreground: raw.foreground,
            user_interaction: raw.user_interaction,
            local_notification: raw.user_info.is_some_and(|info| info.local_notification),
        }
    }
}
