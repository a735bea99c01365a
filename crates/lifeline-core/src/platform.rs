//! Device platform and push token tagging.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Push service tag for iOS devices.
pub const PUSH_NOTIFY_APPLE: &str = "apple_rn";

/// Push service tag for Android devices.
pub const PUSH_NOTIFY_ANDROID: &str = "android_rn";

/// Device platform the app runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple iOS.
    #[default]
    Ios,
    /// Google Android.
    Android,
}

impl Platform {
    /// Tag the server uses to pick the push proxy for this platform.
    pub fn push_tag(self) -> &'static str {
        match self {
            Self::Ios => PUSH_NOTIFY_APPLE,
            Self::Android => PUSH_NOTIFY_ANDROID,
        }
    }

    /// Device token as persisted: `<tag>:<raw token>`.
    pub fn tag_device_token(self, raw: &str) -> String {
        format!("{}:{raw}", self.push_tag())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(PlatformError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => f.write_str("ios"),
            Self::Android => f.write_str("android"),
        }
    }
}
