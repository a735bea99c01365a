//! Core types for the Lifeline application lifecycle coordinator.
//!
//! Everything in this crate is plain data plus the shared [`AppStore`]
//! context. The coordinator components in `lifeline-app` read and write
//! application state exclusively through the store's typed accessors.
//!
//! # Modules
//!
//! - [`activity`]: OS foreground/background state
//! - [`notification`]: inbound push payloads and their normalized form
//! - [`platform`]: device platform and push token tagging
//! - [`store`]: the shared application-state context
//! - [`version`]: server version extraction, validation and ordering

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod activity;
pub mod error;
pub mod notification;
pub mod platform;
pub mod store;
pub mod version;

pub use activity::ActivityState;
pub use error::{PlatformError, VersionError};
pub use notification::{DeviceNotification, NotificationData, PendingNotification, UserInfo};
pub use platform::Platform;
pub use store::{AppState, AppStore, StoreSubscription};
pub use version::{Compatibility, ServerVersion};
