//! Application layer for Lifeline
//!
//! Pure lifecycle state machines and a generic runtime, enabling
//! deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`HydrationGate`]: starts the app shell exactly once after restore
//! - [`ServerCompatibilityGate`]: validates announced server versions
//! - [`NotificationRouter`]: routes push notifications by app state
//! - [`SessionResetCoordinator`]: clears server state and restarts the shell
//! - [`AppActivityObserver`]: mirrors OS activity into the store
//! - [`Lifecycle`]: single router over the [`AppEvent`] bus
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`PushService`]: trait for the platform push service
//! - [`Runtime`]: generic orchestration loop using Driver and `PushService`

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod activity;
mod compatibility;
mod config;
mod deferred;
mod driver;
mod event;
mod hydration;
mod lifecycle;
mod push;
mod reset;
mod router;
mod runtime;
mod shell;

pub use action::{Animation, AppAction, DeferredTask, UiSignal};
pub use activity::AppActivityObserver;
pub use compatibility::ServerCompatibilityGate;
pub use config::{DEFAULT_MIN_SERVER_VERSION, LifecycleConfig, UpgradePrompt};
pub use deferred::IdleQueue;
pub use driver::Driver;
pub use event::AppEvent;
pub use hydration::HydrationGate;
pub use lifecycle::Lifecycle;
pub use push::{CancelSignal, PushOptions, PushRegistration, PushService, RegistrationHandle};
pub use reset::SessionResetCoordinator;
pub use router::{NotificationRouter, Route, RoutingContext, classify};
pub use runtime::{Runtime, RuntimeError};
pub use shell::{ROOT_SCREEN, RootScreen, start_app};
