//! Deterministic simulation harness for Lifeline lifecycle testing.
//!
//! In-memory implementations of the [`lifeline_app::Driver`] and
//! [`lifeline_app::PushService`] traits, so the production
//! [`lifeline_app::Runtime`] runs unchanged under test.
//!
//! The `invariants` module checks recorded runs against lifecycle rules;
//! [`InvariantRegistry::standard()`] bundles the ones every test should hold.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_push;

pub use invariants::{
    DeviceTokenTagged, Invariant, InvariantRegistry, InvariantResult, LifecycleSnapshot,
    QueueOnlyWhileInitializing, SingleColdStart, VersionClearedBeforeRestart, Violation,
};
pub use sim_driver::{Effect, SimDriver, SimDriverError};
pub use sim_push::{SimPush, SimPushError};
