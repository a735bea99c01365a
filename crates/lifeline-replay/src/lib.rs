//! Script replay for Lifeline
//!
//! A thin shell over [`lifeline_app::Driver`] that feeds scripted events to
//! the generic [`lifeline_app::Runtime`] and logs every effect. All
//! orchestration logic lives in the runtime.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod driver;
pub mod script;

pub use driver::{ReplayDriver, ReplayPush};
pub use script::{Script, ScriptError, ScriptEvent};
