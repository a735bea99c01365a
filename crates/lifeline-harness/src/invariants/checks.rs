//! Lifecycle rules registered by [`super::InvariantRegistry::standard`].

use lifeline_app::Animation;

use super::{Invariant, InvariantResult, LifecycleSnapshot, Violation};
use crate::sim_driver::Effect;

/// The shell is cold-started at most once.
///
/// The hydration gate unsubscribes after firing, so a second unanimated
/// `StartApp` means the gate fired twice.
pub struct SingleColdStart;

impl Invariant for SingleColdStart {
    fn name(&self) -> &'static str {
        "single_cold_start"
    }

    fn check(&self, state: &LifecycleSnapshot) -> InvariantResult {
        let cold_starts = state
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::StartApp { animation: Animation::None }))
            .count();

        if cold_starts > 1 {
            return Err(Violation {
                invariant: self.name(),
                message: format!("shell cold-started {cold_starts} times"),
            });
        }
        Ok(())
    }
}

/// A restart is always preceded by clearing the client version and
/// cancelling local notifications, in that order.
pub struct VersionClearedBeforeRestart;

impl Invariant for VersionClearedBeforeRestart {
    fn name(&self) -> &'static str {
        "version_cleared_before_restart"
    }

    fn check(&self, state: &LifecycleSnapshot) -> InvariantResult {
        for (index, effect) in state.effects.iter().enumerate() {
            if !matches!(effect, Effect::StartApp { animation: Animation::Fade }) {
                continue;
            }

            let preceding = index.checked_sub(2).and_then(|start| state.effects.get(start..index));
            if !matches!(preceding, Some([
                Effect::ClearClientServerVersion,
                Effect::CancelLocalNotifications
            ])) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("restart at effect {index} preceded by {preceding:?}"),
                });
            }
        }
        Ok(())
    }
}

/// A stored device token always carries the platform push tag.
pub struct DeviceTokenTagged;

impl Invariant for DeviceTokenTagged {
    fn name(&self) -> &'static str {
        "device_token_tagged"
    }

    fn check(&self, state: &LifecycleSnapshot) -> InvariantResult {
        let Some(token) = &state.device_token else {
            return Ok(());
        };

        let prefix = format!("{}:", state.platform.push_tag());
        if !token.starts_with(&prefix) {
            return Err(Violation {
                invariant: self.name(),
                message: format!("device token {token:?} lacks prefix {prefix:?}"),
            });
        }
        Ok(())
    }
}

/// A notification is only held while the root initializer runs.
pub struct QueueOnlyWhileInitializing;

impl Invariant for QueueOnlyWhileInitializing {
    fn name(&self) -> &'static str {
        "queue_only_while_initializing"
    }

    fn check(&self, state: &LifecycleSnapshot) -> InvariantResult {
        if state.queued_notification.is_some() && !state.app_initializing {
            return Err(Violation {
                invariant: self.name(),
                message: "notification still queued after initialization finished".to_string(),
            });
        }
        Ok(())
    }
}
