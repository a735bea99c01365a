//! Runtime behavior under the simulated platform.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Platform effects happened in the expected order
//! - The shared store reflects the expected state
//! - Standard lifecycle invariants hold

use lifeline_app::{
    Animation, AppEvent, LifecycleConfig, PushOptions, Runtime, UiSignal, UpgradePrompt,
};
use lifeline_core::{
    ActivityState, AppStore, Compatibility, DeviceNotification, NotificationData, Platform,
};
use lifeline_harness::{Effect, InvariantRegistry, SimDriver, SimPush};

fn android() -> LifecycleConfig {
    LifecycleConfig { platform: Platform::Android, ..Default::default() }
}

fn runtime(store: &AppStore, config: &LifecycleConfig) -> (Runtime<SimDriver, SimPush>, SimDriver, SimPush) {
    let driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    let push = SimPush::new("device-1");
    let runtime = Runtime::new(driver.clone(), push.clone(), store.clone(), config);
    (runtime, driver, push)
}

fn tap(channel_id: &str) -> DeviceNotification {
    DeviceNotification {
        data: Some(NotificationData::new().with("type", "message").with("channel_id", channel_id)),
        message: format!("new message in {channel_id}"),
        user_interaction: true,
        ..Default::default()
    }
}

/// Hydrated, registered and initialized runtime with its effects cleared.
async fn running(
    store: &AppStore,
    config: &LifecycleConfig,
) -> (Runtime<SimDriver, SimPush>, SimDriver, SimPush) {
    let (mut runtime, driver, push) = runtime(store, config);
    runtime.start().await;
    runtime.dispatch(AppEvent::Hydrated).await;
    runtime.dispatch(AppEvent::InitializationFinished).await;
    driver.take_effects();
    (runtime, driver, push)
}

#[tokio::test]
async fn cold_start_registers_push_and_tags_token() {
    let store = AppStore::default();
    let config = android();
    let (mut runtime, driver, push) = runtime(&store, &config);

    runtime.start().await;
    assert!(driver.effects().is_empty());
    assert_eq!(push.registrations(), 0);

    runtime.dispatch(AppEvent::Hydrated).await;

    assert_eq!(driver.effects(), vec![Effect::StartApp { animation: Animation::None }]);
    assert_eq!(push.registrations(), 1);
    assert_eq!(push.last_options(), Some(PushOptions::default()));
    assert_eq!(store.device_token().as_deref(), Some("android_rn:device-1"));
    assert!(runtime.has_push_registration());
    driver.check_invariants(&store, config.platform, "after cold start");
}

#[tokio::test]
async fn direct_hydration_write_starts_shell_without_an_event() {
    let store = AppStore::default();
    let (runtime, driver, push) = runtime(&store, &LifecycleConfig::default());
    driver.keep_open();

    let persistence = async {
        tokio::task::yield_now().await;
        store.mark_hydrated();
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        driver.close();
    };
    let (result, ()) = tokio::join!(runtime.run(), persistence);

    result.unwrap();
    assert!(driver.stopped());
    assert_eq!(driver.effects(), vec![Effect::StartApp { animation: Animation::None }]);
    assert_eq!(push.registrations(), 1);
}

#[tokio::test]
async fn shell_starts_once_across_later_changes() {
    let store = AppStore::default();
    let config = LifecycleConfig::default();
    let (mut runtime, driver, _push) = runtime(&store, &config);

    runtime.start().await;
    runtime.dispatch(AppEvent::Hydrated).await;
    runtime.dispatch(AppEvent::ActivityChanged(ActivityState::Background)).await;
    runtime.dispatch(AppEvent::ActivityChanged(ActivityState::Active)).await;
    runtime.dispatch(AppEvent::DefaultChannelNamed { display_name: "Town Square".into() }).await;

    let starts =
        driver.effects().iter().filter(|e| matches!(e, Effect::StartApp { .. })).count();
    assert_eq!(starts, 1);
    driver.check_invariants(&store, config.platform, "after later changes");
}

#[tokio::test]
async fn already_hydrated_store_starts_immediately() {
    let store = AppStore::default();
    store.mark_hydrated();
    let (mut runtime, driver, _push) = runtime(&store, &LifecycleConfig::default());

    runtime.start().await;

    assert_eq!(driver.effects(), vec![Effect::StartApp { animation: Animation::None }]);
    assert_eq!(store.device_token().as_deref(), Some("apple_rn:device-1"));
}

#[tokio::test]
async fn push_failure_still_starts_shell() {
    let store = AppStore::default();
    let (mut runtime, driver, push) = runtime(&store, &LifecycleConfig::default());
    push.refuse(true);

    runtime.start().await;
    runtime.dispatch(AppEvent::Hydrated).await;

    assert_eq!(driver.effects(), vec![Effect::StartApp { animation: Animation::None }]);
    assert!(!runtime.has_push_registration());
    assert!(!store.push_configured());
    assert_eq!(store.device_token(), None);
}

#[tokio::test]
async fn tapped_notification_navigates_through_push_stream() {
    let store = AppStore::default();
    let config = LifecycleConfig::default();
    let (mut runtime, driver, push) = running(&store, &config).await;

    assert!(push.deliver(tap("c1")));
    assert_eq!(runtime.pump_notifications().await, 1);

    let effects = driver.effects();
    assert!(matches!(effects.as_slice(), [
        Effect::GoToNotification(n),
        Effect::Signal(UiSignal::NotificationTapped)
    ] if n.data.channel_id() == Some("c1")));
    driver.check_invariants(&store, config.platform, "after tap");
}

#[tokio::test]
async fn foreground_notification_is_shown_in_app() {
    let store = AppStore::default();
    let (mut runtime, driver, push) = running(&store, &LifecycleConfig::default()).await;

    let mut notification = tap("c2");
    notification.foreground = true;
    assert!(push.deliver(notification));
    runtime.pump_notifications().await;

    assert!(matches!(driver.effects().as_slice(), [Effect::Signal(
        UiSignal::NotificationReceived(n)
    )] if n.foreground));
}

#[tokio::test]
async fn clear_notification_marks_channel_read() {
    let store = AppStore::default();
    let (mut runtime, driver, push) = running(&store, &LifecycleConfig::default()).await;

    let clear = DeviceNotification {
        data: Some(NotificationData::new().with("type", "clear").with("channel_id", "c3")),
        user_interaction: true,
        ..Default::default()
    };
    assert!(push.deliver(clear));
    runtime.pump_notifications().await;

    assert_eq!(driver.effects(), vec![Effect::MarkChannelRead("c3".into())]);
}

#[tokio::test]
async fn tap_during_initialization_waits_for_initializer() {
    let store = AppStore::default();
    store.set_credentials_token(Some("session".into()));
    let config = LifecycleConfig::default();
    let (mut runtime, driver, push) = runtime(&store, &config);

    runtime.start().await;
    runtime.dispatch(AppEvent::Hydrated).await;
    driver.take_effects();

    assert!(push.deliver(tap("first")));
    assert!(push.deliver(tap("second")));
    runtime.pump_notifications().await;
    assert!(driver.effects().is_empty());
    assert!(store.queued_notification().is_some());
    driver.check_invariants(&store, config.platform, "while initializing");

    runtime.dispatch(AppEvent::InitializationFinished).await;

    // Last write wins
    assert!(matches!(driver.effects().as_slice(), [
        Effect::GoToNotification(n),
        Effect::Signal(UiSignal::NotificationTapped)
    ] if n.data.channel_id() == Some("second")));
    assert_eq!(store.queued_notification(), None);
    driver.check_invariants(&store, config.platform, "after initialization");
}

#[tokio::test]
async fn compatible_announcement_loads_config() {
    let store = AppStore::default();
    let (mut runtime, driver, _push) = running(&store, &LifecycleConfig::default()).await;

    runtime.dispatch(AppEvent::ConfigChanged { server_version: "5.2.0.5.2.0.abc".into() }).await;

    assert_eq!(driver.effects(), vec![Effect::LoadConfigAndLicense("5.2.0.5.2.0.abc".into())]);
    assert_eq!(store.compatibility(), Compatibility::Compatible);
    assert_eq!(store.server_version().as_deref(), Some("5.2.0"));
}

#[tokio::test]
async fn deferred_logout_waits_for_interactions() {
    let store = AppStore::default();
    store.set_credentials_token(Some("session".into()));
    let (mut runtime, driver, _push) = running(&store, &LifecycleConfig::default()).await;
    driver.set_interactions_pending(true);

    runtime.dispatch(AppEvent::ConfigChanged { server_version: "3.9.0".into() }).await;
    assert_eq!(driver.take_effects(), vec![Effect::UpgradePrompt(UpgradePrompt::default().title)]);
    assert!(store.compatibility().is_incompatible());

    runtime.dispatch(AppEvent::UpgradePromptAcknowledged).await;
    assert_eq!(driver.take_effects(), vec![
        Effect::ClearClientServerVersion,
        Effect::BadgeCount(0)
    ]);
    assert_eq!(runtime.deferred_len(), 1);

    driver.set_interactions_pending(false);
    runtime.dispatch(AppEvent::InteractionsSettled).await;

    assert_eq!(driver.effects(), vec![Effect::Logout]);
    assert_eq!(runtime.deferred_len(), 0);
}

#[tokio::test]
async fn reset_discards_logout_deferred_for_previous_server() {
    let store = AppStore::default();
    store.set_credentials_token(Some("session".into()));
    let (mut runtime, driver, _push) = running(&store, &LifecycleConfig::default()).await;
    driver.set_interactions_pending(true);

    runtime.dispatch(AppEvent::ConfigChanged { server_version: "3.9.0".into() }).await;
    runtime.dispatch(AppEvent::UpgradePromptAcknowledged).await;
    assert_eq!(runtime.deferred_len(), 1);

    runtime.dispatch(AppEvent::NavigationReset).await;
    assert_eq!(runtime.deferred_len(), 0);

    runtime.dispatch(AppEvent::ConfigChanged { server_version: "5.0.0".into() }).await;
    driver.set_interactions_pending(false);
    runtime.dispatch(AppEvent::InteractionsSettled).await;

    assert!(!driver.effects().contains(&Effect::Logout));
    assert_eq!(store.compatibility(), Compatibility::Compatible);
    driver.check_invariants(&store, Platform::Ios, "after settle on new server");
}

#[tokio::test]
async fn duplicate_acknowledgment_logs_out_once() {
    let store = AppStore::default();
    store.set_credentials_token(Some("session".into()));
    let (mut runtime, driver, _push) = running(&store, &LifecycleConfig::default()).await;

    runtime.dispatch(AppEvent::ConfigChanged { server_version: "3.9.0".into() }).await;
    driver.take_effects();
    runtime.dispatch(AppEvent::UpgradePromptAcknowledged).await;
    runtime.dispatch(AppEvent::UpgradePromptAcknowledged).await;

    assert_eq!(driver.effects(), vec![
        Effect::ClearClientServerVersion,
        Effect::BadgeCount(0),
        Effect::Logout,
    ]);
}

#[tokio::test]
async fn acknowledgment_without_credentials_skips_logout() {
    let store = AppStore::default();
    let (mut runtime, driver, _push) = running(&store, &LifecycleConfig::default()).await;

    runtime.dispatch(AppEvent::ConfigChanged { server_version: "1.0.0".into() }).await;
    runtime.dispatch(AppEvent::UpgradePromptAcknowledged).await;

    assert!(!driver.effects().contains(&Effect::Logout));
    assert_eq!(runtime.deferred_len(), 0);
}

#[tokio::test]
async fn reset_clears_then_restarts_with_fade() {
    let store = AppStore::default();
    let config = LifecycleConfig::default();
    let (mut runtime, driver, push) = running(&store, &config).await;
    runtime.dispatch(AppEvent::ConfigChanged { server_version: "5.0.0".into() }).await;
    driver.take_effects();

    runtime.dispatch(AppEvent::NavigationReset).await;

    assert_eq!(driver.effects(), vec![
        Effect::ClearClientServerVersion,
        Effect::CancelLocalNotifications,
        Effect::StartApp { animation: Animation::Fade },
    ]);
    assert_eq!(store.server_version(), None);
    assert_eq!(store.compatibility(), Compatibility::Unknown);
    assert_eq!(push.registrations(), 1);
}

#[tokio::test]
async fn effect_failures_do_not_stop_processing() {
    let store = AppStore::default();
    let (mut runtime, driver, _push) = runtime(&store, &LifecycleConfig::default());
    driver.fail_effects(true);

    runtime.start().await;
    runtime.dispatch(AppEvent::Hydrated).await;

    assert!(store.push_configured());
    assert!(!runtime.lifecycle().awaiting_hydration());
}

#[tokio::test]
async fn cancelling_registration_signals_service() {
    let store = AppStore::default();
    let (mut runtime, _driver, push) = running(&store, &LifecycleConfig::default()).await;
    assert!(!push.is_cancelled());

    runtime.cancel_push_registration();

    assert!(push.is_cancelled());
    assert!(!push.deliver(tap("c1")));
}

#[tokio::test]
async fn run_drains_injected_events_then_stops() {
    let store = AppStore::default();
    let (runtime, driver, _push) = runtime(&store, &LifecycleConfig::default());
    driver.inject_events([
        AppEvent::Hydrated,
        AppEvent::ConfigChanged { server_version: "4.1.0".into() },
        AppEvent::InitializationFinished,
    ]);

    runtime.run().await.unwrap();

    assert!(driver.stopped());
    assert!(!driver.has_pending());
    assert_eq!(driver.effects(), vec![
        Effect::StartApp { animation: Animation::None },
        Effect::LoadConfigAndLicense("4.1.0".into()),
    ]);
    assert!(!store.app_initializing());
}
