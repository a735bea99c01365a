//! Property-based tests for the Lifecycle state machine.
//!
//! Each property drives [`Lifecycle`] through its public event interface and
//! checks the produced actions, so routing and gating are verified across
//! arbitrary inputs rather than hand-picked scenarios.

use lifeline_app::{
    Animation, AppAction, AppEvent, Lifecycle, LifecycleConfig, UiSignal, start_app,
};
use lifeline_core::{
    ActivityState, AppStore, DeviceNotification, NotificationData, ServerVersion, UserInfo,
};
use proptest::prelude::*;

fn lifecycle(store: &AppStore, config: &LifecycleConfig) -> Lifecycle {
    Lifecycle::new(store.clone(), config, &ActivityState::Active)
}

fn notification(
    kind: &str,
    foreground: bool,
    user_interaction: bool,
    local: bool,
) -> DeviceNotification {
    DeviceNotification {
        data: Some(NotificationData::new().with("type", kind).with("channel_id", "c1")),
        foreground,
        message: "hello".into(),
        user_info: Some(UserInfo { local_notification: local }),
        user_interaction,
    }
}

fn min_two() -> LifecycleConfig {
    LifecycleConfig { min_server_version: ServerVersion::new(2, 0, 0), ..Default::default() }
}

fn prompts(actions: &[AppAction]) -> bool {
    actions.iter().any(|a| matches!(a, AppAction::ShowUpgradePrompt(_)))
}

fn loads(actions: &[AppAction]) -> bool {
    actions.iter().any(|a| matches!(a, AppAction::LoadConfigAndLicense { .. }))
}

proptest! {
    #[test]
    fn prop_clear_always_marks_read(
        foreground in any::<bool>(),
        user_interaction in any::<bool>(),
        local in any::<bool>(),
        initializing in any::<bool>(),
        logged_in in any::<bool>(),
    ) {
        let store = AppStore::default();
        store.set_app_initializing(initializing);
        store.set_credentials_token(logged_in.then(|| "t".to_string()));
        let mut lifecycle = lifecycle(&store, &LifecycleConfig::default());

        let actions = lifecycle.handle(AppEvent::Notification(notification(
            "clear", foreground, user_interaction, local,
        )));

        prop_assert_eq!(actions, vec![AppAction::MarkChannelRead { channel_id: "c1".into() }]);
        prop_assert_eq!(store.queued_notification(), None);
    }

    #[test]
    fn prop_foreground_displays_in_app(
        user_interaction in any::<bool>(),
        local in any::<bool>(),
        initializing in any::<bool>(),
    ) {
        let store = AppStore::default();
        store.set_app_initializing(initializing);
        let mut lifecycle = lifecycle(&store, &LifecycleConfig::default());

        let actions = lifecycle.handle(AppEvent::Notification(notification(
            "message", true, user_interaction, local,
        )));

        prop_assert!(matches!(
            actions.as_slice(),
            [AppAction::Signal(UiSignal::NotificationReceived(_))]
        ));
    }

    #[test]
    fn prop_background_tap_routes_by_initialization(
        initializing in any::<bool>(),
        logged_in in any::<bool>(),
    ) {
        let store = AppStore::default();
        store.set_app_initializing(initializing);
        store.set_credentials_token(logged_in.then(|| "t".to_string()));
        let mut lifecycle = lifecycle(&store, &LifecycleConfig::default());

        let actions =
            lifecycle.handle(AppEvent::Notification(notification("message", false, true, false)));

        match (initializing, logged_in) {
            (false, _) => {
                prop_assert!(matches!(actions.as_slice(), [
                    AppAction::GoToNotification(_),
                    AppAction::Signal(UiSignal::NotificationTapped)
                ]));
                prop_assert_eq!(store.queued_notification(), None);
            },
            (true, true) => {
                prop_assert!(actions.is_empty());
                prop_assert!(store.queued_notification().is_some());
            },
            (true, false) => {
                prop_assert!(actions.is_empty());
                prop_assert_eq!(store.queued_notification(), None);
            },
        }
    }

    #[test]
    fn prop_version_gate_respects_minimum(
        major in 0u64..5,
        minor in 0u64..20,
        patch in 0u64..20,
        pre in prop::option::of("[a-z]{1,5}"),
    ) {
        let announcement = match &pre {
            Some(pre) => format!("{major}.{minor}.{patch}-{pre}"),
            None => format!("{major}.{minor}.{patch}"),
        };
        let store = AppStore::default();
        let mut lifecycle = lifecycle(&store, &min_two());

        let actions = lifecycle.handle(AppEvent::ConfigChanged { server_version: announcement });

        let announced: ServerVersion =
            format!("{major}.{minor}.{patch}").parse().unwrap();
        let below = announced < ServerVersion::new(2, 0, 0)
            || (announced == ServerVersion::new(2, 0, 0) && pre.is_some());
        prop_assert_eq!(prompts(&actions), below);
        prop_assert_eq!(loads(&actions), !below);
    }

    #[test]
    fn prop_arbitrary_announcements_never_panic(announcement in ".{0,40}") {
        let store = AppStore::default();
        let mut lifecycle = lifecycle(&store, &min_two());

        let actions = lifecycle.handle(AppEvent::ConfigChanged { server_version: announcement });

        prop_assert!(!(prompts(&actions) && loads(&actions)));
    }

    #[test]
    fn prop_hydration_starts_once(notifications in prop::collection::vec(any::<bool>(), 0..10)) {
        let store = AppStore::default();
        let mut lifecycle = lifecycle(&store, &LifecycleConfig::default());
        let mut starts = lifecycle.start().len();

        starts += count_starts(&lifecycle.handle(AppEvent::Hydrated));
        for foreground in notifications {
            let actions = lifecycle.handle(AppEvent::Notification(notification(
                "message", foreground, true, false,
            )));
            starts += count_starts(&actions);
        }

        prop_assert_eq!(starts, 1);
    }
}

fn count_starts(actions: &[AppAction]) -> usize {
    actions.iter().filter(|a| matches!(a, AppAction::StartApp { .. })).count()
}

#[test]
fn minimum_two_boundaries() {
    let store = AppStore::default();
    let mut lifecycle = lifecycle(&store, &min_two());

    let below = lifecycle.handle(AppEvent::ConfigChanged { server_version: "1.9.9".into() });
    assert!(prompts(&below));

    for version in ["2.0.0", "2.0.1-beta"] {
        let actions = lifecycle.handle(AppEvent::ConfigChanged { server_version: version.into() });
        assert!(!prompts(&actions), "{version} should not prompt");
        assert!(loads(&actions), "{version} should load config");
    }

    let empty = lifecycle.handle(AppEvent::ConfigChanged { server_version: String::new() });
    assert!(empty.is_empty());
}

#[test]
fn reset_clears_cancels_and_restarts_in_order() {
    let store = AppStore::default();
    store.register_device("apple_rn:t".into());
    store.set_server_version("5.0.0".into());
    let mut lifecycle = lifecycle(&store, &LifecycleConfig::default());

    for _ in 0..2 {
        let actions = lifecycle.handle(AppEvent::NavigationReset);
        let mut expected = vec![
            AppAction::CancelDeferred,
            AppAction::ClearClientServerVersion,
            AppAction::CancelLocalNotifications,
        ];
        expected.extend(start_app(&store, Animation::Fade));
        assert_eq!(actions, expected);
        assert_eq!(store.server_version(), None);
    }
}
