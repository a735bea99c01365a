//! Property-based tests for server version announcements.
//!
//! Announcements arrive from the network and may be anything. Parsing must
//! never panic, and the ordering must agree with plain numeric comparison for
//! release versions.

use lifeline_core::{ServerVersion, VersionError, version::parse_announcement};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_arbitrary_announcements_never_panic(raw in ".*") {
        match parse_announcement(&raw) {
            Ok(_) | Err(VersionError::Invalid { .. }) => {
                prop_assert!(lifeline_core::version::extract(&raw).is_some());
            },
            Err(VersionError::Empty) => prop_assert!(raw.is_empty()),
            Err(VersionError::NoMatch { announcement }) => prop_assert_eq!(announcement, raw),
        }
    }

    #[test]
    fn prop_release_ordering_matches_tuples(
        a in (0u64..50, 0u64..50, 0u64..50),
        b in (0u64..50, 0u64..50, 0u64..50),
    ) {
        let va = ServerVersion::new(a.0, a.1, a.2);
        let vb = ServerVersion::new(b.0, b.1, b.2);
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
    }

    #[test]
    fn prop_prerelease_sorts_below_its_release(
        core in (0u64..50, 0u64..50, 0u64..50),
        tag in "[a-z][a-z0-9]{0,6}",
    ) {
        let release = ServerVersion::new(core.0, core.1, core.2);
        let pre: ServerVersion = format!("{release}-{tag}").parse().unwrap();
        prop_assert!(pre < release);
        prop_assert!(pre.is_prerelease());
    }

    #[test]
    fn prop_trailing_build_noise_is_ignored(
        core in (0u64..50, 0u64..50, 0u64..50),
        noise in "\\.[0-9a-f]{1,12}\\.(true|false)",
    ) {
        let announcement = format!("{}.{}.{}{noise}", core.0, core.1, core.2);
        prop_assert_eq!(
            parse_announcement(&announcement),
            Ok(ServerVersion::new(core.0, core.1, core.2))
        );
    }
}
