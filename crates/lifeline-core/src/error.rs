//! Error types for the Lifeline core.
//!
//! None of these errors are surfaced to the user. The coordinator maps each
//! of them onto "take no action" (or, for a non-comparable version, onto
//! skipping the compatibility gate).

use thiserror::Error;

/// Reasons a server version announcement could not produce a comparable
/// version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The announcement was empty. This is the "no-op" signal.
    #[error("empty version announcement")]
    Empty,

    /// The announcement does not start with `MAJOR.MINOR.PATCH`.
    #[error("no version found in announcement {announcement:?}")]
    NoMatch {
        /// Raw announcement as received.
        announcement: String,
    },

    /// A candidate was extracted but is not a valid semantic version.
    #[error("invalid semantic version {candidate:?}: {reason}")]
    Invalid {
        /// Text extracted from the announcement.
        candidate: String,
        /// What made the candidate invalid.
        reason: &'static str,
    },
}

impl VersionError {
    /// Returns true if the announcement carried no usable version text.
    ///
    /// Absent versions leave the compatibility gate untouched. Invalid
    /// candidates still count as an announcement.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Empty | Self::NoMatch { .. })
    }
}

/// Errors parsing a [`crate::Platform`] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Name is not one of the supported platforms.
    #[error("unknown platform {0:?} (expected \"ios\" or \"android\")")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unmatched_are_absent() {
        assert!(VersionError::Empty.is_absent());
        assert!(VersionError::NoMatch { announcement: "dev".into() }.is_absent());
    }

    #[test]
    fn invalid_candidate_is_not_absent() {
        let err = VersionError::Invalid { candidate: "01.2.3".into(), reason: "leading zero" };
        assert!(!err.is_absent());
        assert_eq!(err.to_string(), "invalid semantic version \"01.2.3\": leading zero");
    }
}
