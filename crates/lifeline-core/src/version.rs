//! Server version extraction, validation and ordering.
//!
//! Servers announce their version as a free-form string whose prefix is a
//! semantic version, e.g. `4.10.0.4.10.0.1a2b3c.false`. The announcement is
//! handled in three steps:
//!
//! 1. [`extract`] pulls the leading `MAJOR.MINOR.PATCH[-prerelease]` text.
//! 2. [`ServerVersion::from_str`] validates it against semver 2.0.0 rules.
//! 3. [`ServerVersion`]'s `Ord` implements semver precedence.
//!
//! [`parse_announcement`] chains the three and reports which step failed.

use std::{cmp::Ordering, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::error::VersionError;

#[allow(clippy::expect_used, reason = "the pattern is a literal and always compiles")]
static ANNOUNCEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(-[a-zA-Z0-9.-]*)?").expect("version pattern compiles")
});

/// Leading version text of an announcement, or `None` if it does not start
/// with a `MAJOR.MINOR.PATCH` triple.
pub fn extract(announcement: &str) -> Option<&str> {
    ANNOUNCEMENT_PATTERN.find(announcement).map(|m| m.as_str())
}

/// Extract and validate the version carried by a raw announcement.
///
/// # Errors
///
/// - [`VersionError::Empty`] for an empty announcement
/// - [`VersionError::NoMatch`] if nothing could be extracted
/// - [`VersionError::Invalid`] if the extracted text is not valid semver
pub fn parse_announcement(announcement: &str) -> Result<ServerVersion, VersionError> {
    if announcement.is_empty() {
        return Err(VersionError::Empty);
    }

    let Some(candidate) = extract(announcement) else {
        return Err(VersionError::NoMatch { announcement: announcement.to_string() });
    };

    candidate.parse()
}

/// Result of the most recent server version announcement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// No announcement since startup or the last reset.
    #[default]
    Unknown,
    /// Server is supported (or its version could not be compared).
    Compatible,
    /// Server is older than the minimum supported version.
    Incompatible {
        /// Version the server announced.
        announced: ServerVersion,
    },
}

impl Compatibility {
    /// True while the upgrade prompt is outstanding or was acknowledged.
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Self::Incompatible { .. })
    }
}

/// A validated semantic version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Vec<Identifier>,
}

/// Pre-release identifier. Numeric identifiers sort before alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return parse_numeric(raw).map(Self::Numeric);
        }
        if raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Some(Self::AlphaNumeric(raw.to_string()));
        }
        None
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

/// Digits only, no leading zero unless the value is exactly `0`.
fn parse_numeric(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return None;
    }
    raw.parse().ok()
}

impl ServerVersion {
    /// Release version without a pre-release suffix.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch, pre: Vec::new() }
    }

    /// Major component.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Minor component.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Patch component.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// True if the version carries a pre-release suffix.
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl FromStr for ServerVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| VersionError::Invalid { candidate: s.to_string(), reason };

        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (s, None),
        };

        let mut parts = core.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected MAJOR.MINOR.PATCH"));
        };

        let major = parse_numeric(major).ok_or_else(|| invalid("invalid major component"))?;
        let minor = parse_numeric(minor).ok_or_else(|| invalid("invalid minor component"))?;
        let patch = parse_numeric(patch).ok_or_else(|| invalid("invalid patch component"))?;

        let pre = match pre {
            None => Vec::new(),
            Some(pre) => pre
                .split('.')
                .map(Identifier::parse)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("invalid pre-release identifier"))?,
        };

        Ok(Self { major, minor, patch, pre })
    }
}

impl Ord for ServerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)).then_with(
            // A release outranks any of its pre-releases
            || match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            },
        )
    }
}

impl PartialOrd for ServerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (i, id) in self.pre.iter().enumerate() {
            f.write_str(if i == 0 { "-" } else { "." })?;
            write!(f, "{id}")?;
        }
        Ok(())
    }
}
