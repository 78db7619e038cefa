//! Classification of version strings into concrete versions and ranges.
//!
//! Publishers may use free-form version strings, so no semver parser is
//! involved. A string is a range only when it has one of the recognisable
//! range shapes below; everything else is treated as concrete.

use regex::Regex;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static LEADING_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\^|~|>=|<=|>|<|=)\s*v?\d").expect("valid operator pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static WILDCARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\^|~|>=|<=|>|<|=)?v?(?:(?:\d+|[xX*])\.)*[xX*](?:\.(?:\d+|[xX*]))*$")
        .expect("valid wildcard pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static HYPHEN_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)\s+-\s+(\S+)\s*$").expect("valid hyphen range pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static VERSION_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?\d+(?:\.\d+)*(?:[-+][0-9A-Za-z.-]+)*$").expect("valid version pattern")
});

const OR_SEPARATOR: &str = "||";

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionClass {
    /// A single version, possibly free-form.
    Concrete,
    /// A range expression that resolves to many versions.
    Range,
}

impl VersionClass {
    /// Returns `true` for [`VersionClass::Range`].
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Range)
    }
}

/// Classifies a version string.
///
/// A string is a [`VersionClass::Range`] when it starts with a comparison
/// operator followed by a digit, contains `||`, has a whitespace-separated
/// token that uses `x`, `X` or `*` in a numeric position, or is a hyphen
/// range between two version-like tokens.
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::{VersionClass, classify};
///
/// assert_eq!(classify("^1.2.3"), VersionClass::Range);
/// assert_eq!(classify("1.x"), VersionClass::Range);
/// assert_eq!(classify("1.2.3 - 2.0.0"), VersionClass::Range);
/// assert_eq!(classify("1.2.3 - 2.x"), VersionClass::Range);
/// assert_eq!(classify("1.2.3-alpha.1"), VersionClass::Concrete);
/// assert_eq!(classify("snapshot - 2025.09"), VersionClass::Concrete);
/// ```
#[must_use]
pub fn classify(version: &str) -> VersionClass {
    if LEADING_OPERATOR.is_match(version)
        || version.contains(OR_SEPARATOR)
        || has_wildcard_token(version)
        || is_hyphen_range(version)
    {
        VersionClass::Range
    } else {
        VersionClass::Concrete
    }
}

fn has_wildcard_token(version: &str) -> bool {
    version
        .split_whitespace()
        .any(|token| WILDCARD.is_match(token))
}

fn is_hyphen_range(version: &str) -> bool {
    HYPHEN_RANGE.captures(version).is_some_and(|captures| {
        let lower = captures.get(1).map_or("", |bound| bound.as_str());
        let upper = captures.get(2).map_or("", |bound| bound.as_str());
        VERSION_LIKE.is_match(lower) && VERSION_LIKE.is_match(upper)
    })
}
