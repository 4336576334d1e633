//! Version control types for directory resources.
//!
//! Every stored user carries an integer [`Version`] that starts at 0 and is
//! incremented by exactly one on every successful update. Mutations may be
//! gated by a [`Precondition`], giving optimistic concurrency control in the
//! style of HTTP `If-Match`:
//!
//! * no precondition (`None`) - the caller did not send one at all
//! * [`Precondition::Any`] - wildcard, matches any current version
//! * [`Precondition::Exact`] - must equal the current version
//!
//! The wildcard and the absent case are deliberately different values: a
//! delete without any precondition is refused even when a wildcard would have
//! matched.
//!
//! # Basic Usage
//!
//! ```rust
//! use scim_directory::resource::version::{Precondition, Version};
//!
//! let current = Version::INITIAL.next();
//! assert!(Precondition::Any.check(current).is_ok());
//! assert!(Precondition::Exact(Version::new(1)).check(current).is_ok());
//! assert!(Precondition::Exact(Version::INITIAL).check(current).is_err());
//!
//! // Cache validator for the transport layer
//! assert_eq!(current.etag().to_string(), "\"1\"");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-resource version number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version assigned to every newly created resource.
    pub const INITIAL: Version = Version(0);

    /// Wrap a raw version number.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw version number.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The version that follows this one.
    ///
    /// Saturates at `u64::MAX` rather than wrapping or panicking.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The externally visible cache-validator token for this version.
    pub fn etag(&self) -> ETag {
        ETag(*self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Quoted-decimal rendering of a [`Version`], e.g. `"3"`.
///
/// Formatting is pure; parsing of incoming header syntax is left to the
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ETag(Version);

impl ETag {
    /// The version this token renders.
    pub fn version(&self) -> Version {
        self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

/// Conditional-match token supplied with a mutation.
///
/// An absent token is modelled as `Option::<Precondition>::None` by the
/// operations that accept one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Precondition {
    /// Matches whatever version the resource currently has
    Any,
    /// Matches only this exact version
    Exact(Version),
}

impl Precondition {
    /// Whether the precondition is satisfied by `current`.
    pub fn matches(&self, current: Version) -> bool {
        match self {
            Precondition::Any => true,
            Precondition::Exact(expected) => *expected == current,
        }
    }

    /// Check the precondition against `current`, describing any mismatch.
    pub fn check(&self, current: Version) -> Result<(), VersionConflict> {
        match self {
            Precondition::Exact(expected) if *expected != current => {
                Err(VersionConflict::new(*expected, current))
            }
            _ => Ok(()),
        }
    }
}

impl From<Version> for Precondition {
    fn from(version: Version) -> Self {
        Precondition::Exact(version)
    }
}

/// Details about a version conflict during a conditional operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error(
    "Version conflict: expected version {expected}, found {current}. Resource was modified by another client"
)]
pub struct VersionConflict {
    /// The version the caller expected
    pub expected: Version,

    /// The version the resource actually has
    pub current: Version,
}

impl VersionConflict {
    /// Create a new version conflict.
    pub fn new(expected: Version, current: Version) -> Self {
        Self { expected, current }
    }
}
