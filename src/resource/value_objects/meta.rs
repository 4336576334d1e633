//! Meta value object for resource timestamps and version.

use crate::resource::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation and modification timestamps and the version of a stored resource.
///
/// `last_modified` is never earlier than `created`. Serialized as the SCIM
/// `meta` object: `created`, `lastModified`, `version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    created: DateTime<Utc>,
    #[serde(rename = "lastModified")]
    last_modified: DateTime<Utc>,
    version: Version,
}

impl Meta {
    /// Meta for a resource created at `now`, at the initial version.
    pub fn created_at(now: DateTime<Utc>) -> Self {
        Self {
            created: now,
            last_modified: now,
            version: Version::INITIAL,
        }
    }

    /// Meta of the next revision: modified at `now`, one version later.
    ///
    /// A clock that went backwards does not move `last_modified` before
    /// `created`.
    pub fn touched(&self, now: DateTime<Utc>) -> Self {
        Self {
            created: self.created,
            last_modified: now.max(self.created),
            version: self.version.next(),
        }
    }

    /// Get the resource version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Get the last modification timestamp.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}
