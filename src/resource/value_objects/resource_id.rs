//! ResourceId value object for directory resource identifiers.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque, non-empty resource identifier.
///
/// Ids are assigned by the store and never reused. Callers may still build a
/// `ResourceId` from an arbitrary string to look a resource up; an unknown id
/// simply yields `NotFound`.
///
/// ```rust
/// use scim_directory::resource::value_objects::ResourceId;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let id = ResourceId::new("2819c223-7f76-453a-919d-413861904646".to_string())?;
///     assert_eq!(id.as_str(), "2819c223-7f76-453a-919d-413861904646");
///     assert!(ResourceId::new("".to_string()).is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new ResourceId with validation.
    pub fn new(value: String) -> ValidationResult<Self> {
        if value.is_empty() {
            return Err(ValidationError::missing_required("id"));
        }
        Ok(Self(value))
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create an id from a sequence number.
    pub(crate) fn from_sequence(value: u64) -> Self {
        Self(value.to_string())
    }

    /// Get the string representation of the ResourceId.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the owned string value of the ResourceId.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value.to_string())
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
