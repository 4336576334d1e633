//! UserName value object for directory user identifiers.
//!
//! User names are the human-facing unique key of a user. Uniqueness itself is
//! enforced by the store's index; this type only guarantees the value is
//! usable as a key.

use crate::config::CaseSensitivity;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A validated user name.
///
/// ## Validation Rules
///
/// - Must not be empty
/// - Must not consist only of whitespace
///
/// ```rust
/// use scim_directory::resource::value_objects::UserName;
///
/// assert!(UserName::new("joe".to_string()).is_ok());
/// assert!(UserName::new("".to_string()).is_err());
/// assert!(UserName::new("   ".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName with validation.
    pub fn new(value: String) -> ValidationResult<Self> {
        Self::validate_format(&value)?;
        Ok(Self(value))
    }

    /// Get the string representation of the UserName.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the owned string value of the UserName.
    pub fn into_string(self) -> String {
        self.0
    }

    /// The form of this name used as a uniqueness index key.
    pub fn index_key(&self, case: CaseSensitivity) -> Cow<'_, str> {
        case.normalize(&self.0)
    }

    fn validate_format(value: &str) -> ValidationResult<()> {
        if value.is_empty() {
            return Err(ValidationError::missing_required("userName"));
        }
        if value.trim().is_empty() {
            return Err(ValidationError::blank("userName"));
        }
        Ok(())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for UserName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UserName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for UserName {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserName {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value.to_string())
    }
}
