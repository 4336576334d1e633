//! Name value object for user name components.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured given/family name of a user.
///
/// ## Validation Rules
///
/// - At least one of the two parts must be provided
/// - A provided part cannot be blank
///
/// ```rust
/// use scim_directory::resource::value_objects::Name;
///
/// let name = Name::new_simple("Joe".to_string(), "User".to_string()).unwrap();
/// assert_eq!(name.to_string(), "Joe User");
/// assert!(Name::new(None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawName")]
pub struct Name {
    #[serde(rename = "givenName", skip_serializing_if = "Option::is_none")]
    given_name: Option<String>,
    #[serde(rename = "familyName", skip_serializing_if = "Option::is_none")]
    family_name: Option<String>,
}

#[derive(Deserialize)]
struct RawName {
    #[serde(rename = "givenName")]
    given_name: Option<String>,
    #[serde(rename = "familyName")]
    family_name: Option<String>,
}

impl TryFrom<RawName> for Name {
    type Error = ValidationError;

    fn try_from(raw: RawName) -> ValidationResult<Self> {
        Self::new(raw.given_name, raw.family_name)
    }
}

impl Name {
    /// Create a new Name from optional parts.
    pub fn new(given_name: Option<String>, family_name: Option<String>) -> ValidationResult<Self> {
        if let Some(ref given) = given_name {
            Self::validate_component(given, "name.givenName")?;
        }
        if let Some(ref family) = family_name {
            Self::validate_component(family, "name.familyName")?;
        }
        if given_name.is_none() && family_name.is_none() {
            return Err(ValidationError::custom(
                "At least one name component must be provided",
            ));
        }

        Ok(Self {
            given_name,
            family_name,
        })
    }

    /// Create a Name with both parts.
    pub fn new_simple(given_name: String, family_name: String) -> ValidationResult<Self> {
        Self::new(Some(given_name), Some(family_name))
    }

    /// Get the given name.
    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    /// Get the family name.
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn validate_component(value: &str, attribute: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::blank(attribute));
        }
        Ok(())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.given_name, &self.family_name) {
            (Some(given), Some(family)) => write!(f, "{} {}", given, family),
            (Some(only), None) | (None, Some(only)) => write!(f, "{}", only),
            (None, None) => Ok(()),
        }
    }
}
