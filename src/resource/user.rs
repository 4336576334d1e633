//! The user resource and the payload used to create or replace one.

use super::value_objects::{EmailAddress, Meta, Name, ResourceId, UserName};
use super::version::Version;
use crate::error::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user.
///
/// The version lives in [`Meta`] and serializes as `meta.version`.
///
/// Values of this type are immutable snapshots: the store hands out clones,
/// so a caller never observes a half-applied update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: ResourceId,
    user_name: UserName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<Name>,
    #[serde(default)]
    emails: Vec<EmailAddress>,
    meta: Meta,
}

impl User {
    /// Build a freshly created user at version 0.
    pub(crate) fn create(id: ResourceId, attributes: UserAttributes, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_name: attributes.user_name,
            name: attributes.name,
            emails: attributes.emails,
            meta: Meta::created_at(now),
        }
    }

    /// The next revision of this user with every mutable attribute replaced.
    pub(crate) fn replaced(&self, attributes: UserAttributes, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            user_name: attributes.user_name,
            name: attributes.name,
            emails: attributes.emails,
            meta: self.meta.touched(now),
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn version(&self) -> Version {
        self.meta.version()
    }

    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    /// Email addresses in the order they were supplied.
    pub fn emails(&self) -> &[EmailAddress] {
        &self.emails
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }
}

/// Unvalidated name parts of a [`UserCandidate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

/// Payload for creating a user or replacing its attributes.
///
/// Candidates are deliberately loose so that a transport can deserialize
/// whatever the client sent; [`UserCandidate::validate`] turns them into
/// [`UserAttributes`] or a [`ValidationError`].
///
/// ```rust
/// use scim_directory::resource::UserCandidate;
///
/// let candidate = UserCandidate::new("joe")
///     .with_name("Joe", "User")
///     .with_email("joe@blah.com");
/// let attributes = candidate.validate().unwrap();
/// assert_eq!(attributes.user_name().as_str(), "joe");
///
/// assert!(UserCandidate::default().validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NameCandidate>,
    #[serde(default)]
    pub emails: Vec<String>,
}

impl UserCandidate {
    /// Start a candidate with the given userName.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            ..Self::default()
        }
    }

    /// Set both name parts.
    pub fn with_name(mut self, given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        self.name = Some(NameCandidate {
            given_name: Some(given_name.into()),
            family_name: Some(family_name.into()),
        });
        self
    }

    /// Append an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }

    /// Replace the userName.
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    /// A candidate that reproduces the current attributes of `user`.
    ///
    /// Handy for read-modify-write cycles.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_name: Some(user.user_name().as_str().to_string()),
            name: user.name().map(|name| NameCandidate {
                given_name: name.given_name().map(str::to_string),
                family_name: name.family_name().map(str::to_string),
            }),
            emails: user
                .emails()
                .iter()
                .map(|email| email.as_str().to_string())
                .collect(),
        }
    }

    /// Validate the payload.
    pub fn validate(&self) -> ValidationResult<UserAttributes> {
        let user_name = match &self.user_name {
            Some(value) => UserName::new(value.clone())?,
            None => return Err(ValidationError::missing_required("userName")),
        };

        let name = self
            .name
            .as_ref()
            .map(|name| Name::new(name.given_name.clone(), name.family_name.clone()))
            .transpose()?;

        let emails = self
            .emails
            .iter()
            .map(|email| EmailAddress::new(email.clone()))
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(UserAttributes {
            user_name,
            name,
            emails,
        })
    }
}

/// Validated mutable attributes of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttributes {
    user_name: UserName,
    name: Option<Name>,
    emails: Vec<EmailAddress>,
}

impl UserAttributes {
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn emails(&self) -> &[EmailAddress] {
        &self.emails
    }
}
