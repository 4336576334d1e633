//! Error types for directory operations.
//!
//! Every operation of the directory engine returns either a value or exactly
//! one [`DirectoryError`]. The set of kinds is closed: callers (usually a
//! transport layer) branch on [`DirectoryError::kind`] rather than on message
//! text.

use crate::resource::version::VersionConflict;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for directory operations.
///
/// Each variant is a terminal outcome caused by the caller's input; the engine
/// performs no I/O, so there is no internal or retryable category.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectoryError {
    /// The userName is already held by another existing resource
    #[error("User name '{user_name}' is already in use")]
    Conflict { user_name: String },

    /// The referenced id never existed or has been deleted
    #[error("User {id} does not exist")]
    NotFound { id: String },

    /// The supplied exact precondition does not match the current version
    #[error("User {id}: {conflict}")]
    VersionMismatch { id: String, conflict: VersionConflict },

    /// A mutation that requires a precondition was invoked without one
    #[error("Missing version precondition for {operation}")]
    MissingPrecondition { operation: String },

    /// Malformed payload or filter expression
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Closed classification of [`DirectoryError`] values.
///
/// Transports map kinds onto protocol status codes; the engine never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    VersionMismatch,
    MissingPrecondition,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "notFound",
            ErrorKind::VersionMismatch => "versionMismatch",
            ErrorKind::MissingPrecondition => "missingPrecondition",
            ErrorKind::Validation => "invalidValue",
        };
        write!(f, "{}", name)
    }
}

/// Validation errors for payloads and filter expressions.
///
/// Filter errors carry the byte offset into the filter string at which the
/// parser gave up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is missing
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Attribute is present but empty or whitespace
    #[error("Attribute '{attribute}' cannot be blank")]
    BlankValue { attribute: String },

    /// A comparison was expected but the input ended or held nothing usable
    #[error("Expected a comparison at position {position}")]
    EmptyExpression { position: usize },

    /// Filter references an attribute the directory does not know
    #[error("Unknown attribute '{attribute}' at position {position}")]
    UnknownAttribute { attribute: String, position: usize },

    /// Filter uses an operator outside the supported set
    #[error("Unknown operator '{operator}' at position {position}")]
    UnknownOperator { operator: String, position: usize },

    /// A quoted literal was never closed
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    /// Any other filter syntax error
    #[error("Invalid filter at position {position}: {message}")]
    InvalidFilter { message: String, position: usize },

    /// Filter string exceeds the configured length limit
    #[error("Filter exceeds maximum length ({length} bytes, max {max})")]
    FilterTooLong { length: usize, max: usize },

    /// Filter nests parentheses deeper than the configured limit
    #[error("Filter exceeds maximum nesting depth ({max})")]
    FilterTooDeep { max: usize },

    /// General validation error with custom message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}

impl DirectoryError {
    /// Create a not found error for the given id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a userName conflict error
    pub fn conflict(user_name: impl Into<String>) -> Self {
        Self::Conflict {
            user_name: user_name.into(),
        }
    }

    /// Create a version mismatch error
    pub fn version_mismatch(id: impl Into<String>, conflict: VersionConflict) -> Self {
        Self::VersionMismatch {
            id: id.into(),
            conflict,
        }
    }

    /// Create a missing precondition error for the named operation
    pub fn missing_precondition(operation: impl Into<String>) -> Self {
        Self::MissingPrecondition {
            operation: operation.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::Conflict { .. } => ErrorKind::Conflict,
            DirectoryError::NotFound { .. } => ErrorKind::NotFound,
            DirectoryError::VersionMismatch { .. } => ErrorKind::VersionMismatch,
            DirectoryError::MissingPrecondition { .. } => ErrorKind::MissingPrecondition,
            DirectoryError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// The resource id this error refers to, where there is one.
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            DirectoryError::NotFound { id } | DirectoryError::VersionMismatch { id, .. } => {
                Some(id)
            }
            _ => None,
        }
    }
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create a blank value error
    pub fn blank(attribute: impl Into<String>) -> Self {
        Self::BlankValue {
            attribute: attribute.into(),
        }
    }

    /// Create a filter syntax error
    pub fn invalid_filter(message: impl Into<String>, position: usize) -> Self {
        Self::InvalidFilter {
            message: message.into(),
            position,
        }
    }

    /// Create a custom validation error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

// Result type aliases for convenience
pub type DirectoryResult<T> = Result<T, DirectoryError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
