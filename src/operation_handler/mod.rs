//! Transport-agnostic operation handler.
//!
//! This module provides structured request/response handling for directory
//! operations with version tokens (ETags) attached to every returned user.
//!
//! # Key Types
//!
//! - [`OperationHandler`] - Main handler for processing directory operations
//! - [`OperationRequest`] - One typed operation plus a correlation id
//! - [`OperationResponse`] - Outcome or error, with metadata and ETag
//!
//! # Examples
//!
//! ```rust
//! use scim_directory::operation_handler::{OperationHandler, OperationRequest};
//! use scim_directory::resource::{Precondition, UserCandidate, Version};
//! use scim_directory::storage::InMemoryStore;
//! use scim_directory::error::ErrorKind;
//!
//! let handler = OperationHandler::new(InMemoryStore::new());
//!
//! let created = handler.handle(OperationRequest::create(UserCandidate::new("joe")));
//! let id = created.user().unwrap().id().to_string();
//! assert_eq!(created.etag().unwrap().to_string(), "\"0\"");
//!
//! let stale = handler.handle(
//!     OperationRequest::delete(&id).with_precondition(Precondition::Exact(Version::new(7))),
//! );
//! assert_eq!(stale.error_kind(), Some(ErrorKind::VersionMismatch));
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

pub use self::core::{
    DirectoryOperation, OperationHandler, OperationMetadata, OperationOutcome, OperationRequest,
    OperationResponse,
};

pub use errors::create_error_response;
