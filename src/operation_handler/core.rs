//! Core operation handler infrastructure
//!
//! Request and response types plus the dispatcher that routes each request to
//! its handler function.

use crate::error::{DirectoryError, ErrorKind};
use crate::query::{ListResponse, SearchRequest};
use crate::resource::{ETag, Precondition, User, UserCandidate};
use crate::storage::ResourceStore;
use log::{debug, info, warn};

/// Transport-agnostic front end of a directory.
///
/// The handler owns its store. Transports turn their wire requests into
/// [`OperationRequest`]s and map the [`ErrorKind`] of failed responses onto
/// their own status codes.
pub struct OperationHandler<S: ResourceStore> {
    pub(super) store: S,
}

/// Structured request for a directory operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// The operation to perform
    pub operation: DirectoryOperation,
    /// Request ID for tracing and correlation; generated when absent
    pub request_id: Option<String>,
}

/// Operations supported by the handler
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryOperation {
    /// Create a new user
    Create { user: UserCandidate },
    /// Get a user by id
    Get { id: String },
    /// Replace a user's attributes
    Update {
        id: String,
        user: UserCandidate,
        precondition: Option<Precondition>,
    },
    /// Delete a user; the precondition is mandatory
    Delete {
        id: String,
        precondition: Option<Precondition>,
    },
    /// Filtered, paginated search
    Search { query: SearchRequest },
}

impl DirectoryOperation {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryOperation::Create { .. } => "create",
            DirectoryOperation::Get { .. } => "get",
            DirectoryOperation::Update { .. } => "update",
            DirectoryOperation::Delete { .. } => "delete",
            DirectoryOperation::Search { .. } => "search",
        }
    }

    /// The id the operation targets, if any.
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            DirectoryOperation::Get { id }
            | DirectoryOperation::Update { id, .. }
            | DirectoryOperation::Delete { id, .. } => Some(id),
            DirectoryOperation::Create { .. } | DirectoryOperation::Search { .. } => None,
        }
    }
}

/// Successful result of an operation
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// The user as stored after create, get or update
    Resource(User),
    /// The last snapshot of a deleted user
    Deleted(User),
    /// One page of search results
    List(ListResponse),
}

/// Structured response from a directory operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    /// Outcome, or the single error the operation failed with
    pub result: Result<OperationOutcome, DirectoryError>,
    /// Metadata about the operation including version information
    pub metadata: OperationMetadata,
}

/// Metadata about a directory operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationMetadata {
    /// Request ID for tracing
    pub request_id: String,
    /// Id of the user involved, if any
    pub resource_id: Option<String>,
    /// Version token of the user after the operation. On a version mismatch
    /// this is the token of the current version.
    pub etag: Option<ETag>,
    /// Number of users returned (search only)
    pub resource_count: Option<usize>,
    /// Total number of matches (search only)
    pub total_results: Option<usize>,
}

impl OperationResponse {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The user returned by create, get or update.
    pub fn user(&self) -> Option<&User> {
        match &self.result {
            Ok(OperationOutcome::Resource(user)) => Some(user),
            _ => None,
        }
    }

    /// The search page, for search operations.
    pub fn list(&self) -> Option<&ListResponse> {
        match &self.result {
            Ok(OperationOutcome::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DirectoryError> {
        self.result.as_ref().err()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(DirectoryError::kind)
    }

    pub fn etag(&self) -> Option<ETag> {
        self.metadata.etag
    }
}

impl<S: ResourceStore> OperationHandler<S> {
    /// Create a new operation handler over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle a structured operation request.
    ///
    /// Never panics and never fails outright: errors are reported inside the
    /// response.
    pub fn handle(&self, request: OperationRequest) -> OperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Directory operation handler processing {} (request: '{}')",
            request.operation.name(),
            request_id
        );

        let resource_id = request.operation.resource_id().map(str::to_string);
        let result = match request.operation {
            DirectoryOperation::Create { user } => {
                super::handlers::crud::handle_create(self, &user, &request_id)
            }
            DirectoryOperation::Get { id } => {
                super::handlers::crud::handle_get(self, &id, &request_id)
            }
            DirectoryOperation::Update {
                id,
                user,
                precondition,
            } => super::handlers::crud::handle_update(self, &id, &user, precondition, &request_id),
            DirectoryOperation::Delete { id, precondition } => {
                super::handlers::crud::handle_delete(self, &id, precondition, &request_id)
            }
            DirectoryOperation::Search { query } => {
                super::handlers::query::handle_search(self, &query, &request_id)
            }
        };

        match result {
            Ok(response) => {
                debug!(
                    "Directory operation handler completed successfully (request: '{}')",
                    request_id
                );
                response
            }
            Err(e) => {
                warn!(
                    "Directory operation handler failed: {} (request: '{}')",
                    e, request_id
                );
                super::errors::create_error_response(e, request_id, resource_id)
            }
        }
    }
}
