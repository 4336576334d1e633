//! Request builder utilities for OperationRequest

use crate::operation_handler::core::{DirectoryOperation, OperationRequest};
use crate::query::SearchRequest;
use crate::resource::{Precondition, UserCandidate};

impl OperationRequest {
    fn from_operation(operation: DirectoryOperation) -> Self {
        Self {
            operation,
            request_id: None,
        }
    }

    /// Create a new create operation request.
    pub fn create(user: UserCandidate) -> Self {
        Self::from_operation(DirectoryOperation::Create { user })
    }

    /// Create a new get operation request.
    pub fn get(id: impl Into<String>) -> Self {
        Self::from_operation(DirectoryOperation::Get { id: id.into() })
    }

    /// Create a new unconditional update operation request.
    pub fn update(id: impl Into<String>, user: UserCandidate) -> Self {
        Self::from_operation(DirectoryOperation::Update {
            id: id.into(),
            user,
            precondition: None,
        })
    }

    /// Create a new delete operation request.
    ///
    /// Deletes need a precondition; see [`with_precondition`](Self::with_precondition).
    pub fn delete(id: impl Into<String>) -> Self {
        Self::from_operation(DirectoryOperation::Delete {
            id: id.into(),
            precondition: None,
        })
    }

    /// Create a new search operation request.
    pub fn search(query: SearchRequest) -> Self {
        Self::from_operation(DirectoryOperation::Search { query })
    }

    /// Attach a version precondition to an update or delete.
    ///
    /// Has no effect on other operations.
    pub fn with_precondition(mut self, expected: Precondition) -> Self {
        match &mut self.operation {
            DirectoryOperation::Update { precondition, .. }
            | DirectoryOperation::Delete { precondition, .. } => *precondition = Some(expected),
            _ => {}
        }
        self
    }

    /// Set request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
