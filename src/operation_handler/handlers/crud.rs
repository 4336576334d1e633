//! CRUD operation handlers
//!
//! Each handler runs one store operation and wraps the resulting user with
//! its version token.

use crate::error::DirectoryResult;
use crate::operation_handler::core::{
    OperationHandler, OperationMetadata, OperationOutcome, OperationResponse,
};
use crate::resource::{Precondition, User, UserCandidate};
use crate::storage::ResourceStore;
use log::debug;

/// Handle create operations.
pub fn handle_create<S: ResourceStore>(
    handler: &OperationHandler<S>,
    user: &UserCandidate,
    request_id: &str,
) -> DirectoryResult<OperationResponse> {
    let created = handler.store().create(user)?;

    debug!(
        "Created user '{}' with id '{}' (request: '{}')",
        created.user_name(),
        created.id(),
        request_id
    );
    Ok(resource_response(created, request_id))
}

/// Handle get operations.
pub fn handle_get<S: ResourceStore>(
    handler: &OperationHandler<S>,
    id: &str,
    request_id: &str,
) -> DirectoryResult<OperationResponse> {
    let user = handler.store().get(id)?;
    Ok(resource_response(user, request_id))
}

/// Handle update operations.
pub fn handle_update<S: ResourceStore>(
    handler: &OperationHandler<S>,
    id: &str,
    user: &UserCandidate,
    precondition: Option<Precondition>,
    request_id: &str,
) -> DirectoryResult<OperationResponse> {
    let updated = handler.store().update(id, user, precondition)?;

    debug!(
        "Updated user '{}' to version {} (request: '{}')",
        id,
        updated.version(),
        request_id
    );
    Ok(resource_response(updated, request_id))
}

/// Handle delete operations.
pub fn handle_delete<S: ResourceStore>(
    handler: &OperationHandler<S>,
    id: &str,
    precondition: Option<Precondition>,
    request_id: &str,
) -> DirectoryResult<OperationResponse> {
    let removed = handler.store().delete(id, precondition)?;

    debug!("Deleted user '{}' (request: '{}')", id, request_id);
    Ok(OperationResponse {
        metadata: OperationMetadata {
            request_id: request_id.to_string(),
            resource_id: Some(removed.id().to_string()),
            ..OperationMetadata::default()
        },
        result: Ok(OperationOutcome::Deleted(removed)),
    })
}

fn resource_response(user: User, request_id: &str) -> OperationResponse {
    OperationResponse {
        metadata: OperationMetadata {
            request_id: request_id.to_string(),
            resource_id: Some(user.id().to_string()),
            etag: Some(user.version().etag()),
            ..OperationMetadata::default()
        },
        result: Ok(OperationOutcome::Resource(user)),
    }
}
