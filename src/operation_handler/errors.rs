//! Error handling utilities for operation handlers

use crate::error::DirectoryError;
use crate::operation_handler::core::{OperationMetadata, OperationResponse};

/// Create an error response from a DirectoryError.
///
/// A version mismatch carries the ETag of the version the user is actually
/// at, so a client can retry its read-modify-write cycle.
pub fn create_error_response(
    error: DirectoryError,
    request_id: String,
    resource_id: Option<String>,
) -> OperationResponse {
    let etag = match &error {
        DirectoryError::VersionMismatch { conflict, .. } => Some(conflict.current.etag()),
        _ => None,
    };

    OperationResponse {
        result: Err(error),
        metadata: OperationMetadata {
            request_id,
            resource_id,
            etag,
            ..OperationMetadata::default()
        },
    }
}
