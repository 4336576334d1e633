//! Query operation handlers

use crate::error::DirectoryResult;
use crate::operation_handler::core::{
    OperationHandler, OperationMetadata, OperationOutcome, OperationResponse,
};
use crate::query::{QueryExecutor, SearchRequest};
use crate::storage::ResourceStore;
use log::debug;

/// Handle search operations.
pub fn handle_search<S: ResourceStore>(
    handler: &OperationHandler<S>,
    query: &SearchRequest,
    request_id: &str,
) -> DirectoryResult<OperationResponse> {
    debug!(
        "Searching users with filter {:?} (request: '{}')",
        query.filter, request_id
    );

    let list = QueryExecutor::new(handler.store()).search(query)?;

    Ok(OperationResponse {
        metadata: OperationMetadata {
            request_id: request_id.to_string(),
            resource_count: Some(list.items_per_page),
            total_results: Some(list.total_results),
            ..OperationMetadata::default()
        },
        result: Ok(OperationOutcome::List(list)),
    })
}
