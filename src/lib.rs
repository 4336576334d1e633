//! SCIM user directory engine.
//!
//! The crate stores user resources, enforces userName uniqueness and
//! optimistic concurrency through per-user versions, and answers filtered,
//! paginated searches. It knows nothing about HTTP: transports hand it typed
//! requests and map its typed errors onto their own status codes.
//!
//! # Components
//!
//! - [`resource`] - the user model, payload validation and version tokens
//! - [`filter`] - filter expression parser and evaluator
//! - [`storage`] - the [`ResourceStore`] trait and its in-memory backend
//! - [`query`] - search execution and the list envelope
//! - [`operation_handler`] - transport-agnostic request dispatcher
//! - [`config`] - construction-time configuration of a directory
//!
//! # Quick Start
//!
//! ```rust
//! use scim_directory::{
//!     ErrorKind, InMemoryStore, Precondition, QueryExecutor, ResourceStore, SearchRequest,
//!     UserCandidate, Version,
//! };
//!
//! let store = InMemoryStore::new();
//! let joe = store.create(&UserCandidate::new("joe").with_name("Joe", "User")).unwrap();
//! store.create(&UserCandidate::new("joel")).unwrap();
//! store.create(&UserCandidate::new("ann")).unwrap();
//!
//! let updated = store
//!     .update(joe.id().as_str(), &UserCandidate::new("joe"), Some(Precondition::Exact(Version::new(0))))
//!     .unwrap();
//! assert_eq!(updated.version(), Version::new(1));
//!
//! let stale = store
//!     .update(joe.id().as_str(), &UserCandidate::new("joe"), Some(Precondition::Exact(Version::new(0))))
//!     .unwrap_err();
//! assert_eq!(stale.kind(), ErrorKind::VersionMismatch);
//!
//! let page = QueryExecutor::new(&store)
//!     .search(&SearchRequest::filtered("userName eq 'joe' or userName eq 'joel'"))
//!     .unwrap();
//! assert_eq!(page.total_results, 2);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod operation_handler;
pub mod query;
pub mod resource;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{CaseSensitivity, DirectoryConfig, IdStrategy, MatchPolicy};
pub use error::{DirectoryError, DirectoryResult, ErrorKind, ValidationError, ValidationResult};
pub use filter::Filter;
pub use query::{ListResponse, QueryExecutor, SearchRequest};
pub use resource::{ETag, Precondition, User, UserCandidate, Version, VersionConflict};
pub use storage::{DirectoryStats, InMemoryStore, ResourceStore};

pub use operation_handler::{
    DirectoryOperation, OperationHandler, OperationMetadata, OperationOutcome, OperationRequest,
    OperationResponse,
};
