//! Storage layer of the directory.
//!
//! The [`ResourceStore`] trait owns the user collection and the userName
//! uniqueness index. Every mutation is one atomic unit: the uniqueness and
//! version checks are evaluated against the same state the mutation is applied
//! to, so no caller ever observes a half-applied change.
//!
//! Operations are synchronous and never suspend. [`InMemoryStore`] is the
//! only backend; a durable one can be provided behind the same trait.
//!
//! # Example Usage
//!
//! ```rust
//! use scim_directory::storage::{InMemoryStore, ResourceStore};
//! use scim_directory::resource::{Precondition, UserCandidate};
//! use scim_directory::error::ErrorKind;
//!
//! let store = InMemoryStore::new();
//!
//! let joe = store.create(&UserCandidate::new("joe").with_email("joe@blah.com")).unwrap();
//! assert_eq!(joe.version().value(), 0);
//!
//! let updated = store
//!     .update(joe.id().as_str(), &UserCandidate::new("joe").with_name("Joe", "User"), Some(Precondition::Exact(joe.version())))
//!     .unwrap();
//! assert_eq!(updated.version().value(), 1);
//!
//! let error = store.delete(joe.id().as_str(), None).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::MissingPrecondition);
//!
//! store.delete(joe.id().as_str(), Some(Precondition::Any)).unwrap();
//! assert!(store.is_empty());
//! ```

mod directory;
pub mod in_memory;

pub use in_memory::InMemoryStore;

use crate::config::DirectoryConfig;
use crate::error::DirectoryResult;
use crate::resource::{Precondition, User, UserCandidate};
use serde::Serialize;

/// Core trait for user stores.
///
/// Implementations must make each of `create`, `update` and `delete` atomic
/// with respect to each other and to reads.
///
/// # Error precedence
///
/// - Payload validation failures are reported before the directory is
///   consulted.
/// - `delete` without a precondition fails with `MissingPrecondition` before
///   existence is checked.
/// - `NotFound` takes precedence over `VersionMismatch`.
pub trait ResourceStore: Send + Sync {
    /// Configuration the store was built with.
    fn config(&self) -> &DirectoryConfig;

    /// Create a user from `candidate`, assigning its id, version 0 and meta.
    ///
    /// Fails with `Conflict` when the userName is held by an existing user.
    fn create(&self, candidate: &UserCandidate) -> DirectoryResult<User>;

    /// Current snapshot of the user with the given id.
    fn get(&self, id: &str) -> DirectoryResult<User>;

    /// Replace every mutable attribute of a user.
    ///
    /// `None` updates unconditionally, [`Precondition::Any`] requires only
    /// that the user exists, and [`Precondition::Exact`] must equal the
    /// current version. The stored version grows by exactly one.
    fn update(
        &self,
        id: &str,
        candidate: &UserCandidate,
        precondition: Option<Precondition>,
    ) -> DirectoryResult<User>;

    /// Remove a user, returning its final snapshot.
    ///
    /// A precondition is mandatory.
    fn delete(&self, id: &str, precondition: Option<Precondition>) -> DirectoryResult<User>;

    /// Snapshot of every user accepted by `predicate`, in insertion order.
    ///
    /// The whole scan observes one consistent state of the directory.
    fn select(&self, predicate: &dyn Fn(&User) -> bool) -> Vec<User>;

    /// Number of existing users.
    fn len(&self) -> usize;

    /// Whether the store holds no users.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every user. Ids already handed out are still never reused.
    fn clear(&self);

    /// Counters describing the store.
    fn stats(&self) -> DirectoryStats;
}

/// Statistics about the current state of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    /// Number of existing users
    pub resources: usize,
    /// Number of entries in the userName index
    pub indexed_user_names: usize,
    /// Users created over the store's lifetime
    pub created_total: u64,
    /// Users deleted over the store's lifetime, including by `clear`
    pub deleted_total: u64,
}
