//! Resource model of the directory.
//!
//! - [`User`] - the stored, versioned user resource
//! - [`UserCandidate`] - the unvalidated payload for create and update
//! - [`version`] - version numbers, ETags and preconditions
//! - [`value_objects`] - validated primitives the user is built from

pub mod user;
pub mod value_objects;
pub mod version;

pub use user::{NameCandidate, User, UserAttributes, UserCandidate};
pub use value_objects::{EmailAddress, Meta, Name, ResourceId, UserName};
pub use version::{ETag, Precondition, Version, VersionConflict};
