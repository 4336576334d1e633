//! In-memory implementation of [`ResourceStore`].
//!
//! All state lives behind one `std::sync::RwLock`. Mutations hold the write
//! guard for their whole check-then-mutate sequence; reads and scans hold the
//! read guard, so they only ever see states between two mutations.
//!
//! # Performance Characteristics
//!
//! * create/get/update/delete: O(log n)
//! * select: O(n), one predicate call per user
//!
//! # Example Usage
//!
//! ```rust
//! use scim_directory::config::{DirectoryConfig, IdStrategy};
//! use scim_directory::resource::UserCandidate;
//! use scim_directory::storage::{InMemoryStore, ResourceStore};
//!
//! let store = InMemoryStore::with_config(
//!     DirectoryConfig::default().with_id_strategy(IdStrategy::Sequential),
//! );
//!
//! let joe = store.create(&UserCandidate::new("joe")).unwrap();
//! let joel = store.create(&UserCandidate::new("joel")).unwrap();
//! assert_eq!(joe.id().as_str(), "1");
//! assert_eq!(joel.id().as_str(), "2");
//!
//! let found = store.select(&|user| user.user_name().as_str().starts_with("jo"));
//! assert_eq!(found.len(), 2);
//! ```

use super::directory::Directory;
use super::{DirectoryStats, ResourceStore};
use crate::config::{DirectoryConfig, IdStrategy};
use crate::error::{DirectoryError, DirectoryResult};
use crate::resource::{Precondition, ResourceId, User, UserCandidate};
use chrono::Utc;
use log::{debug, info, trace};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory user store.
///
/// Cloning is cheap and yields a handle to the same directory, which makes it
/// easy to hand one store to several threads.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    config: Arc<DirectoryConfig>,
    directory: Arc<RwLock<Directory>>,
}

impl InMemoryStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default())
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: DirectoryConfig) -> Self {
        Self {
            config: Arc::new(config),
            directory: Arc::new(RwLock::new(Directory::default())),
        }
    }

    // Poisoning can only come from a panic outside a mutation: every
    // mutation validates before touching the directory.
    fn read(&self) -> RwLockReadGuard<'_, Directory> {
        self.directory.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Directory> {
        self.directory.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate_id(&self, directory: &mut Directory) -> ResourceId {
        loop {
            let id = match self.config.id_strategy {
                IdStrategy::Uuid => ResourceId::generate(),
                IdStrategy::Sequential => ResourceId::from_sequence(directory.next_sequence()),
            };
            if !directory.contains(id.as_str()) {
                return id;
            }
            debug!("Generated id '{}' is already live, retrying", id);
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for InMemoryStore {
    fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    fn create(&self, candidate: &UserCandidate) -> DirectoryResult<User> {
        trace!("Create payload: {:?}", candidate);
        let attributes = candidate.validate()?;
        let key = attributes
            .user_name()
            .index_key(self.config.user_name_case)
            .into_owned();

        let mut directory = self.write();

        if directory.holder_of(&key).is_some() {
            debug!(
                "Rejecting create: userName '{}' is already in use",
                attributes.user_name()
            );
            return Err(DirectoryError::conflict(attributes.user_name().as_str()));
        }

        let id = self.allocate_id(&mut directory);
        let user = User::create(id, attributes, Utc::now());
        directory.insert(user.clone(), key);

        info!(
            "Created user '{}' with id '{}'",
            user.user_name(),
            user.id()
        );
        Ok(user)
    }

    fn get(&self, id: &str) -> DirectoryResult<User> {
        let directory = self.read();
        match directory.get(id) {
            Some(user) => {
                trace!("Found user '{}' at version {}", id, user.version());
                Ok(user.clone())
            }
            None => {
                debug!("User '{}' not found", id);
                Err(DirectoryError::not_found(id))
            }
        }
    }

    fn update(
        &self,
        id: &str,
        candidate: &UserCandidate,
        precondition: Option<Precondition>,
    ) -> DirectoryResult<User> {
        trace!("Update payload for '{}': {:?}", id, candidate);
        let attributes = candidate.validate()?;
        let case = self.config.user_name_case;
        let new_key = attributes.user_name().index_key(case).into_owned();

        let mut directory = self.write();

        let current = directory.get(id).ok_or_else(|| {
            debug!("Cannot update user '{}': not found", id);
            DirectoryError::not_found(id)
        })?;

        if let Some(precondition) = precondition {
            precondition
                .check(current.version())
                .map_err(|conflict| DirectoryError::version_mismatch(id, conflict))?;
        }

        if directory
            .holder_of(&new_key)
            .is_some_and(|holder| holder != id)
        {
            debug!(
                "Rejecting update of '{}': userName '{}' is already in use",
                id,
                attributes.user_name()
            );
            return Err(DirectoryError::conflict(attributes.user_name().as_str()));
        }

        let old_key = current.user_name().index_key(case).into_owned();
        let updated = current.replaced(attributes, Utc::now());
        directory.replace(updated.clone(), &old_key, new_key);

        info!(
            "Updated user '{}' to version {}",
            id,
            updated.version()
        );
        Ok(updated)
    }

    fn delete(&self, id: &str, precondition: Option<Precondition>) -> DirectoryResult<User> {
        let Some(precondition) = precondition else {
            debug!("Rejecting delete of '{}': no version precondition", id);
            return Err(DirectoryError::missing_precondition("delete"));
        };

        let mut directory = self.write();

        let current = directory.get(id).ok_or_else(|| {
            debug!("Cannot delete user '{}': not found", id);
            DirectoryError::not_found(id)
        })?;

        precondition
            .check(current.version())
            .map_err(|conflict| DirectoryError::version_mismatch(id, conflict))?;

        let key = current
            .user_name()
            .index_key(self.config.user_name_case)
            .into_owned();
        let removed = directory
            .remove(id, &key)
            .ok_or_else(|| DirectoryError::not_found(id))?;

        info!(
            "Deleted user '{}' at version {}",
            id,
            removed.version()
        );
        Ok(removed)
    }

    fn select(&self, predicate: &dyn Fn(&User) -> bool) -> Vec<User> {
        let directory = self.read();
        directory
            .iter()
            .filter(|user| predicate(user))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn clear(&self) {
        let mut directory = self.write();
        let removed = directory.len();
        directory.clear();
        info!("Cleared {} users from the directory", removed);
    }

    fn stats(&self) -> DirectoryStats {
        self.read().stats()
    }
}
