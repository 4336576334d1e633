//! Lock-free core state of the in-memory store.
//!
//! `Directory` holds the users and the userName index and keeps invariant
//! bookkeeping in one place. It performs no checks of its own; the store
//! validates under its write lock and then applies the change here.

use super::DirectoryStats;
use crate::resource::User;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub(crate) struct Directory {
    // insertion slot -> user, so iteration follows creation order
    entries: BTreeMap<u64, User>,
    // id -> insertion slot
    slots: HashMap<String, u64>,
    // userName index key -> id
    user_names: HashMap<String, String>,
    next_slot: u64,
    last_sequence: u64,
    created_total: u64,
    deleted_total: u64,
}

impl Directory {
    pub(crate) fn get(&self, id: &str) -> Option<&User> {
        self.slots.get(id).and_then(|slot| self.entries.get(slot))
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Id of the user currently holding the userName index key.
    pub(crate) fn holder_of(&self, key: &str) -> Option<&str> {
        self.user_names.get(key).map(String::as_str)
    }

    /// Next value of the sequential id counter. Never repeats.
    pub(crate) fn next_sequence(&mut self) -> u64 {
        self.last_sequence += 1;
        self.last_sequence
    }

    pub(crate) fn insert(&mut self, user: User, key: String) {
        let id = user.id().as_str().to_string();
        let slot = self.next_slot;
        self.next_slot += 1;

        self.user_names.insert(key, id.clone());
        self.slots.insert(id, slot);
        self.entries.insert(slot, user);
        self.created_total += 1;
    }

    /// Swap in a new revision of an existing user, moving its index entry
    /// from `old_key` to `new_key`.
    pub(crate) fn replace(&mut self, user: User, old_key: &str, new_key: String) {
        let id = user.id().as_str().to_string();
        let Some(&slot) = self.slots.get(&id) else {
            return;
        };

        if old_key != new_key {
            self.user_names.remove(old_key);
        }
        self.user_names.insert(new_key, id);
        self.entries.insert(slot, user);
    }

    pub(crate) fn remove(&mut self, id: &str, key: &str) -> Option<User> {
        let slot = self.slots.remove(id)?;
        self.user_names.remove(key);
        let removed = self.entries.remove(&slot);
        if removed.is_some() {
            self.deleted_total += 1;
        }
        removed
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &User> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every user and index entry. Counters survive.
    pub(crate) fn clear(&mut self) {
        self.deleted_total += self.entries.len() as u64;
        self.entries.clear();
        self.slots.clear();
        self.user_names.clear();
    }

    pub(crate) fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            resources: self.entries.len(),
            indexed_user_names: self.user_names.len(),
            created_total: self.created_total,
            deleted_total: self.deleted_total,
        }
    }
}
