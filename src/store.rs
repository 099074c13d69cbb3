//! In-memory list store: named groups of member entries.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{BotError, Result};

/// First character marking a member entry as a reference to another list.
pub const LIST_SIGIL: char = '&';

/// Returns the referenced list name if the entry is a list reference.
#[must_use]
pub fn list_reference(entry: &str) -> Option<&str> {
    entry.strip_prefix(LIST_SIGIL)
}

/// Serializable snapshot of the whole store, as handed to persistence.
pub type ListSnapshot = BTreeMap<String, Vec<String>>;

/// Mapping from list name to its member entries.
///
/// Member entries keep insertion order internally and are unique within a
/// list; every read-side enumeration is sorted before being surfaced.
/// Mutations mark the store dirty so the caller knows to flush persistence.
#[derive(Debug, Default)]
pub struct ListStore {
    lists: BTreeMap<String, Vec<String>>,
    dirty: bool,
}

impl ListStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a previously persisted snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: ListSnapshot) -> Self {
        debug!("Restoring {} lists from snapshot", snapshot.len());
        Self {
            lists: snapshot,
            dirty: false,
        }
    }

    /// Snapshot the current mapping for persistence.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        self.lists.clone()
    }

    /// Takes the dirty flag, clearing it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[must_use]
    pub fn exists(&self, list: &str) -> bool {
        self.lists.contains_key(list)
    }

    /// All list names, sorted.
    #[must_use]
    pub fn lists(&self) -> Vec<String> {
        self.lists.keys().cloned().collect()
    }

    /// Sorted member entries of a list; empty if the list does not exist.
    #[must_use]
    pub fn members(&self, list: &str) -> Vec<String> {
        let mut members = self.lists.get(list).cloned().unwrap_or_default();
        members.sort();
        members
    }

    /// Create an empty list. Returns false if the name is taken.
    pub fn create(&mut self, list: &str) -> bool {
        if self.exists(list) {
            return false;
        }
        self.lists.insert(list.to_string(), Vec::new());
        self.dirty = true;
        true
    }

    /// Destroy a list, returning its sorted member snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ListNotFound`] if the list does not exist; this is
    /// the one operation that distinguishes "destroyed" from "nothing there".
    pub fn destroy(&mut self, list: &str) -> Result<Vec<String>> {
        let members = self.members(list);
        if self.lists.remove(list).is_none() {
            return Err(BotError::ListNotFound(list.to_string()));
        }
        self.dirty = true;
        Ok(members)
    }

    /// Rename a list. Fails if `from` is missing or `to` already exists.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if !self.exists(from) || self.exists(to) {
            return false;
        }
        let members = self.lists.remove(from).unwrap_or_default();
        self.lists.insert(to.to_string(), members);
        self.dirty = true;
        true
    }

    /// Append a member entry. False if the list is missing or the entry is
    /// already present.
    pub fn add(&mut self, list: &str, name: &str) -> bool {
        let Some(members) = self.lists.get_mut(list) else {
            return false;
        };
        if members.iter().any(|m| m == name) {
            return false;
        }
        members.push(name.to_string());
        self.dirty = true;
        true
    }

    /// Remove a member entry. False if the list is missing or the entry is
    /// not present.
    pub fn remove(&mut self, list: &str, name: &str) -> bool {
        let Some(members) = self.lists.get_mut(list) else {
            return false;
        };
        let Some(idx) = members.iter().position(|m| m == name) else {
            return false;
        };
        members.remove(idx);
        self.dirty = true;
        true
    }

    /// Sorted names of lists whose literal member entries contain `name`.
    ///
    /// This is an exact-entry lookup: passing `&ops` finds lists holding the
    /// reference entry, passing `ops` does not.
    #[must_use]
    pub fn membership(&self, name: &str) -> Vec<String> {
        self.lists
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == name))
            .map(|(list, _)| list.clone())
            .collect()
    }
}
