//! Note Store - the session's registry of notes
//!
//! Maps canonical keys to ordered note lists. Every mutating call checks
//! its preconditions before touching the map, so a failed call leaves the
//! store exactly as it was, and a key never maps to an empty list.

use super::models::*;
use crate::error::{NoteError, Result};
use std::collections::BTreeMap;

/// In-process registry of notes, owned by the host session.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: BTreeMap<NoteKey, NoteList>,
}

impl NoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `content` to the end of the key's list, creating the list if needed.
    ///
    /// Returns the 1-based position of the new note.
    pub fn append(&mut self, key: NoteKey, content: impl Into<String>) -> usize {
        let list = self.notes.entry(key).or_default();
        list.push(content.into());
        list.len()
    }

    pub fn get(&self, key: &NoteKey) -> Option<&NoteList> {
        self.notes.get(key)
    }

    /// Overwrite the note at `index`, returning the previous content.
    pub fn replace_at(
        &mut self,
        key: &NoteKey,
        index: NoteIndex,
        content: impl Into<String>,
    ) -> Result<String> {
        let offset = self.checked_offset(key, index, NoteAction::Edit)?;
        let list = self
            .notes
            .get_mut(key)
            .ok_or_else(|| no_notes(key, NoteAction::Edit))?;
        Ok(std::mem::replace(&mut list[offset], content.into()))
    }

    /// Remove the note at `index`, keeping the others in order.
    ///
    /// Removing the last note of a key removes the key.
    pub fn delete_at(&mut self, key: &NoteKey, index: NoteIndex) -> Result<String> {
        let offset = self.checked_offset(key, index, NoteAction::Delete)?;
        let list = self
            .notes
            .get_mut(key)
            .ok_or_else(|| no_notes(key, NoteAction::Delete))?;
        let removed = list.remove(offset);
        if list.is_empty() {
            self.notes.remove(key);
        }
        self.debug_check_invariant();
        Ok(removed)
    }

    /// Remove a key and all of its notes. Returns `None` if the key had none.
    pub fn delete_all_for(&mut self, key: &NoteKey) -> Option<NoteList> {
        self.notes.remove(key)
    }

    /// Remove every key. Returns how many keys were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.notes.len();
        self.notes.clear();
        count
    }

    /// Owned copy of the current state; later mutations don't affect it.
    pub fn snapshot(&self) -> NotesSnapshot {
        self.notes.clone()
    }

    /// Replace the whole store, dropping keys with no notes.
    pub fn replace_all(&mut self, snapshot: NotesSnapshot) {
        self.notes = snapshot
            .into_iter()
            .filter(|(_, list)| !list.is_empty())
            .collect();
        self.debug_check_invariant();
    }

    pub fn keys(&self) -> impl Iterator<Item = &NoteKey> {
        self.notes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NoteKey, &NoteList)> {
        self.notes.iter()
    }

    /// Number of keys with notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total number of notes across all keys
    pub fn note_count(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }

    /// Validate that `key` has notes and `index` is within `[1, len]`.
    fn checked_offset(&self, key: &NoteKey, index: NoteIndex, action: NoteAction) -> Result<usize> {
        let list = self.notes.get(key).ok_or_else(|| no_notes(key, action))?;
        if index.get() > list.len() {
            return Err(NoteError::InvalidIndex {
                key: key.clone(),
                index: index.get(),
                len: list.len(),
            });
        }
        Ok(index.offset())
    }

    fn debug_check_invariant(&self) {
        debug_assert!(
            self.notes.values().all(|list| !list.is_empty()),
            "note store holds a key with an empty list"
        );
    }
}

fn no_notes(key: &NoteKey, action: NoteAction) -> NoteError {
    NoteError::NoNotes {
        key: key.clone(),
        action,
    }
}
