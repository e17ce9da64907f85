//! Note keys, indices and lists
//!
//! A note key is the canonical identity of an annotated entity:
//! `"ClassName"` for a class or module, `"ClassName#method"` for an
//! instance method. Notes under a key are plain strings kept in
//! insertion order and addressed from 1 by users.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;

/// Separator between owner and method in a method key.
pub const METHOD_SEPARATOR: char = '#';

// ============================================================================
// NoteKey
// ============================================================================

/// Canonical key of a class, module or method.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteKey(String);

impl NoteKey {
    /// Key for a class or module.
    pub fn module(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Key for an instance method of `owner`.
    pub fn method(owner: &str, name: &str) -> Self {
        Self(format!("{}{}{}", owner, METHOD_SEPARATOR, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key names a method rather than a class or module.
    pub fn is_method(&self) -> bool {
        self.0.contains(METHOD_SEPARATOR)
    }

    /// The class/module part of the key.
    pub fn owner(&self) -> &str {
        match self.0.split_once(METHOD_SEPARATOR) {
            Some((owner, _)) => owner,
            None => &self.0,
        }
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NoteKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for NoteKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// NoteIndex
// ============================================================================

/// A 1-based position within a key's note list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteIndex(NonZeroUsize);

impl NoteIndex {
    /// Returns `None` for zero.
    pub fn new(position: usize) -> Option<Self> {
        NonZeroUsize::new(position).map(Self)
    }

    /// The 1-based position.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// The 0-based offset into the list.
    pub(crate) fn offset(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for NoteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Lists and snapshots
// ============================================================================

/// Notes attached to a single key, oldest first.
pub type NoteList = Vec<String>;

/// Point-in-time copy of every key and its notes.
pub type NotesSnapshot = BTreeMap<NoteKey, NoteList>;

/// Operation that needed existing notes, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Edit,
    Delete,
    Show,
}

impl fmt::Display for NoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => write!(f, "edit"),
            Self::Delete => write!(f, "delete"),
            Self::Show => write!(f, "show"),
        }
    }
}
