//! Error types for note operations.

use crate::notes::{NoteAction, NoteKey};

/// Failure of a note command, surfaced to the user verbatim.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    /// The target expression could not be mapped to a key
    #[error("{0}")]
    Resolution(String),

    /// Edit was invoked without a `:N` suffix
    #[error("Must specify a note number")]
    MissingIndex,

    /// Index outside `[1, len]` for the key's current list
    #[error("Invalid note number")]
    InvalidIndex {
        key: NoteKey,
        index: usize,
        len: usize,
    },

    /// The key has no stored notes
    #[error("No notes to {action}")]
    NoNotes { key: NoteKey, action: NoteAction },

    /// Export/import got no path and no default notes file is configured
    #[error("No destination file given and no default notes file configured")]
    NoDestination,

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl NoteError {
    pub(crate) fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution(message.into())
    }
}

pub type Result<T, E = NoteError> = std::result::Result<T, E>;
