//! Note Operations - add, delete, edit, export and friends
//!
//! Each operation resolves its target, checks every precondition against
//! the store, and only then mutates it. The store and the host context are
//! passed in per call; the operations themselves only hold the editor hook
//! and the configured default notes file.

use crate::editor::{acquire_content, EditorHook, ExternalEditor, DEFAULT_NOTE_CONTENT};
use crate::error::{NoteError, Result};
use crate::notes::{self, NoteAction, NoteStore};
use crate::resolver::{SessionContext, Target, TargetResolver};
use crate::Config;
use std::path::{Path, PathBuf};

/// What `note delete` removes.
#[derive(Debug, Clone, Copy)]
pub enum DeleteTarget<'a> {
    /// Every note for every key (`--all`)
    All,
    /// One note (with `:N`) or all notes of one key
    Target(Target<'a>),
}

/// Executes note commands against a store.
pub struct NoteOperations {
    editor: Box<dyn EditorHook>,
    notes_file: Option<PathBuf>,
}

impl NoteOperations {
    pub fn new(editor: Box<dyn EditorHook>) -> Self {
        Self {
            editor,
            notes_file: None,
        }
    }

    /// Operations using the configured editor command and notes file.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(ExternalEditor::new(config.editor_command.clone())))
            .with_notes_file(config.notes_file.clone())
    }

    /// Set the default export/import path (builder pattern).
    pub fn with_notes_file(mut self, path: Option<PathBuf>) -> Self {
        self.notes_file = path;
        self
    }

    pub fn notes_file(&self) -> Option<&Path> {
        self.notes_file.as_deref()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a note. Content comes from `message`, or from the editor
    /// seeded with a placeholder.
    pub fn add(
        &self,
        store: &mut NoteStore,
        context: &dyn SessionContext,
        target: Target<'_>,
        message: Option<String>,
    ) -> Result<String> {
        let resolved = TargetResolver::new(context).resolve(target)?;
        if let Some(index) = resolved.index {
            return Err(NoteError::resolution(format!(
                "Cannot add a note at a specific index (got :{} for {})",
                index, resolved.key
            )));
        }

        let content = acquire_content(self.editor.as_ref(), message, DEFAULT_NOTE_CONTENT)?;
        let position = store.append(resolved.key.clone(), content);
        tracing::info!(key = %resolved.key, position, "Added note");
        Ok(format!("Added note to {}", resolved.key))
    }

    /// Delete one note, every note of one key, or everything.
    pub fn delete(
        &self,
        store: &mut NoteStore,
        context: &dyn SessionContext,
        target: DeleteTarget<'_>,
    ) -> Result<String> {
        let target = match target {
            DeleteTarget::All => {
                let keys = store.clear();
                tracing::info!(keys, "Deleted all notes");
                return Ok("Deleted all notes".to_string());
            }
            DeleteTarget::Target(target) => target,
        };

        let resolved = TargetResolver::new(context).resolve(target)?;
        match resolved.index {
            Some(index) => {
                store.delete_at(&resolved.key, index)?;
                tracing::info!(key = %resolved.key, index = index.get(), "Deleted note");
                Ok(format!("Deleted note {} for {}", index, resolved.key))
            }
            None => match store.delete_all_for(&resolved.key) {
                Some(removed) => {
                    tracing::info!(key = %resolved.key, count = removed.len(), "Deleted notes");
                    Ok(format!("Deleted all notes for {}", resolved.key))
                }
                None => {
                    tracing::debug!(key = %resolved.key, "Nothing to delete");
                    Ok(format!("No notes to delete for {}", resolved.key))
                }
            },
        }
    }

    /// Replace a single note. The target must carry a `:N` suffix.
    pub fn edit(
        &self,
        store: &mut NoteStore,
        context: &dyn SessionContext,
        target: Target<'_>,
        message: Option<String>,
    ) -> Result<String> {
        let resolved = TargetResolver::new(context).resolve(target)?;
        let index = resolved.index.ok_or(NoteError::MissingIndex)?;

        let notes = store.get(&resolved.key).ok_or_else(|| NoteError::NoNotes {
            key: resolved.key.clone(),
            action: NoteAction::Edit,
        })?;
        let current = notes
            .get(index.offset())
            .ok_or_else(|| NoteError::InvalidIndex {
                key: resolved.key.clone(),
                index: index.get(),
                len: notes.len(),
            })?
            .clone();

        let content = acquire_content(self.editor.as_ref(), message, &current)?;
        store.replace_at(&resolved.key, index, content)?;
        tracing::info!(key = %resolved.key, index = index.get(), "Edited note");
        Ok(format!("Edited note {} for {}", index, resolved.key))
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Numbered listing of one key's notes.
    pub fn show(
        &self,
        store: &NoteStore,
        context: &dyn SessionContext,
        target: Target<'_>,
    ) -> Result<String> {
        let resolved = TargetResolver::new(context).resolve(target)?;
        let notes = store.get(&resolved.key).ok_or_else(|| NoteError::NoNotes {
            key: resolved.key.clone(),
            action: NoteAction::Show,
        })?;

        let numbered = notes
            .iter()
            .enumerate()
            .map(|(i, note)| format!("{}. {}", i + 1, note))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(format!("Notes for {}:\n{}", resolved.key, numbered))
    }

    /// Every key with its note count.
    pub fn list(&self, store: &NoteStore) -> String {
        if store.is_empty() {
            return "No notes".to_string();
        }
        store
            .iter()
            .map(|(key, notes)| format!("{} ({})", key, count_label(notes.len())))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // Notes file
    // ========================================================================

    /// Write the whole store to `path`, or the configured notes file.
    pub fn export(&self, store: &NoteStore, path: Option<&Path>) -> Result<String> {
        let destination = self.destination(path)?;
        let snapshot = store.snapshot();
        notes::write_notes_file(&destination, &snapshot)?;
        tracing::info!(
            path = %destination.display(),
            keys = snapshot.len(),
            "Exported notes"
        );
        Ok(format!("Exported notes to {}", destination.display()))
    }

    /// Replace the store with the contents of `path`, or the configured notes file.
    pub fn import(&self, store: &mut NoteStore, path: Option<&Path>) -> Result<String> {
        let source = self.destination(path)?;
        let snapshot = notes::read_notes_file(&source)?;
        let keys = snapshot.len();
        store.replace_all(snapshot);
        tracing::info!(path = %source.display(), keys, "Imported notes");
        Ok(format!("Imported notes from {}", source.display()))
    }

    /// Explicit path, then the configured notes file.
    fn destination(&self, path: Option<&Path>) -> Result<PathBuf> {
        path.or(self.notes_file.as_deref())
            .map(Path::to_path_buf)
            .ok_or(NoteError::NoDestination)
    }
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{} notes", count)
    }
}
