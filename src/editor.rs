//! Editor hook for gathering multi-line note content.
//!
//! Commands that are not given `-m <content>` hand a seed text to an
//! [`EditorHook`] and block until it returns. The default hook opens the
//! user's editor on a scratch file.

use crate::error::{NoteError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Placeholder offered when adding a note through the editor.
pub const DEFAULT_NOTE_CONTENT: &str = "Enter note content here...";

/// Fallback editor command when none is configured.
pub const DEFAULT_EDITOR: &str = "vi";

/// Blocking content acquisition.
pub trait EditorHook {
    /// Let the user edit `seed`. `None` means the editor produced nothing
    /// and the seed stands.
    fn edit(&self, seed: &str) -> Result<Option<String>>;
}

/// Resolve the text a command stores: the inline message if there is one,
/// otherwise whatever the editor returns for `seed`.
pub fn acquire_content(
    editor: &dyn EditorHook,
    message: Option<String>,
    seed: &str,
) -> Result<String> {
    if let Some(message) = message {
        return Ok(message);
    }
    tracing::debug!("No inline message, opening editor");
    Ok(editor.edit(seed)?.unwrap_or_else(|| seed.to_string()))
}

/// Runs an external editor command on a temporary file.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// `command` is split on whitespace; the file path is appended as the last argument.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for ExternalEditor {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR)
    }
}

impl EditorHook for ExternalEditor {
    fn edit(&self, seed: &str) -> Result<Option<String>> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| NoteError::Editor("no editor command configured".to_string()))?;

        let mut file = tempfile::Builder::new()
            .prefix("note-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(seed.as_bytes())?;
        file.flush()?;

        tracing::debug!(editor = %program, path = %file.path().display(), "Launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| NoteError::Editor(format!("failed to launch '{}': {}", program, e)))?;
        if !status.success() {
            return Err(NoteError::Editor(format!(
                "'{}' exited with {}",
                program, status
            )));
        }

        let content = std::fs::read_to_string(file.path())?;
        // Editors terminate the saved file with a newline the user never typed.
        Ok(Some(content.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedEditor;

    #[test]
    fn test_inline_message_skips_editor() {
        let editor = ScriptedEditor::new(vec![Some("from editor".into())]);
        let content =
            acquire_content(&editor, Some("inline".into()), DEFAULT_NOTE_CONTENT).unwrap();
        assert_eq!(content, "inline");
        assert!(editor.seeds().is_empty());
    }

    #[test]
    fn test_editor_text_is_used_verbatim() {
        let editor = ScriptedEditor::new(vec![Some("  typed\ntext ".into())]);
        let content = acquire_content(&editor, None, DEFAULT_NOTE_CONTENT).unwrap();
        assert_eq!(content, "  typed\ntext ");
        assert_eq!(editor.seeds(), vec![DEFAULT_NOTE_CONTENT.to_string()]);
    }

    #[test]
    fn test_editor_returning_nothing_keeps_seed() {
        let editor = ScriptedEditor::new(vec![None]);
        let content = acquire_content(&editor, None, DEFAULT_NOTE_CONTENT).unwrap();
        assert_eq!(content, DEFAULT_NOTE_CONTENT);
    }

    #[test]
    fn test_empty_editor_text_is_valid_content() {
        let editor = ScriptedEditor::new(vec![Some(String::new())]);
        let content = acquire_content(&editor, None, DEFAULT_NOTE_CONTENT).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_external_editor_defaults_to_vi() {
        assert_eq!(ExternalEditor::default().command(), DEFAULT_EDITOR);
        assert_eq!(ExternalEditor::new("code --wait").command(), "code --wait");
    }

    #[test]
    fn test_external_editor_without_command() {
        let err = ExternalEditor::new("   ").edit("seed").unwrap_err();
        assert!(matches!(err, NoteError::Editor(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_editor_reads_back_file() {
        // `true` leaves the file untouched
        let content = ExternalEditor::new("true").edit("seed text").unwrap();
        assert_eq!(content.as_deref(), Some("seed text"));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_editor_failure_status() {
        let err = ExternalEditor::new("false").edit("seed").unwrap_err();
        assert!(matches!(err, NoteError::Editor(_)));
    }
}
