//! Object Notes
//!
//! Notes attached to classes, modules and methods while exploring code
//! in an interactive shell:
//! - target resolution from live objects, `Class#method` text, or the
//!   current frame, with `:N` note numbers
//! - an in-session note store with add/edit/delete
//! - YAML export and import of the whole store

pub mod commands;
pub mod editor;
pub mod error;
pub mod notes;
pub mod resolver;
pub mod session;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use commands::{DeleteTarget, NoteOperations};
pub use error::NoteError;
pub use notes::{NoteIndex, NoteKey, NoteStore};
pub use resolver::{ContextFrame, ObjectRef, SessionContext, Target, TargetResolver};

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "object-notes.yaml";

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub notes: NotesYamlConfig,
    pub editor: EditorYamlConfig,
}

/// Notes file section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NotesYamlConfig {
    /// Default destination for `note export` and source for `note import`
    pub file: Option<PathBuf>,
}

/// Editor section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EditorYamlConfig {
    /// Command used to edit note content, e.g. "code --wait"
    pub command: Option<String>,
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub notes_file: Option<PathBuf>,
    pub editor_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_file: None,
            editor_command: editor::DEFAULT_EDITOR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and the default config file.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default. The editor command also falls
    /// back to `$VISUAL` and `$EDITOR` before the built-in default.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        let notes_file = env_var("NOTES_FILE")
            .map(PathBuf::from)
            .or(yaml.notes.file);
        let editor_command = env_var("NOTES_EDITOR")
            .or(yaml.editor.command)
            .or_else(|| env_var("VISUAL"))
            .or_else(|| env_var("EDITOR"))
            .unwrap_or_else(|| editor::DEFAULT_EDITOR.to_string());

        Ok(Self {
            notes_file,
            editor_command,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// A set, non-empty environment variable.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Tests
// ============================================================================
