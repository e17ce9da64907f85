//! YAML notes file format
//!
//! A notes file is a mapping from key to a sequence of strings:
//!
//! ```yaml
//! Geometry::Point:
//! - first note
//! Geometry::Point#distance:
//! - another note
//! ```

use super::models::{NoteKey, NoteList, NotesSnapshot};
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Serialize a snapshot to a YAML document.
pub fn to_yaml(snapshot: &NotesSnapshot) -> Result<String> {
    Ok(serde_yaml::to_string(snapshot)?)
}

/// Parse a YAML notes document.
///
/// An empty document is an empty mapping. Keys with a null or empty
/// list are dropped.
pub fn from_yaml(text: &str) -> Result<NotesSnapshot> {
    if text.trim().is_empty() {
        return Ok(NotesSnapshot::new());
    }
    let parsed: BTreeMap<NoteKey, Option<NoteList>> = serde_yaml::from_str(text)?;
    Ok(parsed
        .into_iter()
        .filter_map(|(key, list)| match list {
            Some(list) if !list.is_empty() => Some((key, list)),
            _ => None,
        })
        .collect())
}

pub fn write_notes_file(path: &Path, snapshot: &NotesSnapshot) -> Result<()> {
    let yaml = to_yaml(snapshot)?;
    std::fs::write(path, yaml)?;
    tracing::debug!(path = %path.display(), keys = snapshot.len(), "Wrote notes file");
    Ok(())
}

pub fn read_notes_file(path: &Path) -> Result<NotesSnapshot> {
    let text = std::fs::read_to_string(path)?;
    let snapshot = from_yaml(&text)?;
    tracing::debug!(path = %path.display(), keys = snapshot.len(), "Read notes file");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_documented_shape() {
        let yaml = r#"
ClassName:
  - "first note text"
  - "second note text"
ClassName#methodName:
  - "another note"
"#;
        let snapshot = from_yaml(yaml).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot[&NoteKey::from("ClassName")],
            vec!["first note text", "second note text"]
        );
        assert_eq!(
            snapshot[&NoteKey::from("ClassName#methodName")],
            vec!["another note"]
        );
    }

    #[test]
    fn test_round_trip_awkward_strings() {
        let mut snapshot = NotesSnapshot::new();
        snapshot.insert(
            NoteKey::from("Http::Client#get"),
            vec![
                "key: value looking note".to_string(),
                "# not a comment".to_string(),
                "two\nlines".to_string(),
                "  padded  ".to_string(),
                "true".to_string(),
                "42".to_string(),
            ],
        );
        snapshot.insert(NoteKey::from("Http"), vec!["- dash first".to_string()]);

        let yaml = to_yaml(&snapshot).unwrap();
        assert_eq!(from_yaml(&yaml).unwrap(), snapshot);
    }

    #[test]
    fn test_empty_document_and_null_lists() {
        assert!(from_yaml("").unwrap().is_empty());
        assert!(from_yaml("  \n").unwrap().is_empty());

        let snapshot = from_yaml("Empty:\nNone: []\nSome:\n- x\n").unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key("Some"));
    }

    #[test]
    fn test_rejects_non_mapping_document() {
        assert!(from_yaml("- just\n- a list\n").is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.yml");
        let mut snapshot = NotesSnapshot::new();
        snapshot.insert(NoteKey::from("A"), vec!["1".into(), "2".into()]);

        write_notes_file(&path, &snapshot).unwrap();
        assert_eq!(read_notes_file(&path).unwrap(), snapshot);
    }
}
