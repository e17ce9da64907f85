//! Textual target syntax
//!
//! `Owner#method`, `Some::Module`, an expression the host evaluates,
//! each optionally followed by a `:N` note number.

use crate::error::{NoteError, Result};
use crate::notes::NoteIndex;
use regex::Regex;
use std::sync::LazyLock;

static CONSTANT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:::)?[A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*$").expect("valid regex")
});

static METHOD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*[?!=]?|\[\]=?|[+\-*/%<>=!~^&|]{1,3})$")
        .expect("valid regex")
});

/// Split a trailing `:N` off `text`.
///
/// A `::` namespace separator is never taken for a suffix, nor is the
/// colon of a leading symbol literal such as `:name`. A suffix that is
/// empty, non-numeric or zero is an error.
pub(crate) fn split_index_suffix(text: &str) -> Result<(&str, Option<NoteIndex>)> {
    let Some(pos) = text.rfind(':') else {
        return Ok((text, None));
    };
    if text[..pos].ends_with(':') {
        return Ok((text, None));
    }

    let (body, suffix) = (&text[..pos], &text[pos + 1..]);
    if body.is_empty() && is_symbol_name(suffix) {
        return Ok((text, None));
    }
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NoteError::resolution(format!(
            "Invalid note number suffix ':{}' in '{}'",
            suffix, text
        )));
    }
    let index = suffix
        .parse::<usize>()
        .ok()
        .and_then(NoteIndex::new)
        .ok_or_else(|| {
            NoteError::resolution(format!(
                "Note numbers start at 1, got ':{}' in '{}'",
                suffix, text
            ))
        })?;
    Ok((body, Some(index)))
}

/// A constant path such as `Foo` or `::Foo::Bar`, with any leading `::` removed.
pub(crate) fn constant_path(text: &str) -> Option<&str> {
    CONSTANT_PATH
        .is_match(text)
        .then(|| text.trim_start_matches("::"))
}

fn is_symbol_name(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') && is_method_name(text)
}

pub(crate) fn is_method_name(text: &str) -> bool {
    METHOD_NAME.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suffix() {
        assert_eq!(split_index_suffix("Point").unwrap(), ("Point", None));
        assert_eq!(
            split_index_suffix("Geometry::Point#x").unwrap(),
            ("Geometry::Point#x", None)
        );
    }

    #[test]
    fn test_suffix_after_namespaced_name() {
        let (body, index) = split_index_suffix("Geometry::Point:2").unwrap();
        assert_eq!(body, "Geometry::Point");
        assert_eq!(index.unwrap().get(), 2);

        let (body, index) = split_index_suffix("Geometry::Point#x:10").unwrap();
        assert_eq!(body, "Geometry::Point#x");
        assert_eq!(index.unwrap().get(), 10);
    }

    #[test]
    fn test_bare_suffix() {
        let (body, index) = split_index_suffix(":3").unwrap();
        assert_eq!(body, "");
        assert_eq!(index.unwrap().get(), 3);
    }

    #[test]
    fn test_symbol_literal_is_not_a_suffix() {
        assert_eq!(split_index_suffix(":sym").unwrap(), (":sym", None));
        assert_eq!(split_index_suffix(":empty?").unwrap(), (":empty?", None));

        let (body, index) = split_index_suffix(":sym:2").unwrap();
        assert_eq!(body, ":sym");
        assert_eq!(index.unwrap().get(), 2);

        for text in [":", ":1a", ":-1"] {
            assert!(split_index_suffix(text).is_err(), "{text}");
        }
    }

    #[test]
    fn test_malformed_suffixes() {
        for text in ["Point:", "Point:x", "Point:0", "Point:-1", "Point:1a", "Point:00"] {
            let err = split_index_suffix(text).unwrap_err();
            assert!(matches!(err, NoteError::Resolution(_)), "{text}");
        }
    }

    #[test]
    fn test_overflowing_suffix() {
        let err = split_index_suffix("Point:99999999999999999999999").unwrap_err();
        assert!(matches!(err, NoteError::Resolution(_)));
    }

    #[test]
    fn test_constant_path() {
        assert_eq!(constant_path("Point"), Some("Point"));
        assert_eq!(constant_path("::Geometry::Point"), Some("Geometry::Point"));
        assert_eq!(constant_path("point"), None);
        assert_eq!(constant_path("Geometry::"), None);
        assert_eq!(constant_path("Geometry:Point"), None);
        assert_eq!(constant_path("Foo Bar"), None);
    }

    #[test]
    fn test_method_names() {
        for name in ["ping", "empty?", "save!", "name=", "[]", "[]=", "<=>", "==", "_private"] {
            assert!(is_method_name(name), "{name}");
        }
        for name in ["", "1abc", "has space", "a.b"] {
            assert!(!is_method_name(name), "{name}");
        }
    }
}
