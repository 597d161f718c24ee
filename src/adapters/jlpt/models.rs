//! Vocabulary payload decoding
//!
//! The service answers either with a bare array of entries or with an object
//! holding that array under a known key. [`LevelPayload::decode`] makes the
//! choice explicit: wrapped form first, bare list as the fallback, anything
//! else is rejected.

use crate::domain::{JlptLevel, VocabError};
use serde_json::{Map, Value};

/// A single vocabulary entry as returned by the service
pub type VocabEntry = Map<String, Value>;

/// Decoded response for one level
#[derive(Debug, Clone, PartialEq)]
pub enum LevelPayload {
    /// `{"<key>": [...], ...}`
    Wrapped(Vec<VocabEntry>),
    /// `[...]`
    Bare(Vec<VocabEntry>),
}

impl LevelPayload {
    /// Decodes a response body
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::UnexpectedShape`] when the body is neither an
    /// array nor an object holding an array under `words_key`, or when an
    /// element of the list is not a JSON object.
    pub fn decode(level: JlptLevel, body: Value, words_key: &str) -> Result<Self, VocabError> {
        match body {
            Value::Object(mut object) => match object.remove(words_key) {
                Some(Value::Array(items)) => Ok(LevelPayload::Wrapped(entries(level, items)?)),
                Some(other) => Err(VocabError::UnexpectedShape {
                    level: level.label(),
                    detail: format!("'{words_key}' holds {} instead of a list", kind(&other)),
                }),
                None => Err(VocabError::UnexpectedShape {
                    level: level.label(),
                    detail: format!("object without a '{words_key}' list"),
                }),
            },
            Value::Array(items) => Ok(LevelPayload::Bare(entries(level, items)?)),
            other => Err(VocabError::UnexpectedShape {
                level: level.label(),
                detail: format!("top-level {}", kind(&other)),
            }),
        }
    }

    /// The entries regardless of the envelope
    pub fn into_entries(self) -> Vec<VocabEntry> {
        match self {
            LevelPayload::Wrapped(entries) | LevelPayload::Bare(entries) => entries,
        }
    }
}

fn entries(level: JlptLevel, items: Vec<Value>) -> Result<Vec<VocabEntry>, VocabError> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(entry) => Ok(entry),
            other => Err(VocabError::UnexpectedShape {
                level: level.label(),
                detail: format!("entry {idx} is {} instead of an object", kind(&other)),
            }),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn n3() -> JlptLevel {
        JlptLevel::new(3).unwrap()
    }

    #[test]
    fn test_decode_wrapped() {
        let body = json!({"total": 1, "words": [{"word": "会う", "meaning": "to meet"}]});
        let payload = LevelPayload::decode(n3(), body, "words").unwrap();

        assert!(matches!(payload, LevelPayload::Wrapped(_)));
        let entries = payload.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["word"], json!("会う"));
    }

    #[test]
    fn test_decode_bare() {
        let body = json!([{"word": "青"}, {"word": "赤"}]);
        let payload = LevelPayload::decode(n3(), body, "words").unwrap();

        assert!(matches!(payload, LevelPayload::Bare(_)));
        assert_eq!(payload.into_entries().len(), 2);
    }

    #[test]
    fn test_decode_custom_key() {
        let body = json!({"items": []});
        assert!(LevelPayload::decode(n3(), body.clone(), "words").is_err());
        assert!(LevelPayload::decode(n3(), body, "items").is_ok());
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        let err = LevelPayload::decode(n3(), json!("nope"), "words").unwrap_err();
        assert!(err.to_string().contains("N3"));

        let err = LevelPayload::decode(n3(), json!({"words": 3}), "words").unwrap_err();
        assert!(err.to_string().contains("a number"));

        let err = LevelPayload::decode(n3(), json!([1, 2]), "words").unwrap_err();
        assert!(err.to_string().contains("entry 0"));
    }
}
