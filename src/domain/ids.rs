//! Domain identifier types
//!
//! Anki identifiers are millisecond-epoch integers. The newtypes keep card and
//! note ids from being mixed up while serializing as plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use kura::domain::ids::CardId;
/// use std::str::FromStr;
///
/// let card_id = CardId::from_str("1498938915662").unwrap();
/// assert_eq!(card_id.as_i64(), 1498938915662);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    /// Creates a new CardId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid card ID '{s}': {e}"))
    }
}

impl From<i64> for CardId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Note identifier newtype wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Creates a new NoteId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_from_str() {
        let id = CardId::from_str(" 1502098034048 ").unwrap();
        assert_eq!(id, CardId::new(1502098034048));
        assert_eq!(id.to_string(), "1502098034048");
    }

    #[test]
    fn test_card_id_from_str_invalid() {
        assert!(CardId::from_str("abc").is_err());
        assert!(CardId::from_str("").is_err());
    }

    #[test]
    fn test_ids_serialize_as_numbers() {
        let json = serde_json::to_string(&(CardId::new(1), NoteId::new(2))).unwrap();
        assert_eq!(json, "[1,2]");

        let note: NoteId = serde_json::from_str("1502032366472").unwrap();
        assert_eq!(note.as_i64(), 1502032366472);
    }
}
