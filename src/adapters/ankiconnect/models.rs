//! AnkiConnect wire models
//!
//! Only the fields the exporter reads are modelled; everything else in the
//! add-on's responses is ignored during deserialization.

use crate::domain::ids::{CardId, NoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request envelope: `{"action", "version", "params"}`
#[derive(Debug, Serialize)]
pub struct ApiRequest<'a> {
    pub action: &'a str,
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// Response envelope: exactly one of `result` / `error` is meaningful
///
/// Missing fields decode as `None`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

/// A note field as reported inside `cardsInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

/// One entry of the `cardsInfo` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: CardId,
    pub note: NoteId,
    #[serde(default)]
    pub deck_name: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub ord: Option<i64>,
    #[serde(rename = "type", default)]
    pub card_type: Option<i64>,
    #[serde(default)]
    pub queue: Option<i64>,
    #[serde(default)]
    pub due: Option<i64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub lapses: Option<i64>,
}

impl CardInfo {
    /// Value of a named note field; `None` when the model has no such field
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|f| f.value.as_deref())
    }
}

/// One entry of the `notesInfo` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: NoteId,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NoteInfo {
    /// Decode a raw `notesInfo` result
    ///
    /// Unknown note ids come back as `{}` (or `null`) placeholders that keep
    /// the result aligned with the request; those are skipped. Any other
    /// entry must be a well-formed note.
    pub fn from_entries(entries: Vec<serde_json::Value>) -> serde_json::Result<Vec<Self>> {
        entries
            .into_iter()
            .filter(|entry| match entry {
                serde_json::Value::Null => false,
                serde_json::Value::Object(map) => !map.is_empty(),
                _ => true,
            })
            .map(serde_json::from_value)
            .collect()
    }
}

/// One row of `getNumCardsReviewedByDay`: `[date, count]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayCount(pub String, pub i64);

/// One row of `cardReviews`:
/// `[reviewTime, cardID, usn, buttonPressed, newInterval, previousInterval,
/// newFactor, reviewDuration, reviewType]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewLogEntry(
    pub i64,
    pub CardId,
    pub i64,
    pub i64,
    pub i64,
    pub i64,
    pub i64,
    pub i64,
    pub i64,
);

/// One review inside the `getReviewsOfCards` result
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReviewEntry {
    /// Review time as a millisecond epoch
    pub id: i64,
    pub usn: i64,
    pub ease: i64,
    pub ivl: i64,
    pub last_ivl: i64,
    pub factor: i64,
    pub time: i64,
    #[serde(rename = "type")]
    pub review_type: i64,
}

/// `getReviewsOfCards` result: card id (as a string key) → reviews
pub type ReviewsByCard = HashMap<String, Vec<CardReviewEntry>>;
