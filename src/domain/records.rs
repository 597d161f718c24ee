//! Row records exported by the study pipeline
//!
//! Field names match the exported column names one to one.

use super::ids::{CardId, NoteId};
use super::table::{CellValue, Record};
use chrono::{DateTime, NaiveDateTime, Utc};

/// One exported flashcard (`anki_terms`)
#[derive(Debug, Clone, PartialEq)]
pub struct CardRow {
    pub card_id: CardId,
    pub note_id: NoteId,
    pub deck: Option<String>,
    pub term: Option<String>,
    pub definition: Option<String>,
    pub model: Option<String>,
    pub interval: Option<i64>,
    pub ord: Option<i64>,
    pub card_type: Option<i64>,
    pub queue: Option<i64>,
    pub due: Option<i64>,
    pub reps: Option<i64>,
    pub lapses: Option<i64>,
    pub tags: String,
}

impl Record for CardRow {
    fn columns() -> &'static [&'static str] {
        &[
            "card_id",
            "note_id",
            "deck",
            "term",
            "definition",
            "model",
            "interval",
            "ord",
            "type",
            "queue",
            "due",
            "reps",
            "lapses",
            "tags",
        ]
    }

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.card_id.as_i64().into(),
            self.note_id.as_i64().into(),
            self.deck.into(),
            self.term.into(),
            self.definition.into(),
            self.model.into(),
            self.interval.into(),
            self.ord.into(),
            self.card_type.into(),
            self.queue.into(),
            self.due.into(),
            self.reps.into(),
            self.lapses.into(),
            self.tags.into(),
        ]
    }
}

/// One review, normalized from either the flat log or the per-card history
/// (`card_reviews`, `reviews_per_card`)
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub rev_time_ms: i64,
    pub rev_time: Option<NaiveDateTime>,
    pub card_id: CardId,
    pub usn: i64,
    pub ease: i64,
    pub new_ivl: i64,
    pub prev_ivl: i64,
    pub factor: i64,
    pub duration_ms: i64,
    pub rev_type: i64,
}

impl ReviewRow {
    /// Calendar timestamp (UTC) for a millisecond epoch
    pub fn timestamp_from_millis(millis: i64) -> Option<NaiveDateTime> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
    }
}

impl Record for ReviewRow {
    fn columns() -> &'static [&'static str] {
        &[
            "rev_time_ms",
            "rev_time",
            "card_id",
            "usn",
            "ease",
            "new_ivl",
            "prev_ivl",
            "factor",
            "duration_ms",
            "rev_type",
        ]
    }

    fn into_cells(self) -> Vec<CellValue> {
        vec![
            self.rev_time_ms.into(),
            self.rev_time.into(),
            self.card_id.as_i64().into(),
            self.usn.into(),
            self.ease.into(),
            self.new_ivl.into(),
            self.prev_ivl.into(),
            self.factor.into(),
            self.duration_ms.into(),
            self.rev_type.into(),
        ]
    }
}

/// Review count for one day (`stats_by_day`, `stats_today`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReviewRow {
    pub date: String,
    pub reviews: i64,
}

impl Record for DailyReviewRow {
    fn columns() -> &'static [&'static str] {
        &["date", "reviews"]
    }

    fn into_cells(self) -> Vec<CellValue> {
        vec![self.date.into(), self.reviews.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Table;

    #[test]
    fn test_card_row_cells_match_columns() {
        let row = CardRow {
            card_id: CardId::new(10),
            note_id: NoteId::new(20),
            deck: Some("Japanese".to_string()),
            term: None,
            definition: Some("water".to_string()),
            model: Some("Basic".to_string()),
            interval: Some(3),
            ord: Some(0),
            card_type: Some(2),
            queue: Some(2),
            due: Some(100),
            reps: Some(5),
            lapses: Some(1),
            tags: "n5 noun".to_string(),
        };

        let table = Table::from_records("anki_terms", vec![row]);
        assert_eq!(table.columns().len(), table.rows()[0].len());
        assert_eq!(table.rows()[0][table.column_index("term").unwrap()], CellValue::Null);
        assert_eq!(
            table.rows()[0][table.column_index("type").unwrap()],
            CellValue::Integer(2)
        );
    }

    #[test]
    fn test_timestamp_from_millis() {
        let ts = ReviewRow::timestamp_from_millis(1_700_000_000_123).unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string(), "2023-11-14 22:13:20.123");
    }

    #[test]
    fn test_review_row_columns() {
        assert_eq!(ReviewRow::columns().len(), 10);
        assert_eq!(DailyReviewRow::columns(), &["date", "reviews"]);
    }
}
