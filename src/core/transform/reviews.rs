//! Review history normalization
//!
//! The flat `cardReviews` log and the per-card `getReviewsOfCards` history
//! describe the same events in different shapes. Both become [`ReviewRow`]s.

use crate::adapters::ankiconnect::{CardReviewEntry, ReviewLogEntry, ReviewsByCard};
use crate::domain::{AnkiConnectError, CardId, Result, ReviewRow};
use std::str::FromStr;

/// Rows from the flat review log, in log order
pub fn from_review_log(entries: Vec<ReviewLogEntry>) -> Vec<ReviewRow> {
    entries
        .into_iter()
        .map(
            |ReviewLogEntry(time, card_id, usn, ease, new_ivl, prev_ivl, factor, duration, kind)| {
                ReviewRow {
                    rev_time_ms: time,
                    rev_time: ReviewRow::timestamp_from_millis(time),
                    card_id,
                    usn,
                    ease,
                    new_ivl,
                    prev_ivl,
                    factor,
                    duration_ms: duration,
                    rev_type: kind,
                }
            },
        )
        .collect()
}

fn from_card_entry(card_id: CardId, entry: CardReviewEntry) -> ReviewRow {
    ReviewRow {
        rev_time_ms: entry.id,
        rev_time: ReviewRow::timestamp_from_millis(entry.id),
        card_id,
        usn: entry.usn,
        ease: entry.ease,
        new_ivl: entry.ivl,
        prev_ivl: entry.last_ivl,
        factor: entry.factor,
        duration_ms: entry.time,
        rev_type: entry.review_type,
    }
}

/// Rows from the per-card history
///
/// Cards come out in the order they were requested; keys the service added
/// beyond the request follow in ascending id order.
///
/// # Errors
///
/// Returns [`AnkiConnectError::InvalidResponse`] for a key that is not a card id.
pub fn from_card_history(requested: &[CardId], mut history: ReviewsByCard) -> Result<Vec<ReviewRow>> {
    let mut rows = Vec::new();

    for card_id in requested {
        if let Some(entries) = history.remove(&card_id.to_string()) {
            rows.extend(entries.into_iter().map(|e| from_card_entry(*card_id, e)));
        }
    }

    let mut leftover = history
        .into_iter()
        .map(|(key, entries)| {
            CardId::from_str(&key)
                .map(|id| (id, entries))
                .map_err(|e| AnkiConnectError::InvalidResponse(format!("getReviewsOfCards: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    leftover.sort_by_key(|(id, _)| *id);

    for (card_id, entries) in leftover {
        rows.extend(entries.into_iter().map(|e| from_card_entry(card_id, e)));
    }

    Ok(rows)
}
