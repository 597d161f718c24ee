//! Study service trait
//!
//! This module defines the `StudyService` trait that abstracts the actions the
//! study export consumes. The HTTP implementation talks to the AnkiConnect
//! add-on; tests substitute in-memory implementations that count requests.

use super::models::{CardInfo, DayCount, NoteInfo, ReviewLogEntry, ReviewsByCard};
use crate::domain::ids::{CardId, NoteId};
use crate::domain::Result;
use async_trait::async_trait;

/// Actions consumed from the local study application
///
/// Each method maps to exactly one request.
///
/// # Example
///
/// ```no_run
/// use kura::adapters::ankiconnect::{AnkiConnectClient, StudyService};
/// use kura::config::AnkiConnectConfig;
///
/// # async fn example() -> kura::domain::Result<()> {
/// let client = AnkiConnectClient::new(AnkiConnectConfig::default())?;
/// let card_ids = client.find_cards("deck:Japanese").await?;
/// let cards = client.cards_info(&card_ids[..card_ids.len().min(500)]).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait StudyService: Send + Sync {
    /// `findCards`: ids of the cards matching an Anki search query
    async fn find_cards(&self, query: &str) -> Result<Vec<CardId>>;

    /// `cardsInfo`: details for a slice of cards, in request order
    async fn cards_info(&self, cards: &[CardId]) -> Result<Vec<CardInfo>>;

    /// `notesInfo`: details (including tags) for a set of notes
    async fn notes_info(&self, notes: &[NoteId]) -> Result<Vec<NoteInfo>>;

    /// `getNumCardsReviewedToday`
    async fn num_cards_reviewed_today(&self) -> Result<i64>;

    /// `getNumCardsReviewedByDay`: historical per-day totals
    async fn num_cards_reviewed_by_day(&self) -> Result<Vec<DayCount>>;

    /// `cardReviews`: flat review log for a deck (empty = all decks) from a
    /// starting review id
    async fn card_reviews(&self, deck: &str, start_id: i64) -> Result<Vec<ReviewLogEntry>>;

    /// `getReviewsOfCards`: review history grouped per card
    async fn reviews_of_cards(&self, cards: &[CardId]) -> Result<ReviewsByCard>;

    /// Endpoint description used in log lines
    fn endpoint(&self) -> &str;
}
