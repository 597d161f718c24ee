//! Card row construction

use super::tags::TagIndex;
use crate::adapters::ankiconnect::CardInfo;
use crate::domain::CardRow;

/// Maps fetched cards to export rows
///
/// Term and definition are read from the note fields named in the
/// configuration. A missing field yields an empty value, never an error.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    term_field: String,
    definition_field: String,
}

impl RowBuilder {
    pub fn new(term_field: impl Into<String>, definition_field: impl Into<String>) -> Self {
        Self {
            term_field: term_field.into(),
            definition_field: definition_field.into(),
        }
    }

    pub fn build(&self, card: CardInfo, tags: &TagIndex) -> CardRow {
        let term = card.field_value(&self.term_field).map(str::to_string);
        let definition = card.field_value(&self.definition_field).map(str::to_string);

        CardRow {
            card_id: card.card_id,
            note_id: card.note,
            tags: tags.tags_for(card.note).to_string(),
            deck: card.deck_name,
            term,
            definition,
            model: card.model_name,
            interval: card.interval,
            ord: card.ord,
            card_type: card.card_type,
            queue: card.queue,
            due: card.due,
            reps: card.reps,
            lapses: card.lapses,
        }
    }

    /// One row per card, in card order
    pub fn build_all(&self, cards: Vec<CardInfo>, tags: &TagIndex) -> Vec<CardRow> {
        cards.into_iter().map(|card| self.build(card, tags)).collect()
    }
}
