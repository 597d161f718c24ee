//! Note to tag lookup
//!
//! Tags live on notes, not cards. The index is built from one bulk
//! `notesInfo` call covering every note the fetched cards reference.

use crate::adapters::ankiconnect::{CardInfo, NoteInfo, StudyService};
use crate::domain::{NoteId, Result};
use std::collections::{HashMap, HashSet};

/// Read-only map of note id to its space-joined tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: HashMap<NoteId, String>,
}

impl TagIndex {
    /// Fetches tags for every note referenced by `cards` with a single request
    pub async fn fetch(service: &dyn StudyService, cards: &[CardInfo]) -> Result<Self> {
        let notes = unique_note_ids(cards);

        tracing::debug!(notes = notes.len(), "Fetching note tags");

        let infos = service.notes_info(&notes).await?;
        Ok(Self::from_notes(infos))
    }

    pub fn from_notes(notes: Vec<NoteInfo>) -> Self {
        let tags = notes
            .into_iter()
            .map(|note| (note.note_id, note.tags.join(" ")))
            .collect();
        Self { tags }
    }

    /// Tags for a note, `""` when the note has none or was not returned
    pub fn tags_for(&self, note: NoteId) -> &str {
        self.tags.get(&note).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Distinct note ids in first-seen order
pub fn unique_note_ids(cards: &[CardInfo]) -> Vec<NoteId> {
    let mut seen = HashSet::new();
    cards
        .iter()
        .map(|card| card.note)
        .filter(|note| seen.insert(*note))
        .collect()
}
