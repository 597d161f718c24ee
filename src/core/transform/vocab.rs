//! Vocabulary frame concatenation

use crate::adapters::jlpt::VocabEntry;
use crate::domain::{CellValue, JlptLevel, Table};

/// Column holding the `N<k>` label
pub const LEVEL_COLUMN: &str = "level";

/// Accumulates per-level results into one table
///
/// Levels are kept in the order they are pushed. Entries are not
/// deduplicated across levels.
#[derive(Debug, Default)]
pub struct VocabFrame {
    entries: Vec<VocabEntry>,
    levels: Vec<JlptLevel>,
}

impl VocabFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one level's entries, tagging each with the level
    pub fn push_level(&mut self, level: JlptLevel, entries: Vec<VocabEntry>) {
        for mut entry in entries {
            // the label column always comes from the request, never the payload
            entry.shift_remove(LEVEL_COLUMN);
            self.entries.push(entry);
            self.levels.push(level);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the output table with `level` as the last column
    pub fn into_table(self, name: &str) -> Table {
        let mut table = Table::from_json_rows(name, &self.entries);
        let labels = self
            .levels
            .iter()
            .map(|level| CellValue::Text(level.label()))
            .collect();
        table.append_column(LEVEL_COLUMN, labels);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<VocabEntry> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_level_is_last_column() {
        let mut frame = VocabFrame::new();
        frame.push_level(
            JlptLevel::new(1).unwrap(),
            entries(json!([{"word": "曖昧", "meaning": "vague"}])),
        );
        frame.push_level(
            JlptLevel::new(2).unwrap(),
            entries(json!([{"word": "扱う", "romaji": "atsukau", "level": 2}])),
        );

        let table = frame.into_table("jlpt_vocab");

        assert_eq!(
            table.columns(),
            &["word", "meaning", "romaji", "level"].map(String::from)
        );
        let level = table.column_index("level").unwrap();
        assert_eq!(table.rows()[0][level], CellValue::Text("N1".to_string()));
        assert_eq!(table.rows()[1][level], CellValue::Text("N2".to_string()));
    }

    #[test]
    fn test_empty_frame() {
        let table = VocabFrame::new().into_table("jlpt_vocab");
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["level".to_string()]);
    }
}
