//! SQLite table sink
//!
//! Each write drops the named table, recreates it from the table's columns
//! and inserts every row inside a single transaction.

use super::traits::TableSink;
use crate::domain::table::TIMESTAMP_FORMAT;
use crate::domain::{CellValue, KuraError, Result, Table};
use rusqlite::types::{ToSql, ToSqlOutput, Value};
use rusqlite::{params_from_iter, Connection};
use std::fs;
use std::path::PathBuf;

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            CellValue::Null => Value::Null,
            CellValue::Integer(i) => Value::Integer(*i),
            CellValue::Real(r) => Value::Real(*r),
            CellValue::Boolean(b) => Value::Integer(i64::from(*b)),
            CellValue::Text(s) => Value::Text(s.clone()),
            CellValue::Timestamp(ts) => Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

/// Replaces one table per write in a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    KuraError::Io(format!(
                        "Failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Connection::open(&self.path).map_err(|e| {
            KuraError::Storage(format!("Failed to open {}: {e}", self.path.display()))
        })
    }
}

/// Double-quotes an identifier, escaping embedded quotes
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl TableSink for SqliteSink {
    fn write_table(&self, table: &Table) -> Result<usize> {
        let mut conn = self.open()?;
        let name = quote_ident(table.name());

        let tx = conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {name}"), [])?;

        if table.columns().is_empty() {
            tracing::warn!(table = %table.name(), "Table has no columns, leaving it dropped");
            tx.commit()?;
            return Ok(0);
        }

        let definitions = table
            .columns()
            .iter()
            .zip(table.column_types())
            .map(|(column, sql_type)| format!("{} {sql_type}", quote_ident(column)))
            .collect::<Vec<_>>()
            .join(", ");
        tx.execute(&format!("CREATE TABLE {name} ({definitions})"), [])?;

        let placeholders = (1..=table.columns().len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        {
            let mut stmt = tx.prepare(&format!("INSERT INTO {name} VALUES ({placeholders})"))?;
            for row in table.rows() {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        tracing::debug!(
            table = %table.name(),
            database = %self.path.display(),
            rows = table.len(),
            "Replaced SQLite table"
        );

        Ok(table.len())
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::TempDir;

    fn cards(terms: &[&str]) -> Table {
        let mut table = Table::new(
            "anki_terms",
            vec!["card_id".to_string(), "term".to_string(), "tags".to_string()],
        );
        for (i, term) in terms.iter().enumerate() {
            table.push_row(vec![
                CellValue::Integer(i as i64 + 1),
                CellValue::from(*term),
                CellValue::Null,
            ]);
        }
        table
    }

    fn count(path: &Path, table: &str) -> i64 {
        let conn = Connection::open(path).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_write_creates_typed_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("anki_terms.db");
        let sink = SqliteSink::new(&path);

        assert_eq!(sink.write_table(&cards(&["猫", "犬"])).unwrap(), 2);

        let conn = Connection::open(&path).unwrap();
        let mut stmt = conn.prepare("PRAGMA table_info(anki_terms)").unwrap();
        let types: Vec<(String, String)> = stmt
            .query_map([], |r| Ok((r.get(1)?, r.get(2)?)))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(
            types,
            vec![
                ("card_id".to_string(), "INTEGER".to_string()),
                ("term".to_string(), "TEXT".to_string()),
                ("tags".to_string(), "TEXT".to_string()),
            ]
        );

        let tags: Option<String> = conn
            .query_row("SELECT tags FROM anki_terms WHERE card_id = 1", [], |r| r.get(0))
            .unwrap();
        assert!(tags.is_none());
    }

    #[test]
    fn test_second_write_replaces_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("anki_terms.db");
        let sink = SqliteSink::new(&path);

        sink.write_table(&cards(&["a", "b", "c"])).unwrap();
        sink.write_table(&cards(&["d"])).unwrap();

        assert_eq!(count(&path, "anki_terms"), 1);
        let conn = Connection::open(&path).unwrap();
        let term: String = conn
            .query_row("SELECT term FROM anki_terms", [], |r| r.get(0))
            .unwrap();
        assert_eq!(term, "d");
    }

    #[test]
    fn test_tables_share_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("anki_stats.db");
        let sink = SqliteSink::new(&path);

        let mut today = Table::new("stats_today", vec!["date".to_string(), "reviews".to_string()]);
        today.push_row(vec![CellValue::from("2024-05-01"), CellValue::Integer(12)]);
        let mut reviews = Table::new("card_reviews", vec!["rev_time".to_string()]);
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_milli_opt(8, 30, 0, 250)
            .unwrap();
        reviews.push_row(vec![CellValue::Timestamp(ts)]);

        sink.write_table(&today).unwrap();
        sink.write_table(&reviews).unwrap();

        assert_eq!(count(&path, "stats_today"), 1);
        let conn = Connection::open(&path).unwrap();
        let rendered: String = conn
            .query_row("SELECT rev_time FROM card_reviews", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rendered, "2024-05-01 08:30:00.250");
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("level"), "\"level\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }
}
