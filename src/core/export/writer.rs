//! Multi-sink table writer
//!
//! Every finished table goes to a date-stamped CSV file under the output
//! directory and to a table of the same name in a SQLite database.

use super::summary::TableReport;
use crate::adapters::storage::{CsvSink, SqliteSink, TableSink};
use crate::domain::{Result, Table};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const TERMS_TABLE: &str = "anki_terms";
pub const STATS_TODAY_TABLE: &str = "stats_today";
pub const STATS_BY_DAY_TABLE: &str = "stats_by_day";
pub const CARD_REVIEWS_TABLE: &str = "card_reviews";
pub const REVIEWS_PER_CARD_TABLE: &str = "reviews_per_card";
pub const VOCAB_TABLE: &str = "jlpt_vocab";

/// Whether a table's CSV starts with a UTF-8 byte-order marker
pub fn uses_bom(table: &str) -> bool {
    matches!(table, TERMS_TABLE | VOCAB_TABLE)
}

/// Writes tables to a CSV file and a SQLite database
#[derive(Debug, Clone)]
pub struct MultiSinkWriter {
    base_dir: PathBuf,
    run_date: NaiveDate,
    dry_run: bool,
}

impl MultiSinkWriter {
    pub fn new(base_dir: impl Into<PathBuf>, run_date: NaiveDate, dry_run: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            run_date,
            dry_run,
        }
    }

    pub fn run_date(&self) -> NaiveDate {
        self.run_date
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// `<base_dir>/<table>_<YYYY-MM-DD>.csv`
    pub fn csv_path(&self, table: &str) -> PathBuf {
        self.base_dir
            .join(format!("{table}_{}.csv", self.run_date.format("%Y-%m-%d")))
    }

    /// Write `table` to its CSV file and to `database`
    ///
    /// The CSV is written first. A failure in the SQLite step leaves the CSV
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns the first sink error.
    pub fn write(&self, table: &Table, database: &Path) -> Result<TableReport> {
        let csv_path = self.csv_path(table.name());
        let report = TableReport {
            table: table.name().to_string(),
            rows: table.len(),
            csv_path: csv_path.clone(),
            database: database.to_path_buf(),
            written: !self.dry_run,
        };

        if self.dry_run {
            tracing::info!(
                table = %table.name(),
                rows = table.len(),
                csv = %csv_path.display(),
                database = %database.display(),
                "Dry run, skipping write"
            );
            return Ok(report);
        }

        let csv = CsvSink::new(csv_path, uses_bom(table.name()));
        let sqlite = SqliteSink::new(database);
        let sinks: [&dyn TableSink; 2] = [&csv, &sqlite];

        for sink in sinks {
            let rows = sink.write_table(table)?;
            tracing::debug!(
                table = %table.name(),
                sink = sink.kind(),
                location = %sink.location(),
                rows,
                "Sink updated"
            );
        }

        tracing::info!(
            table = %table.name(),
            rows = table.len(),
            csv = %csv.location(),
            database = %sqlite.location(),
            "Table written"
        );

        Ok(report)
    }
}
