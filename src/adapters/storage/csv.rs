//! CSV file sink

use super::traits::TableSink;
use crate::domain::{KuraError, Result, Table};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// UTF-8 byte-order marker, for spreadsheet tools that sniff the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes a table to a single CSV file with a header row
///
/// Null cells are written as empty fields. The file is truncated first.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
    bom: bool,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, bom: bool) -> Self {
        Self {
            path: path.into(),
            bom,
        }
    }
}

impl TableSink for CsvSink {
    fn write_table(&self, table: &Table) -> Result<usize> {
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

        let file = File::create(&self.path).map_err(|e| {
            KuraError::Io(format!("Failed to create {}: {e}", self.path.display()))
        })?;
        let mut out = BufWriter::new(file);
        if self.bom {
            out.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::Writer::from_writer(out);
        if !table.columns().is_empty() {
            writer.write_record(table.columns())?;
        }
        for row in table.rows() {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        writer.flush()?;

        tracing::debug!(
            table = %table.name(),
            path = %self.path.display(),
            rows = table.len(),
            "Wrote CSV file"
        );

        Ok(table.len())
    }

    fn kind(&self) -> &'static str {
        "csv"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
