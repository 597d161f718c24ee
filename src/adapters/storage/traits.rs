//! Sink abstraction
//!
//! This module defines the trait every local destination implements so the
//! export writer can treat CSV files and SQLite tables the same way.

use crate::domain::{Result, Table};

/// A local destination for finished tables
///
/// Each call replaces whatever the destination held for that table before.
pub trait TableSink {
    /// Write the whole table, returning the number of rows written
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::KuraError::Storage`] or
    /// [`crate::domain::KuraError::Io`] when the destination cannot be written.
    fn write_table(&self, table: &Table) -> Result<usize>;

    /// Short label for logs and summaries, e.g. `csv` or `sqlite`
    fn kind(&self) -> &'static str;

    /// Human-readable location of the destination
    fn location(&self) -> String;
}
