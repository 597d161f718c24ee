//! Local storage sinks
//!
//! Finished tables land in two places: a date-stamped CSV file and a table of
//! the same name in a SQLite database. Both implement [`TableSink`].

pub mod csv;
pub mod sqlite;
pub mod traits;

pub use self::csv::{CsvSink, UTF8_BOM};
pub use self::sqlite::SqliteSink;
pub use self::traits::TableSink;
