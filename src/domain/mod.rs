//! Domain models and types for Kura.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CardId`], [`NoteId`], [`JlptLevel`])
//! - **Row records** ([`CardRow`], [`ReviewRow`], [`DailyReviewRow`])
//! - **Tabular model** ([`Table`], [`CellValue`], [`Record`]) consumed by every sink
//! - **Error types** ([`KuraError`], [`AnkiConnectError`], [`VocabError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use kura::domain::{DailyReviewRow, Table};
//!
//! let rows = vec![DailyReviewRow { date: "2024-05-01".to_string(), reviews: 42 }];
//! let table = Table::from_records("stats_by_day", rows);
//! assert_eq!(table.len(), 1);
//! ```

pub mod errors;
pub mod ids;
pub mod level;
pub mod records;
pub mod result;
pub mod table;

pub use errors::{AnkiConnectError, KuraError, VocabError};
pub use ids::{CardId, NoteId};
pub use level::JlptLevel;
pub use records::{CardRow, DailyReviewRow, ReviewRow};
pub use result::Result;
pub use table::{CellValue, Record, Table};
