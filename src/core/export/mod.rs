//! Export orchestration and batch processing
//!
//! This module provides the two export pipelines and their shared parts:
//! - Paginated batch fetching
//! - The study and vocabulary exporters
//! - Writing tables to CSV and SQLite
//! - Summary and reporting

pub mod batch;
pub mod study;
pub mod summary;
pub mod vocab;
pub mod writer;

pub use batch::{BatchFailure, BatchFetcher, BatchOutcome, CARDS_INFO_BATCH_SIZE};
pub use study::StudyExporter;
pub use summary::{ExportError, ExportErrorType, ExportSummary, TableReport};
pub use vocab::VocabExporter;
pub use writer::MultiSinkWriter;
