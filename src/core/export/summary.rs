//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::KuraError;
use std::path::PathBuf;
use std::time::Duration;

/// One table handed to the sinks
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub table: String,
    pub rows: usize,
    pub csv_path: PathBuf,
    pub database: PathBuf,
    /// False in dry-run mode
    pub written: bool,
}

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Tables produced, in write order
    pub tables: Vec<TableReport>,

    /// Remote requests issued
    pub requests: usize,

    /// Duration of the export
    pub duration: Duration,

    /// Whether sinks were skipped
    pub dry_run: bool,

    /// Errors isolated under the `continue` policy
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            tables: Vec::new(),
            requests: 0,
            duration: Duration::from_secs(0),
            dry_run,
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_table(&mut self, report: TableReport) {
        self.tables.push(report);
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Fold another summary into this one, summing durations
    pub fn merge(&mut self, other: ExportSummary) {
        self.tables.extend(other.tables);
        self.requests += other.requests;
        self.duration += other.duration;
        self.dry_run |= other.dry_run;
        self.errors.extend(other.errors);
    }

    /// Total rows across all tables
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Check if the export was successful (no isolated failures)
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            tables = self.tables.len(),
            total_rows = self.total_rows(),
            requests = self.requests,
            duration_secs = self.duration.as_secs(),
            dry_run = self.dry_run,
            "Export completed"
        );

        for table in &self.tables {
            tracing::debug!(
                table = %table.table,
                rows = table.rows,
                csv = %table.csv_path.display(),
                database = %table.database.display(),
                written = table.written,
                "Table exported"
            );
        }

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Endpoint unreachable or timed out
    Connection,
    /// The service answered with an error or an unreadable payload
    Service,
    /// CSV or SQLite write failure
    Storage,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl From<&KuraError> for ExportErrorType {
    fn from(err: &KuraError) -> Self {
        if err.is_connection() {
            return ExportErrorType::Connection;
        }
        match err {
            KuraError::AnkiConnect(_) | KuraError::Vocab(_) => ExportErrorType::Service,
            KuraError::Storage(_) | KuraError::Io(_) => ExportErrorType::Storage,
            KuraError::Configuration(_) | KuraError::Validation(_) => {
                ExportErrorType::Configuration
            }
            KuraError::Export(_) | KuraError::Serialization(_) => ExportErrorType::Unknown,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., table name, batch offset)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Classify a domain error
    pub fn from_error(err: &KuraError) -> Self {
        Self::new(ExportErrorType::from(err), err.to_string())
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
