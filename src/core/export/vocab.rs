//! Vocabulary export pipeline
//!
//! One request per JLPT level, N1 through N5, concatenated into `jlpt_vocab`.

use super::summary::{ExportError, ExportSummary};
use super::writer::{MultiSinkWriter, VOCAB_TABLE};
use crate::adapters::jlpt::VocabService;
use crate::config::{FailurePolicy, KuraConfig};
use crate::core::transform::VocabFrame;
use crate::domain::{JlptLevel, Result};
use std::time::Instant;

/// Runs the vocabulary pipeline against a [`VocabService`]
pub struct VocabExporter<'a> {
    service: &'a dyn VocabService,
    config: &'a KuraConfig,
    writer: MultiSinkWriter,
}

impl<'a> VocabExporter<'a> {
    pub fn new(
        service: &'a dyn VocabService,
        config: &'a KuraConfig,
        writer: MultiSinkWriter,
    ) -> Self {
        Self {
            service,
            config,
            writer,
        }
    }

    /// Execute the export
    ///
    /// # Errors
    ///
    /// Sink failures always end the run. A failing level ends it under
    /// [`FailurePolicy::Abort`] and is skipped and recorded otherwise.
    pub async fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.writer.is_dry_run());
        let mut frame = VocabFrame::new();

        tracing::info!(base_url = %self.service.base_url(), "Starting vocabulary export");

        for level in JlptLevel::ALL {
            summary.requests += 1;
            match self.service.fetch_level(level).await {
                Ok(entries) => {
                    tracing::info!(level = %level, count = entries.len(), "Fetched level");
                    frame.push_level(level, entries);
                }
                Err(e) if self.config.export.failure_policy == FailurePolicy::Continue => {
                    tracing::warn!(level = %level, error = %e, "Level failed, skipping");
                    summary.add_error(
                        ExportError::from_error(&e).with_context(format!("level={level}")),
                    );
                }
                Err(e) => return Err(e),
            }
        }

        let table = frame.into_table(VOCAB_TABLE);
        let database = self
            .config
            .output
            .database_path(&self.config.output.vocab_database);
        summary.add_table(self.writer.write(&table, &database)?);

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
