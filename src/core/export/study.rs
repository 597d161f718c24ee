//! Study-data export pipeline
//!
//! Selects cards, fetches their details in pages of
//! [`CARDS_INFO_BATCH_SIZE`], joins note tags, and writes `anki_terms`.
//! When review statistics are enabled the four statistics tables follow.

use super::batch::{BatchFetcher, CARDS_INFO_BATCH_SIZE};
use super::summary::{ExportError, ExportSummary};
use super::writer::{
    MultiSinkWriter, CARD_REVIEWS_TABLE, REVIEWS_PER_CARD_TABLE, STATS_BY_DAY_TABLE,
    STATS_TODAY_TABLE, TERMS_TABLE,
};
use crate::adapters::ankiconnect::StudyService;
use crate::config::{FailurePolicy, KuraConfig};
use crate::core::transform::{reviews, RowBuilder, TagIndex};
use crate::domain::{CardId, DailyReviewRow, Result, Table};
use std::path::Path;
use std::time::Instant;

/// Runs the study pipeline against a [`StudyService`]
pub struct StudyExporter<'a> {
    service: &'a dyn StudyService,
    config: &'a KuraConfig,
    writer: MultiSinkWriter,
}

impl<'a> StudyExporter<'a> {
    pub fn new(
        service: &'a dyn StudyService,
        config: &'a KuraConfig,
        writer: MultiSinkWriter,
    ) -> Self {
        Self {
            service,
            config,
            writer,
        }
    }

    fn policy(&self) -> FailurePolicy {
        self.config.export.failure_policy
    }

    /// Execute the export
    ///
    /// # Errors
    ///
    /// Card selection and sink failures always end the run. Fetch failures
    /// end it under [`FailurePolicy::Abort`] and are recorded in the summary
    /// otherwise.
    pub async fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.writer.is_dry_run());

        tracing::info!(
            endpoint = %self.service.endpoint(),
            query = %self.config.study.card_query,
            "Starting study export"
        );

        let card_ids = self.service.find_cards(&self.config.study.card_query).await?;
        summary.requests += 1;

        tracing::info!(count = card_ids.len(), "Selected cards");

        self.export_terms(&card_ids, &mut summary).await?;

        if self.config.study.include_review_stats {
            self.export_review_stats(&card_ids, &mut summary).await?;
        } else {
            tracing::debug!("Review statistics disabled");
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn export_terms(&self, card_ids: &[CardId], summary: &mut ExportSummary) -> Result<()> {
        let fetcher = BatchFetcher::new(CARDS_INFO_BATCH_SIZE, self.policy());
        let outcome = fetcher
            .fetch(card_ids, |chunk| self.service.cards_info(chunk))
            .await?;
        summary.requests += outcome.requests;

        for failure in &outcome.failures {
            summary.add_error(
                ExportError::new(failure.error_type, failure.error.clone()).with_context(format!(
                    "cardsInfo batch={} offset={} len={}",
                    failure.index, failure.offset, failure.len
                )),
            );
        }

        tracing::info!(
            cards = outcome.items.len(),
            requests = outcome.requests,
            failed_batches = outcome.failures.len(),
            "Fetched card details"
        );

        let tags = match TagIndex::fetch(self.service, &outcome.items).await {
            Ok(tags) => tags,
            Err(e) if self.policy() == FailurePolicy::Continue => {
                tracing::warn!(error = %e, "Note tag lookup failed, exporting without tags");
                summary.add_error(ExportError::from_error(&e).with_context("notesInfo".to_string()));
                TagIndex::default()
            }
            Err(e) => return Err(e),
        };
        summary.requests += 1;

        let builder = RowBuilder::new(
            self.config.study.term_field.as_str(),
            self.config.study.definition_field.as_str(),
        );
        let rows = builder.build_all(outcome.items, &tags);
        let table = Table::from_records(TERMS_TABLE, rows);

        let database = self.config.output.database_path(&self.config.output.terms_database);
        summary.add_table(self.writer.write(&table, &database)?);

        Ok(())
    }

    async fn export_review_stats(
        &self,
        card_ids: &[CardId],
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let database = self.config.output.database_path(&self.config.output.stats_database);
        let today = self.writer.run_date().format("%Y-%m-%d").to_string();

        let fetched = self.service.num_cards_reviewed_today().await.map(|count| {
            Table::from_records(
                STATS_TODAY_TABLE,
                vec![DailyReviewRow {
                    date: today,
                    reviews: count,
                }],
            )
        });
        self.write_stat(STATS_TODAY_TABLE, fetched, &database, summary)?;

        let fetched = self.service.num_cards_reviewed_by_day().await.map(|days| {
            let rows = days
                .into_iter()
                .map(|day| DailyReviewRow {
                    date: day.0,
                    reviews: day.1,
                })
                .collect();
            Table::from_records(STATS_BY_DAY_TABLE, rows)
        });
        self.write_stat(STATS_BY_DAY_TABLE, fetched, &database, summary)?;

        let fetched = self
            .service
            .card_reviews(&self.config.study.review_deck, 0)
            .await
            .map(|log| Table::from_records(CARD_REVIEWS_TABLE, reviews::from_review_log(log)));
        self.write_stat(CARD_REVIEWS_TABLE, fetched, &database, summary)?;

        let fetched = self
            .service
            .reviews_of_cards(card_ids)
            .await
            .and_then(|history| reviews::from_card_history(card_ids, history))
            .map(|rows| Table::from_records(REVIEWS_PER_CARD_TABLE, rows));
        self.write_stat(REVIEWS_PER_CARD_TABLE, fetched, &database, summary)?;

        Ok(())
    }

    /// Write one statistics table, or record its fetch failure under `continue`
    fn write_stat(
        &self,
        name: &str,
        fetched: Result<Table>,
        database: &Path,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        summary.requests += 1;
        match fetched {
            Ok(table) => {
                summary.add_table(self.writer.write(&table, database)?);
                Ok(())
            }
            Err(e) if self.policy() == FailurePolicy::Continue => {
                tracing::warn!(table = %name, error = %e, "Statistics fetch failed, skipping table");
                summary.add_error(ExportError::from_error(&e).with_context(format!("table={name}")));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
