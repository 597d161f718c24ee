//! Study command implementation
//!
//! Exports cards, tags and review statistics from AnkiConnect.

use super::export::{prepare_config, print_summary, report_failure, writer_for, ExportOptions};
use crate::adapters::ankiconnect::AnkiConnectClient;
use crate::config::KuraConfig;
use crate::core::export::{ExportSummary, MultiSinkWriter, StudyExporter};
use crate::domain::Result;
use clap::Args;

/// Arguments for the study command
#[derive(Args, Debug, Clone, Default)]
pub struct StudyArgs {
    #[command(flatten)]
    pub options: ExportOptions,

    /// Override the card search query
    #[arg(long)]
    pub query: Option<String>,

    /// Skip the review statistics tables
    #[arg(long)]
    pub no_review_stats: bool,
}

impl StudyArgs {
    fn apply(&self, config: &mut KuraConfig) {
        if let Some(query) = &self.query {
            tracing::info!(query = %query, "Overriding card query from CLI");
            config.study.card_query = query.clone();
        }
        if self.no_review_stats {
            config.study.include_review_stats = false;
        }
    }

    /// Execute the study command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting study command");

        let mut config = match prepare_config(config_path, &self.options) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        self.apply(&mut config);

        println!("🚀 Exporting study data from {}", config.ankiconnect.url);

        match run_study(&config, writer_for(&config)).await {
            Ok(summary) => Ok(print_summary(&summary)),
            Err(e) => Ok(report_failure("Study", &e)),
        }
    }
}

/// Build the client and run the study pipeline
pub async fn run_study(config: &KuraConfig, writer: MultiSinkWriter) -> Result<ExportSummary> {
    let client = AnkiConnectClient::new(config.ankiconnect.clone())?;
    StudyExporter::new(&client, config, writer).run().await
}
