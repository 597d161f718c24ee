//! Vocab command implementation
//!
//! Exports JLPT vocabulary for levels N1 to N5.

use super::export::{prepare_config, print_summary, report_failure, writer_for, ExportOptions};
use crate::adapters::jlpt::JlptVocabClient;
use crate::config::KuraConfig;
use crate::core::export::{ExportSummary, MultiSinkWriter, VocabExporter};
use crate::domain::Result;
use clap::Args;

/// Arguments for the vocab command
#[derive(Args, Debug, Clone, Default)]
pub struct VocabArgs {
    #[command(flatten)]
    pub options: ExportOptions,
}

impl VocabArgs {
    /// Execute the vocab command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting vocab command");

        let config = match prepare_config(config_path, &self.options) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        println!("🚀 Exporting JLPT vocabulary from {}", config.vocab.base_url);

        match run_vocab(&config, writer_for(&config)).await {
            Ok(summary) => Ok(print_summary(&summary)),
            Err(e) => Ok(report_failure("Vocabulary", &e)),
        }
    }
}

/// Build the client and run the vocabulary pipeline
pub async fn run_vocab(config: &KuraConfig, writer: MultiSinkWriter) -> Result<ExportSummary> {
    let client = JlptVocabClient::new(config.vocab.clone())?;
    VocabExporter::new(&client, config, writer).run().await
}
