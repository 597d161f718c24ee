//! All command implementation
//!
//! Runs the study export, then the vocabulary export. The two pipelines share
//! the configuration and one writer, so every file of a run carries the same
//! date. A fatal study failure stops before the vocabulary export starts.

use super::export::{prepare_config, print_summary, report_failure, writer_for, ExportOptions};
use super::study::run_study;
use super::vocab::run_vocab;
use crate::config::KuraConfig;
use crate::core::export::{ExportSummary, MultiSinkWriter};
use crate::domain::KuraError;
use clap::Args;

/// Arguments for the all command
#[derive(Args, Debug, Clone, Default)]
pub struct AllArgs {
    #[command(flatten)]
    pub options: ExportOptions,
}

impl AllArgs {
    /// Execute the all command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting full export");

        let config = match prepare_config(config_path, &self.options) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        match run_all(&config, &writer_for(&config)).await {
            Ok(summary) => Ok(print_summary(&summary)),
            Err((pipeline, e)) => Ok(report_failure(pipeline, &e)),
        }
    }
}

/// Run both pipelines with the same writer and merge their summaries
///
/// On failure, returns the name of the pipeline that failed with its error.
pub async fn run_all(
    config: &KuraConfig,
    writer: &MultiSinkWriter,
) -> Result<ExportSummary, (&'static str, KuraError)> {
    println!("🚀 Exporting study data from {}", config.ankiconnect.url);
    let mut summary = run_study(config, writer.clone())
        .await
        .map_err(|e| ("Study", e))?;

    println!("🚀 Exporting JLPT vocabulary from {}", config.vocab.base_url);
    let vocab = run_vocab(config, writer.clone())
        .await
        .map_err(|e| ("Vocabulary", e))?;
    summary.merge(vocab);

    Ok(summary)
}
