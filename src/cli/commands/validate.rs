//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Kura configuration file.

use super::export::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{load_config, KuraConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_config_summary(&config);
        Ok(EXIT_SUCCESS)
    }
}

fn print_config_summary(config: &KuraConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  AnkiConnect: {} (v{})", config.ankiconnect.url, config.ankiconnect.api_version);
    println!("  Term Field: {}", config.study.term_field);
    println!("  Definition Field: {}", config.study.definition_field);
    println!(
        "  Card Query: {}",
        if config.study.card_query.is_empty() {
            "(all cards)"
        } else {
            config.study.card_query.as_str()
        }
    );
    println!("  Review Statistics: {}", config.study.include_review_stats);
    println!("  Vocabulary API: {}", config.vocab.base_url);
    println!("  Output Directory: {}", config.output.base_path().display());
    println!("  Failure Policy: {:?}", config.export.failure_policy);
    println!();
}
