//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use super::export::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "kura.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Kura configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set term_field and definition_field to your note type's fields");
                println!("  2. Make sure Anki is running with the AnkiConnect add-on");
                println!("  3. Validate configuration: kura validate-config");
                println!("  4. Run an export: kura study, kura vocab or kura all");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Starter configuration with every setting at its default
pub fn starter_config() -> &'static str {
    r#"# Kura configuration
# Exports Anki study data and JLPT vocabulary to CSV and SQLite.
#
# Values may reference environment variables as ${VAR_NAME}, and any key can
# be overridden with KURA_<SECTION>_<KEY>, e.g. KURA_OUTPUT_BASE_DIR.

[application]
# trace, debug, info, warn, error
log_level = "info"
# Fetch and build tables but write nothing
dry_run = false

[ankiconnect]
url = "http://localhost:8765"
api_version = 6
timeout_seconds = 15

[study]
# Note fields holding the term and its definition
term_field = "Terme"
definition_field = "Def"
# Anki search query; empty selects every card
card_query = ""
# Deck for the flat review log; empty means every deck
review_deck = ""
include_review_stats = true

[vocab]
base_url = "https://jlpt-vocab-api.vercel.app"
# Key holding the word list when the API wraps it in an object
words_key = "words"
timeout_seconds = 30

[output]
base_dir = "~/Documents/japanese/data"
terms_database = "anki_terms.db"
stats_database = "anki_stats.db"
vocab_database = "jlpt_vocab.db"

[export]
# abort: stop on the first failure
# continue: skip failed batches, levels or statistics tables and exit with code 1
failure_policy = "abort"

[logging]
local_enabled = false
local_path = "logs"
# daily, hourly, never
local_rotation = "daily"
"#
}
