//! Options and reporting shared by the export commands
//!
//! `study`, `vocab` and `all` take the same overrides, load configuration the
//! same way and print the same summary.

use crate::config::{load_config, FailurePolicy, KuraConfig};
use crate::core::export::{ExportSummary, MultiSinkWriter};
use crate::domain::KuraError;
use clap::Args;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Overrides accepted by every export command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportOptions {
    /// Fetch and build tables but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Override the failure policy (abort or continue)
    #[arg(long, value_name = "POLICY")]
    pub failure_policy: Option<FailurePolicy>,
}

impl ExportOptions {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut KuraConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.output.base_dir = dir.clone();
        }

        if let Some(policy) = self.failure_policy {
            tracing::info!(policy = ?policy, "Overriding failure policy from CLI");
            config.export.failure_policy = policy;
        }
    }
}

/// Load configuration and apply CLI overrides
///
/// Returns the exit code to use when the configuration is unusable.
pub fn prepare_config(config_path: &str, options: &ExportOptions) -> Result<KuraConfig, i32> {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to load configuration");
            eprintln!("Failed to load configuration: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    options.apply(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuration validation failed");
        eprintln!("Configuration validation failed: {e}");
        return Err(EXIT_CONFIG);
    }

    if config.application.dry_run {
        tracing::info!("Dry run mode enabled - no data will be written");
        println!("🔍 DRY RUN MODE - No files or tables will be written");
        println!();
    }

    Ok(config)
}

/// Writer for today's run
pub fn writer_for(config: &KuraConfig) -> MultiSinkWriter {
    MultiSinkWriter::new(
        config.output.base_path(),
        chrono::Local::now().date_naive(),
        config.application.dry_run,
    )
}

/// Exit code for an error that ended a pipeline
pub fn exit_code_for_error(error: &KuraError) -> i32 {
    if error.is_connection() {
        EXIT_CONNECTION
    } else {
        match error {
            KuraError::Configuration(_) | KuraError::Validation(_) => EXIT_CONFIG,
            _ => EXIT_FATAL,
        }
    }
}

/// Report a pipeline error on the console and map it to an exit code
pub fn report_failure(pipeline: &str, error: &KuraError) -> i32 {
    crate::log_error_with_context!(error, pipeline);
    eprintln!("{pipeline} export failed: {error}");
    if error.is_connection() {
        eprintln!("   Is the service running and reachable?");
    }
    exit_code_for_error(error)
}

/// Print the summary and derive the exit code
pub fn print_summary(summary: &ExportSummary) -> i32 {
    println!();
    println!("📊 Export Summary:");
    for table in &summary.tables {
        println!("  {}: {} rows", table.table, table.rows);
        if table.written {
            println!("    CSV: {}", table.csv_path.display());
            println!("    SQLite: {}", table.database.display());
        }
    }
    println!("  Requests: {}", summary.requests);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }

    if summary.is_successful() {
        println!("✅ Export completed successfully!");
        EXIT_SUCCESS
    } else {
        println!("⚠️  Export completed with failures");
        EXIT_PARTIAL
    }
}
