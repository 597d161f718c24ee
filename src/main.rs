// Kura - Anki study data and JLPT vocabulary exporter
// Copyright (c) 2025 Kura Contributors
// Licensed under the MIT License

use kura::cli::{Cli, Commands};
use kura::config::load_config;
use kura::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging settings come from the config when it loads; commands
    // report config errors themselves
    let loaded = load_config(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = loaded.map(|c| c.logging).unwrap_or_default();
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Kura - Anki study data and JLPT vocabulary exporter"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Study(args) => args.execute(&cli.config).await,
        Commands::Vocab(args) => args.execute(&cli.config).await,
        Commands::All(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
