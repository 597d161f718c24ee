//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Kura using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Kura - Anki study data and JLPT vocabulary exporter
#[derive(Parser, Debug)]
#[command(name = "kura")]
#[command(version, about, long_about = None)]
#[command(author = "Kura Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "kura.toml", env = "KURA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KURA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export cards, tags and review statistics from AnkiConnect
    Study(commands::study::StudyArgs),

    /// Export JLPT vocabulary for levels N1 to N5
    Vocab(commands::vocab::VocabArgs),

    /// Run the study export, then the vocabulary export
    All(commands::all::AllArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
