// Kura - Anki study data and JLPT vocabulary exporter
// Copyright (c) 2025 Kura Contributors
// Licensed under the MIT License

//! # Kura - Anki and JLPT vocabulary export
//!
//! Kura pulls flashcard study data from a running Anki instance through the
//! AnkiConnect add-on, and JLPT vocabulary from a public REST API, and writes
//! both to date-stamped CSV files and SQLite tables.
//!
//! ## Overview
//!
//! Two independent pipelines:
//! - **Study**: select cards, fetch their details in pages of 500, join note
//!   tags, build one row per card, then export four review statistics tables
//! - **Vocabulary**: fetch levels N1 to N5, tag each entry with its level and
//!   concatenate
//!
//! Every table is fully replaced on each run.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipelines, batching and transformations
//! - [`adapters`] - AnkiConnect, vocabulary API, CSV and SQLite
//! - [`domain`] - Identifiers, records, tables and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kura::adapters::jlpt::JlptVocabClient;
//! use kura::config::load_config;
//! use kura::core::export::{MultiSinkWriter, VocabExporter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("kura.toml")?;
//!     let client = JlptVocabClient::new(config.vocab.clone())?;
//!     let writer = MultiSinkWriter::new(
//!         config.output.base_path(),
//!         chrono::Local::now().date_naive(),
//!         false,
//!     );
//!
//!     let summary = VocabExporter::new(&client, &config, writer).run().await?;
//!     println!("Exported {} words", summary.total_rows());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`] with [`domain::KuraError`]; the
//! CLI maps errors to exit codes (0 success, 1 partial, 2 configuration,
//! 4 connection, 5 fatal).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
