//! Core business logic for Kura.
//!
//! # Modules
//!
//! - [`export`] - Pipelines, batch fetching, sink writing and summaries
//! - [`transform`] - Pure conversions from service payloads to rows
//!
//! # Export Workflow
//!
//! The study pipeline:
//!
//! 1. **Select**: `findCards` with the configured query
//! 2. **Fetch**: `cardsInfo` in pages of 500 ids
//! 3. **Join**: one `notesInfo` call for the tags of every referenced note
//! 4. **Build**: one row per card
//! 5. **Write**: CSV file and SQLite table
//! 6. **Statistics** (optional): four review tables through the same writer
//!
//! The vocabulary pipeline fetches levels N1 to N5, tags and concatenates the
//! entries, and writes one table.
//!
//! # Example
//!
//! ```rust,no_run
//! use kura::adapters::ankiconnect::AnkiConnectClient;
//! use kura::config::load_config;
//! use kura::core::export::{MultiSinkWriter, StudyExporter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("kura.toml")?;
//! let client = AnkiConnectClient::new(config.ankiconnect.clone())?;
//! let writer = MultiSinkWriter::new(
//!     config.output.base_path(),
//!     chrono::Local::now().date_naive(),
//!     config.application.dry_run,
//! );
//!
//! let summary = StudyExporter::new(&client, &config, writer).run().await?;
//! println!("Rows: {}", summary.total_rows());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod transform;
