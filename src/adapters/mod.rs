//! External system integrations for Kura.
//!
//! This module provides adapters for the systems Kura talks to:
//!
//! - [`ankiconnect`] - AnkiConnect add-on (cards, notes, review statistics)
//! - [`jlpt`] - Public JLPT vocabulary API
//! - [`storage`] - Local CSV and SQLite sinks
//!
//! # Design Pattern
//!
//! Remote services sit behind async traits ([`ankiconnect::StudyService`],
//! [`jlpt::VocabService`]) so the export pipelines can be driven by mock
//! implementations in tests. Local sinks share the synchronous
//! [`storage::TableSink`] trait.
//!
//! ```rust,no_run
//! use kura::adapters::ankiconnect::{AnkiConnectClient, StudyService};
//! use kura::config::AnkiConnectConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnkiConnectClient::new(AnkiConnectConfig::default())?;
//! let ids = client.find_cards("deck:Japanese").await?;
//! println!("{} cards", ids.len());
//! # Ok(())
//! # }
//! ```

pub mod ankiconnect;
pub mod jlpt;
pub mod storage;
