//! Configuration management for Kura.
//!
//! Kura reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `KURA_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! The loaded [`KuraConfig`] is passed explicitly into each pipeline; nothing
//! is read from process-wide state after startup.
//!
//! # Example Configuration
//!
//! ```toml
//! [study]
//! term_field = "Terme"
//! definition_field = "Def"
//! card_query = "deck:Japanese"
//!
//! [output]
//! base_dir = "~/Documents/japanese/data"
//!
//! [export]
//! failure_policy = "abort"
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    AnkiConnectConfig, ApplicationConfig, ExportConfig, FailurePolicy, KuraConfig, LoggingConfig,
    OutputConfig, StudyConfig, VocabConfig,
};
