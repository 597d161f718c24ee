//! Configuration schema types
//!
//! Every section has defaults, so a file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do when one batch, level or statistics table fails to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run on the first failure
    #[default]
    Abort,
    /// Record the failure in the summary and keep going
    Continue,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "continue" => Ok(FailurePolicy::Continue),
            other => Err(format!(
                "Invalid failure policy '{other}'. Must be one of: abort, continue"
            )),
        }
    }
}

/// Main Kura configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KuraConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// AnkiConnect endpoint settings
    #[serde(default)]
    pub ankiconnect: AnkiConnectConfig,

    /// Study export settings
    #[serde(default)]
    pub study: StudyConfig,

    /// Vocabulary service settings
    #[serde(default)]
    pub vocab: VocabConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Export behaviour
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KuraConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.ankiconnect.validate()?;
        self.study.validate()?;
        self.vocab.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch and build tables, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// AnkiConnect endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnkiConnectConfig {
    /// URL of the AnkiConnect add-on
    #[serde(default = "default_ankiconnect_url")]
    pub url: String,

    /// Protocol version sent with every request
    #[serde(default = "default_api_version")]
    pub api_version: u8,

    /// Timeout in seconds
    #[serde(default = "default_ankiconnect_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl AnkiConnectConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("ankiconnect.url", &self.url)?;

        if self.timeout_seconds == 0 {
            return Err("ankiconnect.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for AnkiConnectConfig {
    fn default() -> Self {
        Self {
            url: default_ankiconnect_url(),
            api_version: default_api_version(),
            timeout_seconds: default_ankiconnect_timeout_seconds(),
        }
    }
}

/// Study export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Note field holding the term
    #[serde(default = "default_term_field")]
    pub term_field: String,

    /// Note field holding the definition
    #[serde(default = "default_definition_field")]
    pub definition_field: String,

    /// Anki search query selecting the cards (empty = every card)
    #[serde(default)]
    pub card_query: String,

    /// Deck filter for the flat review log (empty = every deck)
    #[serde(default)]
    pub review_deck: String,

    /// Also export the review statistics tables
    #[serde(default = "default_true")]
    pub include_review_stats: bool,
}

impl StudyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.term_field.trim().is_empty() {
            return Err("study.term_field cannot be empty".to_string());
        }
        if self.definition_field.trim().is_empty() {
            return Err("study.definition_field cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            term_field: default_term_field(),
            definition_field: default_definition_field(),
            card_query: String::new(),
            review_deck: String::new(),
            include_review_stats: true,
        }
    }
}

/// Vocabulary service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabConfig {
    /// Base URL of the vocabulary service
    #[serde(default = "default_vocab_base_url")]
    pub base_url: String,

    /// Key holding the word list when the service wraps it in an object
    #[serde(default = "default_words_key")]
    pub words_key: String,

    /// Timeout in seconds
    #[serde(default = "default_vocab_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl VocabConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("vocab.base_url", &self.base_url)?;

        if self.words_key.trim().is_empty() {
            return Err("vocab.words_key cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("vocab.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            base_url: default_vocab_base_url(),
            words_key: default_words_key(),
            timeout_seconds: default_vocab_timeout_seconds(),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the CSV files and SQLite databases
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// SQLite file for the card table
    #[serde(default = "default_terms_database")]
    pub terms_database: String,

    /// SQLite file for the review statistics tables
    #[serde(default = "default_stats_database")]
    pub stats_database: String,

    /// SQLite file for the vocabulary table
    #[serde(default = "default_vocab_database")]
    pub vocab_database: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_dir.trim().is_empty() {
            return Err("output.base_dir cannot be empty".to_string());
        }

        for (key, value) in [
            ("output.terms_database", &self.terms_database),
            ("output.stats_database", &self.stats_database),
            ("output.vocab_database", &self.vocab_database),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{key} cannot be empty"));
            }
        }

        Ok(())
    }

    /// Base directory with a leading `~` expanded
    pub fn base_path(&self) -> PathBuf {
        expand_home(&self.base_dir)
    }

    /// Full path of a database file; absolute names are kept as-is
    pub fn database_path(&self, file_name: &str) -> PathBuf {
        let path = expand_home(file_name);
        if path.is_absolute() {
            path
        } else {
            self.base_path().join(path)
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            terms_database: default_terms_database(),
            stats_database: default_stats_database(),
            vocab_database: default_vocab_database(),
        }
    }
}

/// Export behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Failure handling for batches, levels and statistics tables
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(key: &str, url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err(format!("{key} cannot be empty"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("{key} must start with http:// or https://"));
    }
    Ok(())
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ankiconnect_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_api_version() -> u8 {
    6
}

fn default_ankiconnect_timeout_seconds() -> u64 {
    15
}

fn default_term_field() -> String {
    "Terme".to_string()
}

fn default_definition_field() -> String {
    "Def".to_string()
}

fn default_vocab_base_url() -> String {
    "https://jlpt-vocab-api.vercel.app".to_string()
}

fn default_words_key() -> String {
    "words".to_string()
}

fn default_vocab_timeout_seconds() -> u64 {
    30
}

fn default_base_dir() -> String {
    "~/Documents/japanese/data".to_string()
}

fn default_terms_database() -> String {
    "anki_terms.db".to_string()
}

fn default_stats_database() -> String {
    "anki_stats.db".to_string()
}

fn default_vocab_database() -> String {
    "jlpt_vocab.db".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
