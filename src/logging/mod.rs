//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels (`RUST_LOG` overrides)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use kura::logging::init_logging;
//! use kura::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(table = "anki_terms", rows = 1200, "Table written");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use kura::log_error_with_context;
/// use kura::domain::KuraError;
///
/// let error = KuraError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through a paginated fetch
///
/// # Example
///
/// ```no_run
/// use kura::log_batch_progress;
///
/// log_batch_progress!(2, 3, 500);
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($current:expr, $total:expr, $len:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            len = $len,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Fetching batch"
        );
    };
}
