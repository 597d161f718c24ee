//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::KuraConfig;
use crate::domain::errors::KuraError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into KuraConfig
/// 4. Applies environment variable overrides (KURA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, references an
/// unset environment variable, or fails validation.
///
/// # Examples
///
/// ```no_run
/// use kura::config::loader::load_config;
///
/// let config = load_config("kura.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<KuraConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(KuraError::Configuration(format!(
            "Configuration file not found: {} (run `kura init` to create one)",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        KuraError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: KuraConfig = toml::from_str(&contents)
        .map_err(|e| KuraError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        KuraError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| KuraError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(KuraError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the KURA_* prefix
///
/// Environment variables follow the pattern KURA_<SECTION>_<KEY>, for example
/// KURA_STUDY_TERM_FIELD or KURA_OUTPUT_BASE_DIR.
fn apply_env_overrides(config: &mut KuraConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("KURA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("KURA_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // AnkiConnect overrides
    if let Ok(val) = std::env::var("KURA_ANKICONNECT_URL") {
        config.ankiconnect.url = val;
    }
    if let Ok(val) = std::env::var("KURA_ANKICONNECT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.ankiconnect.timeout_seconds = timeout;
        }
    }

    // Study overrides
    if let Ok(val) = std::env::var("KURA_STUDY_TERM_FIELD") {
        config.study.term_field = val;
    }
    if let Ok(val) = std::env::var("KURA_STUDY_DEFINITION_FIELD") {
        config.study.definition_field = val;
    }
    if let Ok(val) = std::env::var("KURA_STUDY_CARD_QUERY") {
        config.study.card_query = val;
    }

    // Vocabulary overrides
    if let Ok(val) = std::env::var("KURA_VOCAB_BASE_URL") {
        config.vocab.base_url = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("KURA_OUTPUT_BASE_DIR") {
        config.output.base_dir = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("KURA_EXPORT_FAILURE_POLICY") {
        config.export.failure_policy = val.parse().map_err(KuraError::Configuration)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("KURA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("KURA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
