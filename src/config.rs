//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the host starts.
//! A `.env` file is honoured when the binary calls `dotenvy::dotenv()` first.
//!
//! ## Variables
//!
//! - `ANALYTICS_GLOBAL` - Name the counter is exposed under (default: `analytics`)
//! - `ANALYTICS_DIAGNOSTICS` - Log every click (`true`/`1`, default: `true`)
//! - `ANALYTICS_DIAGNOSTIC_TAG` - Tag attached to click logs (default: `222`)
//! - `EVENT_QUEUE_CAPACITY` - Dispatch queue size (default: 1024)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use serde::Serialize;
use std::env;
use tracing::warn;

use crate::infrastructure::diagnostics::DEFAULT_TAG;
use crate::namespace::is_valid_global_name;

const DEFAULT_GLOBAL: &str = "analytics";
const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const MAX_QUEUE_CAPACITY: usize = 1_000_000;

/// Host configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Global name the counter is exposed under in the host namespace.
    pub global_name: String,
    /// When false, clicks go to a `NullSink` instead of the log.
    pub diagnostics_enabled: bool,
    pub diagnostic_tag: String,
    pub event_queue_capacity: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global_name: DEFAULT_GLOBAL.to_string(),
            diagnostics_enabled: true,
            diagnostic_tag: DEFAULT_TAG.to_string(),
            event_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let global_name = env::var("ANALYTICS_GLOBAL").unwrap_or(defaults.global_name);

        let diagnostics_enabled = match env::var("ANALYTICS_DIAGNOSTICS") {
            Ok(v) => parse_flag(&v).unwrap_or_else(|| {
                warn!(
                    value = %v,
                    default = defaults.diagnostics_enabled,
                    "Unrecognized ANALYTICS_DIAGNOSTICS value, using default"
                );
                defaults.diagnostics_enabled
            }),
            Err(_) => defaults.diagnostics_enabled,
        };

        let diagnostic_tag =
            env::var("ANALYTICS_DIAGNOSTIC_TAG").unwrap_or(defaults.diagnostic_tag);

        let event_queue_capacity = match env::var("EVENT_QUEUE_CAPACITY") {
            Ok(v) => v.trim().parse().unwrap_or_else(|e| {
                warn!(
                    value = %v,
                    error = %e,
                    default = defaults.event_queue_capacity,
                    "Invalid EVENT_QUEUE_CAPACITY, using default"
                );
                defaults.event_queue_capacity
            }),
            Err(_) => defaults.event_queue_capacity,
        };

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Self {
            global_name,
            diagnostics_enabled,
            diagnostic_tag,
            event_queue_capacity,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `global_name` is not an identifier
    /// - `event_queue_capacity` is 0 or above 1000000
    /// - `log_format` is not `text` or `json`
    /// - diagnostics are enabled with an empty tag
    pub fn validate(&self) -> Result<()> {
        if !is_valid_global_name(&self.global_name) {
            anyhow::bail!(
                "ANALYTICS_GLOBAL must be a valid identifier, got '{}'",
                self.global_name
            );
        }

        if self.event_queue_capacity == 0 || self.event_queue_capacity > MAX_QUEUE_CAPACITY {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY must be between 1 and {}, got {}",
                MAX_QUEUE_CAPACITY,
                self.event_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.diagnostics_enabled && self.diagnostic_tag.is_empty() {
            anyhow::bail!(
                "ANALYTICS_DIAGNOSTIC_TAG must not be empty when diagnostics are enabled"
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Global name: {}", self.global_name);
        if self.diagnostics_enabled {
            tracing::info!("  Diagnostics: enabled (tag {:?})", self.diagnostic_tag);
        } else {
            tracing::info!("  Diagnostics: disabled");
        }
        tracing::info!("  Event queue capacity: {}", self.event_queue_capacity);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses a boolean flag: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`,
/// case-insensitively. Anything else is `None`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
