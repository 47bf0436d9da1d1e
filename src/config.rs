//! Configuration management for deckhand
//!
//! Settings are read from environment variables with defaults; construct
//! with `DeckhandConfig::default()` and check with [`DeckhandConfig::validate`].
//!
//! # Environment Variables
//!
//! - `DECKHAND_LOG_LEVEL`: trace|debug|info|warn|error - default: "info"
//! - `DECKHAND_DEFAULT_INFRA`: infrastructure used by `infra` without
//!   `--infra` - default: "aws"
//! - `DECKHAND_MACHINE_READABLE`: prefix output lines with `o:`/`e:` -
//!   default: "false"
//! - `DECKHAND_SCAN_DEPTH`: directory depth listed for type detection -
//!   default: "1"

use crate::detection::scanner::DEFAULT_SCAN_DEPTH;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_INFRA: &str = "aws";
const MAX_SCAN_DEPTH: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckhandConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Infrastructure used when a command does not name one
    pub default_infra: String,

    /// Prefix every output line so a wrapping process can parse it
    pub machine_readable: bool,

    /// Depth of the listing handed to the detector registry
    pub scan_depth: usize,
}

impl Default for DeckhandConfig {
    /// Loads from `DECKHAND_*` variables, falling back to defaults
    fn default() -> Self {
        let log_level = env::var("DECKHAND_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let default_infra =
            env::var("DECKHAND_DEFAULT_INFRA").unwrap_or_else(|_| DEFAULT_INFRA.to_string());

        let machine_readable = env::var("DECKHAND_MACHINE_READABLE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let scan_depth = env::var("DECKHAND_SCAN_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_SCAN_DEPTH);

        Self {
            log_level,
            default_infra,
            machine_readable,
            scan_depth,
        }
    }
}

impl DeckhandConfig {
    /// Strict variant of `default()`: malformed values are errors instead of
    /// being replaced by defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("DECKHAND_MACHINE_READABLE") {
            config.machine_readable = raw.parse::<bool>().map_err(|e| ConfigError::ParseError {
                field: "DECKHAND_MACHINE_READABLE".to_string(),
                error: e.to_string(),
            })?;
        }

        if let Ok(raw) = env::var("DECKHAND_SCAN_DEPTH") {
            config.scan_depth = raw.parse::<usize>().map_err(|e| ConfigError::ParseError {
                field: "DECKHAND_SCAN_DEPTH".to_string(),
                error: e.to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.default_infra.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Default infrastructure name cannot be empty".to_string(),
            ));
        }

        if self.scan_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Scan depth must be at least 1".to_string(),
            ));
        }
        if self.scan_depth > MAX_SCAN_DEPTH {
            return Err(ConfigError::ValidationFailed(format!(
                "Scan depth cannot exceed {}",
                MAX_SCAN_DEPTH
            )));
        }

        Ok(())
    }
}

impl fmt::Display for DeckhandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deckhand Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Default Infrastructure: {}", self.default_infra)?;
        writeln!(f, "  Machine Readable: {}", self.machine_readable)?;
        writeln!(f, "  Scan Depth: {}", self.scan_depth)?;
        Ok(())
    }
}
