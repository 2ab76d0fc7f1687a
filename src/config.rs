//! Configuration for Haven.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::triage::TierScan;

/// Main configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub resources: ResourcesConfig,
    pub triage: TriageConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            resources: ResourcesConfig::from_env()?,
            triage: TriageConfig::from_env()?,
        };
        tracing::debug!(
            resources_dir = %config.resources.dir.display(),
            max_suggestions = config.resources.max_suggestions,
            tier_scan = ?config.triage.tier_scan,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Where curated resources come from and how many suggestions to surface.
#[derive(Debug, Clone)]
pub struct ResourcesConfig {
    /// Directory holding `restaurants.json`, `activities.json`,
    /// `helplines.json` and `quotes.json` (default: ~/.haven/resources/).
    pub dir: PathBuf,
    /// Maximum number of food/activity suggestions returned per lookup.
    pub max_suggestions: usize,
    /// Whether replies carry a supplemental resource block.
    pub attach_to_replies: bool,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_resources_dir(),
            max_suggestions: crate::resources::DEFAULT_MAX_SUGGESTIONS,
            attach_to_replies: true,
        }
    }
}

/// Get the default resources directory (~/.haven/resources/).
fn default_resources_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".haven")
        .join("resources")
}

impl ResourcesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_suggestions: usize = parse_optional_env(
            "HAVEN_MAX_SUGGESTIONS",
            crate::resources::DEFAULT_MAX_SUGGESTIONS,
        )?;
        if max_suggestions == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HAVEN_MAX_SUGGESTIONS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            dir: optional_env("HAVEN_RESOURCES_DIR")?
                .map(PathBuf::from)
                .unwrap_or_else(default_resources_dir),
            max_suggestions,
            attach_to_replies: parse_bool_env("HAVEN_ATTACH_RESOURCES", true)?,
        })
    }
}

/// Classifier tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriageConfig {
    pub tier_scan: TierScan,
}

impl TriageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            tier_scan: parse_optional_env("HAVEN_TIER_SCAN", TierScan::default())?,
        })
    }
}

// Helper functions

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to read {key}: {e}"
        ))),
    }
}

pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)?
        .map(|s| {
            s.parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{e}"),
            })
        })
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}

pub(crate) fn parse_bool_env(key: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(key)? {
        None => Ok(default),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected a boolean, got '{s}'"),
            }),
        },
    }
}
