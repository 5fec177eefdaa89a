//! Configuration loading and typed config structures for Blockwatch.
//!
//! The canonical configuration lives in `blockwatch-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure, and
//! provides a loader that reads and validates the file.

use std::path::Path;

use serde::Deserialize;

use crate::error::HistoryError;
use crate::log::HistoryCapacity;

/// Environment variable overriding `history.limit`.
pub const HISTORY_LIMIT_ENV: &str = "BLOCKWATCH_HISTORY_LIMIT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but are not usable.
    #[error("invalid configuration: {source}")]
    Invalid {
        /// What was wrong.
        #[from]
        source: HistoryError,
    },

    /// The world section has a zero dimension.
    #[error("world dimensions must be positive, got {width}x{height}")]
    EmptyWorld {
        /// Configured width.
        width: u16,
        /// Configured height.
        height: u16,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `blockwatch-config.yaml`. Every section is
/// optional and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockwatchConfig {
    /// Dimensions of the mirrored world.
    #[serde(default)]
    pub world: WorldConfig,

    /// Per-cell history retention.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Per-actor query limits.
    #[serde(default)]
    pub query: QueryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BlockwatchConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `BLOCKWATCH_HISTORY_LIMIT` overrides `history.limit` when set to an
    /// integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.history.apply_env_overrides();
        Ok(config)
    }

    /// Check every value that cannot be expressed in the type alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-positive history limit or
    /// zero query limits, and [`ConfigError::EmptyWorld`] for a zero world
    /// dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.history.capacity()?;
        self.query.validate()?;
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::EmptyWorld {
                width: self.world.width,
                height: self.world.height,
            });
        }
        Ok(())
    }
}

/// World dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Width in cells.
    #[serde(default = "default_world_side")]
    pub width: u16,

    /// Height in cells.
    #[serde(default = "default_world_side")]
    pub height: u16,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_side(),
            height: default_world_side(),
        }
    }
}

/// Per-cell history retention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Records kept per cell before the oldest is evicted.
    ///
    /// Signed so that a negative value in the file is reported as a
    /// configuration error rather than a parse error.
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

impl HistoryConfig {
    /// Apply `BLOCKWATCH_HISTORY_LIMIT` if it is set to an integer.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(HISTORY_LIMIT_ENV) {
            match val.trim().parse::<i64>() {
                Ok(limit) => self.limit = limit,
                Err(e) => tracing::warn!(
                    value = %val,
                    error = %e,
                    "ignoring non-integer {HISTORY_LIMIT_ENV}"
                ),
            }
        }
    }

    /// The validated capacity.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if the limit is not positive.
    pub fn capacity(&self) -> Result<HistoryCapacity, HistoryError> {
        HistoryCapacity::new(self.limit)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

/// Per-actor query limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    /// Lines returned when the caller gives no limit.
    #[serde(default = "default_query_limit")]
    pub default_limit: u32,

    /// Upper bound callers are clamped to.
    #[serde(default = "default_max_query_limit")]
    pub max_limit: u32,
}

impl QueryConfig {
    /// Reject zero limits.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidQueryLimits`] if either limit is zero.
    pub const fn validate(&self) -> Result<(), HistoryError> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(HistoryError::InvalidQueryLimits {
                default_limit: self.default_limit,
                max_limit: self.max_limit,
            });
        }
        Ok(())
    }

    /// Resolve a caller-supplied limit into `1..=max_limit`.
    pub fn clamp(&self, requested: Option<u32>) -> usize {
        let max = self.max_limit.max(1);
        let limit = requested.unwrap_or(self.default_limit).clamp(1, max);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_query_limit(),
            max_limit: default_max_query_limit(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is
    /// unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_world_side() -> u16 {
    500
}

const fn default_history_limit() -> i64 {
    10
}

const fn default_query_limit() -> u32 {
    10
}

const fn default_max_query_limit() -> u32 {
    100
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BlockwatchConfig::default();
        assert_eq!(config.history.limit, 10);
        assert_eq!(config.query.default_limit, 10);
        assert_eq!(config.query.max_limit, 100);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  width: 200
  height: 150
history:
  limit: 25
query:
  default_limit: 5
  max_limit: 50
logging:
  level: debug
  json: true
";
        let config = BlockwatchConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.world.width, 200);
        assert_eq!(config.world.height, 150);
        assert_eq!(config.query.default_limit, 5);
        assert_eq!(config.query.max_limit, 50);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let config = BlockwatchConfig::parse("query:\n  max_limit: 20\n").unwrap_or_default();
        assert_eq!(config.query.max_limit, 20);
        assert_eq!(config.query.default_limit, 10);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn non_positive_history_limit_is_invalid() {
        let mut config = BlockwatchConfig::default();
        config.history.limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                source: HistoryError::InvalidCapacity(0)
            })
        ));
        config.history.limit = -4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_world_is_invalid() {
        let mut config = BlockwatchConfig::default();
        config.world.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyWorld { width: 500, height: 0 })
        ));
    }

    #[test]
    fn query_limit_clamped() {
        let query = QueryConfig::default();
        assert_eq!(query.clamp(None), 10);
        assert_eq!(query.clamp(Some(0)), 1);
        assert_eq!(query.clamp(Some(42)), 42);
        assert_eq!(query.clamp(Some(5000)), 100);
    }

    #[test]
    fn invalid_yaml_is_reported() {
        assert!(matches!(
            BlockwatchConfig::parse("history: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
