//! Configuration loading and database path resolution
//!
//! Missing config files are not fatal: the service logs a warning and starts
//! with compiled defaults.

use crate::analytics::SeverityWeights;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "PPOV_CONFIG";

/// Environment variable naming the SQLite database file
pub const DATABASE_ENV_VAR: &str = "PPOV_DATABASE";

const APP_DIR: &str = "period-poverty";
const DATABASE_FILE: &str = "period_poverty.db";

/// Top-level service configuration (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub analytics: AnalyticsConfig,
    pub hygiene: HygieneConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; `None` falls back to the OS data directory
    pub path: Option<PathBuf>,
}

/// Fixed analytics constants, passed explicitly into the engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Weight of the normalized cost burden in the severity score
    pub burden_weight: Decimal,
    /// Weight of the hygiene access gap in the severity score
    pub hygiene_weight: Decimal,
    /// Burden percentage treated as maximal severity; larger burdens are capped
    pub burden_ceiling_percent: Decimal,
    /// Percentile used for cost burden when the caller does not name one
    pub reference_percentile: i32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            burden_weight: Decimal::new(6, 1),
            hygiene_weight: Decimal::new(4, 1),
            burden_ceiling_percent: Decimal::ONE_HUNDRED,
            reference_percentile: 50,
        }
    }
}

impl AnalyticsConfig {
    /// Validated severity weights for the engine
    pub fn severity_weights(&self) -> Result<SeverityWeights> {
        SeverityWeights::new(
            self.burden_weight,
            self.hygiene_weight,
            self.burden_ceiling_percent,
        )
        .map_err(|e| Error::Config(e.to_string()))
    }
}

/// Which hygiene series (country + JMP indicator) the service reports on
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HygieneConfig {
    pub country: String,
    pub indicator: String,
}

impl Default for HygieneConfig {
    fn default() -> Self {
        Self {
            country: "United Kingdom".to_string(),
            indicator: "bathing_facility".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// A missing file yields the compiled defaults; an unreadable or invalid
    /// file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Load configuration and report where it came from
    ///
    /// Nothing is logged here: callers usually load config before the
    /// subscriber exists, so they call [`ConfigSource::log`] once it does.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::MissingFile(path.to_path_buf())));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.analytics.severity_weights()?;

        if !(1..=99).contains(&self.analytics.reference_percentile) {
            return Err(Error::Config(format!(
                "reference_percentile must be within 1-99 (got {})",
                self.analytics.reference_percentile
            )));
        }

        Ok(())
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was named but does not exist; compiled defaults are in use
    MissingFile(PathBuf),
    /// No config file was resolved at all
    Defaults,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::MissingFile(path) => warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            ),
            ConfigSource::Defaults => info!("No config file resolved, using compiled defaults"),
        }
    }
}

/// Config file resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. OS config directory (`<config_dir>/period-poverty/config.toml`)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Database path resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.database.path {
        return path.clone();
    }

    default_database_path()
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analytics.reference_percentile, 50);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 9100
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let result = Config::from_toml_str(
            r#"
            [analytics]
            burden_weight = 0.7
            hygiene_weight = 0.4
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_reference_percentile_range() {
        let result = Config::from_toml_str(
            r#"
            [analytics]
            reference_percentile = 100
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_database_path_wins() {
        let mut config = Config::default();
        config.database.path = Some(PathBuf::from("/tmp/from-toml.db"));

        let path = resolve_database_path(Some(Path::new("/tmp/from-cli.db")), &config);
        assert_eq!(path, PathBuf::from("/tmp/from-cli.db"));
    }
}
