//! # Loader Configuration
//!
//! Chooses where pricing tables come from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PRESS_TABLES_SOURCE=file                                           │
//! │     PRESS_TABLES_PATH=/etc/press/pricing.json                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/press-pricing/press.toml (Linux)                         │
//! │     ~/Library/Application Support/com.press.pricing/press.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     TableSource::Static, no override path                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # press.toml
//! [tables]
//! path = "/etc/press/pricing.json"
//! source = "file"  # static | file
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{DataError, DataResult};

// =============================================================================
// Table Source
// =============================================================================

/// Where the pricing tables are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    /// The tables compiled into `press-core`.
    #[default]
    Static,

    /// A JSON file with the same shape as `PricingTables`.
    File,
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Static => write!(f, "static"),
            TableSource::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for TableSource {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" | "builtin" | "default" => Ok(TableSource::Static),
            "file" | "json" => Ok(TableSource::File),
            other => Err(DataError::InvalidConfig(format!(
                "Unknown table source: '{}'. Valid options: static, file",
                other
            ))),
        }
    }
}

// =============================================================================
// Table Settings
// =============================================================================

/// The `[tables]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Override file, read when `source = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub source: TableSource,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete loader configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub tables: TableSettings,
}

impl DataConfig {
    /// Config for an explicit tables file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        DataConfig {
            tables: TableSettings {
                path: Some(path.into()),
                source: TableSource::File,
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (press.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> DataResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading data config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load data config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> DataResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DataError::ConfigSave("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| DataError::ConfigSave(e.to_string()))?;
        std::fs::write(&path, contents)?;

        info!(?path, "Data config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DataResult<()> {
        if self.tables.source == TableSource::File && self.tables.path.is_none() {
            return Err(DataError::MissingTablesPath);
        }

        if let Some(ref path) = self.tables.path {
            if path.as_os_str().is_empty() {
                return Err(DataError::InvalidConfig(
                    "tables path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PRESS_TABLES_PATH") {
            debug!(path = %path, "Overriding tables path from environment");
            self.tables.path = Some(PathBuf::from(path));
        }

        if let Ok(source) = std::env::var("PRESS_TABLES_SOURCE") {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding table source from environment");
                    self.tables.source = parsed;
                }
                Err(_) => warn!(source = %source, "Unknown table source in environment"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "press", "pricing")
            .map(|dirs| dirs.config_dir().join("press.toml"))
    }

    /// The override file, when the file source is selected.
    pub fn tables_path(&self) -> Option<&std::path::Path> {
        match self.tables.source {
            TableSource::File => self.tables.path.as_deref(),
            TableSource::Static => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_source_parsing() {
        assert_eq!("static".parse::<TableSource>().unwrap(), TableSource::Static);
        assert_eq!("FILE".parse::<TableSource>().unwrap(), TableSource::File);
        assert_eq!("json".parse::<TableSource>().unwrap(), TableSource::File);
        assert!("s3".parse::<TableSource>().is_err());
    }

    #[test]
    fn test_default_is_static() {
        let config = DataConfig::default();
        assert_eq!(config.tables.source, TableSource::Static);
        assert!(config.tables_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_source_needs_path() {
        let mut config = DataConfig::default();
        config.tables.source = TableSource::File;
        assert!(matches!(config.validate(), Err(DataError::MissingTablesPath)));

        config.tables.path = Some(PathBuf::from("/etc/press/pricing.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_static_source_ignores_path() {
        let mut config = DataConfig::from_file("/tmp/pricing.json");
        assert!(config.tables_path().is_some());
        config.tables.source = TableSource::Static;
        assert!(config.tables_path().is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let config = DataConfig::from_file("/etc/press/pricing.json");
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[tables]"));
        assert!(text.contains("source = \"file\""));

        let parsed: DataConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let parsed: DataConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, DataConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("press-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("press.toml");

        DataConfig::from_file("/srv/pricing.json")
            .save(Some(path.clone()))
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: DataConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded.tables.path, Some(PathBuf::from("/srv/pricing.json")));

        std::fs::remove_dir_all(dir).ok();
    }
}
