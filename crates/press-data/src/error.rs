//! # Data Layer Errors
//!
//! ## Error Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Data Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Files         │  │     Pricing             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Io             │  │  Pricing(PricingError)  │ │
//! │  │  ConfigParse    │  │  TablesParse    │  │  (incl. table checks)   │ │
//! │  │  ConfigSave     │  │  MissingPath    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use press_core::PricingError;
use thiserror::Error;

/// Result type alias for data layer operations.
pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The loader config has an invalid value.
    #[error("Invalid data configuration: {0}")]
    InvalidConfig(String),

    /// `press.toml` is not valid TOML for [`crate::DataConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The loader config could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSave(String),

    // =========================================================================
    // Table File Errors
    // =========================================================================
    /// File source selected but no path given.
    ///
    /// ## When This Occurs
    /// - `source = "file"` without `path` and no `PRESS_TABLES_PATH`
    #[error("Table source is 'file' but no tables path is configured")]
    MissingTablesPath,

    /// The tables file could not be parsed.
    #[error("Failed to parse pricing tables {path}: {source}")]
    TablesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a configuration or breakdown failed.
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    /// Engine or table validation error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl DataError {
    /// Returns true when the caller can fall back to the shipped tables.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DataError::Io(_)
                | DataError::TablesParse { .. }
                | DataError::MissingTablesPath
                | DataError::Pricing(PricingError::ConfigurationInvalid(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_errors_pass_through() {
        let err: DataError = PricingError::PricingDataUnavailable.into();
        assert_eq!(err.to_string(), "Pricing data is not loaded yet");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_bad_tables_are_recoverable() {
        let err: DataError =
            PricingError::ConfigurationInvalid("duplicate paper code X".to_string()).into();
        assert!(err.is_recoverable());
        assert!(DataError::MissingTablesPath.is_recoverable());
    }
}
