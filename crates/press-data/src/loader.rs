//! # Table Loader
//!
//! Reads `PricingTables` from the configured source.
//!
//! ```text
//! DataConfig ──► source = static ──► PricingTables::default()
//!            └─► source = file   ──► read JSON ──► serde ──► validate()
//!                                          │
//!                                    any failure (load_tables_or_default)
//!                                          ▼
//!                                 warn! + PricingTables::default()
//! ```
//!
//! Override files may be partial: every table section missing from the JSON
//! keeps its shipped value.

use std::path::Path;

use press_core::PricingTables;
use tracing::{info, warn};

use crate::config::{DataConfig, TableSource};
use crate::error::{DataError, DataResult};

/// Reads and validates a JSON tables file.
pub fn read_tables(path: &Path) -> DataResult<PricingTables> {
    let contents = std::fs::read_to_string(path)?;
    let tables: PricingTables =
        serde_json::from_str(&contents).map_err(|source| DataError::TablesParse {
            path: path.to_path_buf(),
            source,
        })?;
    tables.validate()?;

    info!(
        ?path,
        papers = tables.papers.len(),
        "Loaded pricing tables from file"
    );
    Ok(tables)
}

/// Tables for `config`, failing on any file or validation problem.
pub fn load_tables(config: &DataConfig) -> DataResult<(TableSource, PricingTables)> {
    config.validate()?;
    match config.tables_path() {
        Some(path) => Ok((TableSource::File, read_tables(path)?)),
        None => {
            info!("Using built-in pricing tables");
            Ok((TableSource::Static, PricingTables::default()))
        }
    }
}

/// Like [`load_tables`], but falls back to the built-in tables.
pub fn load_tables_or_default(config: &DataConfig) -> (TableSource, PricingTables) {
    load_tables(config).unwrap_or_else(|e| {
        warn!("Failed to load pricing tables: {}. Using built-in tables.", e);
        (TableSource::Static, PricingTables::default())
    })
}

/// Writes `tables` as pretty JSON, the same shape [`read_tables`] accepts.
pub fn write_tables(path: &Path, tables: &PricingTables) -> DataResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(tables)?)?;
    Ok(())
}
