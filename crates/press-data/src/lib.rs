//! # press-data: Pricing Table Provider
//!
//! Loads [`press_core::PricingTables`] and decides when pricing may run.
//!
//! ## Usage
//! ```rust,ignore
//! use press_data::{DataConfig, PricingDataManager};
//!
//! let manager = PricingDataManager::new(DataConfig::load_or_default(None));
//! manager.reload_or_default().await;
//!
//! let engine = manager.engine().await?;
//! let breakdown = engine.price(&configuration)?;
//! ```
//!
//! ## Modules
//! - [`config`]: `press.toml` + `PRESS_*` environment overrides
//! - [`loader`]: JSON tables file → validated `PricingTables`
//! - [`manager`]: snapshot cache and readiness gate
//! - [`error`]: `DataError`

pub mod config;
pub mod error;
pub mod loader;
pub mod manager;

pub use config::{DataConfig, TableSettings, TableSource};
pub use error::{DataError, DataResult};
pub use loader::{load_tables, load_tables_or_default, read_tables, write_tables};
pub use manager::{PricingDataManager, PricingSnapshot};
