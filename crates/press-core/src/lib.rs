//! # press-core: Pure Pricing Logic for the Print Shop
//!
//! This crate prices every product the shop sells. It contains the
//! imposition geometry, the cost formulas and the table types, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Press Pricing Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Configurator UI / Cart                       │   │
//! │  │       ProductConfiguration ──► PriceBreakdown (ts-rs types)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              press-data (table provider, quote CLI)             │   │
//! │  │      loads PricingTables, gates on readiness, hands out engines │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Arc<PricingTables>                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ press-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ imposition │  │  pricing  │  │  tables   │  │ validation│  │   │
//! │  │   │ copies per │  │ strategy  │  │ papers,   │  │ required, │  │   │
//! │  │   │ sheet      │  │ per family│  │ constants │  │ ranges    │  │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • SAME INPUT → SAME BREAKDOWN            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`imposition`] - Copies per press sheet, sheets required, size suggestions
//! - [`pricing`] - The engine and one cost strategy per product family
//! - [`tables`] - Pricing data types plus the shipped catalog
//! - [`interpolation`] - Supplier bracket curves
//! - [`discount`] - Volume discount ladders
//! - [`validation`] - Configuration checks run before pricing
//! - [`money`] - Cent-rounded cart values
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use press_core::{FinishingOptions, PricingEngine, ProductConfiguration, ProductType};
//!
//! let engine = PricingEngine::with_default_tables();
//! let config = ProductConfiguration::new(ProductType::Brochures, 100)
//!     .with_size("8.5x11")
//!     .with_stock("LYNO416FSC")
//!     .with_finishing(FinishingOptions {
//!         fold_type: Some("bifold".to_string()),
//!         ..Default::default()
//!     });
//!
//! let breakdown = engine.price(&config).unwrap();
//! assert_eq!(breakdown.details.copies_per_sheet, Some(2));
//! assert_eq!(breakdown.quote().total.cents(), 10348);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod imposition;
pub mod interpolation;
pub mod money;
pub mod pricing;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{PricingError, PricingResult, ValidationError};
pub use money::{Money, Quote};
pub use pricing::PricingEngine;
pub use tables::PricingTables;
pub use types::*;
