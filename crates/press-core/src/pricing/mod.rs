//! # Pricing Engine
//!
//! Turns a [`ProductConfiguration`] into a [`PriceBreakdown`].
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PricingEngine::price                           │
//! │                                                                         │
//! │  ProductConfiguration                                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate_configuration ──── Err ───► PricingError (no breakdown)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  product_type.family() ──► &'static dyn CostStrategy                    │
//! │        │                                                                │
//! │        ├── SheetFormula  ── formula.rs       (setup + q^e·k + M + F)    │
//! │        ├── Booklet       ── booklet.rs       (multi-up saddle stitch)   │
//! │        ├── Notebook/Notepad/PerfectBound ── bound.rs                    │
//! │        ├── LargeFormat   ── large_format.rs  (sq ft × rate × ladder)    │
//! │        ├── Sticker       ── sticker.rs       (sq ft or supplier blend)  │
//! │        ├── Envelope      ── envelope.rs      (unit + impression)        │
//! │        └── Promotional/Apparel/ToteBag ── promotional.rs                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  CostComponents::finish   subtotal = Σ costs − discount                 │
//! │                           total    = subtotal × rush                    │
//! │                           unit     = total / quantity                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every strategy is a pure function of the configuration and the tables.

mod booklet;
mod bound;
mod envelope;
mod formula;
mod large_format;
mod promotional;
mod sticker;

use std::sync::Arc;
use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::imposition::calculate_imposition;
use crate::tables::{PaperStock, PricingTables};
use crate::types::{
    Dimensions, ImpositionResult, LineItem, PriceBreakdown, PricingDetails, ProductConfiguration,
    ProductFamily, ProductType, VolumeDiscount,
};
use crate::validation::validate_configuration;

/// Trim size bound products assume when none is given.
pub(crate) const LETTER: (f64, f64) = (8.5, 11.0);

// =============================================================================
// Strategy Seam
// =============================================================================

/// Inputs every strategy sees.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub config: &'a ProductConfiguration,
    pub tables: &'a PricingTables,
}

impl<'a> PricingContext<'a> {
    pub fn new(config: &'a ProductConfiguration, tables: &'a PricingTables) -> Self {
        PricingContext { config, tables }
    }

    pub fn product(&self) -> ProductType {
        self.config.product_type
    }

    pub fn quantity(&self) -> u32 {
        self.config.quantity
    }

    /// Rush multiplier for the configured tier from the standard table.
    pub fn rush_multiplier(&self) -> f64 {
        self.tables.rush.multiplier(self.config.rush_tier)
    }

    /// The configured dimensions; missing ones are a validation failure.
    pub fn dimensions(&self) -> PricingResult<&'a Dimensions> {
        self.config.dimensions.as_ref().ok_or_else(|| {
            crate::error::ValidationError::Required {
                field: "dimensions".to_string(),
            }
            .into()
        })
    }

    /// Resolved width and height, or `default` when none were given.
    pub fn size_or(&self, default: (f64, f64)) -> PricingResult<(f64, f64)> {
        match &self.config.dimensions {
            Some(dims) => Ok(dims.resolve()?),
            None => Ok(default),
        }
    }

    /// Catalog entry for a selected paper code.
    pub fn paper(&self, code: Option<&str>, field: &str) -> PricingResult<&'a PaperStock> {
        let code = code.map(str::trim).filter(|c| !c.is_empty()).ok_or_else(|| {
            PricingError::from(crate::error::ValidationError::Required {
                field: field.to_string(),
            })
        })?;
        self.tables.paper(code)
    }
}

/// One cost formula, shared by every product in a [`ProductFamily`].
pub trait CostStrategy: Send + Sync {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown>;
}

fn strategy_for(family: ProductFamily) -> &'static dyn CostStrategy {
    match family {
        ProductFamily::SheetFormula => &formula::SheetFormula,
        ProductFamily::Booklet => &booklet::SaddleStitchBooklet,
        ProductFamily::Notebook => &bound::Notebook,
        ProductFamily::Notepad => &bound::Notepad,
        ProductFamily::PerfectBound => &bound::PerfectBound,
        ProductFamily::LargeFormat => &large_format::LargeFormat,
        ProductFamily::Sticker => &sticker::Sticker,
        ProductFamily::Envelope => &envelope::Envelope,
        ProductFamily::Promotional => &promotional::SupplierBrackets,
        ProductFamily::Apparel => &promotional::Apparel,
        ProductFamily::ToteBag => &promotional::ToteBag,
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices configurations against one set of tables.
///
/// Cheap to clone; clones share the tables.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    tables: Arc<PricingTables>,
}

impl PricingEngine {
    pub fn new(tables: Arc<PricingTables>) -> Self {
        PricingEngine { tables }
    }

    /// An engine over the shipped catalog.
    pub fn with_default_tables() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }

    pub fn tables(&self) -> &Arc<PricingTables> {
        &self.tables
    }

    /// Validates `config`, then prices it with its family's strategy.
    pub fn price(&self, config: &ProductConfiguration) -> PricingResult<PriceBreakdown> {
        validate_configuration(config, &self.tables)?;
        let ctx = PricingContext::new(config, &self.tables);
        let breakdown = strategy_for(config.product_type.family()).price(&ctx)?;
        debug!(
            product = %config.product_type,
            quantity = config.quantity,
            total = breakdown.total_cost,
            "Priced configuration"
        );
        Ok(breakdown)
    }
}

// =============================================================================
// Shared Building Blocks
// =============================================================================

/// Cost fields a strategy fills in before the common totals are computed.
#[derive(Debug, Clone, Default)]
pub(crate) struct CostComponents {
    pub setup: f64,
    pub finishing_setup: f64,
    pub production: f64,
    pub material: f64,
    pub finishing: f64,
    pub line_items: Vec<LineItem>,
    pub discount: Option<VolumeDiscount>,
    pub details: PricingDetails,
}

impl CostComponents {
    pub fn line_item(&mut self, label: &str, amount: f64) {
        self.line_items.push(LineItem {
            label: label.to_string(),
            amount,
        });
    }

    /// Records a ladder discount of `rate` taken off `basis` dollars.
    pub fn apply_discount(&mut self, rate: f64, basis: f64) {
        if rate > 0.0 {
            self.discount = Some(VolumeDiscount {
                rate,
                savings: basis * rate,
            });
        }
    }

    /// Pre-rush subtotal: every cost, minus any volume discount.
    pub fn subtotal(&self) -> f64 {
        let items: f64 = self.line_items.iter().map(|i| i.amount).sum();
        let savings = self.discount.map(|d| d.savings).unwrap_or(0.0);
        self.setup + self.finishing_setup + self.production + self.material + self.finishing
            + items
            - savings
    }

    pub fn finish(self, ctx: &PricingContext<'_>, rush_multiplier: f64) -> PriceBreakdown {
        let subtotal = self.subtotal();
        let total_cost = subtotal * rush_multiplier;
        PriceBreakdown {
            product_type: ctx.product(),
            quantity: ctx.quantity(),
            setup_cost: self.setup,
            finishing_setup_cost: self.finishing_setup,
            production_cost: self.production,
            material_cost: self.material,
            finishing_cost: self.finishing,
            line_items: self.line_items,
            volume_discount: self.discount,
            subtotal,
            rush_multiplier,
            total_cost,
            unit_price: total_cost / ctx.quantity() as f64,
            details: self.details,
        }
    }
}

/// Copies per sheet for `width × height` pieces.
///
/// Dynamic imposition first; when the geometry is rejected, the product's
/// fallback table keyed by the size label.
pub(crate) fn resolve_copies(
    tables: &PricingTables,
    product: ProductType,
    label: &str,
    width: f64,
    height: f64,
) -> PricingResult<(u32, Option<ImpositionResult>)> {
    match calculate_imposition(width, height) {
        Ok(result) if result.copies_per_sheet > 0 => Ok((result.copies_per_sheet, Some(result))),
        Ok(_) => fallback_copies(tables, product, label).ok_or_else(|| {
            PricingError::ImpositionUnavailable {
                size: label.to_string(),
            }
        }),
        Err(err) => fallback_copies(tables, product, label).ok_or(err),
    }
}

fn fallback_copies(
    tables: &PricingTables,
    product: ProductType,
    label: &str,
) -> Option<(u32, Option<ImpositionResult>)> {
    let copies = tables.fallback_copies(product, label)?;
    debug!(product = %product, size = label, copies, "Using fallback imposition table");
    Some((copies, None))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinishingOptions, RushTier};

    fn brochure(quantity: u32) -> ProductConfiguration {
        ProductConfiguration::new(ProductType::Brochures, quantity)
            .with_size("8.5x11")
            .with_stock("LYNO416FSC")
            .with_finishing(FinishingOptions {
                fold_type: Some("bifold".to_string()),
                ..Default::default()
            })
    }

    #[test]
    fn test_engine_rejects_invalid_before_pricing() {
        let engine = PricingEngine::with_default_tables();
        let result = engine.price(&brochure(10));
        assert!(matches!(result, Err(PricingError::QuantityOutOfRange { .. })));
    }

    #[test]
    fn test_totals_follow_components() {
        let engine = PricingEngine::with_default_tables();
        let b = engine.price(&brochure(250).with_rush(RushTier::NextDay)).unwrap();
        let sum = b.setup_cost
            + b.finishing_setup_cost
            + b.production_cost
            + b.material_cost
            + b.finishing_cost;
        assert!((b.subtotal - sum).abs() < 1e-9);
        assert_eq!(b.rush_multiplier, 1.5);
        assert!((b.total_cost - b.subtotal * 1.5).abs() < 1e-9);
        assert!((b.unit_price - b.total_cost / 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_discount_reduces_subtotal() {
        let mut parts = CostComponents {
            material: 200.0,
            ..Default::default()
        };
        parts.apply_discount(0.10, 200.0);
        parts.line_item("Binding", 5.0);
        assert!((parts.subtotal() - 185.0).abs() < 1e-9);

        let mut none = CostComponents::default();
        none.apply_discount(0.0, 100.0);
        assert!(none.discount.is_none());
    }

    #[test]
    fn test_resolve_copies_prefers_geometry() {
        let tables = PricingTables::default();
        let (copies, result) =
            resolve_copies(&tables, ProductType::Flyers, "8.5x11", 8.5, 11.0).unwrap();
        assert_eq!(copies, 2);
        assert!(result.is_some());
    }

    #[test]
    fn test_resolve_copies_falls_back_to_table() {
        let mut tables = PricingTables::default();
        tables
            .imposition
            .entry(ProductType::Flyers)
            .or_default()
            .insert("12x20".to_string(), 1);
        let (copies, result) =
            resolve_copies(&tables, ProductType::Flyers, "12x20", 12.0, 20.0).unwrap();
        assert_eq!(copies, 1);
        assert!(result.is_none());

        let err = resolve_copies(&tables, ProductType::Postcards, "20x20", 20.0, 20.0);
        assert!(matches!(err, Err(PricingError::DimensionTooLarge { .. })));
    }

    #[test]
    fn test_engine_is_send_sync_and_shares_tables() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PricingEngine>();

        let engine = PricingEngine::with_default_tables();
        let clone = engine.clone();
        assert!(Arc::ptr_eq(engine.tables(), clone.tables()));
    }
}
