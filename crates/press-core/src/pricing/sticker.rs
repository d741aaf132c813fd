//! Stickers: in-house per square foot, or premium die-cut from the supplier.

use tracing::debug;

use super::{CostComponents, CostStrategy, PricingContext};
use crate::error::{PricingError, PricingResult};
use crate::imposition::parse_size_code;
use crate::interpolation::{blend, BracketCurve};
use crate::tables::PricingTables;
use crate::types::{PriceBreakdown, ProductType, StickerProduction};

pub(crate) struct Sticker;

impl CostStrategy for Sticker {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let (width, height) = ctx.dimensions()?.resolve()?;
        match ctx.config.finishing.sticker_production.unwrap_or_default() {
            StickerProduction::Standard => standard(ctx, width, height),
            StickerProduction::Premium => premium(ctx, width, height),
        }
    }
}

/// `sqft × rate × quantity`, ladder on total square feet, plus setup.
fn standard(ctx: &PricingContext<'_>, width: f64, height: f64) -> PricingResult<PriceBreakdown> {
    let settings = &ctx.tables.stickers;
    let square_feet = width * height / 144.0;
    let quantity = ctx.quantity() as f64;
    let gross = square_feet * settings.price_per_sqft * quantity;

    let mut parts = CostComponents {
        setup: settings.setup_fee,
        production: gross,
        ..Default::default()
    };
    parts.apply_discount(settings.discount.rate_for(square_feet * quantity), gross);
    parts.details.square_feet = Some(square_feet);

    Ok(parts.finish(ctx, ctx.rush_multiplier()))
}

/// Supplier cost blended between the two catalog sizes around the area.
fn premium(ctx: &PricingContext<'_>, width: f64, height: f64) -> PricingResult<PriceBreakdown> {
    let tables = ctx.tables;
    let area = width * height;
    let quantity = ctx.quantity() as f64;

    let supplier_cost = supplier_cost_by_area(tables, area, quantity)?;
    let markup = tables.stickers.premium_markup;

    let mut parts = CostComponents {
        material: supplier_cost * (1.0 + markup),
        ..Default::default()
    };
    parts.details.square_feet = Some(area / 144.0);
    parts.details.supplier_cost = Some(supplier_cost);
    parts.details.markup_rate = Some(markup);

    Ok(parts.finish(ctx, tables.rush.promo_multiplier(ctx.config.rush_tier)))
}

/// Interpolates the promo sticker table by quantity, then by area.
pub(crate) fn supplier_cost_by_area(
    tables: &PricingTables,
    area: f64,
    quantity: f64,
) -> PricingResult<f64> {
    let promo = &tables.promo;
    let category = promo.category(ProductType::PromoStickers)?;

    let mut curves: Vec<(f64, BracketCurve)> = Vec::with_capacity(category.costs.len());
    for size in category.costs.keys() {
        let (w, h) = parse_size_code(size)?;
        curves.push((w * h, promo.curve(category, size)?));
    }
    curves.sort_by(|a, b| a.0.total_cmp(&b.0));

    let first = curves.first().ok_or_else(|| {
        PricingError::ConfigurationInvalid("no sticker sizes in the supplier table".to_string())
    })?;
    let last = curves.last().unwrap_or(first);

    let lower = curves
        .iter()
        .rev()
        .find(|(a, _)| *a <= area)
        .unwrap_or(first);
    let upper = curves.iter().find(|(a, _)| *a >= area).unwrap_or(last);

    if area < first.0 || area > last.0 {
        debug!(area, "Sticker area outside the supplier table, clamping to nearest size");
    }

    Ok(blend((&lower.1, lower.0), (&upper.1, upper.0), area, quantity))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEngine;
    use crate::types::{FinishingOptions, ProductConfiguration, RushTier};

    fn sticker(w: f64, h: f64, quantity: u32, production: StickerProduction) -> ProductConfiguration {
        ProductConfiguration::new(ProductType::Stickers, quantity)
            .with_custom_size(w, h)
            .with_finishing(FinishingOptions {
                sticker_production: Some(production),
                ..Default::default()
            })
    }

    #[test]
    fn test_standard_below_first_tier() {
        let engine = PricingEngine::with_default_tables();
        // 3x3 = 0.0625 sq ft × 100 = 6.25 sq ft
        let b = engine.price(&sticker(3.0, 3.0, 100, StickerProduction::Standard)).unwrap();
        assert!((b.production_cost - 75.0).abs() < 1e-9);
        assert_eq!(b.setup_cost, 30.0);
        assert!(b.volume_discount.is_none());
        assert!((b.subtotal - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_standard_discount_tier() {
        let engine = PricingEngine::with_default_tables();
        // 6x6 = 0.25 sq ft × 120 = 30 sq ft → 10%
        let b = engine.price(&sticker(6.0, 6.0, 120, StickerProduction::Standard)).unwrap();
        assert_eq!(b.volume_discount.map(|d| d.rate), Some(0.10));
        assert!((b.subtotal - (360.0 * 0.90 + 30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_premium_on_catalog_size() {
        let engine = PricingEngine::with_default_tables();
        let b = engine.price(&sticker(3.0, 3.0, 100, StickerProduction::Premium)).unwrap();
        assert_eq!(b.details.supplier_cost, Some(130.0));
        assert!((b.total_cost - 162.5).abs() < 1e-9);
    }

    #[test]
    fn test_premium_blends_between_sizes() {
        let tables = PricingTables::default();
        // 3x3 (9 sq in) → 130, 3.5x3.5 (12.25 sq in) → 147 at 100 pieces
        let mid = supplier_cost_by_area(&tables, (9.0 + 12.25) / 2.0, 100.0).unwrap();
        assert!((mid - 138.5).abs() < 1e-9);
        // below the smallest size clamps
        let tiny = supplier_cost_by_area(&tables, 1.0, 100.0).unwrap();
        assert_eq!(tiny, 98.0);
    }

    #[test]
    fn test_premium_uses_promotional_rush() {
        let engine = PricingEngine::with_default_tables();
        let b = engine
            .price(&sticker(3.0, 3.0, 100, StickerProduction::Premium).with_rush(RushTier::TwoDay))
            .unwrap();
        assert_eq!(b.rush_multiplier, 1.25);
    }
}
