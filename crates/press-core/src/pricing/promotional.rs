//! Supplier-sourced products: magnets, promo stickers, apparel, tote bags.
//!
//! ## Price Flow
//! ```text
//! magnets / promo stickers
//!   supplier = curve(size).value_at(quantity)      clamp ◄─┼─► extrapolate
//!   price    = supplier × (1 + markup) + setup fee
//!
//! apparel
//!   standard pcs × (garment + print) + extended pcs × (garment 2XL+ + print)
//!   + decoration setup, then ladder on piece count
//!
//! tote bags
//!   (bag + print × print-size multiplier) × quantity + decoration setup
//! ```
//!
//! All three use the promotional rush table.

use super::{CostComponents, CostStrategy, PricingContext};
use crate::error::{PricingError, PricingResult, ValidationError};
use crate::types::PriceBreakdown;

fn required(field: &str) -> PricingError {
    ValidationError::Required {
        field: field.to_string(),
    }
    .into()
}

// =============================================================================
// Bracket-Priced Items
// =============================================================================

pub(crate) struct SupplierBrackets;

impl CostStrategy for SupplierBrackets {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let promo = &ctx.tables.promo;
        let category = promo.category(ctx.product())?;
        let size = ctx.dimensions()?.label();
        let curve = promo.curve(category, &size)?;

        let supplier_cost = curve.value_at(ctx.quantity() as f64);
        let markup = promo.markup_for(category);

        let mut parts = CostComponents {
            setup: category.setup_fee,
            material: supplier_cost * (1.0 + markup),
            ..Default::default()
        };
        parts.details.supplier_cost = Some(supplier_cost);
        parts.details.markup_rate = Some(markup);

        let rush = ctx.tables.rush.promo_multiplier(ctx.config.rush_tier);
        Ok(parts.finish(ctx, rush))
    }
}

// =============================================================================
// Apparel
// =============================================================================

pub(crate) struct Apparel;

impl CostStrategy for Apparel {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let promo = &ctx.tables.promo;
        let finishing = &ctx.config.finishing;

        let garment_code = finishing.garment.as_deref().ok_or_else(|| required("garment"))?;
        let garment = promo.apparel.garments.get(garment_code).ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("unknown garment: {garment_code}"))
        })?;
        let decoration = promo.decoration(
            finishing
                .decoration
                .as_deref()
                .ok_or_else(|| required("decoration"))?,
        )?;

        let quantity = ctx.quantity();
        let extended = finishing.extended_quantity.unwrap_or(0).min(quantity);
        let standard = quantity - extended;

        let mut parts = CostComponents {
            setup: decoration.setup_fee,
            material: standard as f64 * garment.standard + extended as f64 * garment.extended,
            production: quantity as f64 * decoration.printing_cost,
            ..Default::default()
        };
        let before_discount = parts.subtotal();
        parts.apply_discount(promo.apparel.discount.rate_for(quantity as f64), before_discount);

        let rush = ctx.tables.rush.apparel_multiplier(ctx.config.rush_tier);
        Ok(parts.finish(ctx, rush))
    }
}

// =============================================================================
// Tote Bags
// =============================================================================

pub(crate) struct ToteBag;

impl CostStrategy for ToteBag {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let promo = &ctx.tables.promo;
        let totes = &promo.tote_bags;
        let finishing = &ctx.config.finishing;

        let decoration = promo.decoration(
            finishing
                .decoration
                .as_deref()
                .ok_or_else(|| required("decoration"))?,
        )?;
        let print_size = finishing
            .print_size
            .as_deref()
            .ok_or_else(|| required("print_size"))?;
        let multiplier = totes.print_size_multipliers.get(print_size).ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("unsupported print size: {print_size}"))
        })?;

        let q = ctx.quantity() as f64;
        let parts = CostComponents {
            setup: decoration.setup_fee,
            material: q * totes.bag_cost,
            production: q * decoration.printing_cost * multiplier,
            ..Default::default()
        };

        let rush = ctx.tables.rush.promo_multiplier(ctx.config.rush_tier);
        Ok(parts.finish(ctx, rush))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
