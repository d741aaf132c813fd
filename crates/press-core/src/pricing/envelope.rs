//! Pre-made envelopes with a printed imprint.
//!
//! `unit = costPerUnit × stockMarkup + impressionRate(print, quantity)`

use super::{CostComponents, CostStrategy, PricingContext};
use crate::error::PricingResult;
use crate::tables::EnvelopeConfig;
use crate::types::{EnvelopePrint, PriceBreakdown};

pub(crate) struct Envelope;

impl CostStrategy for Envelope {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let settings = &ctx.tables.envelopes;
        let stock = ctx.paper(ctx.config.paper.stock.as_deref(), "envelope")?;
        let unit_cost = stock.cost_per_unit()?;

        let quantity = ctx.quantity();
        let tiers = match ctx.config.finishing.envelope_print.unwrap_or_default() {
            EnvelopePrint::Color => &settings.color,
            EnvelopePrint::BlackWhite => &settings.black_white,
        };
        let impression = EnvelopeConfig::impression_rate(tiers, quantity);
        let q = quantity as f64;

        let mut parts = CostComponents {
            material: q * unit_cost * settings.stock_markup,
            production: q * impression,
            ..Default::default()
        };
        parts.details.materials_used = vec![stock.display_name.clone()];

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}
