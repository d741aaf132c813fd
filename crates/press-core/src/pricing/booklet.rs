//! Saddle-stitched booklets.
//!
//! ```text
//! regular cover:  1 cover sheet + (pages − 4) / 4 text sheets
//! self cover:     0 cover sheets + pages / 4 text sheets
//!
//! trim ≤ 6.5" × 9"  → two booklets per sheet set (multi-up 2)
//! ```

use super::{resolve_copies, CostComponents, CostStrategy, PricingContext, LETTER};
use crate::error::{PricingResult, ValidationError};
use crate::types::PriceBreakdown;
use crate::validation::SELF_COVER;

pub(crate) struct SaddleStitchBooklet;

/// Cover and text sheets per booklet.
pub(crate) fn sheets_per_booklet(pages: u32, self_cover: bool) -> (u32, u32) {
    if self_cover {
        (0, pages.div_ceil(4))
    } else {
        (1, pages.saturating_sub(4).div_ceil(4))
    }
}

impl CostStrategy for SaddleStitchBooklet {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let tables = ctx.tables;
        let formula = &tables.formula;
        let config = ctx.config;
        let product = ctx.product();

        let pages = config.finishing.pages.ok_or_else(|| ValidationError::Required {
            field: "pages".to_string(),
        })?;
        let self_cover = config.paper.cover.as_deref() == Some(SELF_COVER);

        let text = ctx.paper(config.paper.text.as_deref(), "text")?;
        let text_cost = text.cost_per_sheet()?;
        let (cover_cost, cover_name) = if self_cover {
            (text_cost, "Self Cover".to_string())
        } else {
            let cover = ctx.paper(config.paper.cover.as_deref(), "cover")?;
            (cover.cost_per_sheet()?, cover.display_name.clone())
        };

        let (width, height) = ctx.size_or(LETTER)?;
        let label = config
            .dimensions
            .as_ref()
            .map(|d| d.label())
            .unwrap_or_else(|| "8.5x11".to_string());
        let imposition = resolve_copies(tables, product, &label, width, height).ok();

        let multi_up = if width <= tables.booklet.multi_up_max_width
            && height <= tables.booklet.multi_up_max_height
        {
            2.0
        } else {
            1.0
        };

        let (cover_sheets, text_sheets) = sheets_per_booklet(pages, self_cover);
        let sheets = (cover_sheets + text_sheets) as f64;
        let (cover_sheets, text_sheets) = (cover_sheets as f64, text_sheets as f64);

        let clicks = sheets / multi_up * formula.clicks_for(config.sides());
        let material_per_booklet = (cover_sheets * cover_cost / multi_up
            + text_sheets * text_cost / multi_up
            + clicks)
            * formula.bound_material_markup;

        let labor = &tables.finishing.booklet;
        let creasing = if self_cover { 0.0 } else { labor.cover_creasing };
        let finishing_per_booklet = labor.base_labor + creasing + labor.binding_per_sheet * text_sheets;

        let q = ctx.quantity() as f64;
        let press_sheets = q * sheets / multi_up;

        let mut parts = CostComponents {
            setup: formula.setup_fee * 2.0 + tables.booklet.setup_per_page * pages as f64,
            finishing_setup: formula.finishing_setup_fee,
            production: formula.production_cost(product, press_sheets),
            material: q * material_per_booklet,
            finishing: q * finishing_per_booklet,
            ..Default::default()
        };
        parts.details.sheets_required = Some(press_sheets.ceil() as u32);
        if let Some((copies, result)) = imposition {
            parts.details.copies_per_sheet = Some(copies);
            parts.details.imposition = result;
        }
        parts.details.materials_used = vec![cover_name, text.display_name.clone()];
        parts.details.efficiency_exponent = Some(formula.exponent_for(product));

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEngine;
    use crate::types::{FinishingOptions, PaperSelection, ProductConfiguration, ProductType};

    fn booklet(size: &str, cover: &str, pages: u32, quantity: u32) -> ProductConfiguration {
        ProductConfiguration::new(ProductType::Booklets, quantity)
            .with_size(size)
            .with_paper(PaperSelection::cover_and_text(cover, "LYNO416FSC"))
            .with_finishing(FinishingOptions {
                pages: Some(pages),
                ..Default::default()
            })
    }

    #[test]
    fn test_sheet_counts() {
        assert_eq!(sheets_per_booklet(16, false), (1, 3));
        assert_eq!(sheets_per_booklet(16, true), (0, 4));
        assert_eq!(sheets_per_booklet(8, false), (1, 1));
    }

    #[test]
    fn test_letter_booklet_components() {
        let engine = PricingEngine::with_default_tables();
        let b = engine.price(&booklet("8.5x11", "LYNOC76FSC", 16, 100)).unwrap();

        // 15 × 2 + 2 × 16
        assert_eq!(b.setup_cost, 62.0);
        assert_eq!(b.finishing_setup_cost, 15.0);
        // 0.25 + 0.10 + 0.05 × 3 per booklet
        assert!((b.finishing_cost - 50.0).abs() < 1e-9);
        // (0.22408 + 3 × 0.11397 + 4 × 0.10) × 1.25 per booklet
        let per = (0.22408 + 3.0 * 0.11397 + 0.4) * 1.25;
        assert!((b.material_cost - per * 100.0).abs() < 1e-9);
        assert_eq!(b.details.sheets_required, Some(400));
    }

    #[test]
    fn test_half_letter_prints_two_up() {
        let engine = PricingEngine::with_default_tables();
        let letter = engine.price(&booklet("8.5x11", "LYNOC76FSC", 16, 100)).unwrap();
        let half = engine.price(&booklet("5.5x8.5", "LYNOC76FSC", 16, 100)).unwrap();
        assert!((half.material_cost * 2.0 - letter.material_cost).abs() < 1e-9);
        assert_eq!(half.details.sheets_required, Some(200));
        assert!(half.production_cost < letter.production_cost);
    }

    #[test]
    fn test_self_cover_skips_creasing() {
        let engine = PricingEngine::with_default_tables();
        let b = engine.price(&booklet("8.5x11", SELF_COVER, 16, 100)).unwrap();
        // 0.25 + 0.05 × 4 per booklet
        assert!((b.finishing_cost - 45.0).abs() < 1e-9);
        assert_eq!(b.details.materials_used[0], "Self Cover");
    }
}
