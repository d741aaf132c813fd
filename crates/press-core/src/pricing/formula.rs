//! Sheet-fed products priced by the standard formula.
//!
//! ```text
//! production     = quantity^e × k
//! material       = quantity × (paper + clicks) × markup / copiesPerSheet
//! finishing      = quantity × f
//! finishingSetup = F_setup if f > 0
//! ```

use tracing::debug;

use super::{resolve_copies, CostComponents, CostStrategy, PricingContext};
use crate::error::PricingResult;
use crate::imposition::calculate_sheets_required;
use crate::tables::{PaperKind, PaperStock, PricingTables};
use crate::types::{FinishingOptions, PriceBreakdown, ProductType};

/// Table tents print on a sheet 2.5× the finished height before folding.
const TABLE_TENT_FOLD_FACTOR: f64 = 2.5;

pub(crate) struct SheetFormula;

impl CostStrategy for SheetFormula {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let tables = ctx.tables;
        let formula = &tables.formula;
        let product = ctx.product();
        let quantity = ctx.quantity();

        let paper = ctx.paper(ctx.config.paper.stock.as_deref(), "paper")?;
        let paper_cost = paper.cost_per_sheet()?;

        let dims = ctx.dimensions()?;
        let (width, height) = dims.resolve()?;
        let imposed_height = if product == ProductType::TableTents {
            height * TABLE_TENT_FOLD_FACTOR
        } else {
            height
        };
        let (copies, imposition) =
            resolve_copies(tables, product, &dims.label(), width, imposed_height)?;

        let per_piece = finishing_per_piece(tables, product, paper, &ctx.config.finishing)?;
        let clicks = formula.clicks_for(ctx.config.sides());
        let q = quantity as f64;

        let mut parts = CostComponents {
            setup: formula.setup_fee,
            finishing_setup: if per_piece > 0.0 {
                formula.finishing_setup_fee
            } else {
                0.0
            },
            production: formula.production_cost(product, q),
            material: q * (paper_cost + clicks) * formula.material_markup / copies as f64,
            finishing: q * per_piece,
            ..Default::default()
        };
        parts.details.sheets_required = Some(calculate_sheets_required(quantity, copies));
        parts.details.copies_per_sheet = Some(copies);
        parts.details.imposition = imposition;
        parts.details.materials_used = vec![paper.display_name.clone()];
        parts.details.efficiency_exponent = Some(formula.exponent_for(product));

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}

/// Finishing cost `f` for one piece.
fn finishing_per_piece(
    tables: &PricingTables,
    product: ProductType,
    paper: &PaperStock,
    options: &FinishingOptions,
) -> PricingResult<f64> {
    let finishing = &tables.finishing;
    let mut f = 0.0;

    if matches!(product, ProductType::Brochures | ProductType::FoldedPrints) {
        if let Some(fold) = options.fold_type.as_deref().filter(|f| *f != "none") {
            f += finishing.fold_cost(fold)?;
        }
    }

    if matches!(product, ProductType::Postcards | ProductType::BusinessCards) {
        if let Some(coating) = options.coating.as_deref().filter(|c| *c != "none") {
            f += finishing.coating_cost(coating)?;
        }
    }

    if product == ProductType::TableTents {
        f += finishing.scoring;
    }

    if product == ProductType::NameTags && options.perforation {
        f += finishing.perforation;
    }

    let punchable = matches!(
        product,
        ProductType::FlatPrints | ProductType::NameTags | ProductType::Bookmarks | ProductType::Flyers
    );
    if punchable && (options.hole_punch || options.lanyard) {
        if paper.kind == PaperKind::AdhesiveStock {
            debug!(product = %product, paper = %paper.code, "Skipping hole punch and lanyard on adhesive stock");
        } else {
            if options.hole_punch {
                f += finishing.hole_punch;
            }
            if options.lanyard {
                f += finishing.lanyard;
            }
        }
    }

    Ok(f)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::pricing::PricingEngine;
    use crate::types::{PrintingSides, ProductConfiguration};

    fn engine() -> PricingEngine {
        PricingEngine::with_default_tables()
    }

    fn folded(fold: &str) -> FinishingOptions {
        FinishingOptions {
            fold_type: Some(fold.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_brochure_reference_quote() {
        let config = ProductConfiguration::new(ProductType::Brochures, 100)
            .with_size("8.5x11")
            .with_stock("LYNO416FSC")
            .with_finishing(folded("bifold"));
        let b = engine().price(&config).unwrap();

        assert_eq!(b.setup_cost, 15.0);
        assert_eq!(b.finishing_setup_cost, 15.0);
        assert!((b.production_cost - 47.434).abs() < 0.001);
        assert!((b.material_cost - 16.04775).abs() < 1e-9);
        assert!((b.finishing_cost - 10.0).abs() < 1e-9);
        assert!((b.subtotal - 103.48).abs() < 0.005);
        assert_eq!(b.details.copies_per_sheet, Some(2));
        assert_eq!(b.details.sheets_required, Some(50));
    }

    #[test]
    fn test_no_finishing_means_no_finishing_setup() {
        let config = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_size("8.5x11")
            .with_stock("LYNO416FSC");
        let b = engine().price(&config).unwrap();
        assert_eq!(b.finishing_cost, 0.0);
        assert_eq!(b.finishing_setup_cost, 0.0);
    }

    #[test]
    fn test_single_sided_halves_clicks() {
        let base = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_size("8.5x11")
            .with_stock("LYNO416FSC");
        let double = engine().price(&base).unwrap();
        let single = engine()
            .price(&base.with_sides(PrintingSides::SingleSided))
            .unwrap();
        // 100 pieces, 2-up, markup 1.5: 0.05 fewer per sheet → 3.75 less
        assert!((double.material_cost - single.material_cost - 3.75).abs() < 1e-9);
    }

    #[test]
    fn test_table_tent_imposes_unfolded_height() {
        let config = ProductConfiguration::new(ProductType::TableTents, 100)
            .with_size("4x6")
            .with_stock("LYNOC95FSC");
        let b = engine().price(&config).unwrap();
        // 4.25 x 15.25 → 2 across, 1 down
        assert_eq!(b.details.copies_per_sheet, Some(2));
        assert!((b.finishing_cost - 8.0).abs() < 1e-9);
        assert_eq!(b.finishing_setup_cost, 15.0);
    }

    #[test]
    fn test_coating_on_postcards() {
        let config = ProductConfiguration::new(ProductType::Postcards, 500)
            .with_size("4x6")
            .with_stock("LYNOC95FSC")
            .with_finishing(FinishingOptions {
                coating: Some("soft-touch".to_string()),
                ..Default::default()
            });
        let b = engine().price(&config).unwrap();
        assert!((b.finishing_cost - 30.0).abs() < 1e-9);

        let unknown = config.clone().with_finishing(FinishingOptions {
            coating: Some("glitter".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            engine().price(&unknown),
            Err(PricingError::ConfigurationInvalid(_))
        ));
    }

    #[test]
    fn test_hole_punch_and_lanyard_skip_adhesive() {
        let options = FinishingOptions {
            hole_punch: true,
            lanyard: true,
            ..Default::default()
        };
        let on_cover = ProductConfiguration::new(ProductType::NameTags, 100)
            .with_size("3x4")
            .with_stock("LYNOC95FSC")
            .with_finishing(options.clone());
        let b = engine().price(&on_cover).unwrap();
        assert!((b.finishing_cost - 130.0).abs() < 1e-9);

        let on_sticker = on_cover.with_stock("PAC51319WP");
        let b = engine().price(&on_sticker).unwrap();
        assert_eq!(b.finishing_cost, 0.0);
        assert_eq!(b.finishing_setup_cost, 0.0);
    }

    #[test]
    fn test_unknown_paper_and_wrong_kind() {
        let config = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_size("8.5x11")
            .with_stock("NOPE");
        assert!(matches!(
            engine().price(&config),
            Err(PricingError::MaterialNotFound { .. })
        ));

        let roll = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_size("8.5x11")
            .with_stock("RMPS002");
        assert!(matches!(
            engine().price(&roll),
            Err(PricingError::ConfigurationInvalid(_))
        ));
    }

    #[test]
    fn test_oversized_flyer_is_rejected() {
        let config = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_custom_size(13.0, 19.0)
            .with_stock("LYNO416FSC");
        assert!(matches!(
            engine().price(&config),
            Err(PricingError::DimensionTooLarge { .. })
        ));
    }
}
