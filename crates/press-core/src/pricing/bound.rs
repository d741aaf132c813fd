//! Notebooks, notepads and perfect-bound books.
//!
//! All three share the bound material markup and charge a finishing setup
//! on every order; they differ in how sheets are counted.
//!
//! ```text
//! notebook       cover 1/imp + text pages/(imp × sides)     + binding items
//! notepad        press sheets = quantity × sheets / imp     + backing board
//! perfect bound  ⌈(pages − 4) / (copies × sides)⌉ + 1 cover + glue labor
//! ```

use tracing::debug;

use super::{resolve_copies, CostComponents, CostStrategy, PricingContext, LETTER};
use crate::error::{PricingError, PricingResult, ValidationError};
use crate::imposition::calculate_imposition;
use crate::tables::PaperKind;
use crate::types::{PageContent, PriceBreakdown, PrintingSides};

fn required(field: &str) -> PricingError {
    ValidationError::Required {
        field: field.to_string(),
    }
    .into()
}

// =============================================================================
// Notebooks
// =============================================================================

pub(crate) struct Notebook;

impl CostStrategy for Notebook {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let tables = ctx.tables;
        let formula = &tables.formula;
        let config = ctx.config;
        let product = ctx.product();

        let pages = config.finishing.pages.ok_or_else(|| required("pages"))? as f64;
        let binding_type = config
            .finishing
            .binding_type
            .as_deref()
            .ok_or_else(|| required("binding_type"))?;
        let binding = tables.finishing.binding_rate(binding_type)?;

        let cover = ctx.paper(config.paper.cover.as_deref(), "cover")?;
        let text = ctx.paper(config.paper.text.as_deref(), "text")?;

        let defaults = &tables.notebook;
        let (width, height) = ctx.size_or((defaults.default_width, defaults.default_height))?;
        let (copies, imposition) = match calculate_imposition(width, height) {
            Ok(result) if result.copies_per_sheet > 0 => (result.copies_per_sheet, Some(result)),
            _ => {
                debug!(width, height, copies = defaults.fallback_imposition, "Notebook size does not impose, using fallback");
                (defaults.fallback_imposition.max(1), None)
            }
        };

        let sides = config.sides();
        let imp = copies as f64;
        let side_count = sides.count() as f64;
        let cover_sheets = 1.0 / imp;
        let text_sheets = pages / (imp * side_count);
        // cover always takes one click; text clicks are whole impressions
        let clicks = 1.0 + (text_sheets * side_count).round();

        let material_per_book = (cover_sheets * cover.cost_per_sheet()?
            + text_sheets * text.cost_per_sheet()?
            + clicks * formula.clicks_for(sides))
            * formula.bound_material_markup;

        let content = config.finishing.page_content.unwrap_or_default();
        let q = ctx.quantity() as f64;
        let press_sheets = q * (cover_sheets + text_sheets);

        let mut parts = CostComponents {
            setup: if content == PageContent::Blank {
                0.0
            } else {
                formula.setup_fee
            },
            finishing_setup: formula.finishing_setup_fee,
            production: formula.production_cost(product, press_sheets),
            material: q * material_per_book,
            ..Default::default()
        };
        parts.line_item("Binding hardware", q * binding.hardware);
        parts.line_item("Binding labor", q * binding.labor);
        parts.details.sheets_required = Some(press_sheets.ceil() as u32);
        parts.details.copies_per_sheet = Some(copies);
        parts.details.imposition = imposition;
        parts.details.materials_used = vec![cover.display_name.clone(), text.display_name.clone()];
        parts.details.efficiency_exponent = Some(formula.exponent_for(product));

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}

// =============================================================================
// Notepads
// =============================================================================

pub(crate) struct Notepad;

impl CostStrategy for Notepad {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let tables = ctx.tables;
        let formula = &tables.formula;
        let config = ctx.config;
        let product = ctx.product();

        let sheets = config.finishing.sheets.ok_or_else(|| required("sheets"))? as f64;
        let text = ctx.paper(config.paper.stock.as_deref(), "paper")?;
        let backing_code = config
            .paper
            .backing
            .as_deref()
            .unwrap_or(tables.notepad.default_backing.as_str());
        let backing = tables.paper(backing_code)?;

        let dims = ctx.dimensions()?;
        let (width, height) = dims.resolve()?;
        let (copies, imposition) = resolve_copies(tables, product, &dims.label(), width, height)?;

        let q = ctx.quantity() as f64;
        let imp = copies as f64;
        let press_sheets = q * sheets / imp;

        let text_per_pad = press_sheets * text.cost_per_sheet()? / q;
        let backing_per_pad = backing.cost_per_sheet()? / imp;
        let clicks_per_pad = press_sheets * formula.clicks_for(config.sides()) / q;
        let material_per_pad =
            (text_per_pad + backing_per_pad + clicks_per_pad) * formula.bound_material_markup;

        let content = config.finishing.page_content.unwrap_or_default();

        let mut parts = CostComponents {
            setup: if content == PageContent::Custom {
                formula.setup_fee
            } else {
                0.0
            },
            finishing_setup: formula.finishing_setup_fee,
            production: formula.production_cost(product, press_sheets),
            material: q * material_per_pad,
            finishing: q * sheets * tables.finishing.padding_per_sheet,
            ..Default::default()
        };
        parts.details.sheets_required = Some(press_sheets.ceil() as u32);
        parts.details.copies_per_sheet = Some(copies);
        parts.details.imposition = imposition;
        parts.details.materials_used = vec![text.display_name.clone(), backing.display_name.clone()];
        parts.details.efficiency_exponent = Some(formula.exponent_for(product));

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}

// =============================================================================
// Perfect-Bound Books
// =============================================================================

pub(crate) struct PerfectBound;

impl CostStrategy for PerfectBound {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let tables = ctx.tables;
        let formula = &tables.formula;
        let settings = &tables.perfect_bound;
        let config = ctx.config;
        let product = ctx.product();

        let pages = config.finishing.pages.ok_or_else(|| required("pages"))?;

        let text = ctx.paper(config.paper.text.as_deref(), "text")?;
        if text.kind != PaperKind::TextStock {
            return Err(PricingError::ConfigurationInvalid(format!(
                "{} is not a text stock",
                text.display_name
            )));
        }
        let cover = ctx.paper(config.paper.cover.as_deref(), "cover")?;
        if cover.kind != PaperKind::CoverStock {
            return Err(PricingError::ConfigurationInvalid(format!(
                "{} is not a cover stock",
                cover.display_name
            )));
        }
        if cover.weight.unwrap_or(0) < settings.min_cover_weight {
            return Err(PricingError::ConfigurationInvalid(format!(
                "Cover stock must be {}# or heavier for perfect binding",
                settings.min_cover_weight
            )));
        }

        let (width, height) = ctx.size_or(LETTER)?;
        let imposition = calculate_imposition(width, height)?;

        let sides = config.sides();
        let interior_count = interior_sheets(pages, imposition.copies_per_sheet, sides);
        let cover_sheets = 1;
        let total_sheets = interior_count + cover_sheets;

        let interior = interior_count as f64;
        let material_per_book = (interior * text.cost_per_sheet()?
            + cover_sheets as f64 * cover.cost_per_sheet()?
            + interior * formula.clicks_for(sides)
            + cover_sheets as f64 * settings.cover_clicks)
            * formula.bound_material_markup;

        let quantity = ctx.quantity();
        let q = quantity as f64;
        let press_sheets = q * total_sheets as f64;

        let mut parts = CostComponents {
            setup: formula.setup_fee * 2.0,
            finishing_setup: settings.finishing_setup_fee,
            production: formula.production_cost(product, press_sheets),
            material: q * material_per_book,
            finishing: q * settings.labor_per_book,
            ..Default::default()
        };
        parts.details.sheets_required = Some(quantity * total_sheets);
        parts.details.copies_per_sheet = Some(imposition.copies_per_sheet);
        parts.details.imposition = Some(imposition);
        parts.details.materials_used = vec![cover.display_name.clone(), text.display_name.clone()];
        parts.details.efficiency_exponent = Some(formula.exponent_for(product));

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}

/// Interior sheets for a perfect-bound book.
pub(crate) fn interior_sheets(pages: u32, copies_per_sheet: u32, sides: PrintingSides) -> u32 {
    pages
        .saturating_sub(4)
        .div_ceil((copies_per_sheet * sides.count()).max(1))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEngine;
    use crate::types::{FinishingOptions, PaperSelection, ProductConfiguration, ProductType};

    fn engine() -> PricingEngine {
        PricingEngine::with_default_tables()
    }

    fn notebook(content: PageContent) -> ProductConfiguration {
        ProductConfiguration::new(ProductType::Notebooks, 50)
            .with_paper(PaperSelection::cover_and_text("LYNOC95FSC", "LYNODI312FSC"))
            .with_finishing(FinishingOptions {
                pages: Some(100),
                binding_type: Some("plastic-coil".to_string()),
                page_content: Some(content),
                ..Default::default()
            })
    }

    #[test]
    fn test_notebook_defaults_to_letter() {
        let b = engine().price(&notebook(PageContent::Blank)).unwrap();
        assert_eq!(b.setup_cost, 0.0);
        assert_eq!(b.finishing_setup_cost, 15.0);
        assert_eq!(b.details.copies_per_sheet, Some(2));

        // imp 2, double-sided: cover 0.5, text 25, clicks 1 + 50
        let per_book = (0.5 * 0.28010 + 25.0 * 0.08548 + 51.0 * 0.10) * 1.25;
        assert!((b.material_cost - 50.0 * per_book).abs() < 1e-9);
        assert_eq!(b.line_items.len(), 2);
        assert!((b.line_items[0].amount - 25.0).abs() < 1e-9);
        assert!((b.line_items[1].amount - 100.0).abs() < 1e-9);
        assert_eq!(b.details.sheets_required, Some(1275));
    }

    #[test]
    fn test_notebook_setup_waived_only_for_blank() {
        let lined = engine().price(&notebook(PageContent::Lined)).unwrap();
        assert_eq!(lined.setup_cost, 15.0);
    }

    #[test]
    fn test_notebook_unknown_binding() {
        let mut config = notebook(PageContent::Blank);
        config.finishing.binding_type = Some("staples".to_string());
        assert!(matches!(
            engine().price(&config),
            Err(PricingError::ConfigurationInvalid(_))
        ));
    }

    fn notepad(content: PageContent) -> ProductConfiguration {
        ProductConfiguration::new(ProductType::Notepads, 100)
            .with_size("4x6")
            .with_stock("LYNODI312FSC")
            .with_finishing(FinishingOptions {
                sheets: Some(50),
                page_content: Some(content),
                ..Default::default()
            })
    }

    #[test]
    fn test_notepad_components() {
        let b = engine().price(&notepad(PageContent::Blank)).unwrap();
        assert_eq!(b.setup_cost, 0.0);
        assert_eq!(b.finishing_setup_cost, 15.0);
        // 4.25 x 6.25 → 4 portrait
        assert_eq!(b.details.copies_per_sheet, Some(4));
        // 100 pads × 50 sheets / 4 up
        assert_eq!(b.details.sheets_required, Some(1250));
        assert!((b.finishing_cost - 50.0).abs() < 1e-9);

        // single-sided clicks by default
        let per_pad = (1250.0 * 0.08548 / 100.0 + 0.28010 / 4.0 + 1250.0 * 0.05 / 100.0) * 1.25;
        assert!((b.material_cost - 100.0 * per_pad).abs() < 1e-9);
    }

    #[test]
    fn test_notepad_custom_content_pays_setup() {
        let b = engine().price(&notepad(PageContent::Custom)).unwrap();
        assert_eq!(b.setup_cost, 15.0);
    }

    #[test]
    fn test_notepad_unknown_backing() {
        let mut config = notepad(PageContent::Blank);
        config.paper.backing = Some("CARDBOARD".to_string());
        assert!(matches!(
            engine().price(&config),
            Err(PricingError::MaterialNotFound { .. })
        ));
    }

    fn perfect_bound(cover: &str, text: &str) -> ProductConfiguration {
        ProductConfiguration::new(ProductType::PerfectBoundBooks, 20)
            .with_paper(PaperSelection::cover_and_text(cover, text))
            .with_finishing(FinishingOptions {
                pages: Some(100),
                ..Default::default()
            })
    }

    #[test]
    fn test_perfect_bound_components() {
        let b = engine().price(&perfect_bound("LYNOC76FSC", "LYNO416FSC")).unwrap();
        assert_eq!(b.setup_cost, 30.0);
        assert_eq!(b.finishing_setup_cost, 30.0);
        assert!((b.finishing_cost - 90.0).abs() < 1e-9);

        // 8.5x11 → 2-up, 4 pages per sheet: ⌈96 / 4⌉ = 24 interior + 1 cover
        assert_eq!(interior_sheets(100, 2, PrintingSides::DoubleSided), 24);
        assert_eq!(b.details.sheets_required, Some(20 * 25));
        let per_book = (24.0 * 0.11397 + 0.22408 + 24.0 * 0.10 + 0.10) * 1.25;
        assert!((b.material_cost - 20.0 * per_book).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_bound_stock_rules() {
        // cover stock as text
        assert!(matches!(
            engine().price(&perfect_bound("LYNOC76FSC", "LYNOC95FSC")),
            Err(PricingError::ConfigurationInvalid(_))
        ));
        // text stock as cover
        assert!(matches!(
            engine().price(&perfect_bound("LYNO416FSC", "LYNO416FSC")),
            Err(PricingError::ConfigurationInvalid(_))
        ));

        let mut tables = crate::tables::PricingTables::default();
        for paper in tables.papers.iter_mut().filter(|p| p.code == "LYNOC76FSC") {
            paper.weight = Some(65);
        }
        let light = PricingEngine::new(std::sync::Arc::new(tables));
        assert!(matches!(
            light.price(&perfect_bound("LYNOC76FSC", "LYNO416FSC")),
            Err(PricingError::ConfigurationInvalid(msg)) if msg.contains("80#")
        ));
    }
}
