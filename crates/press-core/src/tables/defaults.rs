//! Shipped pricing data.

use std::collections::BTreeMap;

use super::*;

fn map<K: Ord, V>(entries: impl IntoIterator<Item = (K, V)>) -> BTreeMap<K, V> {
    entries.into_iter().collect()
}

fn sizes(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn ladder(pairs: &[(f64, f64)]) -> DiscountLadder {
    DiscountLadder::from_pairs(pairs).unwrap_or_else(|_| DiscountLadder::none())
}

// =============================================================================
// Paper Catalog
// =============================================================================

fn sheet(code: &str, name: &str, kind: PaperKind, weight: u32, finish: &str, cost: f64) -> PaperStock {
    PaperStock {
        code: code.to_string(),
        display_name: name.to_string(),
        brand: Some(if code.starts_with("PAC") { "Pacesetter" } else { "Lynx" }.to_string()),
        kind,
        finish: Some(finish.to_string()),
        size: Some("12x18".to_string()),
        weight: Some(weight),
        cost: MaterialCost::PerSheet(cost),
        max_width: None,
        fixed_width: None,
        fixed_height: None,
    }
}

fn roll(code: &str, name: &str, kind: PaperKind, rate: f64, max_width: f64) -> PaperStock {
    PaperStock {
        code: code.to_string(),
        display_name: name.to_string(),
        brand: None,
        kind,
        finish: None,
        size: None,
        weight: None,
        cost: MaterialCost::PerSquareFoot(rate),
        max_width: Some(max_width),
        fixed_width: None,
        fixed_height: None,
    }
}

fn envelope(code: &str, name: &str, size: &str, cost: f64) -> PaperStock {
    PaperStock {
        code: code.to_string(),
        display_name: name.to_string(),
        brand: Some("Supremex".to_string()),
        kind: PaperKind::Envelope,
        finish: Some("smooth".to_string()),
        size: Some(size.to_string()),
        weight: Some(24),
        cost: MaterialCost::PerUnit(cost),
        max_width: None,
        fixed_width: None,
        fixed_height: None,
    }
}

pub(super) fn paper_catalog() -> Vec<PaperStock> {
    use PaperKind::*;

    let mut papers = vec![
        sheet("LYNODI312FSC", "60# Text Smooth", TextStock, 60, "smooth", 0.08548),
        sheet("LYNO416FSC", "80# Text Smooth", TextStock, 80, "smooth", 0.11397),
        sheet("LYNO52FSC", "100# Text Smooth", TextStock, 100, "smooth", 0.1425),
        sheet("LYNOC76FSC", "80# Cover Smooth", CoverStock, 80, "smooth", 0.22408),
        sheet("LYNOC95FSC", "100# Cover Smooth", CoverStock, 100, "smooth", 0.28010),
        sheet("LYNODIC11413FSC", "120# Cover Smooth", CoverStock, 120, "smooth", 0.38147),
        sheet("COUDCCDIC123513FSC", "130# Cover Smooth", CoverStock, 130, "smooth", 0.53800),
        sheet("PACDIS42FSC", "80# Text Silk", TextStock, 80, "silk", 0.07702),
        sheet("PACDIS52FSC", "100# Text Silk", TextStock, 100, "silk", 0.09536),
        sheet("PACDISC7613FSC", "80# Cover Silk", CoverStock, 80, "silk", 0.14204),
        sheet("PACDISC9513FSC", "100# Cover Silk", CoverStock, 100, "silk", 0.17756),
        sheet("PACDISC12413FSC", "130# Cover Silk", CoverStock, 130, "silk", 0.23176),
        sheet("PAC51319WP", "Sticker Paper White", AdhesiveStock, 70, "gloss", 3.705),
        roll("RMPS002", "Satin Poster Paper", LargeFormatPaper, 6.00, 52.0),
        roll("RMPG001", "Gloss Photo Paper", LargeFormatPaper, 7.50, 52.0),
        roll("QMPFL501503", "Polyester Fabric", LargeFormatFabric, 9.00, 48.0),
        roll("LFVINYL13", "13oz Scrim Vinyl Banner", LargeFormatVinyl, 5.50, 54.0),
        envelope("SUPX10WSFSC-S", "#10 White Envelope", "4.125x9.5", 0.045),
        envelope("SUPA7WSFSC", "A7 White Envelope", "5.25x7.25", 0.062),
        envelope("SUP69WSFSC", "6x9 White Envelope", "6x9", 0.089),
    ];

    papers.push(PaperStock {
        code: "COROPLAST1824".to_string(),
        display_name: "4mm Coroplast 18x24".to_string(),
        brand: None,
        kind: LargeFormatRigid,
        finish: None,
        size: Some("18x24".to_string()),
        weight: None,
        cost: MaterialCost::PerSquareFoot(10.00),
        max_width: Some(24.0),
        fixed_width: Some(18.0),
        fixed_height: Some(24.0),
    });
    papers
}

// =============================================================================
// Section Defaults
// =============================================================================

impl Default for FormulaConfig {
    fn default() -> Self {
        use ProductType::*;
        FormulaConfig {
            setup_fee: 15.0,
            finishing_setup_fee: 15.0,
            base_production_rate: 1.5,
            efficiency_exponent: 0.75,
            clicks_cost: 0.10,
            material_markup: 1.5,
            bound_material_markup: 1.25,
            exponent_overrides: map([
                (Brochures, 0.75),
                (Postcards, 0.70),
                (Flyers, 0.75),
                (Booklets, 0.80),
                (Posters, 0.65),
                (TableTents, 0.75),
                (NameTags, 0.70),
                (Bookmarks, 0.70),
                (Notebooks, 0.80),
                (Notepads, 0.80),
            ]),
        }
    }
}

impl Default for FinishingTable {
    fn default() -> Self {
        FinishingTable {
            folding: map([("bifold".to_string(), 0.10), ("trifold".to_string(), 0.10)]),
            coatings: map([
                ("gloss-uv".to_string(), 0.02),
                ("matte-uv".to_string(), 0.02),
                ("soft-touch".to_string(), 0.06),
            ]),
            scoring: 0.08,
            perforation: 0.03,
            hole_punch: 0.05,
            lanyard: 1.25,
            booklet: BookletFinishing {
                base_labor: 0.25,
                cover_creasing: 0.10,
                binding_per_sheet: 0.05,
            },
            binding: map([
                ("plastic-coil".to_string(), BindingRate { hardware: 0.50, labor: 2.00 }),
                ("wire-o".to_string(), BindingRate { hardware: 0.75, labor: 2.50 }),
                ("perfect-binding".to_string(), BindingRate { hardware: 0.35, labor: 3.00 }),
            ]),
            padding_per_sheet: 0.01,
        }
    }
}

impl Default for RushTable {
    fn default() -> Self {
        RushTable {
            tiers: map([
                (RushTier::Standard, 1.0),
                (RushTier::TwoDay, 1.25),
                (RushTier::NextDay, 1.5),
                (RushTier::SameDay, 2.0),
            ]),
            promotional: map([
                ("standard".to_string(), 1.0),
                ("rush".to_string(), 1.25),
                ("express".to_string(), 1.5),
            ]),
        }
    }
}

fn quantity(min: u32, max: u32) -> ProductConstraints {
    ProductConstraints {
        min_quantity: min,
        max_quantity: max,
        step: None,
        pages: None,
        sheets: None,
    }
}

pub(super) fn product_constraints() -> BTreeMap<ProductType, ProductConstraints> {
    use ProductType::*;
    let paged = |min_q, max_q, min_p, max_p| ProductConstraints {
        pages: Some(PageRule {
            min: min_p,
            max: max_p,
            multiple: 4,
        }),
        ..quantity(min_q, max_q)
    };
    let stepped = |min_q, max_q, step| ProductConstraints {
        step: Some(step),
        ..quantity(min_q, max_q)
    };

    map([
        (Brochures, quantity(25, 2500)),
        (Postcards, quantity(100, 5000)),
        (NameTags, quantity(50, 5000)),
        (Flyers, quantity(25, 2500)),
        (Bookmarks, quantity(100, 2500)),
        (BusinessCards, quantity(100, 5000)),
        (FlatPrints, quantity(25, 2500)),
        (TableTents, quantity(25, 2500)),
        (FoldedPrints, quantity(25, 2500)),
        (Booklets, paged(10, 1000, 8, 48)),
        (Notebooks, paged(10, 500, 20, 200)),
        (
            Notepads,
            ProductConstraints {
                sheets: Some(PageRule {
                    min: 25,
                    max: 100,
                    multiple: 1,
                }),
                ..quantity(10, 1000)
            },
        ),
        (PerfectBoundBooks, paged(10, 500, 4, 500)),
        (Posters, quantity(1, 20)),
        (Stickers, quantity(10, 1000)),
        (Envelopes, quantity(50, 1000)),
        (Magnets, stepped(25, 1000, 5)),
        (PromoStickers, stepped(25, 1000, 5)),
        (Apparel, quantity(10, 5000)),
        (ToteBags, stepped(10, 5000, 5)),
    ])
}

pub(super) fn imposition_fallbacks() -> BTreeMap<ProductType, BTreeMap<String, u32>> {
    use ProductType::*;
    map([
        (Brochures, sizes(&[("8.5x11", 2), ("8.5x14", 1), ("11x17", 1)])),
        (
            Postcards,
            sizes(&[("4x6", 8), ("5x7", 4), ("5.5x8.5", 4), ("6x9", 2)]),
        ),
        (NameTags, sizes(&[("2.33x3", 20), ("3x4", 12), ("4x6", 4)])),
        (
            Flyers,
            sizes(&[("5.5x8.5", 4), ("8.5x11", 2), ("8.5x14", 1), ("11x17", 1)]),
        ),
        (Bookmarks, sizes(&[("2x6", 10), ("2x7", 10), ("2x8", 10)])),
        (Booklets, sizes(&[("8.5x11", 4)])),
        (BusinessCards, sizes(&[("3.5x2", 21)])),
    ])
}

impl Default for LargeFormatConfig {
    fn default() -> Self {
        LargeFormatConfig {
            sizes: map([
                ("18x24".to_string(), 3.0),
                ("22x28".to_string(), 4.3),
                ("24x36".to_string(), 6.0),
                ("36x48".to_string(), 12.0),
            ]),
            min_dimension: 6.0,
            default_max_width: 52.0,
            max_height: 120.0,
            max_area_sqft: 50.0,
            discount: ladder(&[(30.0, 0.05), (60.0, 0.10), (90.0, 0.15), (120.0, 0.20)]),
        }
    }
}

impl Default for StickerConfig {
    fn default() -> Self {
        StickerConfig {
            price_per_sqft: 12.0,
            setup_fee: 30.0,
            discount: ladder(&[
                (15.0, 0.05),
                (30.0, 0.10),
                (45.0, 0.15),
                (60.0, 0.20),
                (75.0, 0.25),
            ]),
            premium_markup: 0.25,
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        let tiers = |rates: [f64; 5]| {
            [1, 250, 500, 750, 1000]
                .into_iter()
                .zip(rates)
                .map(|(min_quantity, rate)| RateTier { min_quantity, rate })
                .collect()
        };
        EnvelopeConfig {
            stock_markup: 1.5,
            color: tiers([0.32, 0.28, 0.25, 0.22, 0.20]),
            black_white: tiers([0.13, 0.11, 0.10, 0.09, 0.08]),
        }
    }
}

impl Default for BookletConfig {
    fn default() -> Self {
        BookletConfig {
            multi_up_max_width: 6.5,
            multi_up_max_height: 9.0,
            setup_per_page: 2.0,
        }
    }
}

impl Default for NotebookConfig {
    fn default() -> Self {
        NotebookConfig {
            default_width: 8.5,
            default_height: 11.0,
            fallback_imposition: 2,
        }
    }
}

impl Default for NotepadConfig {
    fn default() -> Self {
        NotepadConfig {
            default_backing: "LYNOC95FSC".to_string(),
        }
    }
}

impl Default for PerfectBoundConfig {
    fn default() -> Self {
        PerfectBoundConfig {
            finishing_setup_fee: 30.0,
            labor_per_book: 4.50,
            cover_clicks: 0.10,
            min_cover_weight: 80,
        }
    }
}

// =============================================================================
// Promotional
// =============================================================================

fn costs(entries: &[(&str, [f64; 6])]) -> BTreeMap<String, Vec<f64>> {
    entries
        .iter()
        .map(|(size, c)| (size.to_string(), c.to_vec()))
        .collect()
}

impl Default for ApparelConfig {
    fn default() -> Self {
        let garment = |standard, extended| GarmentCost { standard, extended };
        ApparelConfig {
            garments: map([
                ("gildan-6400".to_string(), garment(5.25, 9.56)),
                ("atc-f2700".to_string(), garment(29.99, 33.74)),
                ("gildan-sf000".to_string(), garment(19.99, 27.49)),
                ("gildan-1801".to_string(), garment(15.03, 21.46)),
                ("gildan-sf500".to_string(), garment(24.38, 34.38)),
                ("gildan-1850".to_string(), garment(21.96, 30.20)),
            ]),
            discount: ladder(&[(24.0, 0.05), (48.0, 0.10), (100.0, 0.15), (250.0, 0.20)]),
        }
    }
}

impl Default for ToteBagConfig {
    fn default() -> Self {
        ToteBagConfig {
            bag_cost: 5.00,
            print_size_multipliers: map([
                ("10x10".to_string(), 1.0),
                ("12x12".to_string(), 1.25),
            ]),
        }
    }
}

impl Default for PromoCatalog {
    fn default() -> Self {
        let magnets = PromoCategory {
            markup: Some(0.25),
            setup_fee: 0.0,
            costs: costs(&[
                ("2x2", [41.0, 61.0, 101.0, 173.0, 293.0, 533.0]),
                ("3x3", [53.0, 85.0, 150.0, 295.0, 538.0, 1023.0]),
                ("4x4", [69.0, 118.0, 216.0, 460.0, 867.0, 1680.0]),
                ("5x5", [90.0, 159.0, 298.0, 666.0, 1279.0, 2504.0]),
            ]),
        };
        let stickers = PromoCategory {
            markup: Some(0.25),
            setup_fee: 0.0,
            costs: costs(&[
                ("2x2", [40.0, 59.0, 98.0, 150.0, 221.0, 344.0]),
                ("2.5x2.5", [44.0, 68.0, 113.0, 180.0, 277.0, 443.0]),
                ("3x3", [49.0, 77.0, 130.0, 214.0, 335.0, 545.0]),
                ("3.5x3.5", [54.0, 88.0, 147.0, 250.0, 399.0, 655.0]),
                ("4x4", [60.0, 100.0, 164.0, 286.0, 463.0, 776.0]),
                ("4.5x4.5", [67.0, 112.0, 183.0, 329.0, 538.0, 906.0]),
                ("5x5", [74.0, 123.0, 204.0, 374.0, 615.0, 1051.0]),
                ("5.5x5.5", [82.0, 136.0, 225.0, 418.0, 700.0, 1200.0]),
            ]),
        };
        let decoration = |setup_fee, printing_cost| DecorationPricing {
            setup_fee,
            printing_cost,
        };

        PromoCatalog {
            brackets: vec![25, 50, 100, 250, 500, 1000],
            default_markup: 0.40,
            categories: map([
                (ProductType::Magnets, magnets),
                (ProductType::PromoStickers, stickers),
            ]),
            decorations: map([
                ("dtf".to_string(), decoration(60.0, 10.0)),
                ("screen-print".to_string(), decoration(50.0, 8.0)),
            ]),
            apparel: ApparelConfig::default(),
            tote_bags: ToteBagConfig::default(),
        }
    }
}

impl Default for PricingTables {
    fn default() -> Self {
        PricingTables {
            formula: FormulaConfig::default(),
            papers: paper_catalog(),
            finishing: FinishingTable::default(),
            rush: RushTable::default(),
            constraints: product_constraints(),
            imposition: imposition_fallbacks(),
            large_format: LargeFormatConfig::default(),
            stickers: StickerConfig::default(),
            envelopes: EnvelopeConfig::default(),
            booklet: BookletConfig::default(),
            notebook: NotebookConfig::default(),
            notepad: NotepadConfig::default(),
            perfect_bound: PerfectBoundConfig::default(),
            promo: PromoCatalog::default(),
        }
    }
}
