//! # Domain Types
//!
//! The request and response shapes of the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐              ┌──────────────────────┐        │
//! │  │ ProductConfiguration │   engine     │   PriceBreakdown     │        │
//! │  │  ──────────────────  │  ────────►   │  ──────────────────  │        │
//! │  │  product_type        │              │  setup / production  │        │
//! │  │  quantity            │              │  material / finishing│        │
//! │  │  dimensions          │              │  subtotal × rush     │        │
//! │  │  paper, finishing    │              │  total, unit price   │        │
//! │  │  rush_tier, sides    │              │  details (sheets…)   │        │
//! │  └──────────────────────┘              └──────────────────────┘        │
//! │                                                                         │
//! │  ProductType ──family()──► ProductFamily ──► cost strategy             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All wire shapes use camelCase keys; enum values are kebab-case
//! (`"name-tags"`, `"next-day"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Quote;

// =============================================================================
// Product Type
// =============================================================================

/// Every product the shop sells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ProductType {
    Postcards,
    Flyers,
    Bookmarks,
    NameTags,
    BusinessCards,
    FlatPrints,
    Brochures,
    TableTents,
    FoldedPrints,
    Booklets,
    Notebooks,
    Notepads,
    PerfectBoundBooks,
    Posters,
    Stickers,
    Envelopes,
    Magnets,
    PromoStickers,
    Apparel,
    ToteBags,
}

impl ProductType {
    /// All product types, in catalog order.
    pub const ALL: [ProductType; 20] = [
        ProductType::Postcards,
        ProductType::Flyers,
        ProductType::Bookmarks,
        ProductType::NameTags,
        ProductType::BusinessCards,
        ProductType::FlatPrints,
        ProductType::Brochures,
        ProductType::TableTents,
        ProductType::FoldedPrints,
        ProductType::Booklets,
        ProductType::Notebooks,
        ProductType::Notepads,
        ProductType::PerfectBoundBooks,
        ProductType::Posters,
        ProductType::Stickers,
        ProductType::Envelopes,
        ProductType::Magnets,
        ProductType::PromoStickers,
        ProductType::Apparel,
        ProductType::ToteBags,
    ];

    /// The cost strategy family this product is priced with.
    pub fn family(&self) -> ProductFamily {
        match self {
            ProductType::Postcards
            | ProductType::Flyers
            | ProductType::Bookmarks
            | ProductType::NameTags
            | ProductType::BusinessCards
            | ProductType::FlatPrints
            | ProductType::Brochures
            | ProductType::TableTents
            | ProductType::FoldedPrints => ProductFamily::SheetFormula,
            ProductType::Booklets => ProductFamily::Booklet,
            ProductType::Notebooks => ProductFamily::Notebook,
            ProductType::Notepads => ProductFamily::Notepad,
            ProductType::PerfectBoundBooks => ProductFamily::PerfectBound,
            ProductType::Posters => ProductFamily::LargeFormat,
            ProductType::Stickers => ProductFamily::Sticker,
            ProductType::Envelopes => ProductFamily::Envelope,
            ProductType::Magnets | ProductType::PromoStickers => ProductFamily::Promotional,
            ProductType::Apparel => ProductFamily::Apparel,
            ProductType::ToteBags => ProductFamily::ToteBag,
        }
    }

    /// The wire name (`"name-tags"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Postcards => "postcards",
            ProductType::Flyers => "flyers",
            ProductType::Bookmarks => "bookmarks",
            ProductType::NameTags => "name-tags",
            ProductType::BusinessCards => "business-cards",
            ProductType::FlatPrints => "flat-prints",
            ProductType::Brochures => "brochures",
            ProductType::TableTents => "table-tents",
            ProductType::FoldedPrints => "folded-prints",
            ProductType::Booklets => "booklets",
            ProductType::Notebooks => "notebooks",
            ProductType::Notepads => "notepads",
            ProductType::PerfectBoundBooks => "perfect-bound-books",
            ProductType::Posters => "posters",
            ProductType::Stickers => "stickers",
            ProductType::Envelopes => "envelopes",
            ProductType::Magnets => "magnets",
            ProductType::PromoStickers => "promo-stickers",
            ProductType::Apparel => "apparel",
            ProductType::ToteBags => "tote-bags",
        }
    }

    /// Sides printed when the configuration does not say.
    pub fn default_sides(&self) -> PrintingSides {
        match self {
            ProductType::Notepads => PrintingSides::SingleSided,
            _ => PrintingSides::DoubleSided,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ValidationError;

    /// Accepts the wire name plus the camelCase spellings older carts stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let found = match normalized.as_str() {
            "nametags" => Some(ProductType::NameTags),
            "businesscards" => Some(ProductType::BusinessCards),
            "tabletents" => Some(ProductType::TableTents),
            "perfectbound" | "perfectboundbooks" => Some(ProductType::PerfectBoundBooks),
            "promostickers" => Some(ProductType::PromoStickers),
            "totebags" => Some(ProductType::ToteBags),
            other => ProductType::ALL.iter().copied().find(|p| p.as_str() == other),
        };
        found.ok_or_else(|| ValidationError::NotAllowed {
            field: "product_type".to_string(),
            allowed: ProductType::ALL.iter().map(|p| p.as_str().to_string()).collect(),
        })
    }
}

/// Cost strategy families.
///
/// Products in one family share a cost formula; the family picks the
/// strategy, the product type picks constants (exponent, constraints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductFamily {
    /// Flat and folded sheet products: setup + q^e·k + material + finishing.
    SheetFormula,
    Booklet,
    Notebook,
    Notepad,
    PerfectBound,
    /// Square-foot pricing on roll or rigid media.
    LargeFormat,
    Sticker,
    Envelope,
    /// Supplier cost tables interpolated by quantity bracket.
    Promotional,
    Apparel,
    ToteBag,
}

// =============================================================================
// Rush Tier
// =============================================================================

/// Turnaround speed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum RushTier {
    #[default]
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "2-day")]
    TwoDay,
    #[serde(rename = "next-day")]
    NextDay,
    #[serde(rename = "same-day")]
    SameDay,
}

impl RushTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RushTier::Standard => "standard",
            RushTier::TwoDay => "2-day",
            RushTier::NextDay => "next-day",
            RushTier::SameDay => "same-day",
        }
    }

    /// Key into the promotional rush table (`standard | rush | express`).
    pub fn promo_key(&self) -> &'static str {
        match self {
            RushTier::Standard => "standard",
            RushTier::TwoDay => "rush",
            RushTier::NextDay | RushTier::SameDay => "express",
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, RushTier::Standard)
    }
}

impl fmt::Display for RushTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RushTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "" => Ok(RushTier::Standard),
            "2-day" | "2day" | "two-day" => Ok(RushTier::TwoDay),
            "next-day" | "nextday" | "1-day" => Ok(RushTier::NextDay),
            "same-day" | "sameday" => Ok(RushTier::SameDay),
            _ => Err(ValidationError::NotAllowed {
                field: "rush_tier".to_string(),
                allowed: vec![
                    "standard".to_string(),
                    "2-day".to_string(),
                    "next-day".to_string(),
                    "same-day".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Printing Sides
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum PrintingSides {
    SingleSided,
    #[default]
    DoubleSided,
}

impl PrintingSides {
    /// Printed faces per sheet.
    pub fn count(&self) -> u32 {
        match self {
            PrintingSides::SingleSided => 1,
            PrintingSides::DoubleSided => 2,
        }
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Finished (trim) size of a piece, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[ts(export)]
pub enum Dimensions {
    /// A catalog size such as `"8.5x11"`.
    SizeCode { code: String },
    /// Arbitrary width × height.
    Custom { width: f64, height: f64 },
}

impl Dimensions {
    pub fn size_code(code: impl Into<String>) -> Self {
        Dimensions::SizeCode { code: code.into() }
    }

    pub fn custom(width: f64, height: f64) -> Self {
        Dimensions::Custom { width, height }
    }

    /// Width and height in inches.
    pub fn resolve(&self) -> Result<(f64, f64), ValidationError> {
        match self {
            Dimensions::SizeCode { code } => crate::imposition::parse_size_code(code),
            Dimensions::Custom { width, height } => {
                if !width.is_finite() || !height.is_finite() || *width <= 0.0 || *height <= 0.0 {
                    return Err(ValidationError::MustBePositive {
                        field: "dimensions".to_string(),
                    });
                }
                Ok((*width, *height))
            }
        }
    }

    /// The code used for table lookups (`"8.5x11"`), normalized.
    pub fn label(&self) -> String {
        match self {
            Dimensions::SizeCode { code } => code.trim().replace(['"', '\''], ""),
            Dimensions::Custom { width, height } => format!("{}x{}", width, height),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Dimensions::Custom { .. })
    }
}

// =============================================================================
// Paper Selection
// =============================================================================

/// Paper catalog codes picked for a configuration.
///
/// Single-stock products set `stock`; paged products set `cover` and `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaperSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Notepad chipboard backing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing: Option<String>,
}

impl PaperSelection {
    pub fn stock(code: impl Into<String>) -> Self {
        PaperSelection {
            stock: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn cover_and_text(cover: impl Into<String>, text: impl Into<String>) -> Self {
        PaperSelection {
            cover: Some(cover.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Finishing Options
// =============================================================================

/// Page content of notebooks and notepads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum PageContent {
    #[default]
    Blank,
    Lined,
    Custom,
}

/// How stickers are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum StickerProduction {
    /// Printed and kiss-cut in house, priced per square foot.
    #[default]
    Standard,
    /// Die-cut by the supplier, priced from the supplier table.
    Premium,
}

/// Envelope imprint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum EnvelopePrint {
    #[default]
    Color,
    BlackWhite,
}

/// Product-specific options. Irrelevant fields stay `None`/`false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct FinishingOptions {
    /// `bifold`, `trifold`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_type: Option<String>,
    /// `gloss-uv`, `matte-uv`, `soft-touch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coating: Option<String>,
    pub hole_punch: bool,
    pub lanyard: bool,
    pub perforation: bool,
    /// Page count for booklets, notebooks, perfect-bound books.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Sheets per notepad.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets: Option<u32>,
    /// `plastic-coil`, `wire-o`, `perfect-binding`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_content: Option<PageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker_production: Option<StickerProduction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_print: Option<EnvelopePrint>,
    /// Apparel garment code (`gildan-6400`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garment: Option<String>,
    /// Decoration method (`dtf`, `screen-print`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<String>,
    /// Pieces in 2XL and up, out of `quantity`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_quantity: Option<u32>,
    /// Tote bag print area (`10x10`, `12x12`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_size: Option<String>,
}

// =============================================================================
// Product Configuration
// =============================================================================

/// Everything the customer picked for one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductConfiguration {
    pub product_type: ProductType,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub paper: PaperSelection,
    #[serde(default)]
    pub finishing: FinishingOptions,
    #[serde(default)]
    pub rush_tier: RushTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printing_sides: Option<PrintingSides>,
}

impl ProductConfiguration {
    /// A bare configuration; fill in the rest with the `with_*` helpers.
    pub fn new(product_type: ProductType, quantity: u32) -> Self {
        ProductConfiguration {
            product_type,
            quantity,
            dimensions: None,
            paper: PaperSelection::default(),
            finishing: FinishingOptions::default(),
            rush_tier: RushTier::Standard,
            printing_sides: None,
        }
    }

    pub fn with_size(mut self, code: &str) -> Self {
        self.dimensions = Some(Dimensions::size_code(code));
        self
    }

    pub fn with_custom_size(mut self, width: f64, height: f64) -> Self {
        self.dimensions = Some(Dimensions::custom(width, height));
        self
    }

    pub fn with_stock(mut self, code: &str) -> Self {
        self.paper.stock = Some(code.to_string());
        self
    }

    pub fn with_rush(mut self, tier: RushTier) -> Self {
        self.rush_tier = tier;
        self
    }

    pub fn with_sides(mut self, sides: PrintingSides) -> Self {
        self.printing_sides = Some(sides);
        self
    }

    pub fn with_finishing(mut self, finishing: FinishingOptions) -> Self {
        self.finishing = finishing;
        self
    }

    pub fn with_paper(mut self, paper: PaperSelection) -> Self {
        self.paper = paper;
        self
    }

    /// Printing sides, falling back to the product's default.
    pub fn sides(&self) -> PrintingSides {
        self.printing_sides
            .unwrap_or_else(|| self.product_type.default_sides())
    }
}

// =============================================================================
// Imposition
// =============================================================================

/// Which way the pieces are laid on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// How many pieces fit one press sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImpositionResult {
    pub copies_per_sheet: u32,
    /// Used area of the printable sheet, one decimal place.
    pub efficiency_percent: f64,
    pub orientation: Orientation,
    /// Trim width plus bleed, three decimal places.
    pub bleed_width: f64,
    pub bleed_height: f64,
}

/// Advisory label for an imposition's sheet usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EfficiencyRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl EfficiencyRating {
    /// ≥70 excellent, ≥50 good, ≥30 fair, otherwise poor.
    pub fn from_percent(efficiency_percent: f64) -> Self {
        if efficiency_percent >= 70.0 {
            EfficiencyRating::Excellent
        } else if efficiency_percent >= 50.0 {
            EfficiencyRating::Good
        } else if efficiency_percent >= 30.0 {
            EfficiencyRating::Fair
        } else {
            EfficiencyRating::Poor
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EfficiencyRating::Excellent => "Excellent paper utilization",
            EfficiencyRating::Good => "Good paper utilization",
            EfficiencyRating::Fair => "Fair paper utilization, consider adjusting size",
            EfficiencyRating::Poor => "Poor paper utilization, significant waste",
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// An extra named cost that is part of the subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub label: String,
    pub amount: f64,
}

/// A volume discount that was applied before rush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VolumeDiscount {
    /// Fraction off (0.10 = 10%).
    pub rate: f64,
    /// Dollar amount removed from the subtotal.
    pub savings: f64,
}

/// Diagnostics the UI shows next to the price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_required: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies_per_sheet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imposition: Option<ImpositionResult>,
    pub materials_used: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_exponent: Option<f64>,
}

/// The priced result of one configuration.
///
/// Every monetary field is unrounded; use [`PriceBreakdown::quote`] for
/// cent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub product_type: ProductType,
    pub quantity: u32,
    pub setup_cost: f64,
    pub finishing_setup_cost: f64,
    pub production_cost: f64,
    pub material_cost: f64,
    pub finishing_cost: f64,
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_discount: Option<VolumeDiscount>,
    /// Pre-rush total, after volume discount.
    pub subtotal: f64,
    pub rush_multiplier: f64,
    /// `subtotal × rush_multiplier`.
    pub total_cost: f64,
    /// `total_cost / quantity`.
    pub unit_price: f64,
    pub details: PricingDetails,
}

impl PriceBreakdown {
    /// Cent-rounded cart values.
    pub fn quote(&self) -> Quote {
        Quote::from_total(self.total_cost, self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_wire_names() {
        let json = serde_json::to_string(&ProductType::NameTags).unwrap();
        assert_eq!(json, "\"name-tags\"");
        let parsed: ProductType = serde_json::from_str("\"perfect-bound-books\"").unwrap();
        assert_eq!(parsed, ProductType::PerfectBoundBooks);
        for product in ProductType::ALL {
            let round: ProductType = product.as_str().parse().unwrap();
            assert_eq!(round, product);
        }
    }

    #[test]
    fn test_product_type_legacy_aliases() {
        assert_eq!("nameTags".parse::<ProductType>().unwrap(), ProductType::NameTags);
        assert_eq!(
            "businessCards".parse::<ProductType>().unwrap(),
            ProductType::BusinessCards
        );
        assert!("canvas".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_product_families() {
        assert_eq!(ProductType::Brochures.family(), ProductFamily::SheetFormula);
        assert_eq!(ProductType::Magnets.family(), ProductFamily::Promotional);
        assert_eq!(ProductType::PromoStickers.family(), ProductFamily::Promotional);
        assert_eq!(ProductType::Stickers.family(), ProductFamily::Sticker);
        assert_eq!(ProductType::Posters.family(), ProductFamily::LargeFormat);
    }

    #[test]
    fn test_rush_tier_keys() {
        assert_eq!(RushTier::default(), RushTier::Standard);
        assert_eq!(RushTier::TwoDay.promo_key(), "rush");
        assert_eq!(RushTier::SameDay.promo_key(), "express");
        let parsed: RushTier = serde_json::from_str("\"next-day\"").unwrap();
        assert_eq!(parsed, RushTier::NextDay);
        assert_eq!("2day".parse::<RushTier>().unwrap(), RushTier::TwoDay);
        assert!("overnight".parse::<RushTier>().is_err());
    }

    #[test]
    fn test_dimensions_serde_shape() {
        let dims: Dimensions =
            serde_json::from_str(r#"{"kind":"size-code","code":"8.5x11"}"#).unwrap();
        assert_eq!(dims.resolve().unwrap(), (8.5, 11.0));

        let dims: Dimensions =
            serde_json::from_str(r#"{"kind":"custom","width":4.0,"height":6.0}"#).unwrap();
        assert_eq!(dims.label(), "4x6");
        assert!(Dimensions::custom(0.0, 4.0).resolve().is_err());
    }

    #[test]
    fn test_configuration_defaults_from_json() {
        let config: ProductConfiguration = serde_json::from_str(
            r#"{"productType":"flyers","quantity":100,
                "dimensions":{"kind":"size-code","code":"8.5x11"},
                "paper":{"stock":"LYNO416FSC"}}"#,
        )
        .unwrap();
        assert_eq!(config.rush_tier, RushTier::Standard);
        assert_eq!(config.sides(), PrintingSides::DoubleSided);
        assert!(!config.finishing.hole_punch);

        let pad = ProductConfiguration::new(ProductType::Notepads, 50);
        assert_eq!(pad.sides(), PrintingSides::SingleSided);
        assert_eq!(
            pad.with_sides(PrintingSides::DoubleSided).sides(),
            PrintingSides::DoubleSided
        );
    }

    #[test]
    fn test_efficiency_rating_thresholds() {
        assert_eq!(EfficiencyRating::from_percent(70.0), EfficiencyRating::Excellent);
        assert_eq!(EfficiencyRating::from_percent(69.9), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_percent(30.0), EfficiencyRating::Fair);
        assert_eq!(EfficiencyRating::from_percent(12.0), EfficiencyRating::Poor);
    }
}
