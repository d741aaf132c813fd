//! # Pricing Tables
//!
//! Every number the engine prices with, in one injectable value.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PricingTables                                   │
//! │                                                                         │
//! │  formula        setup fee, k, e, clicks, markup, exponent overrides     │
//! │  papers         catalog: code → kind, weight, MaterialCost              │
//! │  finishing      folds, coatings, scoring, binding, padding              │
//! │  rush           standard/2-day/next-day/same-day + promo tiers          │
//! │  constraints    per product: quantity range/step, page rules            │
//! │  imposition     per product fallback: size code → copies per sheet      │
//! │  large_format   poster sizes, limits, square-foot ladder                │
//! │  stickers       in-house rate + ladder, premium markup                  │
//! │  envelopes      stock markup, impression ladders                        │
//! │  promo          supplier brackets, apparel, tote bags                   │
//! │  booklet / notebook / notepad / perfect_bound   product constants      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `PricingTables::default()` is the shipped catalog. A JSON file of the same
//! shape may override any section; omitted sections keep their defaults.

mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::discount::DiscountLadder;
use crate::error::{PricingError, PricingResult};
use crate::interpolation::BracketCurve;
use crate::types::{PrintingSides, ProductType, RushTier};

// =============================================================================
// Paper Catalog
// =============================================================================

/// What a catalog entry physically is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperKind {
    TextStock,
    CoverStock,
    AdhesiveStock,
    LargeFormatPaper,
    LargeFormatFabric,
    LargeFormatVinyl,
    LargeFormatRigid,
    Envelope,
}

impl PaperKind {
    pub fn is_large_format(&self) -> bool {
        matches!(
            self,
            PaperKind::LargeFormatPaper
                | PaperKind::LargeFormatFabric
                | PaperKind::LargeFormatVinyl
                | PaperKind::LargeFormatRigid
        )
    }
}

/// How a catalog entry is costed. Exactly one per entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialCost {
    /// Press sheet stock (`costPerSheet`).
    PerSheet(f64),
    /// Roll or board media (`chargeRate`, dollars per square foot).
    PerSquareFoot(f64),
    /// Pre-made items such as envelopes (`costPerUnit`).
    PerUnit(f64),
}

/// One paper or material in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPaperStock", into = "RawPaperStock")]
pub struct PaperStock {
    pub code: String,
    pub display_name: String,
    pub brand: Option<String>,
    pub kind: PaperKind,
    pub finish: Option<String>,
    /// Nominal sheet size, e.g. `"12x18"`.
    pub size: Option<String>,
    /// Basis weight in pounds (80 for 80# cover).
    pub weight: Option<u32>,
    pub cost: MaterialCost,
    /// Widest printable width for roll media, inches.
    pub max_width: Option<f64>,
    /// Rigid boards only come in one size.
    pub fixed_width: Option<f64>,
    pub fixed_height: Option<f64>,
}

/// Wire shape of [`PaperStock`]: the cost is one of three optional keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaperStock {
    code: String,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(rename = "type")]
    kind: PaperKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost_per_sheet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    charge_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost_per_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_height: Option<f64>,
}

impl TryFrom<RawPaperStock> for PaperStock {
    type Error = String;

    fn try_from(raw: RawPaperStock) -> Result<Self, Self::Error> {
        let cost = match (raw.cost_per_sheet, raw.charge_rate, raw.cost_per_unit) {
            (Some(c), None, None) => MaterialCost::PerSheet(c),
            (None, Some(c), None) => MaterialCost::PerSquareFoot(c),
            (None, None, Some(c)) => MaterialCost::PerUnit(c),
            (None, None, None) => {
                return Err(format!(
                    "paper {} has no costPerSheet, chargeRate or costPerUnit",
                    raw.code
                ))
            }
            _ => {
                return Err(format!(
                    "paper {} sets more than one of costPerSheet, chargeRate, costPerUnit",
                    raw.code
                ))
            }
        };
        let amount = match cost {
            MaterialCost::PerSheet(c) | MaterialCost::PerSquareFoot(c) | MaterialCost::PerUnit(c) => c,
        };
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(format!("paper {} has a negative or non-numeric cost", raw.code));
        }
        Ok(PaperStock {
            code: raw.code,
            display_name: raw.display_name,
            brand: raw.brand,
            kind: raw.kind,
            finish: raw.finish,
            size: raw.size,
            weight: raw.weight,
            cost,
            max_width: raw.max_width,
            fixed_width: raw.fixed_width,
            fixed_height: raw.fixed_height,
        })
    }
}

impl From<PaperStock> for RawPaperStock {
    fn from(paper: PaperStock) -> Self {
        let (cost_per_sheet, charge_rate, cost_per_unit) = match paper.cost {
            MaterialCost::PerSheet(c) => (Some(c), None, None),
            MaterialCost::PerSquareFoot(c) => (None, Some(c), None),
            MaterialCost::PerUnit(c) => (None, None, Some(c)),
        };
        RawPaperStock {
            code: paper.code,
            display_name: paper.display_name,
            brand: paper.brand,
            kind: paper.kind,
            finish: paper.finish,
            size: paper.size,
            weight: paper.weight,
            cost_per_sheet,
            charge_rate,
            cost_per_unit,
            max_width: paper.max_width,
            fixed_width: paper.fixed_width,
            fixed_height: paper.fixed_height,
        }
    }
}

impl PaperStock {
    /// Cost of one press sheet; other cost kinds are a configuration error.
    pub fn cost_per_sheet(&self) -> PricingResult<f64> {
        match self.cost {
            MaterialCost::PerSheet(c) => Ok(c),
            _ => Err(self.wrong_cost_kind("sheet-fed")),
        }
    }

    /// Dollars per square foot; roll and board media only.
    pub fn charge_rate(&self) -> PricingResult<f64> {
        match self.cost {
            MaterialCost::PerSquareFoot(c) => Ok(c),
            _ => Err(self.wrong_cost_kind("large-format")),
        }
    }

    /// Cost of one pre-made unit (envelopes).
    pub fn cost_per_unit(&self) -> PricingResult<f64> {
        match self.cost {
            MaterialCost::PerUnit(c) => Ok(c),
            _ => Err(self.wrong_cost_kind("per-unit")),
        }
    }

    pub fn fixed_size(&self) -> Option<(f64, f64)> {
        self.fixed_width.zip(self.fixed_height)
    }

    fn wrong_cost_kind(&self, wanted: &str) -> PricingError {
        PricingError::ConfigurationInvalid(format!(
            "{} ({}) is not a {} material",
            self.display_name, self.code, wanted
        ))
    }
}

// =============================================================================
// Formula Constants
// =============================================================================

/// Constants of the sheet formula `S + F + q^e·k + material + finishing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormulaConfig {
    pub setup_fee: f64,
    pub finishing_setup_fee: f64,
    /// `k`
    pub base_production_rate: f64,
    /// `e` when a product has no override.
    pub efficiency_exponent: f64,
    /// Click charge per double-sided sheet; single-sided is half.
    pub clicks_cost: f64,
    pub material_markup: f64,
    /// Markup for booklets and bound products.
    pub bound_material_markup: f64,
    pub exponent_overrides: BTreeMap<ProductType, f64>,
}

impl FormulaConfig {
    /// Efficiency exponent for `product`; falls back to the global exponent.
    pub fn exponent_for(&self, product: ProductType) -> f64 {
        match self.exponent_overrides.get(&product) {
            Some(e) => *e,
            None => {
                debug!(product = %product, exponent = self.efficiency_exponent, "No exponent override, using default");
                self.efficiency_exponent
            }
        }
    }

    /// Click charge per press sheet.
    pub fn clicks_for(&self, sides: PrintingSides) -> f64 {
        match sides {
            PrintingSides::DoubleSided => self.clicks_cost,
            PrintingSides::SingleSided => self.clicks_cost / 2.0,
        }
    }

    /// `quantity^e × k`
    pub fn production_cost(&self, product: ProductType, units: f64) -> f64 {
        units.powf(self.exponent_for(product)) * self.base_production_rate
    }
}

// =============================================================================
// Finishing
// =============================================================================

/// Per-booklet finishing labor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookletFinishing {
    pub base_labor: f64,
    pub cover_creasing: f64,
    pub binding_per_sheet: f64,
}

/// Per-book hardware and labor for one binding style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRate {
    pub hardware: f64,
    pub labor: f64,
}

/// Per-piece finishing costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinishingTable {
    pub folding: BTreeMap<String, f64>,
    pub coatings: BTreeMap<String, f64>,
    pub scoring: f64,
    pub perforation: f64,
    pub hole_punch: f64,
    pub lanyard: f64,
    pub booklet: BookletFinishing,
    pub binding: BTreeMap<String, BindingRate>,
    pub padding_per_sheet: f64,
}

impl FinishingTable {
    pub fn fold_cost(&self, fold_type: &str) -> PricingResult<f64> {
        self.folding.get(fold_type).copied().ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("unsupported fold type: {fold_type}"))
        })
    }

    pub fn coating_cost(&self, coating: &str) -> PricingResult<f64> {
        self.coatings.get(coating).copied().ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("unsupported coating: {coating}"))
        })
    }

    pub fn binding_rate(&self, binding_type: &str) -> PricingResult<&BindingRate> {
        self.binding.get(binding_type).ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("unsupported binding type: {binding_type}"))
        })
    }
}

// =============================================================================
// Rush
// =============================================================================

/// Rush multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RushTable {
    pub tiers: BTreeMap<RushTier, f64>,
    /// Keyed `standard | rush | express`.
    pub promotional: BTreeMap<String, f64>,
}

impl RushTable {
    /// Multiplier for `tier`; a tier missing from the table prices at 1.0.
    pub fn multiplier(&self, tier: RushTier) -> f64 {
        match self.tiers.get(&tier) {
            Some(m) => *m,
            None => {
                debug!(tier = %tier, "Rush tier not in table, using 1.0");
                1.0
            }
        }
    }

    /// Promotional multiplier; missing keys price at 1.0.
    pub fn promo_multiplier(&self, tier: RushTier) -> f64 {
        self.promo_by_key(tier.promo_key())
    }

    /// Apparel only knows standard and express.
    pub fn apparel_multiplier(&self, tier: RushTier) -> f64 {
        if tier.is_standard() {
            self.promo_by_key("standard")
        } else {
            self.promo_by_key("express")
        }
    }

    fn promo_by_key(&self, key: &str) -> f64 {
        match self.promotional.get(key) {
            Some(m) => *m,
            None => {
                debug!(key, "Promotional rush key not in table, using 1.0");
                1.0
            }
        }
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Allowed page (or sheet) counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRule {
    pub min: u32,
    pub max: u32,
    pub multiple: u32,
}

/// Order limits for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConstraints {
    pub min_quantity: u32,
    pub max_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageRule>,
    /// Notepad sheets per pad.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets: Option<PageRule>,
}

// =============================================================================
// Product Families
// =============================================================================

/// Poster limits and square-foot pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LargeFormatConfig {
    /// Preset size code → square feet.
    pub sizes: BTreeMap<String, f64>,
    pub min_dimension: f64,
    /// Applies when the material has no `max_width`.
    pub default_max_width: f64,
    pub max_height: f64,
    pub max_area_sqft: f64,
    /// Keyed on total square feet (`sqft × quantity`).
    pub discount: DiscountLadder,
}

/// Sticker pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickerConfig {
    pub price_per_sqft: f64,
    pub setup_fee: f64,
    /// Keyed on total square feet.
    pub discount: DiscountLadder,
    pub premium_markup: f64,
}

/// Per-impression rate, by minimum quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTier {
    pub min_quantity: u32,
    pub rate: f64,
}

/// Envelope pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvelopeConfig {
    pub stock_markup: f64,
    pub color: Vec<RateTier>,
    pub black_white: Vec<RateTier>,
}

impl EnvelopeConfig {
    /// Rate of the highest tier with `min_quantity ≤ quantity`.
    pub fn impression_rate(tiers: &[RateTier], quantity: u32) -> f64 {
        tiers
            .iter()
            .filter(|t| t.min_quantity <= quantity)
            .max_by_key(|t| t.min_quantity)
            .or_else(|| tiers.iter().min_by_key(|t| t.min_quantity))
            .map(|t| t.rate)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookletConfig {
    /// Trim sizes within this box print two booklets per sheet set.
    pub multi_up_max_width: f64,
    pub multi_up_max_height: f64,
    pub setup_per_page: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotebookConfig {
    pub default_width: f64,
    pub default_height: f64,
    pub fallback_imposition: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotepadConfig {
    pub default_backing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerfectBoundConfig {
    pub finishing_setup_fee: f64,
    pub labor_per_book: f64,
    pub cover_clicks: f64,
    pub min_cover_weight: u32,
}

// =============================================================================
// Promotional
// =============================================================================

/// Supplier costs for one promotional category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCategory {
    /// Falls back to the catalog default markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<f64>,
    #[serde(default)]
    pub setup_fee: f64,
    /// Size code → supplier cost at each quantity bracket.
    pub costs: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationPricing {
    pub setup_fee: f64,
    /// Per piece.
    pub printing_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentCost {
    /// XS through XL.
    pub standard: f64,
    /// 2XL and up.
    pub extended: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApparelConfig {
    pub garments: BTreeMap<String, GarmentCost>,
    /// Keyed on piece count.
    pub discount: DiscountLadder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToteBagConfig {
    pub bag_cost: f64,
    pub print_size_multipliers: BTreeMap<String, f64>,
}

/// Supplier-sourced products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromoCatalog {
    pub brackets: Vec<u32>,
    pub default_markup: f64,
    pub categories: BTreeMap<ProductType, PromoCategory>,
    pub decorations: BTreeMap<String, DecorationPricing>,
    pub apparel: ApparelConfig,
    pub tote_bags: ToteBagConfig,
}

impl PromoCatalog {
    pub fn category(&self, product: ProductType) -> PricingResult<&PromoCategory> {
        self.categories.get(&product).ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("no supplier table for {product}"))
        })
    }

    /// Supplier cost curve for `size` in `category`.
    pub fn curve(&self, category: &PromoCategory, size: &str) -> PricingResult<BracketCurve> {
        let costs = category.costs.get(size).ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("size {size} is not offered"))
        })?;
        BracketCurve::from_brackets(&self.brackets, costs)
    }

    pub fn markup_for(&self, category: &PromoCategory) -> f64 {
        category.markup.unwrap_or(self.default_markup)
    }

    pub fn decoration(&self, method: &str) -> PricingResult<&DecorationPricing> {
        self.decorations.get(method).ok_or_else(|| {
            PricingError::ConfigurationInvalid(format!("unsupported decoration: {method}"))
        })
    }
}

// =============================================================================
// Aggregate
// =============================================================================

/// All pricing data for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingTables {
    pub formula: FormulaConfig,
    pub papers: Vec<PaperStock>,
    pub finishing: FinishingTable,
    pub rush: RushTable,
    pub constraints: BTreeMap<ProductType, ProductConstraints>,
    /// Per product: size code → copies per sheet.
    pub imposition: BTreeMap<ProductType, BTreeMap<String, u32>>,
    pub large_format: LargeFormatConfig,
    pub stickers: StickerConfig,
    pub envelopes: EnvelopeConfig,
    pub booklet: BookletConfig,
    pub notebook: NotebookConfig,
    pub notepad: NotepadConfig,
    pub perfect_bound: PerfectBoundConfig,
    pub promo: PromoCatalog,
}

impl PricingTables {
    /// Catalog entry for `code`.
    pub fn paper(&self, code: &str) -> PricingResult<&PaperStock> {
        self.papers
            .iter()
            .find(|p| p.code == code)
            .ok_or_else(|| PricingError::MaterialNotFound {
                code: code.to_string(),
            })
    }

    pub fn constraints(&self, product: ProductType) -> Option<&ProductConstraints> {
        self.constraints.get(&product)
    }

    /// Copies per sheet from the static fallback table.
    pub fn fallback_copies(&self, product: ProductType, size_code: &str) -> Option<u32> {
        self.imposition
            .get(&product)
            .and_then(|sizes| sizes.get(size_code))
            .copied()
            .filter(|c| *c > 0)
    }

    /// Checks cross-table consistency that serde cannot.
    pub fn validate(&self) -> PricingResult<()> {
        let invalid = |msg: String| Err(PricingError::ConfigurationInvalid(msg));

        if self.formula.base_production_rate < 0.0 || self.formula.efficiency_exponent <= 0.0 {
            return invalid("formula rate must be ≥ 0 and exponent > 0".to_string());
        }
        if let Some((product, e)) = self
            .formula
            .exponent_overrides
            .iter()
            .find(|(_, e)| **e <= 0.0)
        {
            return invalid(format!("exponent for {product} must be positive, got {e}"));
        }

        let mut seen = std::collections::BTreeSet::new();
        for paper in &self.papers {
            if !seen.insert(paper.code.as_str()) {
                return invalid(format!("duplicate paper code {}", paper.code));
            }
        }

        for (product, c) in &self.constraints {
            if c.min_quantity == 0 || c.min_quantity > c.max_quantity {
                return invalid(format!("{product} quantity range is empty"));
            }
            if c.step == Some(0) {
                return invalid(format!("{product} quantity step must be positive"));
            }
            for rule in c.pages.iter().chain(c.sheets.iter()) {
                if rule.multiple == 0 || rule.min > rule.max {
                    return invalid(format!("{product} page rule is empty"));
                }
            }
        }

        for (product, category) in &self.promo.categories {
            for (size, costs) in &category.costs {
                if costs.len() != self.promo.brackets.len() {
                    return invalid(format!(
                        "{product} {size} has {} costs for {} brackets",
                        costs.len(),
                        self.promo.brackets.len()
                    ));
                }
            }
            for size in category.costs.keys() {
                self.promo.curve(category, size)?;
            }
        }

        if self.rush.tiers.values().any(|m| *m < 1.0) {
            return invalid("rush multipliers must be at least 1.0".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
