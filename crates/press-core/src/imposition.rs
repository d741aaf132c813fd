//! # Imposition Calculator
//!
//! How many finished pieces fit on one press sheet.
//!
//! ## Sheet Geometry
//! ```text
//! ┌──────────────── 12.48" printable ────────────────┐
//! │ ┌──────────────┐ ┌──────────────┐                │
//! │ │░░░░░░░░░░░░░░│ │░░░░░░░░░░░░░░│  ░ = 0.125"    │
//! │ │░┌──────────┐░│ │░┌──────────┐░│      bleed     │
//! │ │░│   trim   │░│ │░│   trim   │░│                │  18.26"
//! │ │░└──────────┘░│ │░└──────────┘░│                │  printable
//! │ │░░░░░░░░░░░░░░│ │░░░░░░░░░░░░░░│                │
//! │ └──────────────┘ └──────────────┘                │
//! │        ... rows repeat down the sheet ...        │
//! └──────────────────────────────────────────────────┘
//!
//! portrait  = ⌊12.48 / bw⌋ × ⌊18.26 / bh⌋
//! landscape = ⌊12.48 / bh⌋ × ⌊18.26 / bw⌋     (ties → portrait)
//! ```
//!
//! Pure geometry: no tables, no logging.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::types::{EfficiencyRating, ImpositionResult, Orientation};

// =============================================================================
// Sheet Constants
// =============================================================================

/// Bleed added to each edge of the trim, in inches.
pub const BLEED: f64 = 0.125;

/// Printable area of the press sheet.
pub const PRINTABLE_WIDTH: f64 = 12.48;
pub const PRINTABLE_HEIGHT: f64 = 18.26;

/// Smallest trim dimension accepted.
pub const MIN_DIMENSION: f64 = 1.0;

/// Largest trim size that still fits once bleed is added.
pub const MAX_TRIM_WIDTH: f64 = 12.23;
pub const MAX_TRIM_HEIGHT: f64 = 18.01;

// Guards `floor` and bound checks against 12.23 + 0.25 landing a hair past 12.48.
const EPSILON: f64 = 1e-9;

// =============================================================================
// Core Calculations
// =============================================================================

/// Best layout of `trim_width × trim_height` pieces on the press sheet.
///
/// ## Example
/// ```rust
/// use press_core::imposition::calculate_imposition;
///
/// let result = calculate_imposition(8.5, 11.0).unwrap();
/// assert_eq!(result.copies_per_sheet, 2);
/// assert_eq!(result.bleed_width, 8.75);
/// ```
pub fn calculate_imposition(trim_width: f64, trim_height: f64) -> PricingResult<ImpositionResult> {
    if !(trim_width >= MIN_DIMENSION && trim_height >= MIN_DIMENSION) {
        return Err(PricingError::DimensionTooSmall { min: MIN_DIMENSION });
    }

    let bleed_width = trim_width + BLEED * 2.0;
    let bleed_height = trim_height + BLEED * 2.0;

    if bleed_width > PRINTABLE_WIDTH + EPSILON || bleed_height > PRINTABLE_HEIGHT + EPSILON {
        return Err(PricingError::DimensionTooLarge {
            max_width: MAX_TRIM_WIDTH,
            max_height: MAX_TRIM_HEIGHT,
        });
    }

    let portrait = fits(PRINTABLE_WIDTH, bleed_width) * fits(PRINTABLE_HEIGHT, bleed_height);
    let landscape = fits(PRINTABLE_WIDTH, bleed_height) * fits(PRINTABLE_HEIGHT, bleed_width);

    let (copies, orientation) = if landscape > portrait {
        (landscape, Orientation::Landscape)
    } else {
        (portrait, Orientation::Portrait)
    };

    let used = copies as f64 * bleed_width * bleed_height;
    let efficiency = used / (PRINTABLE_WIDTH * PRINTABLE_HEIGHT) * 100.0;

    Ok(ImpositionResult {
        copies_per_sheet: copies,
        efficiency_percent: round_to(efficiency, 1),
        orientation,
        bleed_width: round_to(bleed_width, 3),
        bleed_height: round_to(bleed_height, 3),
    })
}

/// Press sheets needed for `quantity` pieces at `copies_per_sheet` up.
///
/// Returns 0 when `copies_per_sheet` is 0.
pub fn calculate_sheets_required(quantity: u32, copies_per_sheet: u32) -> u32 {
    if copies_per_sheet == 0 {
        return 0;
    }
    quantity.div_ceil(copies_per_sheet)
}

fn fits(available: f64, piece: f64) -> u32 {
    ((available + EPSILON) / piece).floor() as u32
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// =============================================================================
// Size Codes
// =============================================================================

/// Parses `"8.5x11"`, `"8.5\"x11\""` or `"8.5 X 11"` into inches.
pub fn parse_size_code(code: &str) -> Result<(f64, f64), ValidationError> {
    let cleaned: String = code
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ' '))
        .collect::<String>()
        .to_lowercase();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "size".to_string(),
        reason: format!("{reason}: '{code}'"),
    };

    let (w, h) = cleaned
        .split_once('x')
        .ok_or_else(|| invalid("expected WIDTHxHEIGHT"))?;
    let width: f64 = w.parse().map_err(|_| invalid("width is not a number"))?;
    let height: f64 = h.parse().map_err(|_| invalid("height is not a number"))?;

    if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(invalid("dimensions must be positive"));
    }
    Ok((width, height))
}

/// `5.5, 8.5` → `5½" × 8½"`.
pub fn format_dimensions(width: f64, height: f64) -> String {
    format!("{}\" × {}\"", format_dimension(width), format_dimension(height))
}

fn format_dimension(value: f64) -> String {
    let whole = value.floor();
    let eighths = ((value - whole) * 8.0).round();
    let glyph = match eighths as u8 {
        1 => Some("⅛"),
        2 => Some("¼"),
        3 => Some("⅜"),
        4 => Some("½"),
        5 => Some("⅝"),
        6 => Some("¾"),
        7 => Some("⅞"),
        _ => None,
    };
    let exact = ((value - whole) * 8.0 - eighths).abs() < EPSILON;
    match glyph {
        Some(g) if exact && whole > 0.0 => format!("{}{}", whole as u64, g),
        Some(g) if exact => g.to_string(),
        _ => format!("{}", value),
    }
}

// =============================================================================
// Advisory Helpers
// =============================================================================

/// A nearby trim size that fits more copies per sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SizeSuggestion {
    pub width: f64,
    pub height: f64,
    pub copies_per_sheet: u32,
    pub efficiency_percent: f64,
    /// Extra copies per sheet over the requested size.
    pub improvement: u32,
}

/// Up to three nearby sizes (within 20% per axis, on a ⅛" grid) that
/// impose better than the requested size, best first.
pub fn suggest_optimized_sizes(
    trim_width: f64,
    trim_height: f64,
) -> PricingResult<Vec<SizeSuggestion>> {
    const TARGETS: [u32; 7] = [4, 6, 8, 10, 12, 16, 20];

    let current = calculate_imposition(trim_width, trim_height)?;
    let mut suggestions: Vec<SizeSuggestion> = Vec::new();

    for target in TARGETS.iter().filter(|t| **t > current.copies_per_sheet) {
        for across in 1..=6u32 {
            if target % across != 0 {
                continue;
            }
            let down = target / across;

            let width = PRINTABLE_WIDTH / across as f64 - BLEED * 2.0;
            let height = PRINTABLE_HEIGHT / down as f64 - BLEED * 2.0;
            if width <= 0.0 || height <= 0.0 {
                continue;
            }
            let near = |suggested: f64, original: f64| {
                (suggested - original).abs() / original <= 0.2
            };
            if !near(width, trim_width) || !near(height, trim_height) {
                continue;
            }

            let width = (width * 8.0).round() / 8.0;
            let height = (height * 8.0).round() / 8.0;
            let Ok(test) = calculate_imposition(width, height) else {
                continue;
            };
            if test.copies_per_sheet <= current.copies_per_sheet {
                continue;
            }
            if suggestions
                .iter()
                .any(|s| s.width == width && s.height == height)
            {
                continue;
            }
            suggestions.push(SizeSuggestion {
                width,
                height,
                copies_per_sheet: test.copies_per_sheet,
                efficiency_percent: test.efficiency_percent,
                improvement: test.copies_per_sheet - current.copies_per_sheet,
            });
        }
    }

    suggestions.sort_by(|a, b| b.improvement.cmp(&a.improvement));
    suggestions.truncate(3);
    Ok(suggestions)
}

/// Spare pieces produced by printing whole sheets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WasteReport {
    pub sheets: u32,
    pub spare_pieces: u32,
    /// Spare share of sheet capacity, two decimals.
    pub waste_percent: f64,
}

pub fn calculate_waste(quantity: u32, copies_per_sheet: u32) -> WasteReport {
    let sheets = calculate_sheets_required(quantity, copies_per_sheet);
    let capacity = sheets * copies_per_sheet;
    let spare = capacity.saturating_sub(quantity);
    let waste_percent = if capacity > 0 {
        round_to(spare as f64 / capacity as f64 * 100.0, 2)
    } else {
        0.0
    };
    WasteReport {
        sheets,
        spare_pieces: spare,
        waste_percent,
    }
}

/// Rating plus a message for the UI.
pub fn rate_efficiency(result: &ImpositionResult) -> (EfficiencyRating, &'static str) {
    let rating = EfficiencyRating::from_percent(result.efficiency_percent);
    (rating, rating.message())
}

// =============================================================================
// Unit Tests
// =============================================================================
