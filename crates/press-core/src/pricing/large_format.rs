//! Posters on roll or rigid media, priced by the square foot.
//!
//! ```text
//! material = sqft × chargeRate × quantity
//! discount = ladder(sqft × quantity) × material
//! ```
//!
//! No setup fee, no production curve.

use super::{CostComponents, CostStrategy, PricingContext};
use crate::error::{PricingError, PricingResult, ValidationError};
use crate::tables::{LargeFormatConfig, PaperStock};
use crate::types::{Dimensions, PriceBreakdown};

pub(crate) struct LargeFormat;

impl CostStrategy for LargeFormat {
    fn price(&self, ctx: &PricingContext<'_>) -> PricingResult<PriceBreakdown> {
        let settings = &ctx.tables.large_format;
        let material = ctx.paper(ctx.config.paper.stock.as_deref(), "material")?;
        let rate = material.charge_rate()?;

        let square_feet = square_feet(settings, material, ctx.dimensions()?)?;
        let quantity = ctx.quantity() as f64;
        let total_square_feet = square_feet * quantity;
        let gross = square_feet * rate * quantity;

        let mut parts = CostComponents {
            material: gross,
            ..Default::default()
        };
        parts.apply_discount(settings.discount.rate_for(total_square_feet), gross);
        parts.details.square_feet = Some(square_feet);
        parts.details.materials_used = vec![material.display_name.clone()];

        Ok(parts.finish(ctx, ctx.rush_multiplier()))
    }
}

/// Area of one poster.
///
/// Rigid boards with a fixed size ignore the requested dimensions; preset
/// codes use the size table; custom sizes are checked against the media.
pub(crate) fn square_feet(
    settings: &LargeFormatConfig,
    material: &PaperStock,
    dims: &Dimensions,
) -> PricingResult<f64> {
    if let Some((width, height)) = material.fixed_size() {
        return Ok(width * height / 144.0);
    }

    match dims {
        Dimensions::SizeCode { .. } => {
            let label = dims.label();
            settings.sizes.get(&label).copied().ok_or_else(|| {
                PricingError::ConfigurationInvalid(format!("Size {label} not offered for posters"))
            })
        }
        Dimensions::Custom { width, height } => {
            let (width, height) = (*width, *height);
            if width < settings.min_dimension || height < settings.min_dimension {
                return Err(PricingError::DimensionTooSmall {
                    min: settings.min_dimension,
                });
            }
            let max_width = material.max_width.unwrap_or(settings.default_max_width);
            if width > max_width || height > settings.max_height {
                return Err(PricingError::DimensionTooLarge {
                    max_width,
                    max_height: settings.max_height,
                });
            }
            let area = width * height / 144.0;
            if area > settings.max_area_sqft {
                return Err(ValidationError::OutOfRange {
                    field: "square_feet".to_string(),
                    min: 0,
                    max: settings.max_area_sqft as i64,
                }
                .into());
            }
            Ok(area)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
