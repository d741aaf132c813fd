//! # Validation Module
//!
//! Configuration checks that run before any cost strategy.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Configurator UI                                              │
//! │  ├── Dropdowns only offer valid sizes/papers                           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization                                              │
//! │  └── Unknown product types / rush tiers rejected by serde              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Required options per product                                      │
//! │  ├── Quantity range and step                                           │
//! │  ├── Page / sheet counts                                               │
//! │  └── Paper selection shape                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Strategies (material kinds, size limits, table lookups)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::tables::{PageRule, PricingTables, ProductConstraints};
use crate::types::{ProductConfiguration, ProductFamily, ProductType};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Cover code that means "print the cover on the text stock".
pub const SELF_COVER: &str = "SELF_COVER";

// =============================================================================
// Entry Point
// =============================================================================

/// Validates `config` against the product's constraints and required options.
///
/// ## Example
/// ```rust
/// use press_core::tables::PricingTables;
/// use press_core::types::{ProductConfiguration, ProductType};
/// use press_core::validation::validate_configuration;
///
/// let tables = PricingTables::default();
/// let config = ProductConfiguration::new(ProductType::Postcards, 50)
///     .with_size("4x6")
///     .with_stock("LYNOC95FSC");
/// assert!(validate_configuration(&config, &tables).is_err()); // min is 100
/// ```
pub fn validate_configuration(
    config: &ProductConfiguration,
    tables: &PricingTables,
) -> PricingResult<()> {
    if config.quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into());
    }

    if let Some(constraints) = tables.constraints(config.product_type) {
        validate_quantity(config.product_type, config.quantity, constraints)?;
    }

    validate_required(config)?;
    validate_paper_shape(config)?;

    if let Some(constraints) = tables.constraints(config.product_type) {
        if let (Some(rule), Some(pages)) = (constraints.pages, config.finishing.pages) {
            validate_count("pages", pages, &rule)?;
        }
        if let (Some(rule), Some(sheets)) = (constraints.sheets, config.finishing.sheets) {
            validate_count("sheets", sheets, &rule)?;
        }
    }

    if let Some(dimensions) = &config.dimensions {
        dimensions.resolve()?;
    }

    Ok(())
}

// =============================================================================
// Quantity
// =============================================================================

/// Range check, then step check (`(quantity - min) % step == 0`).
pub fn validate_quantity(
    product: ProductType,
    quantity: u32,
    constraints: &ProductConstraints,
) -> PricingResult<()> {
    if quantity < constraints.min_quantity || quantity > constraints.max_quantity {
        return Err(PricingError::QuantityOutOfRange {
            product: product.to_string(),
            min: constraints.min_quantity,
            max: constraints.max_quantity,
            requested: quantity,
        });
    }

    if let Some(step) = constraints.step.filter(|s| *s > 1) {
        if (quantity - constraints.min_quantity) % step != 0 {
            return Err(ValidationError::NotMultipleOf {
                field: "quantity".to_string(),
                step,
            }
            .into());
        }
    }

    Ok(())
}

/// Page or sheet count within `rule`.
pub fn validate_count(field: &str, value: u32, rule: &PageRule) -> ValidationResult<()> {
    if value < rule.min || value > rule.max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: rule.min as i64,
            max: rule.max as i64,
        });
    }
    if rule.multiple > 1 && value % rule.multiple != 0 {
        return Err(ValidationError::NotMultipleOf {
            field: field.to_string(),
            step: rule.multiple,
        });
    }
    Ok(())
}

// =============================================================================
// Required Options
// =============================================================================

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn require<T>(value: &Option<T>, field: &str) -> ValidationResult<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(required(field)),
    }
}

fn require_text(value: &Option<String>, field: &str) -> ValidationResult<()> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(required(field)),
    }
}

fn validate_required(config: &ProductConfiguration) -> ValidationResult<()> {
    let paper = &config.paper;
    let finishing = &config.finishing;

    match config.product_type.family() {
        ProductFamily::SheetFormula => {
            require(&config.dimensions, "dimensions")?;
            require_text(&paper.stock, "paper")?;
            if matches!(
                config.product_type,
                ProductType::Brochures | ProductType::FoldedPrints
            ) {
                require_text(&finishing.fold_type, "fold_type")?;
            }
        }
        ProductFamily::Booklet | ProductFamily::PerfectBound => {
            require(&finishing.pages, "pages")?;
            require_text(&paper.cover, "cover")?;
            require_text(&paper.text, "text")?;
        }
        ProductFamily::Notebook => {
            require(&finishing.pages, "pages")?;
            require_text(&paper.cover, "cover")?;
            require_text(&paper.text, "text")?;
            require_text(&finishing.binding_type, "binding_type")?;
        }
        ProductFamily::Notepad => {
            require(&config.dimensions, "dimensions")?;
            require(&finishing.sheets, "sheets")?;
            require_text(&paper.stock, "paper")?;
        }
        ProductFamily::LargeFormat => {
            require(&config.dimensions, "dimensions")?;
            require_text(&paper.stock, "material")?;
        }
        ProductFamily::Sticker | ProductFamily::Promotional => {
            require(&config.dimensions, "dimensions")?;
        }
        ProductFamily::Envelope => {
            require_text(&paper.stock, "envelope")?;
            require(&finishing.envelope_print, "envelope_print")?;
        }
        ProductFamily::Apparel => {
            require_text(&finishing.garment, "garment")?;
            require_text(&finishing.decoration, "decoration")?;
            if let Some(extended) = finishing.extended_quantity {
                if extended > config.quantity {
                    return Err(ValidationError::OutOfRange {
                        field: "extended_quantity".to_string(),
                        min: 0,
                        max: config.quantity as i64,
                    });
                }
            }
        }
        ProductFamily::ToteBag => {
            require_text(&finishing.decoration, "decoration")?;
            require_text(&finishing.print_size, "print_size")?;
        }
    }
    Ok(())
}

/// Single-stock products use `stock`; paged products use `cover` + `text`.
fn validate_paper_shape(config: &ProductConfiguration) -> ValidationResult<()> {
    let paper = &config.paper;
    let conflict = |first: &str, second: &str| ValidationError::Conflicting {
        first: first.to_string(),
        second: second.to_string(),
    };

    let paged = matches!(
        config.product_type.family(),
        ProductFamily::Booklet | ProductFamily::Notebook | ProductFamily::PerfectBound
    );

    if paged {
        if paper.stock.is_some() {
            return Err(conflict("stock", "cover/text"));
        }
    } else if paper.stock.is_some() && (paper.cover.is_some() || paper.text.is_some()) {
        return Err(conflict("stock", "cover/text"));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinishingOptions, PaperSelection};

    fn tables() -> PricingTables {
        PricingTables::default()
    }

    #[test]
    fn test_quantity_range() {
        let config = ProductConfiguration::new(ProductType::Postcards, 99)
            .with_size("4x6")
            .with_stock("LYNOC95FSC");
        assert_eq!(
            validate_configuration(&config, &tables()).unwrap_err(),
            PricingError::QuantityOutOfRange {
                product: "postcards".to_string(),
                min: 100,
                max: 5000,
                requested: 99,
            }
        );

        let config = ProductConfiguration::new(ProductType::Postcards, 100)
            .with_size("4x6")
            .with_stock("LYNOC95FSC");
        assert!(validate_configuration(&config, &tables()).is_ok());
    }

    #[test]
    fn test_quantity_step_for_promotional() {
        let tables = tables();
        let magnets = |q| ProductConfiguration::new(ProductType::Magnets, q).with_size("3x3");
        assert!(validate_configuration(&magnets(50), &tables).is_ok());
        assert!(matches!(
            validate_configuration(&magnets(52), &tables),
            Err(PricingError::Validation(ValidationError::NotMultipleOf { step: 5, .. }))
        ));
    }

    #[test]
    fn test_zero_quantity() {
        let config = ProductConfiguration::new(ProductType::Flyers, 0);
        assert!(matches!(
            validate_configuration(&config, &tables()),
            Err(PricingError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_brochure_requires_fold() {
        let config = ProductConfiguration::new(ProductType::Brochures, 100)
            .with_size("8.5x11")
            .with_stock("LYNO416FSC");
        assert_eq!(
            validate_configuration(&config, &tables()).unwrap_err(),
            PricingError::Validation(ValidationError::Required {
                field: "fold_type".to_string()
            })
        );
    }

    #[test]
    fn test_booklet_pages_rule() {
        let booklet = |pages| {
            ProductConfiguration::new(ProductType::Booklets, 50)
                .with_size("8.5x11")
                .with_paper(PaperSelection::cover_and_text("LYNOC76FSC", "LYNO416FSC"))
                .with_finishing(FinishingOptions {
                    pages: Some(pages),
                    ..Default::default()
                })
        };
        let tables = tables();
        assert!(validate_configuration(&booklet(16), &tables).is_ok());
        assert!(matches!(
            validate_configuration(&booklet(18), &tables),
            Err(PricingError::Validation(ValidationError::NotMultipleOf { .. }))
        ));
        assert!(matches!(
            validate_configuration(&booklet(52), &tables),
            Err(PricingError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_paper_exclusivity() {
        let mut config = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_size("8.5x11")
            .with_stock("LYNO416FSC");
        config.paper.cover = Some("LYNOC76FSC".to_string());
        assert!(matches!(
            validate_configuration(&config, &tables()),
            Err(PricingError::Validation(ValidationError::Conflicting { .. }))
        ));
    }

    #[test]
    fn test_apparel_extended_quantity_bound() {
        let config = ProductConfiguration::new(ProductType::Apparel, 24).with_finishing(
            FinishingOptions {
                garment: Some("gildan-6400".to_string()),
                decoration: Some("dtf".to_string()),
                extended_quantity: Some(30),
                ..Default::default()
            },
        );
        assert!(validate_configuration(&config, &tables()).is_err());
    }

    #[test]
    fn test_bad_size_code() {
        let config = ProductConfiguration::new(ProductType::Flyers, 100)
            .with_size("letter")
            .with_stock("LYNO416FSC");
        assert!(matches!(
            validate_configuration(&config, &tables()),
            Err(PricingError::Validation(ValidationError::InvalidFormat { .. }))
        ));
    }
}
