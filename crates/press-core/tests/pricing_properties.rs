use std::sync::Arc;

use press_core::imposition::{calculate_imposition, calculate_sheets_required};
use press_core::{
    FinishingOptions, PricingEngine, PricingError, PricingTables, ProductConfiguration,
    ProductType, RushTier,
};

fn brochure(quantity: u32) -> ProductConfiguration {
    ProductConfiguration::new(ProductType::Brochures, quantity)
        .with_size("8.5x11")
        .with_stock("LYNO416FSC")
        .with_finishing(FinishingOptions {
            fold_type: Some("bifold".to_string()),
            ..Default::default()
        })
}

// =============================================================================
// Imposition
// =============================================================================

#[test]
fn test_copies_never_increase_with_width() {
    let height = 4.0;
    let mut previous = u32::MAX;
    let mut width = 1.0;
    while width <= 12.23 {
        let copies = calculate_imposition(width, height).unwrap().copies_per_sheet;
        assert!(copies <= previous, "width {width} gave {copies} > {previous}");
        previous = copies;
        width += 0.05;
    }
}

#[test]
fn test_swapping_dimensions_keeps_copies() {
    for (w, h) in [(3.5, 2.0), (4.0, 6.0), (5.5, 8.5), (2.33, 3.0), (5.0, 7.0)] {
        let a = calculate_imposition(w, h).unwrap();
        let b = calculate_imposition(h, w).unwrap();
        assert_eq!(a.copies_per_sheet, b.copies_per_sheet, "{w}x{h}");
    }
}

#[test]
fn test_largest_trim_fits_once() {
    let result = calculate_imposition(12.23, 18.01).unwrap();
    assert_eq!(result.copies_per_sheet, 1);
    assert!(matches!(
        calculate_imposition(12.24, 18.01),
        Err(PricingError::DimensionTooLarge { .. })
    ));
    assert!(matches!(
        calculate_imposition(12.23, 18.02),
        Err(PricingError::DimensionTooLarge { .. })
    ));
}

#[test]
fn test_sheets_required_rounds_up() {
    for n in [1, 2, 7, 24] {
        for k in [1, 3, 10] {
            assert_eq!(calculate_sheets_required(k * n, n), k);
            assert_eq!(calculate_sheets_required(k * n + 1, n), k + 1);
        }
    }
    assert_eq!(calculate_sheets_required(100, 0), 0);
}

// =============================================================================
// Pricing
// =============================================================================

#[test]
fn test_brochure_example() {
    let engine = PricingEngine::with_default_tables();
    let b = engine.price(&brochure(100)).unwrap();
    assert!((b.production_cost - 47.43).abs() < 0.005);
    assert!((b.material_cost - 16.05).abs() < 0.005);
    assert!((b.finishing_cost - 10.0).abs() < 1e-9);
    assert!((b.subtotal - 103.48).abs() < 0.005);
    assert_eq!(b.quote().total.cents(), 10348);
}

#[test]
fn test_magnet_example() {
    let engine = PricingEngine::with_default_tables();
    let config = ProductConfiguration::new(ProductType::Magnets, 50).with_size("3x3");
    let b = engine.price(&config).unwrap();
    assert!((b.total_cost - 106.25).abs() < 1e-9);
    assert!((b.unit_price - 2.125).abs() < 1e-12);
}

#[test]
fn test_same_input_same_breakdown() {
    let engine = PricingEngine::with_default_tables();
    let config = brochure(500).with_rush(RushTier::TwoDay);
    assert_eq!(engine.price(&config).unwrap(), engine.price(&config).unwrap());
}

#[test]
fn test_formula_totals_rise_and_unit_prices_fall() {
    let engine = PricingEngine::with_default_tables();
    let mut last_total = 0.0;
    let mut last_unit = f64::INFINITY;
    for quantity in (25..=2500).step_by(25) {
        let b = engine.price(&brochure(quantity)).unwrap();
        assert!(b.total_cost >= last_total, "total fell at {quantity}");
        assert!(b.unit_price <= last_unit, "unit rose at {quantity}");
        last_total = b.total_cost;
        last_unit = b.unit_price;
    }
}

#[test]
fn test_rush_is_the_final_multiplier() {
    let engine = PricingEngine::with_default_tables();
    let poster = ProductConfiguration::new(ProductType::Posters, 10)
        .with_size("18x24")
        .with_stock("RMPS002");
    for tier in [
        RushTier::Standard,
        RushTier::TwoDay,
        RushTier::NextDay,
        RushTier::SameDay,
    ] {
        for config in [brochure(250).with_rush(tier), poster.clone().with_rush(tier)] {
            let b = engine.price(&config).unwrap();
            assert!((b.total_cost - b.subtotal * b.rush_multiplier).abs() < 1e-9);
        }
    }
}

#[test]
fn test_missing_rush_tier_prices_at_one() {
    let mut tables = PricingTables::default();
    tables.rush.tiers.remove(&RushTier::SameDay);
    let engine = PricingEngine::new(Arc::new(tables));
    let b = engine.price(&brochure(100).with_rush(RushTier::SameDay)).unwrap();
    assert_eq!(b.rush_multiplier, 1.0);
}

#[test]
fn test_large_format_ladder_boundaries() {
    let engine = PricingEngine::with_default_tables();
    let preset = |size: &str, quantity| {
        ProductConfiguration::new(ProductType::Posters, quantity)
            .with_size(size)
            .with_stock("RMPS002")
    };
    let rate = |config: &ProductConfiguration| {
        engine
            .price(config)
            .unwrap()
            .volume_discount
            .map(|d| d.rate)
            .unwrap_or(0.0)
    };

    // 18x24 is 3 sq ft
    assert_eq!(rate(&preset("18x24", 9)), 0.0);
    assert_eq!(rate(&preset("18x24", 10)), 0.05);
    assert_eq!(rate(&preset("18x24", 20)), 0.10);
    // 24x36 is 6 sq ft
    assert_eq!(rate(&preset("24x36", 15)), 0.15);
    // 36x48 is 12 sq ft
    assert_eq!(rate(&preset("36x48", 10)), 0.20);

    // 24" × 17.995" = 2.999 sq ft → 29.99 total
    let just_under = ProductConfiguration::new(ProductType::Posters, 10)
        .with_custom_size(24.0, 17.995)
        .with_stock("RMPS002");
    assert_eq!(rate(&just_under), 0.0);
}

#[test]
fn test_validation_stops_before_pricing() {
    let engine = PricingEngine::with_default_tables();
    let booklet = ProductConfiguration::new(ProductType::Booklets, 50).with_size("8.5x11");
    assert!(matches!(
        engine.price(&booklet),
        Err(PricingError::Validation(_))
    ));
}

#[test]
fn test_breakdown_json_shape() {
    let engine = PricingEngine::with_default_tables();
    let b = engine.price(&brochure(100)).unwrap();
    let json = serde_json::to_value(&b).unwrap();
    assert_eq!(json["productType"], "brochures");
    assert!(json["totalCost"].is_number());
    assert_eq!(json["details"]["copiesPerSheet"], 2);
}

#[tokio::test]
async fn test_concurrent_pricing_shares_tables() {
    let engine = PricingEngine::with_default_tables();
    let expected = engine.price(&brochure(1000)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.price(&brochure(1000)) })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), expected);
    }
}
