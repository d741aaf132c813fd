use std::path::PathBuf;
use std::sync::Arc;

use press_core::{FinishingOptions, PricingError, PricingTables, ProductConfiguration, ProductType};
use press_data::{write_tables, DataConfig, PricingDataManager, TableSource};

fn brochure() -> ProductConfiguration {
    ProductConfiguration::new(ProductType::Brochures, 100)
        .with_size("8.5x11")
        .with_stock("LYNO416FSC")
        .with_finishing(FinishingOptions {
            fold_type: Some("bifold".to_string()),
            ..Default::default()
        })
}

fn scratch_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("press-reload-{}", uuid::Uuid::new_v4()))
        .join("pricing.json")
}

/// Editing the tables file and reloading changes new quotes only.
#[tokio::test]
async fn test_reload_picks_up_file_changes() {
    let path = scratch_file();
    write_tables(&path, &PricingTables::default()).unwrap();

    let manager = PricingDataManager::new(DataConfig::from_file(&path));
    let snapshot = manager.load().await.unwrap();
    assert_eq!(snapshot.source, TableSource::File);

    let before_engine = manager.engine().await.unwrap();
    let before = before_engine.price(&brochure()).unwrap();
    assert_eq!(before.quote().total.cents(), 10348);

    let mut tables = PricingTables::default();
    tables.formula.setup_fee += 10.0;
    write_tables(&path, &tables).unwrap();
    manager.reload().await.unwrap();

    let after = manager.engine().await.unwrap().price(&brochure()).unwrap();
    assert!((after.subtotal - before.subtotal - 10.0).abs() < 1e-9);
    // the engine taken before the reload still prices with the old tables
    assert_eq!(before_engine.price(&brochure()).unwrap(), before);

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

/// Many callers parked on the gate all wake on the first load.
#[tokio::test]
async fn test_waiters_wake_on_first_load() {
    let manager = Arc::new(PricingDataManager::default());
    assert!(matches!(
        manager.engine().await,
        Err(PricingError::PricingDataUnavailable)
    ));

    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move {
                let engine = manager.wait_ready().await?;
                engine.price(&brochure())
            })
        })
        .collect();

    manager.load().await.unwrap();

    for waiter in waiters {
        let breakdown = waiter.await.unwrap().unwrap();
        assert_eq!(breakdown.quote().total.cents(), 10348);
    }
}
