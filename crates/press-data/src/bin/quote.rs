//! # Quote
//!
//! Prices one product configuration from the command line.
//!
//! ## Usage
//! ```bash
//! # Price with the built-in (or press.toml-selected) tables
//! cargo run -p press-data --bin quote -- brochure.json
//!
//! # Price against a specific tables file
//! cargo run -p press-data --bin quote -- brochure.json --tables ./pricing.json
//!
//! # More logging
//! PRESS_LOG=debug cargo run -p press-data --bin quote -- brochure.json
//! ```
//!
//! The breakdown is printed to stdout as JSON; logs go to stderr.

use std::env;
use std::path::PathBuf;

use press_core::ProductConfiguration;
use press_data::{DataConfig, PricingDataManager};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Press Pricing Quote");
    println!();
    println!("Usage: quote <CONFIG.json> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -t, --tables <PATH>    Pricing tables JSON file (overrides press.toml)");
    println!("  -c, --config <PATH>    Loader config file (default: platform config dir)");
    println!("  -h, --help             Show this help message");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PRESS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut configuration: Option<PathBuf> = None;
    let mut tables: Option<PathBuf> = None;
    let mut loader_config: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tables" | "-t" => {
                if i + 1 < args.len() {
                    tables = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    loader_config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => configuration = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let Some(configuration) = configuration else {
        print_help();
        return Err("missing product configuration file".into());
    };

    init_tracing();

    let product: ProductConfiguration =
        serde_json::from_str(&std::fs::read_to_string(&configuration)?)?;

    // An explicit tables file must load; press.toml selections fall back
    let manager = match tables {
        Some(path) => {
            let manager = PricingDataManager::new(DataConfig::from_file(path));
            manager.reload().await?;
            manager
        }
        None => {
            let manager = PricingDataManager::new(DataConfig::load_or_default(loader_config));
            manager.reload_or_default().await;
            manager
        }
    };

    let engine = manager.wait_ready().await?;
    let breakdown = engine.price(&product)?;
    let quote = breakdown.quote();

    info!(
        product = %breakdown.product_type,
        quantity = breakdown.quantity,
        total = %quote.total,
        "Priced configuration"
    );

    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
