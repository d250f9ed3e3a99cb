//! # Store File Initializer
//!
//! Creates a store document with the default catalog, ready to open.
//!
//! ## Usage
//! ```bash
//! # Seed the default path (./tpv.json)
//! cargo run -p tpv-store --bin seed
//!
//! # Specify the document path
//! cargo run -p tpv-store --bin seed -- --db ./data/tpv.json
//!
//! # Overwrite an existing document
//! cargo run -p tpv-store --bin seed -- --db ./data/tpv.json --force
//! ```
//!
//! ## Seeded Catalog
//! - Categories: Bebidas, Comidas, Postres
//! - Products: Café 1.50€, Cerveza 2.50€, Hamburguesa 5.00€
//! - Tables: 8 empty tables, numbered 1 through 8

use std::env;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use tpv_store::{DataStore, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./tpv.json");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => {
                force = true;
            }
            "--help" | "-h" => {
                println!("tpv Store File Initializer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Store document path (default: ./tpv.json)");
                println!("  -f, --force        Overwrite an existing document");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 tpv Store File Initializer");
    println!("=============================");
    println!("Document: {}", db_path);
    println!();

    if Path::new(&db_path).exists() && !force {
        println!("⚠ Document already exists");
        println!("  Skipping seed to avoid overwriting live data.");
        println!("  Pass --force to overwrite.");
        return Ok(());
    }

    // Opening against a missing document seeds and persists the default
    // catalog; with --force we write over whatever was there.
    let mut store = DataStore::open(StoreConfig::new(&db_path));
    if force {
        store.import(&serde_json::to_string(&tpv_core::PosData::seed())?)?;
    }

    println!("✓ Store document written");
    println!();
    println!("  Categories: {}", store.data().categories.len());
    println!("  Products:   {}", store.data().products.len());
    println!("  Tables:     {}", store.data().tables.len());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
