//! # Seed Data Generator
//!
//! Populates the database with the demo catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! ## Seeded Data
//! ```text
//! Categories                       Products
//! ───────────────────────────      ─────────────────────────────────────
//! Makanan      (snack)        ◄─── Indomie Godog   Rp3.500   stock 10
//! Minuman      (drinks)       ◄─── Vit 1000ml      Rp3.000   stock 40
//! Bumbu Dapur  (seasoning)    ◄─── kecap           Rp12.000  stock 20
//! ```

use kasir_core::{CategoryInput, ProductInput};
use kasir_db::{Database, DbConfig};
use std::env;

/// (name, description)
const CATEGORIES: &[(&str, &str)] = &[
    ("Makanan", "Produk makanan dan snack"),
    ("Minuman", "Produk minuman"),
    ("Bumbu Dapur", "Produk bumbu masak"),
];

/// (name, price, stock, index into CATEGORIES)
const PRODUCTS: &[(&str, i64, i64, usize)] = &[
    ("Indomie Godog", 3500, 10, 0),
    ("Vit 1000ml", 3000, 40, 1),
    ("kecap", 12000, 20, 2),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("🌱 Kasir POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?;
        println!("  + category #{} {}", category.id, category.name);
        category_ids.push(category.id);
    }

    for (name, price, stock, category_idx) in PRODUCTS {
        let product = db
            .products()
            .create(&ProductInput {
                name: name.to_string(),
                price: *price,
                stock: *stock,
                category_id: category_ids.get(*category_idx).copied(),
            })
            .await?;
        println!(
            "  + product  #{} {} {} (stock {})",
            product.id,
            product.name,
            product.unit_price(),
            product.stock
        );
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
