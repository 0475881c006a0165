//! # Seed Data Generator
//!
//! Populates the database with demo carts for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 carts (default)
//! cargo run -p basket-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p basket-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p basket-db --bin seed -- --db ./data/basket.db
//! ```
//!
//! Carts rotate through destinations so every shipping tier, method and
//! customer type shows up in the data.

use basket_core::{Address, Cart, CustomerType, Item, ShippingMethod};
use basket_db::{Database, DbConfig};
use std::env;

/// Destinations relative to the default Dallas depot.
const DESTINATIONS: &[(&str, &str, &str)] = &[
    ("1200 Main St", "Dallas", "USA"),
    ("500 Congress Ave", "Austin", "USA"),
    ("77 Market St", "San Francisco", "USA"),
    ("10 Downing St", "London", "UK"),
    ("1 Yonge St", "Toronto", "Canada"),
];

/// (product_id, name, price in cents)
const PRODUCTS: &[(&str, &str, i64)] = &[
    ("BOOK-001", "Rust in Action", 3999),
    ("BOOK-002", "Programming Rust", 4499),
    ("MUG-001", "Coffee Mug", 1299),
    ("SHIRT-001", "T-Shirt", 1999),
    ("STICKER-001", "Sticker Pack", 499),
    ("CABLE-001", "USB-C Cable", 899),
    ("LAMP-001", "Desk Lamp", 2950),
];

const METHODS: &[ShippingMethod] = &[
    ShippingMethod::Standard,
    ShippingMethod::Expedited,
    ShippingMethod::Priority,
    ShippingMethod::Express,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./basket_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Basket Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of carts to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./basket_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Basket Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Carts:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.carts().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} carts", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let cart = generate_cart(seed);
        if let Err(e) = db.carts().create(cart).await {
            eprintln!("Failed to insert cart {}: {}", seed, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} carts in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Builds one demo cart. Items never repeat a product id.
fn generate_cart(seed: usize) -> Cart {
    let (street, city, country) = DESTINATIONS[seed % DESTINATIONS.len()];
    let customer_type = if seed % 3 == 0 {
        CustomerType::Premium
    } else {
        CustomerType::Standard
    };

    let mut cart = Cart::new(
        format!("customer-{:04}", seed % 20),
        customer_type,
        Address::new(street, city, country),
    );
    cart.shipping_method = METHODS[seed % METHODS.len()];

    let item_count = 1 + seed % 4;
    cart.items = (0..item_count)
        .map(|offset| {
            let (id, name, price_cents) = PRODUCTS[(seed + offset) % PRODUCTS.len()];
            let quantity = 1 + ((seed * 7 + offset) % 5) as u32;
            Item::new(id, name, price_cents, quantity)
        })
        .collect();

    cart
}
