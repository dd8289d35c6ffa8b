//! # Seed Data Loader
//!
//! Populates a fresh database with the starter elevator catalog and the
//! default company settings.
//!
//! ## Usage
//! ```bash
//! # Seed ./liftquote.db (default)
//! cargo run -p liftquote-db --bin seed
//!
//! # Specify database path
//! cargo run -p liftquote-db --bin seed -- --db ./data/liftquote.db
//! ```
//!
//! Running it twice is harmless: a populated catalog is left alone.

use liftquote_core::{format_thousands, CompanyInfo, QuoteRequest, SystemType};
use liftquote_db::seed::{seed_database, starter_catalog};
use liftquote_db::{Database, DbConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("LIFTQUOTE_DB_PATH").unwrap_or_else(|_| "./liftquote.db".to_string());
    let mut company = CompanyInfo::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--company" => {
                if i + 1 < args.len() {
                    company.name = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("LiftQuote Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./liftquote.db)");
                println!("      --company <NAME>  Company name stored in settings");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("LiftQuote Seed Data Loader");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let report = seed_database(&db, &company).await?;
    if report.skipped {
        println!("⚠ Catalog already has rules; nothing written.");
        println!("  Delete the database file to reseed.");
        db.close().await;
        return Ok(());
    }

    println!("✓ Inserted {} of {} starter rules", report.inserted, starter_catalog().len());
    println!();
    println!("Sample quotes (5 floors):");
    for system in SystemType::ALL {
        let request = QuoteRequest::new(5, system)?;
        let result = db.calculate_invoice(&request).await?;
        println!(
            "  {:<10} {:>3} lines  {:>15}",
            system.as_str(),
            result.items.len(),
            format_thousands(result.total_price)
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
