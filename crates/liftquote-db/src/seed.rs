//! # Starter Catalog
//!
//! The catalog a fresh installation ships with: 12 parts shared by both
//! drive types, 4 hydraulic-only and 7 gearless-only parts, plus the default
//! company settings.
//!
//! ## Quantity Formulas At A Glance
//! ```text
//! ┌──────────────┬──────────────────────────────┬────────────────────────┐
//! │ Code         │ Rule                         │ 5 floors               │
//! ├──────────────┼──────────────────────────────┼────────────────────────┤
//! │ WIRE-001     │ linear  20 × floors          │ 100 m                  │
//! │ WIRE-002     │ linear   4 × floors + 5      │  25 m                  │
//! │ CABIN-001    │ dynamic  1 × floors, stops+1 │   5, "... 6 stops"     │
//! │ HYD-003      │ fixed   factor 80            │  80 liter              │
//! │ GRL-007      │ linear   4 × floors + 5      │  25 m                  │
//! └──────────────┴──────────────────────────────┴────────────────────────┘
//! ```

use liftquote_core::{CatalogSystem, CompanyInfo, NewProductRule, RuleKind};
use tracing::{info, warn};

use crate::error::DbResult;
use crate::pool::Database;

/// Outcome of [`seed_database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    /// `true` when the catalog already had rules and nothing was written.
    pub skipped: bool,
}

fn part(
    code: &str,
    name: &str,
    unit: &str,
    unit_price: i64,
    system: CatalogSystem,
    kind: RuleKind,
    category: &str,
) -> NewProductRule {
    NewProductRule::new(name, unit, unit_price, system, kind)
        .code(code)
        .category(category)
        .factor(1.0)
}

/// The starter rules in insertion order (common, hydraulic, gearless).
pub fn starter_catalog() -> Vec<NewProductRule> {
    use CatalogSystem::{Common, Gearless, Hydraulic};
    use RuleKind::{DynamicName, Fixed, Linear};

    vec![
        // Common: wiring
        part("WIRE-001", "Electrical wire No. 4 / 0.75", "meter", 50_000, Common, Linear, "wire").factor(20.0),
        part("WIRE-002", "Travelling cable", "meter", 80_000, Common, Linear, "wire")
            .factor(4.0)
            .base_add(5.0),
        part("WIRE-003", "Cable duct No. 3 / 4", "meter", 30_000, Common, Linear, "wire").factor(4.0),
        part("WIRE-004", "Telephone wire", "meter", 15_000, Common, Linear, "wire").factor(5.0),
        // Common: doors
        part("DOOR-001", "Door lock", "piece", 350_000, Common, Linear, "door"),
        part("DOOR-002", "Door closer", "piece", 500_000, Common, Linear, "door"),
        // Common: control and sensors
        part("CTRL-001", "Landing call button", "piece", 450_000, Common, Linear, "control"),
        part("SENS-001", "Magnet / sensor template", "piece", 200_000, Common, Linear, "sensor").base_add(2.0),
        // Common: cabin
        part("CABIN-001", "Cabin button panel", "piece", 800_000, Common, DynamicName, "cabin")
            .name_pattern("Cabin button panel ${stops} stops")
            .stops_offset(1),
        part("CABIN-002", "Elevator cabin", "set", 15_000_000, Common, Fixed, "cabin"),
        part("CTRL-002", "Controller cabinet", "set", 8_000_000, Common, Fixed, "control"),
        // Common: labor
        part("LABOR-001", "Installation labor", "unit", 5_000_000, Common, Linear, "labor"),
        // Hydraulic
        part("HYD-001", "Hydraulic power unit", "set", 25_000_000, Hydraulic, Fixed, "motor"),
        part("HYD-002", "Hydraulic jack", "set", 12_000_000, Hydraulic, Fixed, "motor"),
        part("HYD-003", "Hydraulic oil", "liter", 150_000, Hydraulic, Fixed, "fluid").factor(80.0),
        part("HYD-004", "High-pressure hose", "meter", 500_000, Hydraulic, Linear, "hydraulic")
            .factor(2.0)
            .base_add(3.0),
        // Gearless
        part("GRL-001", "Gearless motor", "set", 35_000_000, Gearless, Fixed, "motor"),
        part("GRL-002", "Counterweight frame", "set", 5_000_000, Gearless, Fixed, "frame"),
        part("GRL-003", "Overspeed governor", "set", 6_000_000, Gearless, Fixed, "control"),
        part("GRL-004", "Steel rope No. 10", "meter", 200_000, Gearless, Linear, "wire").factor(10.0),
        part("GRL-005", "Steel rope No. 6", "meter", 120_000, Gearless, Linear, "wire").factor(8.0),
        part("GRL-006", "Governor rope", "meter", 150_000, Gearless, Linear, "wire").factor(10.0),
        part("GRL-007", "Guide rail", "meter", 800_000, Gearless, Linear, "rail")
            .factor(4.0)
            .base_add(5.0),
    ]
}

/// Writes the starter catalog and company settings into an empty database.
///
/// A catalog that already has rules is left untouched so re-running the
/// seed never duplicates parts.
pub async fn seed_database(db: &Database, company: &CompanyInfo) -> DbResult<SeedReport> {
    let catalog = db.catalog();

    let existing = catalog.count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already populated, skipping seed");
        return Ok(SeedReport {
            inserted: 0,
            skipped: true,
        });
    }

    db.settings().set_company_info(company).await?;

    let mut inserted = 0;
    for rule in starter_catalog() {
        catalog.insert(&rule).await?;
        inserted += 1;
    }

    info!(inserted, "Starter catalog seeded");

    Ok(SeedReport {
        inserted,
        skipped: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use liftquote_core::validation::validate_rule;
    use liftquote_core::{QuoteRequest, SystemType};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_database(&db, &CompanyInfo::default()).await.unwrap();
        db
    }

    #[test]
    fn test_starter_catalog_is_valid() {
        let rules = starter_catalog();
        assert_eq!(rules.len(), 23);
        for rule in &rules {
            assert!(validate_rule(rule).is_ok(), "{:?}", rule.code);
        }

        let count = |system| rules.iter().filter(|r| r.system == system).count();
        assert_eq!(count(CatalogSystem::Common), 12);
        assert_eq!(count(CatalogSystem::Hydraulic), 4);
        assert_eq!(count(CatalogSystem::Gearless), 7);
    }

    #[tokio::test]
    async fn test_seed_is_not_repeated() {
        let db = seeded().await;
        assert_eq!(db.catalog().count().await.unwrap(), 23);

        let again = seed_database(&db, &CompanyInfo::default()).await.unwrap();
        assert!(again.skipped);
        assert_eq!(db.catalog().count().await.unwrap(), 23);
    }

    #[tokio::test]
    async fn test_hydraulic_five_floors() {
        let db = seeded().await;
        let request = QuoteRequest::new(5, SystemType::Hydraulic).unwrap();

        let result = db.calculate_invoice(&request).await.unwrap();
        assert_eq!(result.items.len(), 16);
        assert_eq!(result.total_price, 67_875_000 + 55_500_000);

        let panel = result.items.iter().find(|i| i.unit_price == 800_000).unwrap();
        assert_eq!(panel.name, "Cabin button panel 6 stops");
        assert_eq!(panel.quantity, 5.0);

        let oil = result.items.iter().find(|i| i.name == "Hydraulic oil").unwrap();
        assert_eq!(oil.quantity, 80.0);
        assert_eq!(oil.total_price, 12_000_000);
    }

    #[tokio::test]
    async fn test_gearless_five_floors() {
        let db = seeded().await;
        let request = QuoteRequest::new(5, SystemType::Gearless).unwrap();

        let result = db.calculate_invoice(&request).await.unwrap();
        assert_eq!(result.items.len(), 19);
        assert_eq!(result.total_price, 67_875_000 + 88_300_000);
        assert!(result.items.iter().all(|i| !i.name.starts_with("Hydraulic")));
    }

    #[tokio::test]
    async fn test_seed_writes_company_settings() {
        let db = seeded().await;
        assert_eq!(db.settings().company_info().await.unwrap(), CompanyInfo::default());
    }
}
