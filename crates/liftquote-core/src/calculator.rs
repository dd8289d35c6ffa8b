//! # Invoice Calculator
//!
//! Turns a validated request into an [`InvoiceResult`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteRequest { floors: 5, system: Hydraulic }                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Step 1: catalog.query_rules(Hydraulic, 5, active_only = true)          │
//! │       │    hydraulic + common rules whose floor window contains 5       │
//! │       ▼                                                                 │
//! │  Step 2: per rule ─► evaluate() ─► (quantity, name)                     │
//! │       │             total = trunc(quantity × unit_price)                │
//! │       ▼                                                                 │
//! │  Step 3: total_price = Σ line totals (integer sum)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceResult { items (catalog order), total_price }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No single rule can abort the batch: malformed rules degrade inside the
//! evaluator. Calculations share no state, so any number may run at once.

use tracing::debug;

use crate::catalog::CatalogQuery;
use crate::error::CoreResult;
use crate::evaluator;
use crate::money::Money;
use crate::types::{InvoiceLineItem, InvoiceResult, ProductRule, QuoteRequest};
use crate::validation;

/// Prices requests against a catalog.
///
/// ## Usage
/// ```rust
/// use liftquote_core::calculator::InvoiceCalculator;
/// use liftquote_core::catalog::InMemoryCatalog;
///
/// let catalog = InMemoryCatalog::default();
/// let calculator = InvoiceCalculator::new(&catalog);
///
/// // Rejected before the catalog is touched
/// assert!(calculator.calculate_checked(0, "hydraulic").is_err());
///
/// // No applicable rules: an empty invoice, not an error
/// let invoice = calculator.calculate_checked(5, "hydraulic").unwrap();
/// assert!(invoice.is_empty());
/// assert_eq!(invoice.total_price, 0);
/// ```
pub struct InvoiceCalculator<'a, C: CatalogQuery + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CatalogQuery + ?Sized> InvoiceCalculator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        InvoiceCalculator { catalog }
    }

    /// Calculates an invoice for an already-validated request.
    pub fn calculate(&self, request: &QuoteRequest) -> InvoiceResult {
        let rules = self
            .catalog
            .query_rules(request.system(), request.floors(), true);

        debug!(
            system = %request.system(),
            floors = request.floors(),
            rules = rules.len(),
            "Fetched applicable rules"
        );

        price_rules(&rules, request.floors())
    }

    /// Validates raw inputs, then calculates.
    ///
    /// Validation failures come back as `CoreError::InputRejected` carrying
    /// the reason; the catalog is never queried in that case.
    pub fn calculate_checked(&self, floors: i64, system: &str) -> CoreResult<InvoiceResult> {
        let system = validation::validate_system_type(system)?;
        let request = QuoteRequest::new(floors, system)?;
        Ok(self.calculate(&request))
    }
}

/// Prices already-fetched rules at `floors`, in the order given.
///
/// Used directly by callers that fetch rules asynchronously.
pub fn price_rules(rules: &[ProductRule], floors: u32) -> InvoiceResult {
    let items: Vec<InvoiceLineItem> = rules.iter().map(|rule| price_line(rule, floors)).collect();
    let total: Money = items.iter().map(InvoiceLineItem::total).sum();

    debug!(
        items = items.len(),
        total_price = total.units(),
        "Invoice priced"
    );

    InvoiceResult {
        items,
        total_price: total.units(),
    }
}

/// Builds the line item for one rule.
pub fn price_line(rule: &ProductRule, floors: u32) -> InvoiceLineItem {
    let evaluation = evaluator::evaluate(rule, floors);
    let total = rule.unit_price().times_quantity(evaluation.quantity);

    InvoiceLineItem {
        product_id: rule.id,
        name: evaluation.name,
        unit: rule.unit.clone(),
        quantity: evaluation.quantity,
        unit_price: rule.unit_price,
        total_price: total.units(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::error::CoreError;
    use crate::types::{CatalogSystem, NewProductRule, RuleKind, SystemType};

    /// A small catalog shaped like a real elevator price list.
    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            NewProductRule::new("Wire cable", "meter", 50_000, CatalogSystem::Common, RuleKind::Linear)
                .factor(20.0)
                .into_rule(1),
            NewProductRule::new("Travelling cable", "meter", 80_000, CatalogSystem::Common, RuleKind::Linear)
                .factor(4.0)
                .base_add(5.0)
                .into_rule(2),
            NewProductRule::new("Cabin panel", "piece", 800_000, CatalogSystem::Common, RuleKind::DynamicName)
                .factor(1.0)
                .name_pattern("Cabin panel ${stops} stops")
                .stops_offset(1)
                .into_rule(3),
            NewProductRule::new("Controller", "set", 8_000_000, CatalogSystem::Common, RuleKind::Fixed)
                .factor(1.0)
                .into_rule(4),
            NewProductRule::new("Hydraulic oil", "liter", 150_000, CatalogSystem::Hydraulic, RuleKind::Fixed)
                .factor(80.0)
                .into_rule(5),
            NewProductRule::new("Hose", "meter", 333, CatalogSystem::Hydraulic, RuleKind::Linear)
                .factor(2.5)
                .into_rule(6),
            NewProductRule::new("Gearless motor", "set", 35_000_000, CatalogSystem::Gearless, RuleKind::Fixed)
                .factor(1.0)
                .into_rule(7),
            NewProductRule::new("Tall-building kit", "set", 9_000_000, CatalogSystem::Common, RuleKind::Fixed)
                .floor_range(Some(10), None)
                .into_rule(8),
            NewProductRule::new("Retired part", "piece", 1_000, CatalogSystem::Common, RuleKind::Fixed)
                .active(false)
                .into_rule(9),
        ])
    }

    fn request(floors: i64, system: SystemType) -> QuoteRequest {
        QuoteRequest::new(floors, system).unwrap()
    }

    #[test]
    fn test_hydraulic_invoice() {
        let catalog = catalog();
        let invoice = InvoiceCalculator::new(&catalog).calculate(&request(5, SystemType::Hydraulic));

        let ids: Vec<i64> = invoice.items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let totals: Vec<i64> = invoice.items.iter().map(|i| i.total_price).collect();
        assert_eq!(
            totals,
            vec![
                5_000_000,  // 100 m × 50,000
                2_000_000,  // 25 m × 80,000
                4_000_000,  // 5 × 800,000
                8_000_000,  // 1 × 8,000,000
                12_000_000, // 80 l × 150,000
                4_162,      // 12.5 m × 333 = 4162.5, truncated
            ]
        );
        assert_eq!(invoice.total_price, totals.iter().sum::<i64>());
        assert_eq!(invoice.items[2].name, "Cabin panel 6 stops");
    }

    #[test]
    fn test_gearless_invoice_excludes_hydraulic_rules() {
        let catalog = catalog();
        let invoice = InvoiceCalculator::new(&catalog).calculate(&request(5, SystemType::Gearless));

        let ids: Vec<i64> = invoice.items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 7]);
    }

    #[test]
    fn test_floor_window_boundary() {
        let catalog = catalog();
        let calculator = InvoiceCalculator::new(&catalog);

        let at_nine = calculator.calculate(&request(9, SystemType::Gearless));
        assert!(at_nine.items.iter().all(|i| i.product_id != 8));

        let at_ten = calculator.calculate(&request(10, SystemType::Gearless));
        assert!(at_ten.items.iter().any(|i| i.product_id == 8));
    }

    #[test]
    fn test_inactive_rules_never_billed() {
        let catalog = catalog();
        let invoice = InvoiceCalculator::new(&catalog).calculate(&request(50, SystemType::Hydraulic));
        assert!(invoice.items.iter().all(|i| i.product_id != 9));
    }

    #[test]
    fn test_totals_are_exact_sums_for_every_request() {
        let catalog = catalog();
        let calculator = InvoiceCalculator::new(&catalog);

        for system in SystemType::ALL {
            for floors in 1..=100 {
                let invoice = calculator.calculate(&request(floors, system));
                let sum: i64 = invoice.items.iter().map(|i| i.total_price).sum();
                assert_eq!(invoice.total_price, sum);

                for item in &invoice.items {
                    let expected = (item.quantity * item.unit_price as f64).trunc() as i64;
                    assert_eq!(item.total_price, expected);
                }
            }
        }
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let catalog = catalog();
        let calculator = InvoiceCalculator::new(&catalog);
        let req = request(17, SystemType::Hydraulic);

        let first = serde_json::to_vec(&calculator.calculate(&req)).unwrap();
        let second = serde_json::to_vec(&calculator.calculate(&req)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_rules_are_all_billed() {
        let rule = NewProductRule::new("Door lock", "piece", 350_000, CatalogSystem::Common, RuleKind::Linear)
            .factor(1.0)
            .into_rule(1);
        let invoice = price_rules(&[rule.clone(), rule], 3);
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.total_price, 2 * 3 * 350_000);
    }

    #[test]
    fn test_malformed_rule_does_not_abort_batch() {
        let rules = vec![
            NewProductRule::new("Broken", "piece", 10, CatalogSystem::Common, RuleKind::DynamicName)
                .name_pattern("${oops")
                .into_rule(1),
            NewProductRule::new("Odd kind", "piece", 10, CatalogSystem::Common, RuleKind::parse("weird"))
                .into_rule(2),
        ];
        let invoice = price_rules(&rules, 4);
        assert_eq!(invoice.items[0].name, "Broken");
        assert_eq!(invoice.items[1].quantity, 1.0);
        assert_eq!(invoice.total_price, 20);
    }

    #[test]
    fn test_huge_factors_saturate_instead_of_overflowing() {
        let big = NewProductRule::new("Runaway", "piece", 1_000_000, CatalogSystem::Common, RuleKind::Fixed)
            .factor(1e300)
            .into_rule(1);
        let invoice = price_rules(&[big.clone(), big], 5);
        assert_eq!(invoice.items[0].total_price, i64::MAX);
        assert_eq!(invoice.total_price, i64::MAX);
    }

    #[test]
    fn test_empty_catalog_yields_empty_invoice() {
        let invoice = price_rules(&[], 5);
        assert!(invoice.is_empty());
        assert_eq!(invoice.total_price, 0);
    }

    #[test]
    fn test_calculate_checked_rejects_bad_input() {
        let catalog = catalog();
        let calculator = InvoiceCalculator::new(&catalog);

        for (floors, system) in [(0, "hydraulic"), (101, "gearless"), (5, "common"), (5, "diesel")] {
            let err = calculator.calculate_checked(floors, system).unwrap_err();
            assert!(matches!(err, CoreError::InputRejected(_)));
        }

        assert!(calculator.calculate_checked(1, "hydraulic").is_ok());
        assert!(calculator.calculate_checked(100, "GEARLESS").is_ok());
    }
}
