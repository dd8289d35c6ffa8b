//! # Catalog Query
//!
//! The contract the calculator uses to fetch applicable product rules, plus
//! an in-memory implementation for fixtures and embedded catalogs.
//!
//! ## Applicability
//! ```text
//! rule is returned  ⇔  (!active_only || rule.is_active)
//!                    ∧  rule.system ∈ {system_type, common}
//!                    ∧  (min_floors unset ∨ min_floors ≤ floors)
//!                    ∧  (max_floors unset ∨ max_floors ≥ floors)
//! ```
//!
//! Order is preserved as stored. Duplicate or overlapping rules are all
//! returned; the engine bills every one of them.

use crate::types::{ProductRule, SystemType};

/// Filtered retrieval of product rules.
///
/// Implementors apply the full applicability filter; the calculator does not
/// re-filter what it receives.
pub trait CatalogQuery {
    fn query_rules(&self, system: SystemType, floors: u32, active_only: bool) -> Vec<ProductRule>;
}

/// Applies the catalog filter to a single rule.
pub fn is_applicable(rule: &ProductRule, system: SystemType, floors: u32, active_only: bool) -> bool {
    (!active_only || rule.is_active) && rule.matches(system, floors)
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    rules: Vec<ProductRule>,
}

impl InMemoryCatalog {
    pub fn new(rules: Vec<ProductRule>) -> Self {
        InMemoryCatalog { rules }
    }
}

impl CatalogQuery for InMemoryCatalog {
    fn query_rules(&self, system: SystemType, floors: u32, active_only: bool) -> Vec<ProductRule> {
        self.rules
            .iter()
            .filter(|rule| is_applicable(rule, system, floors, active_only))
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
