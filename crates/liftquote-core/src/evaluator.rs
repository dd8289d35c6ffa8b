//! # Rule Evaluator
//!
//! Maps one product rule plus a floor count to a quantity and display name.
//!
//! ## Quantity Policy
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ kind         │ quantity                                                 │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ fixed        │ factor if factor > 0, else 1                             │
//! │ linear       │ factor × floors + base_add                               │
//! │ dynamic_name │ factor × floors + base_add if factor > 0, else 1         │
//! │ unrecognized │ 1                                                        │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name Policy
//! Only `dynamic_name` rules with a pattern get a computed name. The pattern
//! sees `stops = floors + stops_offset`, `floors` and `N = floors`. A pattern
//! that cannot be substituted degrades to the base name; nothing here can
//! fail.

use serde::Serialize;
use tracing::warn;

use crate::template;
use crate::types::{ProductRule, RuleKind};

/// Quantity and display name for one rule at one floor count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub quantity: f64,
    pub name: String,
}

/// Evaluates a rule. Deterministic and side-effect free apart from a log
/// line when a name pattern degrades.
pub fn evaluate(rule: &ProductRule, floors: u32) -> Evaluation {
    Evaluation {
        quantity: quantity(rule, floors),
        name: display_name(rule, floors),
    }
}

/// Computes the quantity billed for `rule` at `floors`.
pub fn quantity(rule: &ProductRule, floors: u32) -> f64 {
    let floors = f64::from(floors);
    match &rule.kind {
        RuleKind::Fixed => fixed_quantity(rule.factor),
        RuleKind::Linear => linear_quantity(rule.factor, rule.base_add, floors),
        RuleKind::DynamicName => dynamic_quantity(rule.factor, rule.base_add, floors),
        RuleKind::Unrecognized(_) => 1.0,
    }
}

/// `factor` doubles as a constant override (e.g. 80 liters of oil).
fn fixed_quantity(factor: f64) -> f64 {
    if factor > 0.0 {
        factor
    } else {
        1.0
    }
}

fn linear_quantity(factor: f64, base_add: f64, floors: f64) -> f64 {
    factor * floors + base_add
}

/// Same formula as linear; a non-positive factor means "one of these".
fn dynamic_quantity(factor: f64, base_add: f64, floors: f64) -> f64 {
    if factor > 0.0 {
        linear_quantity(factor, base_add, floors)
    } else {
        1.0
    }
}

/// Computes the display name for `rule` at `floors`.
pub fn display_name(rule: &ProductRule, floors: u32) -> String {
    let pattern = match (&rule.kind, &rule.name_pattern) {
        (RuleKind::DynamicName, Some(pattern)) if !pattern.trim().is_empty() => pattern,
        _ => return rule.name.clone(),
    };

    let stops = i64::from(floors) + rule.stops_offset;

    match template::render(pattern, |key| placeholder_value(key, floors, stops)) {
        Ok(name) => name,
        Err(err) => {
            warn!(
                product_id = rule.id,
                pattern = %pattern,
                error = %err,
                "Name pattern degraded to base name"
            );
            rule.name.clone()
        }
    }
}

/// Values visible to name patterns.
fn placeholder_value(key: &str, floors: u32, stops: i64) -> Option<String> {
    match key {
        "stops" => Some(stops.to_string()),
        "floors" | "N" => Some(floors.to_string()),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
