//! # Validation Module
//!
//! Input validation for quote requests, invoice headers and catalog edits.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (quote-cli)                                        │
//! │  └── Collects raw text, shows rejection reasons                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Floor count: whole number, 1..=100                                │
//! │  ├── System type: hydraulic | gearless                                 │
//! │  └── Catalog rules: prices, names, floor windows                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a returned [`ValidationError`] whose message can be shown
//! to the user as-is, so the front-end can prompt again.
//!
//! ## Usage
//! ```rust
//! use liftquote_core::validation::{parse_floors, validate_system_type};
//! use liftquote_core::SystemType;
//!
//! assert_eq!(parse_floors("12").unwrap(), 12);
//! assert_eq!(validate_system_type("hydraulic").unwrap(), SystemType::Hydraulic);
//! ```

use crate::error::ValidationError;
use crate::types::{NewProductRule, SystemType};
use crate::{MAX_FLOORS, MAX_NAME_LENGTH, MIN_FLOORS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quote Request Validators
// =============================================================================

/// Validates a floor count.
///
/// ## Rules
/// - Must be at least MIN_FLOORS (1)
/// - Must not exceed MAX_FLOORS (100)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User enters floors: 101                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_floors(101) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── < 1 or > 100? → "floors must be between 1 and 100"           │
/// │       │                                                                 │
/// │       └── OK → calculate invoice                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_floors(floors: i64) -> ValidationResult<u32> {
    if floors < i64::from(MIN_FLOORS) || floors > i64::from(MAX_FLOORS) {
        return Err(floors_out_of_range());
    }

    // In range, so the narrowing cannot fail.
    u32::try_from(floors).map_err(|_| floors_out_of_range())
}

/// Parses and validates a floor count typed as text.
///
/// ## Example
/// ```rust
/// use liftquote_core::validation::parse_floors;
///
/// assert_eq!(parse_floors(" 100 ").unwrap(), 100);
/// assert!(parse_floors("").is_err());
/// assert!(parse_floors("five").is_err());
/// assert!(parse_floors("2.5").is_err());
/// assert!(parse_floors("0").is_err());
/// ```
pub fn parse_floors(input: &str) -> ValidationResult<u32> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "floors".to_string(),
        });
    }

    let floors: i64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "floors".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    validate_floors(floors)
}

fn floors_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: "floors".to_string(),
        min: i64::from(MIN_FLOORS),
        max: i64::from(MAX_FLOORS),
    }
}

/// Validates a requested system type.
///
/// ## Rules
/// - Case-insensitive, surrounding whitespace ignored
/// - `common` is a catalog tag, not a request value, and is rejected
pub fn validate_system_type(input: &str) -> ValidationResult<SystemType> {
    match input.trim().to_ascii_lowercase().as_str() {
        "hydraulic" => Ok(SystemType::Hydraulic),
        "gearless" => Ok(SystemType::Gearless),
        _ => Err(ValidationError::NotAllowed {
            field: "system_type".to_string(),
            allowed: SystemType::ALL.iter().map(|s| s.as_str().to_string()).collect(),
        }),
    }
}

// =============================================================================
// Invoice Header Validators
// =============================================================================

/// Validates a customer or project name, returning it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most MAX_NAME_LENGTH (200) characters
pub fn validate_party_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a unit price in the smallest currency unit.
///
/// Zero is allowed (bundled items).
pub fn validate_unit_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::Negative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates an optional inclusive floor window.
///
/// ## Rules
/// - Each bound, when set, lies within MIN_FLOORS..=MAX_FLOORS
/// - `min <= max` when both are set
pub fn validate_floor_range(min: Option<i64>, max: Option<i64>) -> ValidationResult<()> {
    for (field, bound) in [("min_floors", min), ("max_floors", max)] {
        if let Some(value) = bound {
            if value < i64::from(MIN_FLOORS) || value > i64::from(MAX_FLOORS) {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: i64::from(MIN_FLOORS),
                    max: i64::from(MAX_FLOORS),
                });
            }
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ValidationError::InvertedFloorRange { min, max });
        }
    }

    Ok(())
}

/// Validates a catalog rule before it is written.
///
/// `name_pattern` is not checked: malformed patterns are tolerated and
/// degrade to the base name at evaluation time.
pub fn validate_rule(rule: &NewProductRule) -> ValidationResult<()> {
    validate_party_name("name", &rule.name)?;

    if rule.unit.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    validate_unit_price(rule.unit_price)?;
    validate_floor_range(rule.min_floors, rule.max_floors)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogSystem, RuleKind};

    #[test]
    fn test_validate_floors() {
        assert_eq!(validate_floors(1).unwrap(), 1);
        assert_eq!(validate_floors(100).unwrap(), 100);

        assert!(validate_floors(0).is_err());
        assert!(validate_floors(-3).is_err());
        assert!(validate_floors(101).is_err());
        assert!(validate_floors(i64::MAX).is_err());
    }

    #[test]
    fn test_floor_rejection_reason() {
        let err = validate_floors(101).unwrap_err();
        assert_eq!(err.to_string(), "floors must be between 1 and 100");
    }

    #[test]
    fn test_parse_floors() {
        assert_eq!(parse_floors("1").unwrap(), 1);
        assert_eq!(parse_floors("100").unwrap(), 100);
        assert_eq!(parse_floors("\t42\n").unwrap(), 42);

        assert!(matches!(parse_floors("0"), Err(ValidationError::OutOfRange { .. })));
        assert!(matches!(parse_floors("101"), Err(ValidationError::OutOfRange { .. })));
        assert!(matches!(parse_floors("3.0"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_floors("ten"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_floors("  "), Err(ValidationError::Required { .. })));
    }

    #[test]
    fn test_validate_system_type() {
        assert_eq!(validate_system_type("hydraulic").unwrap(), SystemType::Hydraulic);
        assert_eq!(validate_system_type(" Gearless ").unwrap(), SystemType::Gearless);

        assert!(validate_system_type("common").is_err());
        assert!(validate_system_type("").is_err());
        assert!(validate_system_type("traction").is_err());
    }

    #[test]
    fn test_system_type_rejection_lists_choices() {
        let err = validate_system_type("common").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"system_type must be one of: ["hydraulic", "gearless"]"#
        );
    }

    #[test]
    fn test_validate_party_name() {
        assert_eq!(validate_party_name("customer_name", " Sara ").unwrap(), "Sara");
        assert!(validate_party_name("customer_name", "").is_err());
        assert!(validate_party_name("project_name", &"A".repeat(201)).is_err());
        assert!(validate_party_name("project_name", &"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0).is_ok());
        assert!(validate_unit_price(15_000_000).is_ok());
        assert!(validate_unit_price(-1).is_err());
    }

    #[test]
    fn test_validate_floor_range() {
        assert!(validate_floor_range(None, None).is_ok());
        assert!(validate_floor_range(Some(10), None).is_ok());
        assert!(validate_floor_range(Some(5), Some(5)).is_ok());

        assert_eq!(
            validate_floor_range(Some(10), Some(5)),
            Err(ValidationError::InvertedFloorRange { min: 10, max: 5 })
        );
        assert!(validate_floor_range(Some(0), None).is_err());
        assert!(validate_floor_range(None, Some(101)).is_err());
    }

    #[test]
    fn test_validate_rule() {
        let good = NewProductRule::new("Guide rail", "meter", 800_000, CatalogSystem::Gearless, RuleKind::Linear);
        assert!(validate_rule(&good).is_ok());

        let unnamed = NewProductRule::new(" ", "meter", 1, CatalogSystem::Common, RuleKind::Linear);
        assert!(validate_rule(&unnamed).is_err());

        let no_unit = NewProductRule::new("Rail", "", 1, CatalogSystem::Common, RuleKind::Linear);
        assert!(validate_rule(&no_unit).is_err());

        let negative = NewProductRule::new("Rail", "meter", -5, CatalogSystem::Common, RuleKind::Linear);
        assert!(validate_rule(&negative).is_err());

        let inverted = good.clone().floor_range(Some(20), Some(10));
        assert!(validate_rule(&inverted).is_err());

        // malformed patterns are allowed through
        let odd_pattern = good.name_pattern("${broken");
        assert!(validate_rule(&odd_pattern).is_ok());
    }
}
