//! # Domain Types
//!
//! Core domain types used throughout LiftQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductRule    │   │ InvoiceLineItem │   │  InvoiceResult  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product_id     │──►│  items (ordered)│       │
//! │  │  kind, factor   │   │  name, quantity │   │  total_price    │       │
//! │  │  name_pattern   │   │  total_price    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SystemType    │   │  CatalogSystem  │   │    RuleKind     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Hydraulic      │   │  Hydraulic      │   │  Fixed          │       │
//! │  │  Gearless       │   │  Gearless       │   │  Linear         │       │
//! │  │  (request side) │   │  Common         │   │  DynamicName    │       │
//! │  └─────────────────┘   └─────────────────┘   │  Unrecognized   │       │
//! │                                               └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product rules are long-lived catalog configuration and read-only to the
//! engine. Line items and invoice results are computed fresh per request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

// =============================================================================
// System Type
// =============================================================================

/// Elevator drive technology requested by a customer.
///
/// `common` is deliberately absent: it is a catalog-side applicability tag,
/// never a request value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    Hydraulic,
    Gearless,
}

impl SystemType {
    /// Every requestable system type, in display order.
    pub const ALL: [SystemType; 2] = [SystemType::Hydraulic, SystemType::Gearless];

    /// Storage and wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SystemType::Hydraulic => "hydraulic",
            SystemType::Gearless => "gearless",
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validation::validate_system_type(s)
    }
}

// =============================================================================
// Catalog System
// =============================================================================

/// Which system types a catalog rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSystem {
    Hydraulic,
    Gearless,
    /// Applies to every system type.
    Common,
}

impl CatalogSystem {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CatalogSystem::Hydraulic => "hydraulic",
            CatalogSystem::Gearless => "gearless",
            CatalogSystem::Common => "common",
        }
    }

    /// Checks whether a rule tagged with this system is billed for `system`.
    pub fn applies_to(&self, system: SystemType) -> bool {
        match self {
            CatalogSystem::Common => true,
            CatalogSystem::Hydraulic => system == SystemType::Hydraulic,
            CatalogSystem::Gearless => system == SystemType::Gearless,
        }
    }
}

impl From<SystemType> for CatalogSystem {
    fn from(system: SystemType) -> Self {
        match system {
            SystemType::Hydraulic => CatalogSystem::Hydraulic,
            SystemType::Gearless => CatalogSystem::Gearless,
        }
    }
}

impl fmt::Display for CatalogSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogSystem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hydraulic" => Ok(CatalogSystem::Hydraulic),
            "gearless" => Ok(CatalogSystem::Gearless),
            "common" => Ok(CatalogSystem::Common),
            _ => Err(ValidationError::NotAllowed {
                field: "system".to_string(),
                allowed: vec![
                    "hydraulic".to_string(),
                    "gearless".to_string(),
                    "common".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Rule Kind
// =============================================================================

/// Selects the quantity formula (and, for `DynamicName`, the naming
/// behavior) of a product rule.
///
/// Stored as free text. Anything the engine does not recognize is kept
/// verbatim in `Unrecognized` and billed with quantity 1, so a bad catalog
/// row never aborts an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleKind {
    /// Constant quantity (`factor` when positive, otherwise 1).
    Fixed,
    /// `factor × floors + base_add`.
    Linear,
    /// Linear quantity plus a display name computed from `name_pattern`.
    DynamicName,
    /// Any other stored value.
    Unrecognized(String),
}

impl RuleKind {
    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::Fixed => "fixed",
            RuleKind::Linear => "linear",
            RuleKind::DynamicName => "dynamic_name",
            RuleKind::Unrecognized(raw) => raw,
        }
    }

    /// Lenient parse: never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "fixed" => RuleKind::Fixed,
            "linear" => RuleKind::Linear,
            "dynamic_name" => RuleKind::DynamicName,
            other => RuleKind::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for RuleKind {
    fn from(raw: String) -> Self {
        RuleKind::parse(&raw)
    }
}

impl From<RuleKind> for String {
    fn from(kind: RuleKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product Rule
// =============================================================================

/// One billable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRule {
    /// Store-assigned identifier, immutable once created.
    pub id: i64,

    /// Business code (e.g. `WIRE-001`). Informational only.
    pub code: Option<String>,

    /// Base display name.
    pub name: String,

    /// Unit-of-measure label ("meter", "piece", ...).
    pub unit: String,

    /// Price in the smallest currency unit. Never negative.
    pub unit_price: i64,

    /// Which system types this rule applies to.
    pub system: CatalogSystem,

    /// Quantity formula selector.
    #[ts(as = "String")]
    pub kind: RuleKind,

    /// Multiplier for linear formulas, quantity override for fixed rules.
    pub factor: f64,

    /// Additive offset for linear formulas.
    pub base_add: f64,

    /// Template for `DynamicName` rules, e.g. `"Cabin panel ${stops} stops"`.
    pub name_pattern: Option<String>,

    /// Added to the floor count to get `stops`.
    pub stops_offset: i64,

    /// Grouping label ("wire", "door", ...). Informational only.
    pub category: Option<String>,

    /// Inclusive lower bound on the floor count; `None` is unbounded.
    pub min_floors: Option<i64>,

    /// Inclusive upper bound on the floor count; `None` is unbounded.
    pub max_floors: Option<i64>,

    /// Inactive rules are never applicable (soft delete).
    pub is_active: bool,
}

impl ProductRule {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_units(self.unit_price)
    }

    /// Checks the inclusive `min_floors..=max_floors` window.
    pub fn covers_floors(&self, floors: u32) -> bool {
        let floors = i64::from(floors);
        self.min_floors.map_or(true, |min| min <= floors)
            && self.max_floors.map_or(true, |max| max >= floors)
    }

    /// Checks whether this rule is billed for the given request,
    /// ignoring `is_active`.
    pub fn matches(&self, system: SystemType, floors: u32) -> bool {
        self.system.applies_to(system) && self.covers_floors(floors)
    }

    /// Returns the rule without its id, e.g. to re-insert it elsewhere.
    pub fn to_new(&self) -> NewProductRule {
        NewProductRule {
            code: self.code.clone(),
            name: self.name.clone(),
            unit: self.unit.clone(),
            unit_price: self.unit_price,
            system: self.system,
            kind: self.kind.clone(),
            factor: self.factor,
            base_add: self.base_add,
            name_pattern: self.name_pattern.clone(),
            stops_offset: self.stops_offset,
            category: self.category.clone(),
            min_floors: self.min_floors,
            max_floors: self.max_floors,
            is_active: self.is_active,
        }
    }
}

// =============================================================================
// New Product Rule
// =============================================================================

/// A product rule that has not been assigned an id yet.
///
/// ## Usage
/// ```rust
/// use liftquote_core::{CatalogSystem, NewProductRule, RuleKind};
///
/// let oil = NewProductRule::new("Hydraulic oil", "liter", 150_000, CatalogSystem::Hydraulic, RuleKind::Fixed)
///     .code("HYD-003")
///     .factor(80.0);
/// assert_eq!(oil.factor, 80.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductRule {
    pub code: Option<String>,
    pub name: String,
    pub unit: String,
    pub unit_price: i64,
    pub system: CatalogSystem,
    pub kind: RuleKind,
    pub factor: f64,
    pub base_add: f64,
    pub name_pattern: Option<String>,
    pub stops_offset: i64,
    pub category: Option<String>,
    pub min_floors: Option<i64>,
    pub max_floors: Option<i64>,
    pub is_active: bool,
}

impl NewProductRule {
    /// Creates an active rule with zero factor, offset and stops offset,
    /// no pattern and no floor bounds.
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        unit_price: i64,
        system: CatalogSystem,
        kind: RuleKind,
    ) -> Self {
        NewProductRule {
            code: None,
            name: name.into(),
            unit: unit.into(),
            unit_price,
            system,
            kind,
            factor: 0.0,
            base_add: 0.0,
            name_pattern: None,
            stops_offset: 0,
            category: None,
            min_floors: None,
            max_floors: None,
            is_active: true,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn base_add(mut self, base_add: f64) -> Self {
        self.base_add = base_add;
        self
    }

    pub fn name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    pub fn stops_offset(mut self, offset: i64) -> Self {
        self.stops_offset = offset;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the inclusive floor window.
    pub fn floor_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_floors = min;
        self.max_floors = max;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Attaches an id, producing a full rule.
    pub fn into_rule(self, id: i64) -> ProductRule {
        ProductRule {
            id,
            code: self.code,
            name: self.name,
            unit: self.unit,
            unit_price: self.unit_price,
            system: self.system,
            kind: self.kind,
            factor: self.factor,
            base_add: self.base_add,
            name_pattern: self.name_pattern,
            stops_offset: self.stops_offset,
            category: self.category,
            min_floors: self.min_floors,
            max_floors: self.max_floors,
            is_active: self.is_active,
        }
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// A validated `(floors, system type)` request.
///
/// Only constructible through validation, so holding one proves the inputs
/// were accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct QuoteRequest {
    floors: u32,
    system: SystemType,
}

impl QuoteRequest {
    /// Validates a numeric floor count.
    pub fn new(floors: i64, system: SystemType) -> Result<Self, ValidationError> {
        let floors = validation::validate_floors(floors)?;
        Ok(QuoteRequest { floors, system })
    }

    /// Validates raw text as typed by a user.
    ///
    /// ## Example
    /// ```rust
    /// use liftquote_core::{QuoteRequest, SystemType};
    ///
    /// let request = QuoteRequest::parse(" 7 ", "Gearless").unwrap();
    /// assert_eq!(request.floors(), 7);
    /// assert_eq!(request.system(), SystemType::Gearless);
    ///
    /// assert!(QuoteRequest::parse("7.5", "gearless").is_err());
    /// assert!(QuoteRequest::parse("7", "common").is_err());
    /// ```
    pub fn parse(floors: &str, system: &str) -> Result<Self, ValidationError> {
        let system = validation::validate_system_type(system)?;
        let floors = validation::parse_floors(floors)?;
        Ok(QuoteRequest { floors, system })
    }

    #[inline]
    pub fn floors(&self) -> u32 {
        self.floors
    }

    #[inline]
    pub fn system(&self) -> SystemType {
        self.system
    }
}

// =============================================================================
// Invoice Line Item
// =============================================================================

/// One priced line of an invoice, derived from exactly one product rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLineItem {
    pub product_id: i64,
    /// Display name after pattern substitution.
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: i64,
    /// `trunc(quantity × unit_price)`.
    pub total_price: i64,
}

impl InvoiceLineItem {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_price)
    }
}

// =============================================================================
// Invoice Result
// =============================================================================

/// The engine's output: ordered line items and their integer sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceResult {
    /// Catalog retrieval order, not re-sorted.
    pub items: Vec<InvoiceLineItem>,
    pub total_price: i64,
}

impl InvoiceResult {
    /// No applicable rules matched. A valid outcome, not an error.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_price)
    }
}

// =============================================================================
// Invoice Header
// =============================================================================

/// Who an issued invoice is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceHeader {
    pub customer_name: String,
    pub project_name: String,
}

impl InvoiceHeader {
    /// Trims and validates both names.
    pub fn new(customer_name: &str, project_name: &str) -> Result<Self, ValidationError> {
        let customer_name = validation::validate_party_name("customer_name", customer_name)?;
        let project_name = validation::validate_party_name("project_name", project_name)?;
        Ok(InvoiceHeader {
            customer_name,
            project_name,
        })
    }
}

// =============================================================================
// Company Info
// =============================================================================

/// Issuer metadata handed to the document renderer alongside an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "Ravan Ro Damavand Elevator Co.".to_string(),
            address: "Tehran - Damavand".to_string(),
            phone: "021-12345678".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
