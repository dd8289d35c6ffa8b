//! # liftquote-core: Pure Pricing Engine for LiftQuote
//!
//! This crate turns a `(system type, floor count)` request into a priced,
//! itemized invoice by evaluating a catalog of parametric product rules.
//! All of it is pure computation with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LiftQuote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Front-end (quote-cli)                          │   │
//! │  │    system type ──► floor count ──► invoice table ──► save       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ liftquote-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ evaluator │  │calculator │  │ validation│  │   │
//! │  │   │ProductRule│  │ quantity  │  │  filter   │  │  floors   │  │   │
//! │  │   │ LineItem  │  │   name    │  │ aggregate │  │  system   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 liftquote-db (Database Layer)                   │   │
//! │  │          catalog queries, invoice store, settings               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductRule, InvoiceLineItem, InvoiceResult, ...)
//! - [`money`] - Integer money and thousands-separated formatting
//! - [`template`] - `$name` / `${name}` placeholder substitution
//! - [`evaluator`] - Per-rule quantity and display name
//! - [`catalog`] - The catalog query contract and an in-memory catalog
//! - [`calculator`] - Filtering, pricing and aggregation into an invoice
//! - [`validation`] - Request and catalog validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use liftquote_core::catalog::InMemoryCatalog;
//! use liftquote_core::calculator::InvoiceCalculator;
//! use liftquote_core::{CatalogSystem, NewProductRule, QuoteRequest, RuleKind, SystemType};
//!
//! let catalog = InMemoryCatalog::new(vec![
//!     NewProductRule::new("Travelling cable", "meter", 80_000, CatalogSystem::Common, RuleKind::Linear)
//!         .factor(4.0)
//!         .base_add(5.0)
//!         .into_rule(1),
//! ]);
//!
//! let request = QuoteRequest::new(5, SystemType::Hydraulic).unwrap();
//! let invoice = InvoiceCalculator::new(&catalog).calculate(&request);
//!
//! // 4 × 5 + 5 = 25 meters at 80,000
//! assert_eq!(invoice.total_price, 2_000_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod money;
pub mod template;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, PatternError, ValidationError};
pub use money::{format_thousands, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest floor count a quote can be requested for.
pub const MIN_FLOORS: u32 = 1;

/// Largest floor count a quote can be requested for.
///
/// Residential and commercial installations in the catalog top out well
/// below this; anything larger is almost always a typo.
pub const MAX_FLOORS: u32 = 100;

/// Maximum length of customer, project and product names.
pub const MAX_NAME_LENGTH: usize = 200;
