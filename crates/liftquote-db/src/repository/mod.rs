//! # Repository Module
//!
//! Database repository implementations for LiftQuote.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote-cli / seed                                                       │
//! │       │                                                                 │
//! │       │  db.catalog().query_rules(Gearless, 7, true)                   │
//! │       ▼                                                                 │
//! │  CatalogRepository                                                     │
//! │  ├── query_rules(&self, system, floors, active_only)                   │
//! │  ├── insert / update / update_price / deactivate                       │
//! │  └── get_by_id / list                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Product rules
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Issued invoices and lines
//! - [`SettingsRepository`](settings::SettingsRepository) - Company metadata

pub mod catalog;
pub mod invoice;
pub mod settings;
