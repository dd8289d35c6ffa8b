//! # liftquote-db: Database Layer for LiftQuote
//!
//! SQLite storage for the product catalog, issued invoices and company
//! settings, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LiftQuote Data Flow                              │
//! │                                                                         │
//! │  quote-cli (liftquote hydraulic 9)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   liftquote-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CatalogRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ InvoiceRepo   │    │ 001_init.sql │  │   │
//! │  │   │               │    │ SettingsRepo  │    │              │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │ rules                                              │   │
//! │  │           ▼                                                    │   │
//! │  │   liftquote-core::calculator::price_rules (no I/O)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (LIFTQUOTE_DB_PATH, default ./liftquote.db)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog, invoice and settings repositories
//! - [`seed`] - Starter catalog for fresh installations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use liftquote_core::{QuoteRequest, SystemType};
//! use liftquote_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./liftquote.db")).await?;
//!
//! let request = QuoteRequest::new(9, SystemType::Hydraulic)?;
//! let invoice = db.calculate_invoice(&request).await?;
//! println!("{}", invoice.total());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::invoice::{InvoiceItemRecord, InvoiceRecord, InvoiceRepository, SavedInvoice};
pub use repository::settings::SettingsRepository;
