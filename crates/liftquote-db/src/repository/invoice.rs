//! # Invoice Repository
//!
//! Persistence for issued invoices and their line items.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InvoiceResult (engine output)                                          │
//! │       │                                                                 │
//! │       ▼  save() ─── one transaction ───────────────────────┐            │
//! │  invoices      ← header, system, floors, total_price       │            │
//! │  invoice_items ← name, unit, quantity, prices per line     │            │
//! │       │                                                    │            │
//! │       └── any insert fails → nothing is written ◄──────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items copy the computed name and prices, so later catalog edits never
//! change an invoice that was already issued.

use chrono::{DateTime, Utc};
use liftquote_core::{InvoiceHeader, InvoiceResult, QuoteRequest, SystemType};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

const INVOICE_COLUMNS: &str =
    "id, customer_name, project_name, system, floors, total_price, created_at";

const ITEM_COLUMNS: &str =
    "id, invoice_id, product_id, name, unit, quantity, unit_price, total_price";

/// A stored invoice header.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct InvoiceRecord {
    pub id: i64,
    pub customer_name: String,
    pub project_name: String,
    pub system: SystemType,
    pub floors: i64,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

/// A stored invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct InvoiceItemRecord {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: i64,
    pub total_price: i64,
}

/// What `save` hands back: the stored header plus the priced lines it was
/// built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedInvoice {
    pub invoice: InvoiceRecord,
    pub result: InvoiceResult,
}

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Stores an invoice and all of its lines atomically.
    ///
    /// An empty result is stored as a header with a zero total.
    pub async fn save(
        &self,
        header: &InvoiceHeader,
        request: &QuoteRequest,
        result: &InvoiceResult,
    ) -> DbResult<SavedInvoice> {
        let created_at = Utc::now();

        debug!(
            customer = %header.customer_name,
            project = %header.project_name,
            items = result.items.len(),
            "Saving invoice"
        );

        let mut tx = self.pool.begin().await?;

        let invoice_id = sqlx::query(
            r#"
            INSERT INTO invoices (
                customer_name, project_name, system, floors, total_price, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&header.customer_name)
        .bind(&header.project_name)
        .bind(request.system())
        .bind(i64::from(request.floors()))
        .bind(result.total_price)
        .bind(created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for item in &result.items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    invoice_id, product_id, name, unit, quantity, unit_price, total_price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(invoice_id)
            .bind(item.product_id)
            .bind(&item.name)
            .bind(&item.unit)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.total_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(invoice_id, total_price = result.total_price, "Invoice saved");

        Ok(SavedInvoice {
            invoice: InvoiceRecord {
                id: invoice_id,
                customer_name: header.customer_name.clone(),
                project_name: header.project_name.clone(),
                system: request.system(),
                floors: i64::from(request.floors()),
                total_price: result.total_price,
                created_at,
            },
            result: result.clone(),
        })
    }

    /// Gets an invoice header by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<InvoiceRecord>> {
        let query = format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1");

        let invoice = sqlx::query_as::<_, InvoiceRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    /// Lines of an invoice in the order they were priced.
    pub async fn items(&self, invoice_id: i64) -> DbResult<Vec<InvoiceItemRecord>> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = ?1 ORDER BY id"
        );

        let items = sqlx::query_as::<_, InvoiceItemRecord>(&query)
            .bind(invoice_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Newest invoices first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<InvoiceRecord>> {
        let query = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY created_at DESC, id DESC LIMIT ?1"
        );

        let invoices = sqlx::query_as::<_, InvoiceRecord>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
