//! # Catalog Repository
//!
//! Database operations for product rules.
//!
//! ## Key Operations
//! - Applicable-rule query for the pricing engine
//! - Admin edits: insert, full update, price change, soft delete
//!
//! ## Applicable-Rule Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query_rules(Hydraulic, floors = 9, active_only = true)                 │
//! │                                                                         │
//! │  id │ name             │ system    │ min │ max │ active │              │
//! │  ───┼──────────────────┼───────────┼─────┼─────┼────────┤              │
//! │   1 │ Wire cable       │ common    │     │     │   1    │ ← MATCH      │
//! │   2 │ Hydraulic oil    │ hydraulic │     │     │   1    │ ← MATCH      │
//! │   3 │ Gearless motor   │ gearless  │     │     │   1    │              │
//! │   4 │ Tall-building kit│ common    │ 10  │     │   1    │              │
//! │   5 │ Retired part     │ common    │     │     │   0    │              │
//! │                                                                         │
//! │  Results in id order: [1, 2]                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The SQL filter mirrors `liftquote_core::catalog::is_applicable`; the
//! engine does not re-filter what this returns.

use liftquote_core::validation::{validate_rule, validate_unit_price};
use liftquote_core::{CatalogSystem, NewProductRule, ProductRule, RuleKind, SystemType};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Column list for the `products` table.
const COLUMNS: &str = "id, code, name, unit, unit_price, system, kind, factor, base_add, \
    name_pattern, stops_offset, category, is_active, min_floors, max_floors";

/// Raw `products` row. Nullable numeric columns default to zero on the way
/// into the domain type.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    code: Option<String>,
    name: String,
    unit: String,
    unit_price: i64,
    system: CatalogSystem,
    kind: String,
    factor: Option<f64>,
    base_add: Option<f64>,
    name_pattern: Option<String>,
    stops_offset: Option<i64>,
    category: Option<String>,
    is_active: bool,
    min_floors: Option<i64>,
    max_floors: Option<i64>,
}

impl From<ProductRow> for ProductRule {
    fn from(row: ProductRow) -> Self {
        ProductRule {
            id: row.id,
            code: row.code,
            name: row.name,
            unit: row.unit,
            unit_price: row.unit_price,
            system: row.system,
            kind: RuleKind::parse(&row.kind),
            factor: row.factor.unwrap_or(0.0),
            base_add: row.base_add.unwrap_or(0.0),
            name_pattern: row.name_pattern,
            stops_offset: row.stops_offset.unwrap_or(0),
            category: row.category,
            min_floors: row.min_floors,
            max_floors: row.max_floors,
            is_active: row.is_active,
        }
    }
}

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// // Rules the engine bills for a 7-stop gearless elevator
/// let rules = repo.query_rules(SystemType::Gearless, 7, true).await?;
///
/// // Admin price edit
/// repo.update_price(12, 9_500_000).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Returns the rules applicable to a request, in id order.
    ///
    /// ## Filter
    /// - `active_only`: skip soft-deleted rules
    /// - `system` or `common` rules only
    /// - floor count inside the optional inclusive window
    pub async fn query_rules(
        &self,
        system: SystemType,
        floors: u32,
        active_only: bool,
    ) -> DbResult<Vec<ProductRule>> {
        debug!(system = %system, floors, active_only, "Querying applicable rules");

        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE (?1 = 0 OR is_active = 1) \
               AND (system = ?2 OR system = 'common') \
               AND (min_floors IS NULL OR min_floors <= ?3) \
               AND (max_floors IS NULL OR max_floors >= ?3) \
             ORDER BY id"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(active_only)
            .bind(system)
            .bind(i64::from(floors))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRule::from).collect())
    }

    /// Gets a rule by id, active or not.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<ProductRule>> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = ?1");

        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductRule::from))
    }

    /// Lists the whole catalog in id order.
    pub async fn list(&self, active_only: bool) -> DbResult<Vec<ProductRule>> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE (?1 = 0 OR is_active = 1) ORDER BY id"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRule::from).collect())
    }

    /// Inserts a validated rule and returns it with its assigned id.
    pub async fn insert(&self, rule: &NewProductRule) -> DbResult<ProductRule> {
        validate_rule(rule)?;

        debug!(name = %rule.name, system = %rule.system, kind = %rule.kind, "Inserting rule");

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                code, name, unit, unit_price, system, kind,
                factor, base_add, name_pattern, stops_offset,
                category, is_active, min_floors, max_floors
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14
            )
            "#,
        )
        .bind(&rule.code)
        .bind(&rule.name)
        .bind(&rule.unit)
        .bind(rule.unit_price)
        .bind(rule.system)
        .bind(rule.kind.as_str())
        .bind(rule.factor)
        .bind(rule.base_add)
        .bind(&rule.name_pattern)
        .bind(rule.stops_offset)
        .bind(&rule.category)
        .bind(rule.is_active)
        .bind(rule.min_floors)
        .bind(rule.max_floors)
        .execute(&self.pool)
        .await?;

        Ok(rule.clone().into_rule(result.last_insert_rowid()))
    }

    /// Replaces every editable field of an existing rule.
    ///
    /// ## Returns
    /// `false` when no rule has that id.
    pub async fn update(&self, rule: &ProductRule) -> DbResult<bool> {
        validate_rule(&rule.to_new())?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                code = ?2,
                name = ?3,
                unit = ?4,
                unit_price = ?5,
                system = ?6,
                kind = ?7,
                factor = ?8,
                base_add = ?9,
                name_pattern = ?10,
                stops_offset = ?11,
                category = ?12,
                is_active = ?13,
                min_floors = ?14,
                max_floors = ?15
            WHERE id = ?1
            "#,
        )
        .bind(rule.id)
        .bind(&rule.code)
        .bind(&rule.name)
        .bind(&rule.unit)
        .bind(rule.unit_price)
        .bind(rule.system)
        .bind(rule.kind.as_str())
        .bind(rule.factor)
        .bind(rule.base_add)
        .bind(&rule.name_pattern)
        .bind(rule.stops_offset)
        .bind(&rule.category)
        .bind(rule.is_active)
        .bind(rule.min_floors)
        .bind(rule.max_floors)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Changes a rule's unit price.
    ///
    /// ## User Workflow
    /// ```text
    /// Admin picks "Guide rail" (id 21), enters 950000
    ///      │
    ///      ▼
    /// update_price(21, 950_000) ← THIS FUNCTION
    ///      │
    ///      ├── negative? → DbError::Rejected
    ///      │
    ///      └── OK → next quote bills the new price
    /// ```
    ///
    /// ## Returns
    /// `false` when no rule has that id.
    pub async fn update_price(&self, id: i64, unit_price: i64) -> DbResult<bool> {
        validate_unit_price(unit_price)?;

        let result = sqlx::query("UPDATE products SET unit_price = ?2 WHERE id = ?1")
            .bind(id)
            .bind(unit_price)
            .execute(&self.pool)
            .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(id, unit_price, "Rule price updated");
        }

        Ok(updated)
    }

    /// Soft-deletes a rule. Issued invoices keep referencing it.
    ///
    /// ## Returns
    /// `false` when no rule has that id.
    pub async fn deactivate(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of rules, including inactive ones.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use liftquote_core::catalog::{CatalogQuery, InMemoryCatalog};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn rule(name: &str, system: CatalogSystem) -> NewProductRule {
        NewProductRule::new(name, "piece", 1_000, system, RuleKind::Fixed)
    }

    fn ids(rules: &[ProductRule]) -> Vec<i64> {
        rules.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = db().await;
        let repo = db.catalog();

        let new = NewProductRule::new("Cabin panel", "piece", 800_000, CatalogSystem::Common, RuleKind::DynamicName)
            .code("CABIN-001")
            .factor(1.0)
            .name_pattern("Cabin panel ${stops} stops")
            .stops_offset(1)
            .category("cabin")
            .floor_range(Some(2), Some(40));

        let inserted = repo.insert(&new).await.unwrap();
        let fetched = repo.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched, inserted);
        assert_eq!(fetched.kind, RuleKind::DynamicName);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_rule() {
        let db = db().await;
        let repo = db.catalog();

        let negative = NewProductRule::new("Rail", "meter", -1, CatalogSystem::Common, RuleKind::Linear);
        assert!(matches!(repo.insert(&negative).await, Err(DbError::Rejected(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_rules_filters() {
        let db = db().await;
        let repo = db.catalog();

        let common = repo.insert(&rule("Wire", CatalogSystem::Common)).await.unwrap();
        let hydraulic = repo.insert(&rule("Oil", CatalogSystem::Hydraulic)).await.unwrap();
        let gearless = repo.insert(&rule("Motor", CatalogSystem::Gearless)).await.unwrap();
        let tall = repo
            .insert(&rule("Tall kit", CatalogSystem::Common).floor_range(Some(10), None))
            .await
            .unwrap();
        let short = repo
            .insert(&rule("Short kit", CatalogSystem::Common).floor_range(None, Some(3)))
            .await
            .unwrap();
        let retired = repo
            .insert(&rule("Retired", CatalogSystem::Common).active(false))
            .await
            .unwrap();

        let at_9 = repo.query_rules(SystemType::Hydraulic, 9, true).await.unwrap();
        assert_eq!(ids(&at_9), vec![common.id, hydraulic.id]);

        let at_10 = repo.query_rules(SystemType::Gearless, 10, true).await.unwrap();
        assert_eq!(ids(&at_10), vec![common.id, gearless.id, tall.id]);

        let at_3 = repo.query_rules(SystemType::Gearless, 3, true).await.unwrap();
        assert_eq!(ids(&at_3), vec![common.id, gearless.id, short.id]);

        let with_inactive = repo.query_rules(SystemType::Gearless, 3, false).await.unwrap();
        assert_eq!(ids(&with_inactive), vec![common.id, gearless.id, short.id, retired.id]);
    }

    #[tokio::test]
    async fn test_sql_filter_agrees_with_in_memory_filter() {
        let db = db().await;
        let repo = db.catalog();

        let windows = [(None, None), (Some(5), None), (None, Some(20)), (Some(10), Some(30))];
        let systems = [CatalogSystem::Common, CatalogSystem::Hydraulic, CatalogSystem::Gearless];
        for (i, (min, max)) in windows.iter().enumerate() {
            for system in systems {
                repo.insert(
                    &rule(&format!("R{i}-{system}"), system)
                        .floor_range(*min, *max)
                        .active(i % 2 == 0 || system != CatalogSystem::Common),
                )
                .await
                .unwrap();
            }
        }

        let memory = InMemoryCatalog::new(repo.list(false).await.unwrap());
        for system in SystemType::ALL {
            for floors in [1, 4, 5, 9, 10, 20, 21, 30, 31, 100] {
                for active_only in [true, false] {
                    let from_sql = repo.query_rules(system, floors, active_only).await.unwrap();
                    let from_memory = memory.query_rules(system, floors, active_only);
                    assert_eq!(from_sql, from_memory, "{system} floors={floors} active_only={active_only}");
                }
            }
        }
    }

    #[tokio::test]
    async fn test_unrecognized_kind_survives_storage() {
        let db = db().await;
        let repo = db.catalog();

        let odd = repo
            .insert(&rule("Odd", CatalogSystem::Common).factor(3.0))
            .await
            .unwrap();
        sqlx::query("UPDATE products SET kind = 'per_landing', factor = NULL WHERE id = ?1")
            .bind(odd.id)
            .execute(db.pool())
            .await
            .unwrap();

        let fetched = repo.get_by_id(odd.id).await.unwrap().unwrap();
        assert_eq!(fetched.kind, RuleKind::Unrecognized("per_landing".to_string()));
        assert_eq!(fetched.factor, 0.0);
    }

    #[tokio::test]
    async fn test_update_price() {
        let db = db().await;
        let repo = db.catalog();

        let r = repo.insert(&rule("Rail", CatalogSystem::Gearless)).await.unwrap();
        assert!(repo.update_price(r.id, 950_000).await.unwrap());
        assert_eq!(repo.get_by_id(r.id).await.unwrap().unwrap().unit_price, 950_000);

        assert!(!repo.update_price(9_999, 1).await.unwrap());
        assert!(matches!(repo.update_price(r.id, -10).await, Err(DbError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_update_full_rule() {
        let db = db().await;
        let repo = db.catalog();

        let mut r = repo.insert(&rule("Rail", CatalogSystem::Gearless)).await.unwrap();
        r.kind = RuleKind::Linear;
        r.factor = 4.0;
        r.base_add = 5.0;
        r.unit = "meter".to_string();
        assert!(repo.update(&r).await.unwrap());
        assert_eq!(repo.get_by_id(r.id).await.unwrap().unwrap(), r);

        r.min_floors = Some(9);
        r.max_floors = Some(3);
        assert!(matches!(repo.update(&r).await, Err(DbError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_deactivate_hides_rule_from_quotes() {
        let db = db().await;
        let repo = db.catalog();

        let r = repo.insert(&rule("Lock", CatalogSystem::Common)).await.unwrap();
        assert!(repo.deactivate(r.id).await.unwrap());
        assert!(repo.query_rules(SystemType::Hydraulic, 5, true).await.unwrap().is_empty());
        assert_eq!(repo.list(true).await.unwrap().len(), 0);
        assert_eq!(repo.list(false).await.unwrap().len(), 1);
        assert!(!repo.deactivate(12_345).await.unwrap());
    }
}
