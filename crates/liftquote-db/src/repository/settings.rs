//! # Settings Repository
//!
//! Key/value store for company metadata shown on issued invoices.
//!
//! ## Known Keys
//! - `COMPANY_NAME`
//! - `COMPANY_ADDRESS`
//! - `COMPANY_PHONE`
//!
//! Missing keys fall back to [`CompanyInfo::default`].

use liftquote_core::CompanyInfo;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

pub const COMPANY_NAME: &str = "COMPANY_NAME";
pub const COMPANY_ADDRESS: &str = "COMPANY_ADDRESS";
pub const COMPANY_PHONE: &str = "COMPANY_PHONE";

/// Repository for the `settings` table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Inserts or replaces a setting.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key, "Writing setting");

        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?1, ?2) \
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads a setting. A stored NULL reads as missing.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.flatten())
    }

    /// All settings ordered by key.
    pub async fn all(&self) -> DbResult<Vec<(String, String)>> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT key, value FROM settings ORDER BY key")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect())
    }

    /// Company metadata, with defaults for any missing key.
    pub async fn company_info(&self) -> DbResult<CompanyInfo> {
        let defaults = CompanyInfo::default();

        Ok(CompanyInfo {
            name: self.get(COMPANY_NAME).await?.unwrap_or(defaults.name),
            address: self.get(COMPANY_ADDRESS).await?.unwrap_or(defaults.address),
            phone: self.get(COMPANY_PHONE).await?.unwrap_or(defaults.phone),
        })
    }

    /// Stores all three company keys.
    pub async fn set_company_info(&self, info: &CompanyInfo) -> DbResult<()> {
        self.set(COMPANY_NAME, &info.name).await?;
        self.set(COMPANY_ADDRESS, &info.address).await?;
        self.set(COMPANY_PHONE, &info.phone).await?;
        Ok(())
    }
}
