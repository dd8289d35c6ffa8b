//! # Configuration
//!
//! Settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`LIFTQUOTE_*`)
//! 3. Defaults (this file)
//!
//! Company address and phone always come from the settings table; the
//! company name there wins over `LIFTQUOTE_COMPANY_NAME`.

use serde::Serialize;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "LIFTQUOTE_DB_PATH";
pub const ENV_COMPANY_NAME: &str = "LIFTQUOTE_COMPANY_NAME";
pub const ENV_CURRENCY_LABEL: &str = "LIFTQUOTE_CURRENCY_LABEL";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteConfig {
    /// SQLite file holding the catalog.
    /// Default: ./liftquote.db
    pub db_path: PathBuf,

    /// Fallback company name when none is stored in settings.
    pub company_name: Option<String>,

    /// Label printed after money amounts.
    /// Default: "Rial"
    pub currency_label: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            db_path: PathBuf::from("./liftquote.db"),
            company_name: None,
            currency_label: "Rial".to_string(),
        }
    }
}

impl QuoteConfig {
    /// Creates a QuoteConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LIFTQUOTE_DB_PATH`: database file
    /// - `LIFTQUOTE_COMPANY_NAME`: company name fallback
    /// - `LIFTQUOTE_CURRENCY_LABEL`: currency label
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = QuoteConfig::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(name) = read(ENV_COMPANY_NAME) {
            config.company_name = Some(name.trim().to_string());
        }

        if let Some(label) = read(ENV_CURRENCY_LABEL) {
            config.currency_label = label.trim().to_string();
        }

        config
    }
}
