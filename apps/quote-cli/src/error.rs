//! # CLI Error Type
//!
//! ## Exit Codes
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │ Usage / rejected input       │  2   │
//! │ Database, JSON, other        │  1   │
//! └──────────────────────────────┴──────┘
//! ```

use liftquote_core::ValidationError;
use liftquote_db::DbError;
use thiserror::Error;

/// Errors surfaced to the command-line user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed command line (missing value, unknown flag).
    #[error("{0}")]
    Usage(String),

    /// Input failed validation; the message is the rejection reason.
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(DbError),

    #[error("Could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) | CliError::Rejected(_) => 2,
            CliError::Database(_) | CliError::Json(_) => 1,
        }
    }
}

/// Validation failures raised inside the db layer are still rejections.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Rejected(reason) => CliError::Rejected(reason),
            other => CliError::Database(other),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
