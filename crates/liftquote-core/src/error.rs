//! # Error Types
//!
//! Domain-specific error types for liftquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  liftquote-core errors (this file)                                     │
//! │  ├── CoreError        - Rejections returned to the caller              │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── PatternError     - Name template failures (never surfaced)        │
//! │                                                                         │
//! │  liftquote-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → CliError → user         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty catalog match is not an error: it yields an empty invoice with a
//! zero total, and callers decide whether that is acceptable.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the pricing engine's checked entry points.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Floor count or system type failed validation.
    ///
    /// ## User Workflow
    /// ```text
    /// User enters floors: 0
    ///      │
    ///      ▼
    /// validate_floors(0)
    ///      │
    ///      ▼
    /// InputRejected(OutOfRange { field: "floors", min: 1, max: 100 })
    ///      │
    ///      ▼
    /// Front-end shows the reason and asks again
    /// ```
    #[error("Input rejected: {0}")]
    InputRejected(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant renders as a human-readable reason that the front-end can
/// show verbatim before prompting again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. a floor count that is not a whole number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Lower bound of a floor range exceeds the upper bound.
    #[error("min_floors ({min}) must not exceed max_floors ({max})")]
    InvertedFloorRange { min: i64, max: i64 },
}

// =============================================================================
// Pattern Error
// =============================================================================

/// A name pattern that cannot be substituted.
///
/// The evaluator swallows these and falls back to the rule's base name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// `${` without a closing brace.
    #[error("unterminated placeholder at byte {position}")]
    UnterminatedPlaceholder { position: usize },

    /// `${...}` whose contents are not a valid identifier.
    #[error("invalid placeholder '{name}' at byte {position}")]
    InvalidPlaceholder { name: String, position: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
