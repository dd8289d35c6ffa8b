//! # Money Module
//!
//! Provides the `Money` type for prices and invoice totals.
//!
//! ## Integer Money, Fractional Quantities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LINE TOTAL = trunc(quantity × unit_price)                              │
//! │                                                                         │
//! │  Quantities are real numbers (4 × floors + 5 meters of cable,           │
//! │  80 liters of oil). Prices are integers in the smallest currency unit. │
//! │                                                                         │
//! │  Each line total is truncated ONCE, then line totals are summed as     │
//! │  integers, so the grand total never drifts from the sum of the lines:  │
//! │                                                                         │
//! │    2.5 × 333 = 832.5  → 832                                             │
//! │    1.0 × 100 = 100.0  → 100                                             │
//! │    total              = 932 (exactly 832 + 100)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use liftquote_core::money::Money;
//!
//! let unit_price = Money::from_units(80_000);
//! let line_total = unit_price.times_quantity(25.0);
//! assert_eq!(line_total.units(), 2_000_000);
//! assert_eq!(line_total.to_string(), "2,000,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (e.g. rials).
///
/// ## Where Money is Used
/// ```text
/// ProductRule.unit_price ──► InvoiceLineItem.unit_price
///                                   │
///                                   ▼ × quantity, truncated
///                          InvoiceLineItem.total_price ──► InvoiceResult.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a real-valued quantity.
    ///
    /// The product is truncated toward zero, never rounded. Out-of-range
    /// products saturate at the `i64` bounds and NaN yields zero, so this
    /// never panics.
    ///
    /// ## Example
    /// ```rust
    /// use liftquote_core::money::Money;
    ///
    /// let price = Money::from_units(333);
    /// assert_eq!(price.times_quantity(2.5).units(), 832); // 832.5 truncated
    /// assert_eq!(price.times_quantity(1.0).units(), 333);
    /// ```
    #[inline]
    pub fn times_quantity(&self, quantity: f64) -> Money {
        Money((quantity * self.0 as f64).trunc() as i64)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders an integer with comma thousands separators.
///
/// Display only; stored and computed values are never affected.
///
/// ## Example
/// ```rust
/// use liftquote_core::money::format_thousands;
///
/// assert_eq!(format_thousands(1_234_567), "1,234,567");
/// assert_eq!(format_thousands(999), "999");
/// assert_eq!(format_thousands(-50_000), "-50,000");
/// ```
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with thousands separators and no currency label.
/// The front-end appends its own label ("Rial", "IRR", ...).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_thousands(self.0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition saturates at the `i64` bounds, matching `times_quantity`.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
