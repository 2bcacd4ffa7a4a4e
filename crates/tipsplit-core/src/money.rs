//! # Money Module
//!
//! Provides the `Money` type a front end uses to show a result.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Engine (exact doubles)          Display (integer cents)                │
//! │                                                                         │
//! │  amountPerPerson = 33.3333…  ──► Money::from_amount ──► 3333 cents      │
//! │                                                          "$33.33"       │
//! │                                                                         │
//! │  The engine NEVER rounds. Two engines fed the same inputs emit          │
//! │  bit-identical doubles; rounding is applied once, at the edge.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tipsplit_core::money::Money;
//!
//! let per_person = Money::from_amount(100.0 / 3.0);
//! assert_eq!(per_person.cents(), 3333);
//! assert_eq!(per_person.to_string(), "$33.33");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: same range as the saturating `f64 as i64` cast in
///   [`Money::from_amount`]
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a currency amount to the nearest cent, halves away from zero.
    ///
    /// NaN maps to zero and out-of-range values saturate.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(66.5).cents(), 6650);
    /// assert_eq!(Money::from_amount(0.125).cents(), 13);
    /// assert_eq!(Money::from_amount(10.0 / 3.0).cents(), 333);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Like [`Money::from_amount`], but `None` when the amount is not finite
    /// or does not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// assert_eq!(Money::checked_from_amount(12.5), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::checked_from_amount(f64::INFINITY), None);
    /// assert_eq!(Money::checked_from_amount(1.0e300), None);
    /// ```
    pub fn checked_from_amount(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        // `i64::MAX as f64` is 2^63, one past the largest i64.
        (cents.is_finite() && cents.abs() < i64::MAX as f64).then(|| Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Formats with a currency symbol other than `$`.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1234).format_with("€"), "€12.34");
    /// assert_eq!(Money::from_cents(-550).format_with("£"), "-£5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Shows money as `$12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_from_amount_rounds_half_away_from_zero() {
        assert_eq!(Money::from_amount(550.0).cents(), 55000);
        assert_eq!(Money::from_amount(0.005).cents(), 1);
        assert_eq!(Money::from_amount(12.344).cents(), 1234);
        assert_eq!(Money::from_amount(12.346).cents(), 1235);
    }

    #[test]
    fn test_from_amount_edge_values() {
        assert!(Money::from_amount(f64::NAN).is_zero());
        assert_eq!(Money::from_amount(f64::INFINITY).cents(), i64::MAX);
    }

    #[test]
    fn test_checked_from_amount_range() {
        assert_eq!(
            Money::checked_from_amount(1.0e15).map(|m| m.cents()),
            Some(100_000_000_000_000_000)
        );
        assert_eq!(Money::checked_from_amount(-0.125), Some(Money::from_cents(-13)));
        assert_eq!(Money::checked_from_amount(1.0e17), None);
        assert_eq!(Money::checked_from_amount(f64::NAN), None);
        assert_eq!(Money::checked_from_amount(f64::NEG_INFINITY), None);
    }
}
