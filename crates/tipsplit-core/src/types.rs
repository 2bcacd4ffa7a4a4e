//! # Domain Types
//!
//! The bill amount, the snapshot of the three inputs, and the result derived
//! from them.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   BillAmount    │   │  TipSelection   │   │   SplitCount    │       │
//! │  │  f64, >= 0      │   │  none/fixed/    │   │  u32, >= 1      │       │
//! │  │  bad text → 0   │   │  custom         │   │                 │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           └─────────────────────┼─────────────────────┘                │
//! │                                 ▼                                       │
//! │                        ┌─────────────────┐                              │
//! │                        │  InputSnapshot  │  latest value of each        │
//! │                        └────────┬────────┘                              │
//! │                                 ▼  CalculationResult::compute           │
//! │                        ┌─────────────────────┐                          │
//! │                        │  CalculationResult  │  totalBill, totalTip,    │
//! │                        │     (unrounded)     │  amountPerPerson         │
//! │                        └─────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{InputError, InputResult};
use crate::split::SplitCount;
use crate::tip::TipSelection;

const BILL_FIELD: &str = "bill";

// =============================================================================
// Bill Amount
// =============================================================================

/// A non-negative, finite bill amount.
///
/// ## Why f64 and not cents?
/// The engine's contract is exact IEEE-754 double arithmetic with no
/// intermediate rounding. Rounding to cents happens only when a front end
/// displays a result (see [`crate::money::Money`]).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(from = "f64", into = "f64")]
pub struct BillAmount(f64);

impl BillAmount {
    /// Zero bill.
    pub const ZERO: BillAmount = BillAmount(0.0);

    /// Creates a bill amount. Negative, NaN and infinite values become 0.
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            BillAmount(amount)
        } else {
            Self::ZERO
        }
    }

    /// Returns the amount.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Parses bill text, reporting why it was rejected.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - One leading `$` is allowed
    /// - The rest must be a finite, non-negative decimal number
    pub fn try_parse(text: &str) -> InputResult<Self> {
        let trimmed = text.trim();
        let number = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();

        if number.is_empty() {
            return Err(InputError::Empty {
                field: BILL_FIELD.to_string(),
            });
        }

        let amount: f64 = number.parse().map_err(|_| InputError::NotANumber {
            field: BILL_FIELD.to_string(),
            text: text.to_string(),
        })?;

        if amount.is_nan() {
            return Err(InputError::NotANumber {
                field: BILL_FIELD.to_string(),
                text: text.to_string(),
            });
        }

        if amount.is_infinite() {
            return Err(InputError::TooLarge {
                field: BILL_FIELD.to_string(),
                text: text.to_string(),
            });
        }

        if amount < 0.0 {
            return Err(InputError::Negative {
                field: BILL_FIELD.to_string(),
                text: text.to_string(),
            });
        }

        Ok(BillAmount::new(amount))
    }

    /// Parses bill text; anything unparsable or empty is 0.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::BillAmount;
    ///
    /// assert_eq!(BillAmount::parse("42.50").value(), 42.5);
    /// assert_eq!(BillAmount::parse("$18").value(), 18.0);
    /// assert_eq!(BillAmount::parse("").value(), 0.0);
    /// assert_eq!(BillAmount::parse("lunch").value(), 0.0);
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or(Self::ZERO)
    }
}

impl From<f64> for BillAmount {
    fn from(amount: f64) -> Self {
        BillAmount::new(amount)
    }
}

impl From<BillAmount> for f64 {
    fn from(amount: BillAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for BillAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Input Snapshot
// =============================================================================

/// The latest value of each of the three inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InputSnapshot {
    pub bill: BillAmount,
    pub tip: TipSelection,
    pub split: SplitCount,
}

// =============================================================================
// Calculation Result
// =============================================================================

/// The derived triple produced by one computation cycle.
///
/// Values are exact doubles; nothing is rounded.
///
/// ## Serialization
/// ```json
/// { "totalBill": 1000.0, "totalTip": 100.0, "amountPerPerson": 550.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// The bill before tip.
    pub total_bill: f64,
    /// Bill times tip rate.
    pub total_tip: f64,
    /// Bill plus tip, divided by the split count.
    pub amount_per_person: f64,
}

impl CalculationResult {
    /// Result for the initial inputs: everything zero.
    pub const ZERO: CalculationResult = CalculationResult {
        total_bill: 0.0,
        total_tip: 0.0,
        amount_per_person: 0.0,
    };

    /// Computes the result for one set of inputs.
    ///
    /// ```text
    /// tip_rate          = tip.rate()
    /// total_tip         = bill * tip_rate
    /// total_with_tip    = bill + total_tip
    /// amount_per_person = total_with_tip / split
    /// ```
    ///
    /// Total: `split` is at least 1 and `bill` is finite.
    pub fn compute(bill: BillAmount, tip: TipSelection, split: SplitCount) -> Self {
        let total_bill = bill.value();
        let total_tip = total_bill * tip.rate();
        let total_with_tip = total_bill + total_tip;
        let amount_per_person = total_with_tip / f64::from(split);

        CalculationResult {
            total_bill,
            total_tip,
            amount_per_person,
        }
    }

    /// Computes the result for a snapshot.
    pub fn from_snapshot(inputs: &InputSnapshot) -> Self {
        Self::compute(inputs.bill, inputs.tip, inputs.split)
    }

    /// Bit-level equality, distinguishing values `==` would merge.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.total_bill.to_bits() == other.total_bill.to_bits()
            && self.total_tip.to_bits() == other.total_tip.to_bits()
            && self.amount_per_person.to_bits() == other.amount_per_person.to_bits()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tip::FixedTip;

    #[test]
    fn test_bill_parse_defaults_to_zero() {
        assert_eq!(BillAmount::parse("").value(), 0.0);
        assert_eq!(BillAmount::parse("   ").value(), 0.0);
        assert_eq!(BillAmount::parse("abc").value(), 0.0);
        assert_eq!(BillAmount::parse("-20").value(), 0.0);
        assert_eq!(BillAmount::parse("inf").value(), 0.0);
        assert_eq!(BillAmount::parse("NaN").value(), 0.0);
    }

    #[test]
    fn test_bill_parse_accepts_numbers() {
        assert_eq!(BillAmount::parse("100").value(), 100.0);
        assert_eq!(BillAmount::parse(" 12.75 ").value(), 12.75);
        assert_eq!(BillAmount::parse("$9.99").value(), 9.99);
        assert_eq!(BillAmount::parse("1e3").value(), 1000.0);
    }

    #[test]
    fn test_bill_try_parse_reasons() {
        assert!(matches!(BillAmount::try_parse(""), Err(InputError::Empty { .. })));
        assert!(matches!(BillAmount::try_parse("$"), Err(InputError::Empty { .. })));
        assert!(matches!(
            BillAmount::try_parse("-1"),
            Err(InputError::Negative { .. })
        ));
        assert!(matches!(
            BillAmount::try_parse("ten"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            BillAmount::try_parse("1e400"),
            Err(InputError::TooLarge { .. })
        ));
        assert!(matches!(
            BillAmount::try_parse("NaN"),
            Err(InputError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_bill_new_normalizes_negative_zero() {
        let bill = BillAmount::new(-0.0);
        assert_eq!(bill.value().to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn test_compute_scenarios() {
        let result = CalculationResult::compute(
            BillAmount::new(1000.0),
            TipSelection::Fixed(FixedTip::Ten),
            SplitCount::new(2),
        );
        assert_eq!(result.total_bill, 1000.0);
        assert_eq!(result.total_tip, 100.0);
        assert_eq!(result.amount_per_person, 550.0);

        let result = CalculationResult::compute(
            BillAmount::new(200.0),
            TipSelection::Custom(33),
            SplitCount::new(4),
        );
        assert_eq!(result.total_tip, 66.0);
        assert_eq!(result.amount_per_person, 66.5);
    }

    #[test]
    fn test_compute_initial_inputs_is_zero() {
        let result = CalculationResult::from_snapshot(&InputSnapshot::default());
        assert!(result.bit_eq(&CalculationResult::ZERO));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = CalculationResult {
            total_bill: 100.0,
            total_tip: 20.0,
            amount_per_person: 40.0,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"totalBill":100.0,"totalTip":20.0,"amountPerPerson":40.0}"#
        );
    }
}
