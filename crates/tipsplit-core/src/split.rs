//! # Split Count
//!
//! How many people share the bill.
//!
//! ## Floor Policy
//! ```text
//!   reset() ──► 1
//!
//!   1 ──increment──► 2 ──increment──► 3 ──► ... (unbounded)
//!   1 ◄─decrement─── 2 ◄─decrement─── 3
//!   1 ◄─decrement─── 1                 (clamped, never 0)
//! ```
//!
//! The floor is what makes the engine's division total: the divisor is
//! never zero.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A positive head count, minimum 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(from = "u32", into = "u32")]
pub struct SplitCount(u32);

impl SplitCount {
    /// The smallest possible split.
    pub const MIN: SplitCount = SplitCount(1);

    /// Creates a split count, clamping 0 up to 1.
    #[inline]
    pub const fn new(count: u32) -> Self {
        if count == 0 {
            Self::MIN
        } else {
            SplitCount(count)
        }
    }

    /// Returns the count.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the count plus one. Saturates instead of wrapping.
    #[inline]
    #[must_use]
    pub const fn increment(self) -> Self {
        SplitCount(self.0.saturating_add(1))
    }

    /// Returns the count minus one, but never below 1.
    #[inline]
    #[must_use]
    pub const fn decrement(self) -> Self {
        if self.0 <= 1 {
            Self::MIN
        } else {
            SplitCount(self.0 - 1)
        }
    }

    /// Returns the starting count of 1.
    #[inline]
    pub const fn reset() -> Self {
        Self::MIN
    }

    /// Returns true at the floor.
    #[inline]
    pub const fn is_min(&self) -> bool {
        self.0 == 1
    }
}

impl Default for SplitCount {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<u32> for SplitCount {
    fn from(count: u32) -> Self {
        SplitCount::new(count)
    }
}

impl From<SplitCount> for u32 {
    fn from(count: SplitCount) -> Self {
        count.0
    }
}

impl From<SplitCount> for f64 {
    fn from(count: SplitCount) -> Self {
        f64::from(count.0)
    }
}

impl fmt::Display for SplitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_zero() {
        assert_eq!(SplitCount::new(0).get(), 1);
        assert_eq!(SplitCount::new(1).get(), 1);
        assert_eq!(SplitCount::new(7).get(), 7);
    }

    #[test]
    fn test_decrement_from_floor_stays_at_one() {
        let one = SplitCount::reset();
        assert_eq!(one.decrement(), SplitCount::MIN);
        assert_eq!(one.decrement().decrement().decrement().get(), 1);
    }

    #[test]
    fn test_decrement_never_reaches_zero() {
        for start in [1, 2, 3, 10, 100] {
            let mut count = SplitCount::new(start);
            for _ in 0..(start + 5) {
                count = count.decrement();
                assert!(count.get() >= 1);
            }
            assert!(count.is_min());
        }
    }

    #[test]
    fn test_increment_then_decrement_round_trips() {
        let start = SplitCount::new(4);
        let mut count = start;
        for _ in 0..6 {
            count = count.increment();
        }
        assert_eq!(count.get(), 10);
        for _ in 0..6 {
            count = count.decrement();
        }
        assert_eq!(count, start);
    }

    #[test]
    fn test_increment_saturates() {
        let max = SplitCount::new(u32::MAX);
        assert_eq!(max.increment().get(), u32::MAX);
    }

    #[test]
    fn test_deserialize_zero_clamps() {
        let count: SplitCount = serde_json::from_str("0").unwrap();
        assert_eq!(count, SplitCount::MIN);
        assert_eq!(serde_json::to_string(&SplitCount::new(3)).unwrap(), "3");
    }
}
