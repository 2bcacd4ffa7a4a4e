//! # Tip Selection
//!
//! The user's chosen tipping scheme.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         TipSelection                                    │
//! │                                                                         │
//! │  None ──────────────► rate 0.00   label ""                              │
//! │                                                                         │
//! │  Fixed(FixedTip) ───► one of the preset buttons                         │
//! │      Ten     ───────► rate 0.10   label "10%"                           │
//! │      Fifteen ───────► rate 0.15   label "15%"                           │
//! │      Twenty  ───────► rate 0.20   label "20%"                           │
//! │                                                                         │
//! │  Custom(p) ─────────► rate p/100  label "{p}%"                          │
//! │      p comes from free-text entry, any non-negative integer             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tipsplit_core::tip::{parse_custom_tip, TipSelection};
//!
//! let tip = parse_custom_tip("33").unwrap();
//! assert_eq!(tip, TipSelection::Custom(33));
//! assert_eq!(tip.label(), "33%");
//!
//! // Unparsable entry yields nothing; the caller keeps its previous tip.
//! assert!(parse_custom_tip("abc").is_none());
//! ```

use std::fmt;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{InputError, InputResult};

const CUSTOM_TIP_FIELD: &str = "custom tip";

// =============================================================================
// Fixed Tip
// =============================================================================

/// One of the preset tip percentages offered as buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FixedTip {
    /// 10%
    Ten,
    /// 15%
    Fifteen,
    /// 20%
    Twenty,
}

impl FixedTip {
    /// Presets in button order.
    pub const ALL: [FixedTip; 3] = [FixedTip::Ten, FixedTip::Fifteen, FixedTip::Twenty];

    /// Returns the preset as a whole percentage.
    #[inline]
    pub const fn percent(&self) -> u32 {
        match self {
            FixedTip::Ten => 10,
            FixedTip::Fifteen => 15,
            FixedTip::Twenty => 20,
        }
    }

    /// Looks up the preset for a percentage, if there is one.
    pub fn from_percent(percent: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tip| tip.percent() == percent)
    }
}

impl TryFrom<u32> for FixedTip {
    type Error = InputError;

    fn try_from(percent: u32) -> InputResult<Self> {
        Self::from_percent(percent).ok_or(InputError::UnknownPreset { percent })
    }
}

// =============================================================================
// Tip Selection
// =============================================================================

/// The tip applied to the bill.
///
/// ## Design Decisions
/// - **Closed sum type**: every selection is one of three shapes; preset
///   percentages are a separate enum so an invalid "fixed 12%" cannot exist.
/// - **Copy value type**: a new selection replaces the old one wholesale.
///
/// ## Wire Format
/// ```json
/// { "kind": "none" }
/// { "kind": "fixed", "value": "fifteen" }
/// { "kind": "custom", "value": 33 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TipSelection {
    /// No tip.
    #[default]
    None,
    /// A preset percentage.
    Fixed(FixedTip),
    /// A user-entered percentage.
    Custom(u32),
}

impl TipSelection {
    /// Creates a preset selection, or `None` (the Option) if `percent` is
    /// not a preset.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::tip::{FixedTip, TipSelection};
    ///
    /// assert_eq!(TipSelection::fixed(15), Some(TipSelection::Fixed(FixedTip::Fifteen)));
    /// assert_eq!(TipSelection::fixed(12), None);
    /// ```
    pub fn fixed(percent: u32) -> Option<Self> {
        FixedTip::from_percent(percent).map(TipSelection::Fixed)
    }

    /// Creates a custom selection.
    #[inline]
    pub const fn custom(percent: u32) -> Self {
        TipSelection::Custom(percent)
    }

    /// Returns the selection as a whole percentage (0 for no tip).
    #[inline]
    pub const fn percent(&self) -> u32 {
        match self {
            TipSelection::None => 0,
            TipSelection::Fixed(tip) => tip.percent(),
            TipSelection::Custom(percent) => *percent,
        }
    }

    /// Returns the tip rate as a fraction of the bill.
    ///
    /// `none → 0`, `fixed(p) → p/100`, `custom(p) → p/100`.
    #[inline]
    pub fn rate(&self) -> f64 {
        f64::from(self.percent()) / 100.0
    }

    /// Returns the label shown on the tip control.
    ///
    /// No tip has an empty label; everything else reads `"{p}%"`.
    pub fn label(&self) -> String {
        match self {
            TipSelection::None => String::new(),
            other => format!("{}%", other.percent()),
        }
    }

    /// Parses free-text custom tip entry.
    ///
    /// ## Rules
    /// - Text must be a non-negative integer, as typed (no trimming)
    /// - Values beyond `u32::MAX` are rejected
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::error::InputError;
    /// use tipsplit_core::tip::TipSelection;
    ///
    /// assert_eq!(TipSelection::try_parse_custom("25"), Ok(TipSelection::Custom(25)));
    /// assert!(matches!(
    ///     TipSelection::try_parse_custom("-5"),
    ///     Err(InputError::Negative { .. })
    /// ));
    /// ```
    pub fn try_parse_custom(text: &str) -> InputResult<Self> {
        if text.is_empty() {
            return Err(InputError::Empty {
                field: CUSTOM_TIP_FIELD.to_string(),
            });
        }

        match text.parse::<u32>() {
            Ok(percent) => Ok(TipSelection::Custom(percent)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(InputError::TooLarge {
                field: CUSTOM_TIP_FIELD.to_string(),
                text: text.to_string(),
            }),
            Err(_) if is_negative_integer(text) => Err(InputError::Negative {
                field: CUSTOM_TIP_FIELD.to_string(),
                text: text.to_string(),
            }),
            Err(_) => Err(InputError::NotANumber {
                field: CUSTOM_TIP_FIELD.to_string(),
                text: text.to_string(),
            }),
        }
    }
}

/// Debug-friendly rendering; use [`TipSelection::label`] for display.
impl fmt::Display for TipSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipSelection::None => write!(f, "none"),
            TipSelection::Fixed(tip) => write!(f, "{}%", tip.percent()),
            TipSelection::Custom(percent) => write!(f, "custom {}%", percent),
        }
    }
}

impl From<FixedTip> for TipSelection {
    fn from(tip: FixedTip) -> Self {
        TipSelection::Fixed(tip)
    }
}

/// Parses custom tip text, returning nothing when it is not a non-negative
/// integer.
///
/// Callers must leave their previous selection unchanged on `None`.
pub fn parse_custom_tip(text: &str) -> Option<TipSelection> {
    TipSelection::try_parse_custom(text).ok()
}

fn is_negative_integer(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

// =============================================================================
// Unit Tests
// =============================================================================
