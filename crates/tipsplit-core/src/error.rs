//! # Error Types
//!
//! Parse errors raised at the input boundary.
//!
//! ## Where These Go
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bill text ──► BillAmount::try_parse ──► InputError ──► mapped to 0     │
//! │                                                                         │
//! │  custom tip ─► TipSelection::try_parse_custom ──► InputError ──►        │
//! │                previous selection kept                                  │
//! │                                                                         │
//! │  The engine never sees an InputError: its computation path is total.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers that only need the fallback behavior use the `Option` / default
//! returning helpers; the typed error exists so adapters can log the reason.

use thiserror::Error;

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Field text is empty (or only whitespace for bill text).
    #[error("{field} is empty")]
    Empty { field: String },

    /// Field text is a negative number.
    #[error("{field} must not be negative, got '{text}'")]
    Negative { field: String, text: String },

    /// Field text is not a number at all.
    #[error("{field} is not a number: '{text}'")]
    NotANumber { field: String, text: String },

    /// Field text is a number, but out of the representable range.
    #[error("{field} is too large: '{text}'")]
    TooLarge { field: String, text: String },

    /// Percentage is not one of the preset tip buttons.
    #[error("{percent}% is not a preset tip")]
    UnknownPreset { percent: u32 },
}

/// Convenience type alias for Results with InputError.
pub type InputResult<T> = Result<T, InputError>;
