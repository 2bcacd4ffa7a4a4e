//! # tipsplit-core: Pure Calculation Logic for Tipsplit
//!
//! This crate is the **heart** of Tipsplit. It owns the domain model (bill,
//! tip selection, split count) and the engine that turns the latest value of
//! each input into a per-person result.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tipsplit Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End (terminal, GUI, ...)               │   │
//! │  │      bill field ──► tip buttons ──► split stepper ──► display   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ InputEvent                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tipsplit-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │   │
//! │  │   │  adapter  │─►│  engine   │─►│   types   │  │   money   │    │   │
//! │  │   │ raw edits │  │ combine-  │  │Calculation│  │  cents    │    │   │
//! │  │   │ → inputs  │  │  latest   │  │  Result   │  │ rounding  │    │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ASYNC • NO LOCKS • TOTAL FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            tipsplit-service (serializing async host)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tip`] - Tip selection (none, preset percentage, custom percentage)
//! - [`split`] - Split count with its floor of one person
//! - [`types`] - Bill amount, input snapshot and calculation result
//! - [`engine`] - The calculation engine and its listeners
//! - [`adapter`] - Raw UI events to engine calls
//! - [`money`] - Cent rounding for display
//! - [`error`] - Input parse errors
//!
//! ## Example Usage
//!
//! ```rust
//! use tipsplit_core::{BillAmount, CalculationEngine, SplitCount, TipSelection};
//!
//! let mut engine = CalculationEngine::new();
//! engine.on_bill_changed(BillAmount::new(1000.0));
//! engine.on_tip_changed(TipSelection::fixed(10).unwrap());
//! engine.on_split_changed(SplitCount::new(2));
//!
//! let result = engine.latest();
//! assert_eq!(result.total_tip, 100.0);
//! assert_eq!(result.amount_per_person, 550.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod engine;
pub mod error;
pub mod money;
pub mod split;
pub mod tip;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adapter::{InputAdapter, InputEvent};
pub use engine::{CalculationEngine, ListenerId, ResultListener};
pub use error::{InputError, InputResult};
pub use money::Money;
pub use split::SplitCount;
pub use tip::{parse_custom_tip, FixedTip, TipSelection};
pub use types::{BillAmount, CalculationResult, InputSnapshot};
