//! # Calculation Engine
//!
//! Holds the latest value of each input and republishes a result whenever
//! any one of them changes.
//!
//! ## Combine-Latest Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  on_bill_changed ──┐                                                    │
//! │                    │    ┌──────────────────┐    ┌───────────────────┐  │
//! │  on_tip_changed ───┼───►│  InputSnapshot   │───►│ CalculationResult │  │
//! │                    │    │  (latest values) │    │     ::compute     │  │
//! │  on_split_changed ─┘    └──────────────────┘    └─────────┬─────────┘  │
//! │                                                           │            │
//! │                                        ┌──────────────────┼─────────┐  │
//! │                                        ▼                  ▼         ▼  │
//! │                                   listener #0       listener #1   ...  │
//! │                                                                         │
//! │  ONE call ──► ONE recompute ──► ONE emission, before the call returns   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The engine is a plain single-owner value: `&mut self` on every setter
//! is the serialization point. Hosts with several event sources funnel
//! them onto one task first (see `tipsplit-service`).

use std::fmt;

use tracing::debug;

use crate::split::SplitCount;
use crate::tip::TipSelection;
use crate::types::{BillAmount, CalculationResult, InputSnapshot};

// =============================================================================
// Listener
// =============================================================================

/// Receives every result the engine emits.
///
/// Implemented for any `FnMut(&CalculationResult) + Send` closure.
pub trait ResultListener: Send {
    /// Called once per recompute with the new result.
    fn on_result(&mut self, result: &CalculationResult);
}

impl<F> ResultListener for F
where
    F: FnMut(&CalculationResult) + Send,
{
    fn on_result(&mut self, result: &CalculationResult) {
        self(result)
    }
}

/// Identifies a registered listener for [`CalculationEngine::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

// =============================================================================
// Engine
// =============================================================================

/// The calculation engine.
///
/// ## Invariants
/// - Starts at bill 0, no tip, split 1 (all-zero result)
/// - Every setter call emits exactly one result, synchronously
/// - Listeners see results in call order, in registration order
/// - Arithmetic is plain `f64`; identical call sequences give
///   bit-identical results
pub struct CalculationEngine {
    /// Latest value of each input.
    inputs: InputSnapshot,

    /// Result of the last recompute.
    latest: CalculationResult,

    /// Registered listeners, in registration order.
    listeners: Vec<(ListenerId, Box<dyn ResultListener>)>,

    /// Next listener id to hand out.
    next_listener_id: u64,

    /// Number of results emitted so far.
    emissions: u64,
}

impl CalculationEngine {
    /// Creates an engine with the initial inputs.
    pub fn new() -> Self {
        Self::with_inputs(InputSnapshot::default())
    }

    /// Creates an engine starting from the given inputs.
    ///
    /// Nothing is emitted; [`latest`](Self::latest) already reflects them.
    pub fn with_inputs(inputs: InputSnapshot) -> Self {
        CalculationEngine {
            inputs,
            latest: CalculationResult::from_snapshot(&inputs),
            listeners: Vec::new(),
            next_listener_id: 0,
            emissions: 0,
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener. It sees only results emitted after this call.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: ResultListener + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(listener = id.0, "Result listener registered");
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = self.listeners.len() != before;
        if removed {
            debug!(listener = id.0, "Result listener removed");
        }
        removed
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Applies a new bill amount and emits the recomputed result.
    pub fn on_bill_changed(&mut self, amount: BillAmount) {
        self.inputs.bill = amount;
        self.recompute("bill");
    }

    /// Applies a new tip selection and emits the recomputed result.
    pub fn on_tip_changed(&mut self, selection: TipSelection) {
        self.inputs.tip = selection;
        self.recompute("tip");
    }

    /// Applies a new split count and emits the recomputed result.
    pub fn on_split_changed(&mut self, count: SplitCount) {
        self.inputs.split = count;
        self.recompute("split");
    }

    /// Restores the initial inputs and emits one result.
    pub fn reset(&mut self) {
        self.inputs = InputSnapshot::default();
        self.recompute("reset");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the result of the last recompute.
    pub fn latest(&self) -> CalculationResult {
        self.latest
    }

    /// Returns the current inputs.
    pub fn inputs(&self) -> InputSnapshot {
        self.inputs
    }

    /// Returns how many results have been emitted.
    pub fn emission_count(&self) -> u64 {
        self.emissions
    }

    fn recompute(&mut self, cause: &'static str) {
        let result = CalculationResult::from_snapshot(&self.inputs);
        self.latest = result;
        self.emissions += 1;

        debug!(
            cause,
            bill = self.inputs.bill.value(),
            tip = %self.inputs.tip,
            split = self.inputs.split.get(),
            total_tip = result.total_tip,
            per_person = result.amount_per_person,
            "Result recomputed"
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener.on_result(&result);
        }
    }
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CalculationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculationEngine")
            .field("inputs", &self.inputs)
            .field("latest", &self.latest)
            .field("listeners", &self.listeners.len())
            .field("emissions", &self.emissions)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
