//! # Input Adapter
//!
//! Turns raw front-end edits into engine calls.
//!
//! ## Event Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw UI event                 Adapter                  Engine call      │
//! │  ────────────                 ───────                  ───────────      │
//! │                                                                         │
//! │  BillTextChanged("12.5") ───► BillAmount::parse ─────► on_bill_changed  │
//! │                               (bad text → 0)                            │
//! │                                                                         │
//! │  TipPresetTapped(15) ───────► TipSelection::fixed ───► on_tip_changed   │
//! │                               (unknown preset → dropped)                │
//! │                                                                         │
//! │  CustomTipEntered("33") ────► parse_custom_tip ──────► on_tip_changed   │
//! │                               (bad text → dropped, previous tip kept)   │
//! │                                                                         │
//! │  TipCleared ────────────────► TipSelection::None ────► on_tip_changed   │
//! │                                                                         │
//! │  SplitIncremented ──────────► local split + 1 ───────► on_split_changed │
//! │  SplitDecremented ──────────► local split - 1 (≥ 1) ─► on_split_changed │
//! │                                                                         │
//! │  ResetRequested ────────────► local state reset ─────► reset            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The adapter keeps only its own edit state (the stepper value and the
//! highlighted tip) and forwards copies; the engine remains the single
//! source of truth for the computation.

use tracing::warn;

use crate::engine::CalculationEngine;
use crate::split::SplitCount;
use crate::tip::TipSelection;
use crate::types::BillAmount;

/// A raw edit coming from a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The bill text field changed.
    BillTextChanged { text: String },
    /// A preset tip button was tapped.
    TipPresetTapped { percent: u32 },
    /// The custom tip dialog was confirmed with this text.
    CustomTipEntered { text: String },
    /// The tip was deselected.
    TipCleared,
    /// The split stepper's plus button was tapped.
    SplitIncremented,
    /// The split stepper's minus button was tapped.
    SplitDecremented,
    /// Start over with every input at its initial value.
    ResetRequested,
}

/// Local edit state of the input controls.
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    /// Value shown by the split stepper.
    split: SplitCount,

    /// Tip currently highlighted by the tip controls.
    tip: TipSelection,
}

impl InputAdapter {
    /// Creates an adapter with controls at their initial values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one raw event, forwarding it to the engine.
    ///
    /// ## Returns
    /// - `true` if the engine was called (and therefore emitted a result)
    /// - `false` if the event was rejected and nothing changed
    pub fn apply(&mut self, event: InputEvent, engine: &mut CalculationEngine) -> bool {
        match event {
            InputEvent::BillTextChanged { text } => {
                let amount = match BillAmount::try_parse(&text) {
                    Ok(amount) => amount,
                    Err(e) => {
                        // Clearing the field is normal editing; anything else is worth a note.
                        if !text.trim().is_empty() {
                            warn!(error = %e, "Bill text not understood, using 0");
                        }
                        BillAmount::ZERO
                    }
                };
                engine.on_bill_changed(amount);
                true
            }

            InputEvent::TipPresetTapped { percent } => match TipSelection::fixed(percent) {
                Some(tip) => self.select_tip(tip, engine),
                None => {
                    warn!(percent, "Ignoring tap on unknown tip preset");
                    false
                }
            },

            InputEvent::CustomTipEntered { text } => match TipSelection::try_parse_custom(&text) {
                Ok(tip) => self.select_tip(tip, engine),
                Err(e) => {
                    warn!(error = %e, previous = %self.tip, "Custom tip rejected, keeping previous tip");
                    false
                }
            },

            InputEvent::TipCleared => self.select_tip(TipSelection::None, engine),

            InputEvent::SplitIncremented => {
                self.split = self.split.increment();
                engine.on_split_changed(self.split);
                true
            }

            InputEvent::SplitDecremented => {
                self.split = self.split.decrement();
                engine.on_split_changed(self.split);
                true
            }

            InputEvent::ResetRequested => {
                self.split = SplitCount::reset();
                self.tip = TipSelection::None;
                engine.reset();
                true
            }
        }
    }

    /// Returns the value shown by the split stepper.
    pub fn split(&self) -> SplitCount {
        self.split
    }

    /// Returns the highlighted tip.
    pub fn tip(&self) -> TipSelection {
        self.tip
    }

    fn select_tip(&mut self, tip: TipSelection, engine: &mut CalculationEngine) -> bool {
        self.tip = tip;
        engine.on_tip_changed(tip);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tip::FixedTip;

    fn bill(text: &str) -> InputEvent {
        InputEvent::BillTextChanged {
            text: text.to_string(),
        }
    }

    fn custom(text: &str) -> InputEvent {
        InputEvent::CustomTipEntered {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_bill_text_forwards_parsed_amount() {
        let mut adapter = InputAdapter::new();
        let mut engine = CalculationEngine::new();

        assert!(adapter.apply(bill("250"), &mut engine));
        assert_eq!(engine.inputs().bill.value(), 250.0);

        assert!(adapter.apply(bill("garbage"), &mut engine));
        assert_eq!(engine.inputs().bill.value(), 0.0);
        assert_eq!(engine.emission_count(), 2);
    }

    #[test]
    fn test_bad_custom_tip_keeps_previous_selection() {
        let mut adapter = InputAdapter::new();
        let mut engine = CalculationEngine::new();

        assert!(adapter.apply(InputEvent::TipPresetTapped { percent: 15 }, &mut engine));
        let emitted = engine.emission_count();

        for text in ["-5", "abc", ""] {
            assert!(!adapter.apply(custom(text), &mut engine));
        }

        assert_eq!(engine.emission_count(), emitted);
        assert_eq!(engine.inputs().tip, TipSelection::Fixed(FixedTip::Fifteen));
        assert_eq!(adapter.tip(), TipSelection::Fixed(FixedTip::Fifteen));
    }

    #[test]
    fn test_custom_tip_replaces_preset() {
        let mut adapter = InputAdapter::new();
        let mut engine = CalculationEngine::new();

        adapter.apply(InputEvent::TipPresetTapped { percent: 10 }, &mut engine);
        assert!(adapter.apply(custom("33"), &mut engine));
        assert_eq!(engine.inputs().tip, TipSelection::Custom(33));
    }

    #[test]
    fn test_unknown_preset_is_dropped() {
        let mut adapter = InputAdapter::new();
        let mut engine = CalculationEngine::new();

        assert!(!adapter.apply(InputEvent::TipPresetTapped { percent: 12 }, &mut engine));
        assert_eq!(engine.emission_count(), 0);
    }

    #[test]
    fn test_split_stepper_clamps_and_still_emits() {
        let mut adapter = InputAdapter::new();
        let mut engine = CalculationEngine::new();

        assert!(adapter.apply(InputEvent::SplitDecremented, &mut engine));
        assert_eq!(engine.inputs().split, SplitCount::MIN);

        adapter.apply(InputEvent::SplitIncremented, &mut engine);
        adapter.apply(InputEvent::SplitIncremented, &mut engine);
        assert_eq!(adapter.split().get(), 3);
        assert_eq!(engine.inputs().split.get(), 3);
        assert_eq!(engine.emission_count(), 3);
    }

    #[test]
    fn test_reset_clears_local_state_and_engine() {
        let mut adapter = InputAdapter::new();
        let mut engine = CalculationEngine::new();

        adapter.apply(bill("90"), &mut engine);
        adapter.apply(InputEvent::TipPresetTapped { percent: 20 }, &mut engine);
        adapter.apply(InputEvent::SplitIncremented, &mut engine);
        assert!(adapter.apply(InputEvent::ResetRequested, &mut engine));

        assert_eq!(adapter.split(), SplitCount::MIN);
        assert_eq!(adapter.tip(), TipSelection::None);
        assert_eq!(engine.latest().amount_per_person, 0.0);

        adapter.apply(InputEvent::SplitIncremented, &mut engine);
        assert_eq!(engine.inputs().split.get(), 2);
    }
}
