//! Result formatting for the terminal.

use tipsplit_core::{CalculationResult, Money};

use crate::config::{DisplaySettings, OutputFormat};
use crate::error::AppResult;

/// Shown in place of an amount too large to print in cents.
const OVERFLOW: &str = "overflow";

/// Turns results into output lines.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    currency_symbol: String,
}

impl Renderer {
    pub fn new(display: &DisplaySettings) -> Self {
        Renderer {
            format: display.output,
            currency_symbol: display.currency_symbol.clone(),
        }
    }

    /// Renders one result without a trailing newline.
    ///
    /// Text output rounds to cents for display only. JSON carries the exact
    /// values.
    ///
    /// A bill near `f64::MAX` can push the totals past what cents can hold,
    /// or overflow them to infinity. Text shows such amounts as `overflow`.
    /// JSON keeps finite values as they are; serde_json writes infinity as
    /// `null`.
    pub fn render(&self, result: &CalculationResult) -> AppResult<String> {
        match self.format {
            OutputFormat::Text => Ok(format!(
                "Total bill {} | Total tip {} | Per person {}",
                self.money(result.total_bill),
                self.money(result.total_tip),
                self.money(result.amount_per_person),
            )),
            OutputFormat::Json => Ok(serde_json::to_string(result)?),
        }
    }

    fn money(&self, amount: f64) -> String {
        match Money::checked_from_amount(amount) {
            Some(money) => money.format_with(&self.currency_symbol),
            None => OVERFLOW.to_string(),
        }
    }
}
