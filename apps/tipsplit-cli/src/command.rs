//! # Line Commands
//!
//! Turns one stdin line into an [`InputEvent`] or a session command.
//!
//! ```text
//! bill 42.50        ──► BillTextChanged { text: "42.50" }
//! tip 15            ──► TipPresetTapped { percent: 15 }
//! tip custom 18     ──► CustomTipEntered { text: "18" }
//! tip none          ──► TipCleared
//! split +           ──► SplitIncremented
//! split -           ──► SplitDecremented
//! reset             ──► ResetRequested
//! ```

use tipsplit_core::InputEvent;

use crate::error::{AppError, AppResult};

/// Printed for `help`.
pub const HELP: &str = "\
Commands:
  bill <amount>       set the bill text (empty clears it)
  tip <10|15|20>      pick a preset tip
  tip custom <n>      enter a whole-number custom tip
  tip none            clear the tip
  split + | split -   add or remove one person
  reset               clear everything
  help                show this message
  quit                leave";

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the calculation service.
    Input(InputEvent),
    Help,
    Quit,
}

/// Parses one line. Blank lines yield `None`.
///
/// Text after `bill` and `tip custom` is passed through untouched apart from
/// the single separating space, so the core parsers see what the user typed.
pub fn parse_line(line: &str) -> AppResult<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = split_word(trimmed);
    let unknown = || AppError::UnknownCommand(trimmed.trim().to_string());

    let command = match word.to_lowercase().as_str() {
        "bill" => Command::Input(InputEvent::BillTextChanged {
            text: rest.to_string(),
        }),
        "tip" => parse_tip(rest).ok_or_else(unknown)?,
        "split" => match rest.trim() {
            "+" | "up" => Command::Input(InputEvent::SplitIncremented),
            "-" | "down" => Command::Input(InputEvent::SplitDecremented),
            _ => return Err(unknown()),
        },
        "reset" if rest.trim().is_empty() => Command::Input(InputEvent::ResetRequested),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(unknown()),
    };

    Ok(Some(command))
}

fn parse_tip(rest: &str) -> Option<Command> {
    let (word, text) = split_word(rest.trim_start());
    let event = match word.to_lowercase().as_str() {
        "none" | "clear" if text.trim().is_empty() => InputEvent::TipCleared,
        "custom" => InputEvent::CustomTipEntered {
            text: text.to_string(),
        },
        preset if text.trim().is_empty() => InputEvent::TipPresetTapped {
            percent: preset.trim_end_matches('%').parse().ok()?,
        },
        _ => return None,
    };
    Some(Command::Input(event))
}

/// Splits off the first word and drops one separating space.
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => {
            let ws_len = s[idx..].chars().next().map_or(1, char::len_utf8);
            (&s[..idx], &s[idx + ws_len..])
        }
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(line: &str) -> InputEvent {
        match parse_line(line).unwrap() {
            Some(Command::Input(event)) => event,
            other => panic!("expected input event for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   \n").unwrap(), None);
    }

    #[test]
    fn test_bill() {
        assert_eq!(
            input("bill 42.50"),
            InputEvent::BillTextChanged {
                text: "42.50".into()
            }
        );
        assert_eq!(
            input("bill"),
            InputEvent::BillTextChanged { text: "".into() }
        );
        assert_eq!(
            input("BILL abc\n"),
            InputEvent::BillTextChanged { text: "abc".into() }
        );
    }

    #[test]
    fn test_tip() {
        assert_eq!(input("tip 15"), InputEvent::TipPresetTapped { percent: 15 });
        assert_eq!(input("tip 20%"), InputEvent::TipPresetTapped { percent: 20 });
        assert_eq!(input("tip none"), InputEvent::TipCleared);
        assert_eq!(
            input("tip custom 33"),
            InputEvent::CustomTipEntered { text: "33".into() }
        );
    }

    #[test]
    fn test_custom_tip_text_is_not_trimmed() {
        assert_eq!(
            input("tip custom  7"),
            InputEvent::CustomTipEntered { text: " 7".into() }
        );
    }

    #[test]
    fn test_unknown_preset_reaches_the_adapter() {
        // The adapter decides 12 is not a preset.
        assert_eq!(input("tip 12"), InputEvent::TipPresetTapped { percent: 12 });
    }

    #[test]
    fn test_split_and_reset() {
        assert_eq!(input("split +"), InputEvent::SplitIncremented);
        assert_eq!(input("split down"), InputEvent::SplitDecremented);
        assert_eq!(input("reset"), InputEvent::ResetRequested);
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(parse_line("help").unwrap(), Some(Command::Help));
        assert_eq!(parse_line("?").unwrap(), Some(Command::Help));
        assert_eq!(parse_line("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_line("q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_commands() {
        for line in ["tipp 10", "split", "split 3", "tip ten", "tip none now", "reset all"] {
            assert!(
                matches!(parse_line(line), Err(AppError::UnknownCommand(_))),
                "{:?} should be rejected",
                line
            );
        }
    }
}
