//! Input events and the key/button vocabulary that produces them.

use crate::operation::{BinaryOperator, UnaryFunction};

/// A digit or the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSymbol {
    /// Decimal digit `0..=9`.
    Digit(u8),
    Point,
}

impl InputSymbol {
    /// Maps `'0'..='9'` and `'.'` to a symbol.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(InputSymbol::Point),
            _ => c.to_digit(10).map(|d| InputSymbol::Digit(d as u8)),
        }
    }

    /// Character appended to the numeral; `None` for an out-of-range digit.
    pub fn to_char(self) -> Option<char> {
        match self {
            InputSymbol::Digit(d) => char::from_digit(u32::from(d), 10),
            InputSymbol::Point => Some('.'),
        }
    }
}

/// Memory register actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryAction {
    Add,
    Subtract,
    Recall,
    Clear,
}

/// Everything the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Input(InputSymbol),
    Operator(BinaryOperator),
    /// Resolve the pending computation (`=` / Enter).
    Equals,
    Unary(UnaryFunction),
    Backspace,
    ClearAll,
    ClearEntry,
    Memory(MemoryAction),
    ToggleScientificPanel,
}

/// A key press or button action, routed either to the engine or to the
/// session that owns history and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Engine(Event),
    ToggleTheme,
    ClearHistory,
    /// Copy the result of the history entry at this index (0 = newest) into
    /// the display.
    RecallHistory(usize),
}

impl Command {
    /// Maps a keyboard key name to a command.
    ///
    /// Key names follow the DOM `KeyboardEvent.key` values: single characters
    /// plus `Enter`, `Escape`, `Delete` and `Backspace`.
    pub fn from_key(key: &str) -> Option<Self> {
        let event = match key {
            "Enter" | "=" => Event::Equals,
            "Escape" | "Delete" => Event::ClearAll,
            "Backspace" => Event::Backspace,
            "+" => Event::Operator(BinaryOperator::Add),
            "-" => Event::Operator(BinaryOperator::Subtract),
            "*" => Event::Operator(BinaryOperator::Multiply),
            "/" => Event::Operator(BinaryOperator::Divide),
            "%" => Event::Unary(UnaryFunction::Percent),
            "m" | "M" => Event::ToggleScientificPanel,
            "c" | "C" => Event::ClearEntry,
            "t" | "T" => return Some(Command::ToggleTheme),
            _ => {
                let mut chars = key.chars();
                let symbol = match (chars.next(), chars.next()) {
                    (Some(c), None) => InputSymbol::from_char(c)?,
                    _ => return None,
                };
                Event::Input(symbol)
            }
        };
        Some(Command::Engine(event))
    }

    /// Maps a button action name to a command.
    pub fn from_action(action: &str) -> Option<Self> {
        if let Some(index) = action.strip_prefix("history:") {
            return index.trim().parse().ok().map(Command::RecallHistory);
        }

        let event = match action {
            "add" => Event::Operator(BinaryOperator::Add),
            "subtract" => Event::Operator(BinaryOperator::Subtract),
            "multiply" => Event::Operator(BinaryOperator::Multiply),
            "divide" => Event::Operator(BinaryOperator::Divide),
            "power" => Event::Operator(BinaryOperator::Power),
            "equals" => Event::Equals,
            "backspace" => Event::Backspace,
            "clear-all" => Event::ClearAll,
            "clear-entry" => Event::ClearEntry,
            "percentage" => Event::Unary(UnaryFunction::Percent),
            "plus-minus" => Event::Unary(UnaryFunction::Negate),
            "sqrt" => Event::Unary(UnaryFunction::Sqrt),
            "square" => Event::Unary(UnaryFunction::Square),
            "reciprocal" => Event::Unary(UnaryFunction::Reciprocal),
            "sin" => Event::Unary(UnaryFunction::Sin),
            "cos" => Event::Unary(UnaryFunction::Cos),
            "tan" => Event::Unary(UnaryFunction::Tan),
            "log" => Event::Unary(UnaryFunction::Log10),
            "ln" => Event::Unary(UnaryFunction::Ln),
            "exp" => Event::Unary(UnaryFunction::Exp),
            "abs" => Event::Unary(UnaryFunction::Abs),
            "factorial" => Event::Unary(UnaryFunction::Factorial),
            "pi" => Event::Unary(UnaryFunction::Pi),
            "e" => Event::Unary(UnaryFunction::E),
            "memory-add" => Event::Memory(MemoryAction::Add),
            "memory-subtract" => Event::Memory(MemoryAction::Subtract),
            "memory-recall" => Event::Memory(MemoryAction::Recall),
            "memory-clear" => Event::Memory(MemoryAction::Clear),
            "mode-toggle" => Event::ToggleScientificPanel,
            "theme-toggle" => return Some(Command::ToggleTheme),
            "clear-history" => return Some(Command::ClearHistory),
            _ => return None,
        };
        Some(Command::Engine(event))
    }

    /// Parses a script token: a key name first, then a button action name.
    pub fn parse(token: &str) -> Option<Self> {
        Self::from_key(token).or_else(|| Self::from_action(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(event: Event) -> Option<Command> {
        Some(Command::Engine(event))
    }

    #[test]
    fn test_digit_and_point_keys() {
        for (i, key) in ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]
            .iter()
            .enumerate()
        {
            assert_eq!(
                Command::from_key(key),
                engine(Event::Input(InputSymbol::Digit(i as u8)))
            );
        }
        assert_eq!(Command::from_key("."), engine(Event::Input(InputSymbol::Point)));
    }

    #[test]
    fn test_operator_and_control_keys() {
        assert_eq!(
            Command::from_key("*"),
            engine(Event::Operator(BinaryOperator::Multiply))
        );
        assert_eq!(
            Command::from_key("-"),
            engine(Event::Operator(BinaryOperator::Subtract))
        );
        assert_eq!(Command::from_key("Enter"), engine(Event::Equals));
        assert_eq!(Command::from_key("="), engine(Event::Equals));
        assert_eq!(Command::from_key("Escape"), engine(Event::ClearAll));
        assert_eq!(Command::from_key("Delete"), engine(Event::ClearAll));
        assert_eq!(Command::from_key("Backspace"), engine(Event::Backspace));
        assert_eq!(
            Command::from_key("%"),
            engine(Event::Unary(UnaryFunction::Percent))
        );
        assert_eq!(Command::from_key("M"), engine(Event::ToggleScientificPanel));
        assert_eq!(Command::from_key("c"), engine(Event::ClearEntry));
        assert_eq!(Command::from_key("T"), Some(Command::ToggleTheme));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(Command::from_key("x"), None);
        assert_eq!(Command::from_key("12"), None);
        assert_eq!(Command::from_key(""), None);
        assert_eq!(Command::from_key("Shift"), None);
    }

    #[test]
    fn test_actions() {
        assert_eq!(
            Command::from_action("power"),
            engine(Event::Operator(BinaryOperator::Power))
        );
        assert_eq!(
            Command::from_action("log"),
            engine(Event::Unary(UnaryFunction::Log10))
        );
        assert_eq!(
            Command::from_action("memory-recall"),
            engine(Event::Memory(MemoryAction::Recall))
        );
        assert_eq!(
            Command::from_action("clear-history"),
            Some(Command::ClearHistory)
        );
        assert_eq!(
            Command::from_action("history:3"),
            Some(Command::RecallHistory(3))
        );
        assert_eq!(Command::from_action("history:x"), None);
        assert_eq!(Command::from_action("nope"), None);
    }

    #[test]
    fn test_parse_prefers_keys() {
        assert_eq!(Command::parse("c"), engine(Event::ClearEntry));
        assert_eq!(Command::parse("e"), engine(Event::Unary(UnaryFunction::E)));
        assert_eq!(Command::parse("sqrt"), engine(Event::Unary(UnaryFunction::Sqrt)));
    }

    #[test]
    fn test_input_symbol_chars() {
        assert_eq!(InputSymbol::from_char('7'), Some(InputSymbol::Digit(7)));
        assert_eq!(InputSymbol::from_char('a'), None);
        assert_eq!(InputSymbol::Digit(7).to_char(), Some('7'));
        assert_eq!(InputSymbol::Digit(12).to_char(), None);
        assert_eq!(InputSymbol::Point.to_char(), Some('.'));
    }
}
