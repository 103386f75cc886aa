//! Property-based tests for the calculator engine.

use calculator_engine::{
    BinaryOperator, CalculatorEngine, Event, History, HistoryEntry, HistoryResult, InputSymbol,
    MemoryAction, UnaryFunction,
};
use proptest::prelude::*;

// ===== Strategy definitions =====

fn symbol_strategy() -> impl Strategy<Value = InputSymbol> {
    prop_oneof![
        9 => (0u8..=9u8).prop_map(InputSymbol::Digit),
        1 => Just(InputSymbol::Point),
    ]
}

fn operator_strategy() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Subtract),
        Just(BinaryOperator::Multiply),
        Just(BinaryOperator::Divide),
        Just(BinaryOperator::Power),
    ]
}

fn unary_strategy() -> impl Strategy<Value = UnaryFunction> {
    prop_oneof![
        Just(UnaryFunction::Percent),
        Just(UnaryFunction::Negate),
        Just(UnaryFunction::Sqrt),
        Just(UnaryFunction::Square),
        Just(UnaryFunction::Reciprocal),
        Just(UnaryFunction::Sin),
        Just(UnaryFunction::Cos),
        Just(UnaryFunction::Tan),
        Just(UnaryFunction::Log10),
        Just(UnaryFunction::Ln),
        Just(UnaryFunction::Exp),
        Just(UnaryFunction::Abs),
        Just(UnaryFunction::Factorial),
        Just(UnaryFunction::Pi),
        Just(UnaryFunction::E),
    ]
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        6 => symbol_strategy().prop_map(Event::Input),
        2 => operator_strategy().prop_map(Event::Operator),
        1 => Just(Event::Equals),
        1 => unary_strategy().prop_map(Event::Unary),
        1 => Just(Event::Backspace),
        1 => Just(Event::ClearAll),
        1 => Just(Event::ClearEntry),
        1 => Just(Event::Memory(MemoryAction::Add)),
        1 => Just(Event::Memory(MemoryAction::Recall)),
        1 => Just(Event::ToggleScientificPanel),
    ]
}

/// Expected numeral after typing `symbols` into a fresh engine.
fn expected_numeral(symbols: &[InputSymbol]) -> String {
    let mut text = String::from("0");
    for symbol in symbols {
        match symbol {
            InputSymbol::Point if text.contains('.') => {}
            InputSymbol::Point => text.push('.'),
            InputSymbol::Digit(d) => {
                let c = char::from(b'0' + d);
                if text == "0" {
                    text = c.to_string();
                } else if text.chars().filter(char::is_ascii_digit).count() < 12 {
                    text.push(c);
                }
            }
        }
    }
    text
}

proptest! {
    /// Accepted digits and points concatenate literally.
    #[test]
    fn prop_typing_concatenates(symbols in prop::collection::vec(symbol_strategy(), 0..30)) {
        let mut engine = CalculatorEngine::new();
        for symbol in &symbols {
            engine.input_digit_or_point(*symbol);
        }
        prop_assert_eq!(&engine.state().current_input, &expected_numeral(&symbols));
        prop_assert!(engine.state().check_invariants());
    }

    /// No event sequence breaks the state invariants.
    #[test]
    fn prop_invariants_hold(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut engine = CalculatorEngine::new();
        for event in events {
            engine.handle_event(event);
            prop_assert!(engine.state().check_invariants(), "{:?}", engine.state());
        }
    }

    /// After clear-all, typing behaves exactly as on a fresh engine.
    #[test]
    fn prop_clear_all_resets_input_behaviour(
        before in prop::collection::vec(event_strategy(), 0..40),
        symbols in prop::collection::vec(symbol_strategy(), 1..15),
    ) {
        let mut engine = CalculatorEngine::new();
        for event in before {
            engine.handle_event(event);
        }
        engine.clear_all();
        for symbol in &symbols {
            engine.input_digit_or_point(*symbol);
        }
        prop_assert_eq!(&engine.state().current_input, &expected_numeral(&symbols));
    }

    /// History never exceeds its capacity and keeps the newest entry first.
    #[test]
    fn prop_history_bounded(count in 0usize..40) {
        let mut history = History::new();
        for i in 0..count {
            history.push(HistoryEntry::new(i.to_string(), HistoryResult::Number(i as f64)));
        }
        prop_assert_eq!(history.len(), count.min(History::CAPACITY));
        if count > 0 {
            let expected = (count - 1).to_string();
            prop_assert_eq!(&history.get(0).unwrap().expression, &expected);
        }
    }
}
