//! Core calculator state machine.
//!
//! Folds input events into an [`EngineState`] one at a time and reports what
//! happened as a list of [`Effect`]s. The engine never renders or persists
//! anything itself; the session layer consumes the effects.

use crate::error::DomainError;
use crate::event::{Event, InputSymbol, MemoryAction};
use crate::history::{HistoryEntry, HistoryResult};
use crate::memory::MemoryRegister;
use crate::numeral::{self, ERROR_TEXT};
use crate::operation::{BinaryOperator, UnaryFunction};
use log::{debug, warn};

/// Side effect emitted while processing an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A computation completed and should be recorded.
    HistoryAdded(HistoryEntry),

    /// A recoverable domain error the user should be told about.
    ErrorRaised(DomainError),

    /// An informational message ("All cleared").
    NotificationRaised(String),
}

/// Running calculator state.
///
/// # Invariants
///
/// - `current_input` is a valid numeral (see [`numeral::is_valid`]) or
///   exactly [`ERROR_TEXT`]
/// - `decimal_point_entered` is `true` iff `current_input` contains a `.`
/// - `pending_operator` is only set while `previous_input` is non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Numeral being typed or displayed.
    pub current_input: String,

    /// Left operand held while an operator is pending.
    pub previous_input: String,

    pub pending_operator: Option<BinaryOperator>,

    /// The next digit starts a new numeral instead of extending this one.
    pub awaiting_fresh_input: bool,

    pub decimal_point_entered: bool,

    /// M+/M−/MR accumulator. Survives `clear_all`.
    pub memory: MemoryRegister,

    pub scientific_panel_open: bool,
}

impl EngineState {
    /// Initial state: display shows `"0"`, nothing pending.
    pub fn new() -> Self {
        EngineState {
            current_input: "0".to_string(),
            previous_input: String::new(),
            pending_operator: None,
            awaiting_fresh_input: false,
            decimal_point_entered: false,
            memory: MemoryRegister::ZERO,
            scientific_panel_open: false,
        }
    }

    /// Returns `true` while the display shows [`ERROR_TEXT`].
    pub fn is_error(&self) -> bool {
        self.current_input == ERROR_TEXT
    }

    /// Display text: the current numeral with thousands separators.
    pub fn display(&self) -> String {
        numeral::group_thousands(&self.current_input)
    }

    /// Verifies the invariants listed on the type.
    pub fn check_invariants(&self) -> bool {
        let well_formed = self.is_error() || numeral::is_valid(&self.current_input);
        let points = self.current_input.matches('.').count();
        let operand_held = self.pending_operator.is_none() || !self.previous_input.is_empty();

        well_formed && self.decimal_point_entered == (points == 1) && operand_held
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Processes one event against `state`, returning the next state and the
/// effects it produced.
pub fn handle_event(state: EngineState, event: Event) -> (EngineState, Vec<Effect>) {
    let mut engine = CalculatorEngine::from_state(state);
    let effects = engine.handle_event(event);
    (engine.into_state(), effects)
}

/// The calculator engine.
///
/// Owns a single [`EngineState`] and mutates it in place. Every operation
/// completes immediately; events are expected to arrive one after another.
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    state: EngineState,
}

impl CalculatorEngine {
    /// Creates an engine in the initial state.
    pub fn new() -> Self {
        CalculatorEngine {
            state: EngineState::new(),
        }
    }

    /// Resumes from an existing state.
    pub fn from_state(state: EngineState) -> Self {
        CalculatorEngine { state }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }

    /// Dispatches an event to the matching operation.
    pub fn handle_event(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Input(symbol) => self.input_digit_or_point(symbol),
            Event::Operator(op) => self.apply_binary_operator(op),
            Event::Equals => self.resolve(),
            Event::Unary(function) => self.apply_unary(function),
            Event::Backspace => self.backspace(),
            Event::ClearAll => self.clear_all(),
            Event::ClearEntry => self.clear_entry(),
            Event::Memory(MemoryAction::Add) => self.memory_add(),
            Event::Memory(MemoryAction::Subtract) => self.memory_subtract(),
            Event::Memory(MemoryAction::Recall) => self.memory_recall(),
            Event::Memory(MemoryAction::Clear) => self.memory_clear(),
            Event::ToggleScientificPanel => self.toggle_scientific_panel(),
        }
    }

    /// Types a digit or the decimal point.
    ///
    /// Ignored without an error: a second point, and digits beyond
    /// [`numeral::MAX_DIGITS`].
    pub fn input_digit_or_point(&mut self, symbol: InputSymbol) -> Vec<Effect> {
        let Some(c) = symbol.to_char() else {
            debug!("Ignoring invalid input symbol {:?}", symbol);
            return Vec::new();
        };
        let state = &mut self.state;

        if state.awaiting_fresh_input {
            state.current_input = match symbol {
                InputSymbol::Point => "0.".to_string(),
                InputSymbol::Digit(_) => c.to_string(),
            };
            state.decimal_point_entered = symbol == InputSymbol::Point;
            state.awaiting_fresh_input = false;
            return Vec::new();
        }

        match symbol {
            InputSymbol::Point => {
                if state.decimal_point_entered {
                    debug!("Ignoring second decimal point in {}", state.current_input);
                } else {
                    state.current_input.push('.');
                    state.decimal_point_entered = true;
                }
            }
            InputSymbol::Digit(_) => {
                if state.current_input == "0" {
                    state.current_input = c.to_string();
                } else if numeral::digit_count(&state.current_input) >= numeral::MAX_DIGITS {
                    debug!("Ignoring digit beyond {} digits", numeral::MAX_DIGITS);
                } else {
                    state.current_input.push(c);
                }
            }
        }

        Vec::new()
    }

    /// Selects a binary operator.
    ///
    /// With an operator already pending, the pending computation is resolved
    /// first and its result becomes the left operand. This also holds when no
    /// second operand was typed: `6 + *` resolves `6 + 6`.
    pub fn apply_binary_operator(&mut self, op: BinaryOperator) -> Vec<Effect> {
        if self.state.is_error() {
            debug!("Ignoring operator {} while the display shows an error", op);
            return Vec::new();
        }

        let mut effects = Vec::new();
        match self.state.pending_operator {
            Some(_) => {
                effects = self.compute_pending();
                if self.state.is_error() {
                    return effects;
                }
                self.state.previous_input = self.state.current_input.clone();
            }
            None => {
                self.state.previous_input = self.state.current_input.clone();
            }
        }

        self.state.pending_operator = Some(op);
        self.state.awaiting_fresh_input = true;
        effects
    }

    /// Resolves `previous_input op current_input` (the `=` key).
    ///
    /// Does nothing when no operator is pending.
    pub fn resolve(&mut self) -> Vec<Effect> {
        if self.state.pending_operator.is_none() || self.state.previous_input.is_empty() {
            debug!("Nothing to resolve");
            return Vec::new();
        }

        let effects = self.compute_pending();
        if !self.state.is_error() {
            self.state.previous_input.clear();
            self.state.pending_operator = None;
            self.state.awaiting_fresh_input = true;
        }
        effects
    }

    /// Computes the pending operation into `current_input`.
    ///
    /// On failure the display switches to [`ERROR_TEXT`] and the pending
    /// operation is dropped.
    fn compute_pending(&mut self) -> Vec<Effect> {
        let Some(op) = self.state.pending_operator else {
            return Vec::new();
        };
        let previous = &self.state.previous_input;
        let current = &self.state.current_input;
        let expression = format!("{} {} {}", previous, op.symbol(), current);

        let (Some(lhs), Some(rhs)) = (
            numeral::parse_operand(previous),
            numeral::parse_operand(current),
        ) else {
            warn!("Cannot resolve '{}': operand is not a number", expression);
            return Vec::new();
        };

        match op.apply(lhs, rhs) {
            Ok(value) => {
                let value = numeral::round_result(value);
                self.set_current(numeral::from_value(value));
                debug!("{} = {}", expression, self.state.current_input);
                vec![Effect::HistoryAdded(HistoryEntry::new(
                    expression,
                    HistoryResult::Number(value),
                ))]
            }
            Err(error) => {
                self.state.current_input = ERROR_TEXT.to_string();
                self.state.decimal_point_entered = false;
                self.state.previous_input.clear();
                self.state.pending_operator = None;
                self.state.awaiting_fresh_input = true;
                vec![
                    Effect::ErrorRaised(error),
                    Effect::HistoryAdded(HistoryEntry::new(
                        expression,
                        HistoryResult::Text(ERROR_TEXT.to_string()),
                    )),
                ]
            }
        }
    }

    /// Applies a unary function to the displayed value, or enters a constant.
    ///
    /// A domain error leaves the display untouched.
    pub fn apply_unary(&mut self, function: UnaryFunction) -> Vec<Effect> {
        let original = self.state.current_input.clone();

        let outcome = match (function.constant(), numeral::parse_operand(&original)) {
            (Some(value), _) => Ok(value),
            (None, Some(operand)) => function.apply(operand),
            (None, None) => {
                debug!("Ignoring {} on non-numeric display '{}'", function, original);
                return Vec::new();
            }
        };

        let value = match outcome {
            Ok(value) => value,
            Err(error) => return vec![Effect::ErrorRaised(error)],
        };

        self.set_current(numeral::from_value(value));
        if function.is_scientific() {
            self.state.scientific_panel_open = false;
        }

        let expression = match function.constant() {
            Some(_) => function.symbol().to_string(),
            None => format!("{}({})", function.symbol(), original),
        };
        vec![Effect::HistoryAdded(HistoryEntry::new(
            expression,
            HistoryResult::Number(value),
        ))]
    }

    /// Deletes the last character; an emptied display shows `"0"`.
    pub fn backspace(&mut self) -> Vec<Effect> {
        let state = &mut self.state;
        if state.is_error() {
            state.current_input = "0".to_string();
            state.decimal_point_entered = false;
            return Vec::new();
        }

        if state.current_input.pop() == Some('.') {
            state.decimal_point_entered = false;
        }
        if state.current_input.is_empty() || state.current_input == "-" {
            state.current_input = "0".to_string();
        }
        Vec::new()
    }

    /// Resets everything except the memory register.
    pub fn clear_all(&mut self) -> Vec<Effect> {
        let memory = self.state.memory;
        self.state = EngineState {
            memory,
            ..EngineState::new()
        };
        vec![Effect::NotificationRaised("All cleared".to_string())]
    }

    /// Resets only the numeral being typed.
    pub fn clear_entry(&mut self) -> Vec<Effect> {
        self.state.current_input = "0".to_string();
        self.state.decimal_point_entered = false;
        vec![Effect::NotificationRaised("Entry cleared".to_string())]
    }

    pub fn memory_add(&mut self) -> Vec<Effect> {
        self.update_memory(MemoryRegister::add)
    }

    pub fn memory_subtract(&mut self) -> Vec<Effect> {
        self.update_memory(MemoryRegister::subtract)
    }

    fn update_memory(
        &mut self,
        update: fn(&mut MemoryRegister, &str) -> Result<(), DomainError>,
    ) -> Vec<Effect> {
        if self.state.is_error() {
            debug!("Ignoring memory update while the display shows an error");
            return Vec::new();
        }

        match update(&mut self.state.memory, &self.state.current_input) {
            Ok(()) => {
                debug!("Memory is now {}", self.state.memory);
                Vec::new()
            }
            Err(error) => vec![Effect::ErrorRaised(error)],
        }
    }

    /// Copies the memory register into the display.
    pub fn memory_recall(&mut self) -> Vec<Effect> {
        self.set_current(self.state.memory.to_string());
        Vec::new()
    }

    pub fn memory_clear(&mut self) -> Vec<Effect> {
        self.state.memory.clear();
        Vec::new()
    }

    pub fn toggle_scientific_panel(&mut self) -> Vec<Effect> {
        self.state.scientific_panel_open = !self.state.scientific_panel_open;
        Vec::new()
    }

    /// Replaces the display with a numeral recalled from elsewhere (history).
    ///
    /// Text that is not a numeral is ignored.
    pub fn load_value(&mut self, text: &str) -> Vec<Effect> {
        if !numeral::is_valid(text) {
            debug!("Ignoring recall of non-numeric value '{}'", text);
            return Vec::new();
        }
        self.set_current(text.to_string());
        Vec::new()
    }

    fn set_current(&mut self, text: String) {
        self.state.decimal_point_entered = text.contains('.');
        self.state.current_input = text;
    }
}
