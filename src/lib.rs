//! # Calculator Engine
//!
//! A headless calculator: digits, operators and functions arrive as discrete
//! events and are folded into a running state that always holds a valid
//! numeral to display.
//!
//! ## Design Principles
//!
//! - **Pure state machine**: [`CalculatorEngine`] only mutates its
//!   [`EngineState`] and reports [`Effect`]s; rendering and storage live in
//!   [`Session`]
//! - **Validated operands**: operand text is parsed explicitly before use
//! - **Stable results**: binary results are rounded to 8 decimal places
//! - **Recoverable errors**: domain errors become effects, never failures
//!
//! ## Example
//!
//! ```
//! use calculator_engine::{BinaryOperator, CalculatorEngine, Event, InputSymbol};
//!
//! let mut engine = CalculatorEngine::new();
//! engine.handle_event(Event::Input(InputSymbol::Digit(7)));
//! engine.handle_event(Event::Operator(BinaryOperator::Multiply));
//! engine.handle_event(Event::Input(InputSymbol::Digit(6)));
//! engine.handle_event(Event::Equals);
//! assert_eq!(engine.state().current_input, "42");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod memory;
pub mod numeral;
pub mod operation;
pub mod session;
pub mod store;

pub use config::Config;
pub use engine::{handle_event, CalculatorEngine, Effect, EngineState};
pub use error::{DomainError, EngineError, Result};
pub use event::{Command, Event, InputSymbol, MemoryAction};
pub use history::{History, HistoryEntry, HistoryResult};
pub use memory::MemoryRegister;
pub use operation::{BinaryOperator, UnaryFunction};
pub use session::{Screen, Session, Theme};
pub use store::{FileStore, KeyValueStore, MemoryStore};
