//! A calculator session: the engine plus the history, theme and storage that
//! surround it.
//!
//! The session is the headless stand-in for the calculator page. It routes
//! commands, applies the engine's effects, persists history and theme after
//! every change, and renders a [`Screen`] snapshot.

use crate::engine::{CalculatorEngine, Effect};
use crate::error::Result;
use crate::event::Command;
use crate::history::{History, HistoryResult};
use crate::numeral;
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "calculator-theme";

/// Storage key of the serialized history.
pub const HISTORY_KEY: &str = "calculator-history";

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    /// Parses a stored preference. Only `"night"` selects the night theme.
    pub fn from_stored(value: &str) -> Self {
        match value.trim() {
            "night" => Theme::Night,
            _ => Theme::Day,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the presentation layer shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    /// Current numeral with thousands separators.
    pub display: String,

    /// Raw current numeral.
    pub current_input: String,

    /// Pending operation, e.g. `"12 ×"`; empty when nothing is pending.
    pub operation: String,

    /// `"M = <value>"` while the memory register is non-zero.
    pub memory: Option<String>,

    /// `"Scientific Mode"` or `"Basic Mode"`.
    pub mode: &'static str,

    pub theme: Theme,

    /// `(expression, result)` pairs, newest first.
    pub history: Vec<(String, String)>,
}

/// Engine, history and theme bound to a store.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    engine: CalculatorEngine,
    history: History,
    theme: Theme,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Opens a session, restoring theme and history from `store`.
    ///
    /// Missing, unreadable or malformed data falls back to the defaults.
    pub fn open(store: S) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to load theme preference: {}", e);
                Theme::default()
            }
        };

        let history = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => History::from_json(&json).unwrap_or_else(|e| {
                warn!("Ignoring malformed saved history: {}", e);
                History::new()
            }),
            Ok(None) => History::new(),
            Err(e) => {
                warn!("Failed to load history: {}", e);
                History::new()
            }
        };

        debug!(
            "Session opened with {} theme and {} history entries",
            theme,
            history.len()
        );

        Session {
            engine: CalculatorEngine::new(),
            history,
            theme,
            store,
        }
    }

    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Executes one command and returns the effects it produced.
    pub fn execute(&mut self, command: Command) -> Vec<Effect> {
        let effects = match command {
            Command::Engine(event) => self.engine.handle_event(event),
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.save(THEME_KEY, self.theme.as_str().to_string());
                Vec::new()
            }
            Command::ClearHistory => {
                self.history.clear();
                self.save_history();
                vec![Effect::NotificationRaised("History cleared".to_string())]
            }
            Command::RecallHistory(index) => match self.history.get(index) {
                Some(entry) => match entry.result {
                    HistoryResult::Number(value) => {
                        self.engine.load_value(&numeral::from_value(value))
                    }
                    HistoryResult::Text(_) => Vec::new(),
                },
                None => {
                    debug!("No history entry at index {}", index);
                    Vec::new()
                }
            },
        };

        self.apply_effects(&effects);
        effects
    }

    /// Executes the command bound to a keyboard key. Unbound keys do nothing.
    pub fn handle_key(&mut self, key: &str) -> Vec<Effect> {
        match Command::from_key(key) {
            Some(command) => self.execute(command),
            None => {
                debug!("Ignoring unbound key {:?}", key);
                Vec::new()
            }
        }
    }

    /// Replays a script of key names and button actions, one per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Unknown tokens are
    /// logged at warn level and skipped.
    pub fn process_script<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let token = line.trim();
            let line_num = line_idx + 1;

            if token.is_empty() || token.starts_with('#') {
                continue;
            }

            match Command::parse(token) {
                Some(command) => {
                    self.execute(command);
                }
                None => warn!("Line {}: Unknown key or action '{}'", line_num, token),
            }
        }

        Ok(())
    }

    fn apply_effects(&mut self, effects: &[Effect]) {
        let mut history_changed = false;
        for effect in effects {
            match effect {
                Effect::HistoryAdded(entry) => {
                    self.history.push(entry.clone());
                    history_changed = true;
                }
                Effect::ErrorRaised(error) => warn!("{}", error),
                Effect::NotificationRaised(message) => info!("{}", message),
            }
        }
        if history_changed {
            self.save_history();
        }
    }

    fn save_history(&mut self) {
        match self.history.to_json() {
            Ok(json) => self.save(HISTORY_KEY, json),
            Err(e) => warn!("Failed to serialize history: {}", e),
        }
    }

    fn save(&mut self, key: &str, value: String) {
        if let Err(e) = self.store.set(key, &value) {
            warn!("Failed to save {}: {}", key, e);
        }
    }

    /// Snapshot of what the calculator shows right now.
    pub fn screen(&self) -> Screen {
        let state = self.engine.state();
        let operation = match state.pending_operator {
            Some(op) => format!("{} {}", state.previous_input, op),
            None => String::new(),
        };
        let memory = (!state.memory.is_zero()).then(|| format!("M = {}", state.memory));
        let mode = if state.scientific_panel_open {
            "Scientific Mode"
        } else {
            "Basic Mode"
        };

        Screen {
            display: state.display(),
            current_input: state.current_input.clone(),
            operation,
            memory,
            mode,
            theme: self.theme,
            history: self
                .history
                .iter()
                .map(|e| (e.expression.clone(), e.result.to_string()))
                .collect(),
        }
    }

    /// Writes the screen snapshot as pretty-printed JSON.
    pub fn write_output<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.screen())?;
        writeln!(writer)?;
        Ok(())
    }
}
