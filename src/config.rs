//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the state directory.
pub const STATE_DIR_ENV: &str = "CALCULATOR_STATE_DIR";

/// Replays a script of calculator keys and prints the final screen as JSON
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "calculator-engine")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Script of keys and actions to replay, one per line
    pub script: PathBuf,

    /// Directory where theme and history are persisted (in memory if unset)
    #[arg(long, value_name = "DIR", env = STATE_DIR_ENV)]
    pub state_dir: Option<PathBuf>,
}
