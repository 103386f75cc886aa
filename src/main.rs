//! Calculator Engine CLI
//!
//! Replays a script of keys and button actions (one per line) through a
//! calculator session and prints the final screen as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --state-dir ~/.calculator keys.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` or `debug` to see notifications and ignored input
//! - `CALCULATOR_STATE_DIR`: Directory for persisted theme and history

use calculator_engine::{Config, FileStore, KeyValueStore, MemoryStore, Result, Session};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();
    let config = Config::parse();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    match &config.state_dir {
        Some(dir) => replay(config, FileStore::new(dir.clone())),
        None => replay(config, MemoryStore::new()),
    }
}

fn replay<S: KeyValueStore>(config: &Config, store: S) -> Result<()> {
    let file = File::open(&config.script)?;
    let reader = BufReader::new(file);

    let mut session = Session::open(store);
    session.process_script(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    session.write_output(handle)?;

    Ok(())
}
