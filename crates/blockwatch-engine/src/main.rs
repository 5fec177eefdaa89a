//! Engine binary for Blockwatch.
//!
//! Reads world notifications and chat commands as JSON lines on stdin,
//! keeps a mirror of the world and the per-cell history, and writes chat
//! replies and effects as JSON lines on stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `blockwatch-config.yaml` (or `BLOCKWATCH_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the session (world mirror, player directory, tracker)
//! 4. Spawn the stdin reader task
//! 5. Apply inputs one at a time until the stream ends

mod error;
mod presenter;
mod protocol;
mod session;

use std::path::PathBuf;

use blockwatch_history::{BlockwatchConfig, LoggingConfig};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::presenter::JsonLinePresenter;
use crate::protocol::Input;
use crate::session::Session;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "BLOCKWATCH_CONFIG";

/// Configuration file used when `BLOCKWATCH_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "blockwatch-config.yaml";

/// Inputs buffered between the reader task and the session.
const INPUT_BUFFER: usize = 1024;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration is invalid or stdin cannot be read.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so this comes first.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        width = config.world.width,
        height = config.world.height,
        history_limit = config.history.limit,
        "blockwatch-engine starting"
    );

    // 3. Build the session.
    let mut session = Session::from_config(&config)?;

    // 4. Spawn the reader.
    let (tx, mut rx) = mpsc::channel::<Input>(INPUT_BUFFER);
    let reader = tokio::spawn(read_inputs(tx));

    // 5. Apply inputs until the reader hangs up.
    let mut presenter = JsonLinePresenter::new(std::io::stdout());
    let mut applied: u64 = 0;
    while let Some(input) = rx.recv().await {
        session.apply(&input, &mut presenter, Utc::now());
        applied = applied.saturating_add(1);
    }

    reader.await.map_err(|e| EngineError::Reader {
        message: format!("{e}"),
    })??;

    info!(applied, "blockwatch-engine shutdown complete");
    Ok(())
}

/// Load configuration from `BLOCKWATCH_CONFIG` or the default path.
///
/// A missing file means defaults, with environment overrides still applied.
fn load_config() -> Result<BlockwatchConfig, EngineError> {
    let config_path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = if config_path.exists() {
        BlockwatchConfig::from_file(&config_path)?
    } else {
        let mut config = BlockwatchConfig::default();
        config.history.apply_env_overrides();
        config
    };
    config.validate()?;
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Forward parsed stdin lines to the session until EOF.
///
/// Malformed lines are logged and skipped.
async fn read_inputs(tx: mpsc::Sender<Input>) -> Result<(), EngineError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Input>(line) {
            Ok(input) => {
                if tx.send(input).await.is_err() {
                    break;
                }
            }
            Err(error) => warn!(%error, "malformed input line skipped"),
        }
    }
    Ok(())
}
