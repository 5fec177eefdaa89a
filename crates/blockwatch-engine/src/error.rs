//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the input
//! loop so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: blockwatch_history::ConfigError,
    },

    /// The tracker could not be built from configuration.
    #[error("history error: {source}")]
    History {
        /// The underlying history error.
        #[from]
        source: blockwatch_history::HistoryError,
    },

    /// The world mirror could not be created.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: blockwatch_world::WorldError,
    },

    /// Reading the input stream failed.
    #[error("input error: {source}")]
    Input {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The input reader task panicked or was cancelled.
    #[error("input reader stopped: {message}")]
    Reader {
        /// Description of the join failure.
        message: String,
    },
}
