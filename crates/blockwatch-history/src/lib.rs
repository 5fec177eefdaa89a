//! Bounded per-cell action history for a grid factory world.
//!
//! The tracker listens to world notifications (placements, breaks,
//! configuration changes, taps), keeps the most recent actions for each cell
//! in a fixed-capacity log, and answers queries about a cell or an actor.
//!
//! # Modules
//!
//! - [`log`] -- Fixed-capacity FIFO of action records
//! - [`store`] -- Mapping from cell key to its log
//! - [`link`] -- Link-state diffing for configuration events
//! - [`query`] -- Per-cell and per-actor history rendering
//! - [`registry`] -- Session set of actors in inspector mode
//! - [`inspector`] -- Event handlers and commands tying it together
//! - [`directory`] -- Actor display names and privilege lookups
//! - [`presenter`] -- Outbound messages and effects
//! - [`relative_time`] -- "3 minutes ago" style timestamps
//! - [`config`] -- YAML configuration with environment overrides
//! - [`error`] -- Error types

pub mod config;
pub mod directory;
pub mod error;
pub mod inspector;
pub mod link;
pub mod log;
pub mod presenter;
pub mod query;
pub mod registry;
pub mod relative_time;
pub mod store;

pub use config::{
    BlockwatchConfig, ConfigError, HistoryConfig, LoggingConfig, QueryConfig, WorldConfig,
};
pub use directory::{ActorDirectory, PlayerDirectory, PlayerInfo};
pub use error::HistoryError;
pub use inspector::Inspector;
pub use link::ConfigPlan;
pub use log::{BoundedLog, HistoryCapacity};
pub use presenter::Presenter;
pub use query::{HistoryRenderer, View};
pub use registry::InspectorRegistry;
pub use store::HistoryStore;
