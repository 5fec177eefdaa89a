//! Shared type definitions for the Blockwatch action history tracker.
//!
//! This crate is the single source of truth for the values that flow
//! between the event source, the world model, and the history core.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for actor identities
//! - [`cell`] -- Grid positions, packed cell keys, and relative offsets
//! - [`enums`] -- Structure families and block action kinds
//! - [`structs`] -- Structure descriptors, configuration payloads, link
//!   state, and history records
//! - [`events`] -- Inbound world notifications and chat commands

pub mod cell;
pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use cell::{CellKey, CellOffset, CellPos};
pub use enums::{BlockActionKind, StructureKind};
pub use events::{ChatCommand, WorldEvent};
pub use ids::ActorId;
pub use structs::{
    Action, ActionRecord, ConfigAction, ConfigValue, LinkState, LogicLink, StructureDescriptor,
};
