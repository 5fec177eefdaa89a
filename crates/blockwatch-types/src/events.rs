//! Inbound notifications from the event source and commands from the chat
//! front end.
//!
//! Both are serialized as internally tagged JSON objects so an external
//! adapter can stream them to the engine one per line.

use serde::{Deserialize, Serialize};

use crate::cell::CellPos;
use crate::ids::ActorId;
use crate::structs::{ConfigValue, LinkState, StructureDescriptor};

/// A world-mutation or session notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEvent {
    /// A new world was loaded; all history belongs to the old one.
    WorldLoaded,
    /// A player connected.
    PlayerJoin {
        /// Session identity.
        actor: ActorId,
        /// Display name.
        name: String,
        /// Whether the player may see raw actor identifiers.
        #[serde(default)]
        admin: bool,
    },
    /// A player disconnected.
    PlayerLeave {
        /// Session identity.
        actor: ActorId,
    },
    /// Construction or deconstruction finished.
    BuildEnd {
        /// Origin cell of the structure.
        cell: CellPos,
        /// The structure built, or the one that was removed.
        structure: StructureDescriptor,
        /// The acting player; `None` for non-player builders.
        #[serde(default)]
        actor: Option<ActorId>,
        /// True for deconstruction.
        #[serde(default)]
        breaking: bool,
        /// Configuration applied as part of placement.
        #[serde(default)]
        config: ConfigValue,
        /// Link state the placement configuration produced, when the
        /// source reports it.
        #[serde(default)]
        links: Option<LinkState>,
    },
    /// A structure's configuration changed.
    Configure {
        /// Any cell of the configured structure.
        cell: CellPos,
        /// The acting player; `None` for automated configuration.
        #[serde(default)]
        actor: Option<ActorId>,
        /// The payload as sent.
        #[serde(default)]
        value: ConfigValue,
        /// Link state of the structure after the change, when the source
        /// reports it.
        #[serde(default)]
        links: Option<LinkState>,
    },
    /// A player tapped a cell.
    Tap {
        /// Who tapped.
        actor: ActorId,
        /// The tapped cell.
        cell: CellPos,
    },
}

/// A command issued from the chat front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ChatCommand {
    /// Toggle live cell inspection for the caller.
    ToggleInspector {
        /// The caller.
        actor: ActorId,
    },
    /// List the recent actions of another player.
    Inspect {
        /// The caller, who receives the reply.
        caller: ActorId,
        /// The player whose history is requested.
        target: ActorId,
        /// Maximum number of lines; clamped by the tracker.
        #[serde(default)]
        limit: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::StructureKind;

    #[test]
    fn build_end_defaults() {
        let json = r#"{
            "type": "build_end",
            "cell": {"x": 4, "y": 9},
            "structure": {"name": "power-node"}
        }"#;
        let event: Result<WorldEvent, _> = serde_json::from_str(json);
        assert!(matches!(
            event.ok(),
            Some(WorldEvent::BuildEnd {
                cell,
                structure,
                actor: None,
                breaking: false,
                config: ConfigValue::None,
                links: None,
            }) if cell == CellPos::new(4, 9)
                && structure.kind == StructureKind::PowerNode
                && structure.size == 1
        ));
    }

    #[test]
    fn configure_with_links() {
        let json = r#"{
            "type": "configure",
            "cell": {"x": 1, "y": 1},
            "actor": "6f1c6c1e-6d0e-4b3a-9a52-3d4c7f0e9b11",
            "value": {"type": "number", "value": 65538},
            "links": {"type": "power", "links": [{"x": 1, "y": 2}]}
        }"#;
        let event: Result<WorldEvent, _> = serde_json::from_str(json);
        assert!(matches!(
            event.ok(),
            Some(WorldEvent::Configure {
                value: ConfigValue::Number(65538),
                links: Some(LinkState::Power(_)),
                ..
            })
        ));
    }

    #[test]
    fn inspect_command_limit_optional() {
        let json = r#"{
            "command": "inspect",
            "caller": "6f1c6c1e-6d0e-4b3a-9a52-3d4c7f0e9b11",
            "target": "0d7a3bb0-5b33-4c70-8c62-0b0f1b3c2a77"
        }"#;
        let command: Result<ChatCommand, _> = serde_json::from_str(json);
        assert!(matches!(
            command.ok(),
            Some(ChatCommand::Inspect { limit: None, .. })
        ));
    }
}
