//! Line-delimited JSON wire format.
//!
//! Each input line is one [`Input`]; each output line is one [`Outbound`].
//!
//! ```text
//! {"event":{"type":"tap","actor":"...","cell":{"x":3,"y":4}}}
//! {"command":{"command":"toggle_inspector","actor":"..."}}
//! ```

use blockwatch_types::{ActorId, CellPos, ChatCommand, WorldEvent};
use serde::{Deserialize, Serialize};

/// One line read from the event source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    /// A world or session notification.
    Event(WorldEvent),
    /// A chat command.
    Command(ChatCommand),
}

/// One line written back to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound<'a> {
    /// A chat message for one actor.
    Message {
        /// Recipient.
        actor: ActorId,
        /// Message text; may span several lines.
        text: &'a str,
    },
    /// The block-placement effect, shown to one actor.
    Effect {
        /// Recipient.
        actor: ActorId,
        /// Where to show it.
        cell: CellPos,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_and_command_lines() {
        let actor = ActorId::new();
        let line = format!(r#"{{"event":{{"type":"tap","actor":"{actor}","cell":{{"x":3,"y":4}}}}}}"#);
        let parsed = serde_json::from_str::<Input>(&line).ok();
        assert_eq!(
            parsed,
            Some(Input::Event(WorldEvent::Tap {
                actor,
                cell: CellPos::new(3, 4),
            }))
        );

        let line = format!(r#"{{"command":{{"command":"toggle_inspector","actor":"{actor}"}}}}"#);
        let parsed = serde_json::from_str::<Input>(&line).ok();
        assert_eq!(parsed, Some(Input::Command(ChatCommand::ToggleInspector { actor })));
    }

    #[test]
    fn world_loaded_needs_no_fields() {
        let parsed = serde_json::from_str::<Input>(r#"{"event":{"type":"world_loaded"}}"#).ok();
        assert_eq!(parsed, Some(Input::Event(WorldEvent::WorldLoaded)));
    }

    #[test]
    fn outbound_is_tagged() {
        let actor = ActorId::new();
        let json = serde_json::to_value(Outbound::Message {
            actor,
            text: "Inspector mode enabled.",
        })
        .unwrap_or_default();
        assert_eq!(json["type"], "message");
        assert_eq!(json["text"], "Inspector mode enabled.");
    }
}
