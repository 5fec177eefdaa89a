//! Resolution of actor identifiers to display names.

use std::collections::BTreeMap;

use blockwatch_types::ActorId;

/// The actor/session registry the tracker renders names from.
pub trait ActorDirectory {
    /// Last known display name of `actor`.
    fn display_name(&self, actor: ActorId) -> Option<&str>;

    /// Whether `actor` may see raw actor identifiers.
    fn is_admin(&self, actor: ActorId) -> bool;
}

/// What the directory remembers about a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Last display name seen.
    pub name: String,
    /// Admin flag at last join.
    pub admin: bool,
}

/// In-memory [`ActorDirectory`] fed by join notifications.
///
/// Names outlive disconnects so history stays readable after a player
/// leaves.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    players: BTreeMap<ActorId, PlayerInfo>,
}

impl PlayerDirectory {
    /// An empty directory.
    pub const fn new() -> Self {
        Self {
            players: BTreeMap::new(),
        }
    }

    /// Remember (or refresh) a player.
    pub fn register(&mut self, actor: ActorId, name: impl Into<String>, admin: bool) {
        self.players.insert(
            actor,
            PlayerInfo {
                name: name.into(),
                admin,
            },
        );
    }

    /// Everything known about `actor`.
    pub fn get(&self, actor: ActorId) -> Option<&PlayerInfo> {
        self.players.get(&actor)
    }
}

impl ActorDirectory for PlayerDirectory {
    fn display_name(&self, actor: ActorId) -> Option<&str> {
        self.players.get(&actor).map(|info| info.name.as_str())
    }

    fn is_admin(&self, actor: ActorId) -> bool {
        self.players.get(&actor).is_some_and(|info| info.admin)
    }
}
