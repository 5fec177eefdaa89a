//! The actor identifier, a newtype around [`Uuid`].
//!
//! Actors are opaque to the tracker: the event source hands over a stable
//! identifier per player session and the tracker only compares, stores and
//! prints it. Display names are resolved elsewhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the player (session) responsible for an action.
///
/// Fresh ids are UUIDv7, so ids minted by [`ActorId::new`] sort roughly by
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Mint a new identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The inner [`Uuid`].
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ActorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        let a = ActorId::new();
        let b = ActorId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = ActorId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<ActorId, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn fresh_ids_are_version_seven() {
        assert_eq!(ActorId::new().into_inner().get_version_num(), 7);
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = ActorId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
