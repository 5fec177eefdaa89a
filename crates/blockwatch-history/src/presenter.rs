//! Delivery of inspection output back to actors.

use blockwatch_types::{ActorId, CellPos};

/// The presentation collaborator: whatever shows text and effects to a
/// player.
pub trait Presenter {
    /// Send a (possibly multi-line) chat message to `actor`.
    fn send_message(&mut self, actor: ActorId, message: &str);

    /// Show a placement effect at `cell`, visible to `actor` only, as the
    /// acknowledgment of an inspection tap.
    fn place_effect(&mut self, actor: ActorId, cell: CellPos);
}
