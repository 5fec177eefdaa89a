//! Per-actor inspector mode.
//!
//! Actors in inspector mode get the history of every cell they tap. The set
//! is cleared per actor on disconnect and entirely on world reset.

use std::collections::BTreeSet;

use blockwatch_types::ActorId;

/// Set of actors currently in inspector mode.
#[derive(Debug, Clone, Default)]
pub struct InspectorRegistry {
    enabled: BTreeSet<ActorId>,
}

impl InspectorRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    /// Flip inspector mode for `actor`, returning whether it is now enabled.
    pub fn toggle(&mut self, actor: ActorId) -> bool {
        if self.enabled.insert(actor) {
            true
        } else {
            self.enabled.remove(&actor);
            false
        }
    }

    /// Whether `actor` is in inspector mode.
    pub fn is_enabled(&self, actor: ActorId) -> bool {
        self.enabled.contains(&actor)
    }

    /// Drop `actor` from inspector mode.
    pub fn clear(&mut self, actor: ActorId) {
        self.enabled.remove(&actor);
    }

    /// Drop every actor.
    pub fn clear_all(&mut self) {
        self.enabled.clear();
    }

    /// Number of actors in inspector mode.
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Whether nobody is in inspector mode.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates() {
        let mut registry = InspectorRegistry::new();
        let actor = ActorId::new();
        assert!(registry.toggle(actor));
        assert!(registry.is_enabled(actor));
        assert!(!registry.toggle(actor));
        assert!(!registry.is_enabled(actor));
        assert!(registry.toggle(actor));
    }

    #[test]
    fn clear_is_per_actor() {
        let mut registry = InspectorRegistry::new();
        let a = ActorId::new();
        let b = ActorId::new();
        registry.toggle(a);
        registry.toggle(b);
        registry.clear(a);
        assert!(!registry.is_enabled(a));
        assert!(registry.is_enabled(b));
        assert_eq!(registry.len(), 1);

        registry.clear_all();
        assert!(registry.is_empty());
    }
}
