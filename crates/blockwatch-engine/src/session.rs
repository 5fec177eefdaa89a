//! The engine's single owner of mutable state.
//!
//! A [`Session`] holds the mirrored world, the player directory, and the
//! tracker. Each input is applied to completion before the next one is
//! read, so the tracker's read-then-append sequences never interleave.

use std::sync::Arc;

use blockwatch_history::{BlockwatchConfig, Inspector, PlayerDirectory, Presenter};
use blockwatch_types::{CellPos, LinkState, StructureDescriptor, WorldEvent};
use blockwatch_world::{Building, Footprint, GridWorld};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::protocol::Input;

/// Mirrored world plus history tracker.
#[derive(Debug)]
pub struct Session {
    world: GridWorld,
    directory: PlayerDirectory,
    inspector: Inspector,
}

impl Session {
    /// Build a session from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the world dimensions or history limits are
    /// invalid.
    pub fn from_config(config: &BlockwatchConfig) -> Result<Self, EngineError> {
        let world = GridWorld::new(config.world.width, config.world.height)?;
        let inspector = Inspector::from_config(config)?;
        info!(
            width = world.width(),
            height = world.height(),
            history_limit = inspector.store().capacity().get(),
            "session ready"
        );
        Ok(Self {
            world,
            directory: PlayerDirectory::new(),
            inspector,
        })
    }

    /// Apply one input: update the mirror first, then let the tracker see
    /// the event against the updated world.
    pub fn apply<P>(&mut self, input: &Input, presenter: &mut P, now: DateTime<Utc>)
    where
        P: Presenter + ?Sized,
    {
        match input {
            Input::Event(event) => {
                self.mirror(event);
                self.inspector
                    .handle_event(event, &self.world, &self.directory, presenter, now);
            }
            Input::Command(command) => {
                self.inspector
                    .handle_command(command, &self.directory, presenter, now);
            }
        }
    }

    fn mirror(&mut self, event: &WorldEvent) {
        match event {
            WorldEvent::WorldLoaded => self.world.clear(),
            WorldEvent::PlayerJoin { actor, name, admin } => {
                debug!(%actor, name = name.as_str(), admin, "player joined");
                self.directory.register(*actor, name.as_str(), *admin);
            }
            WorldEvent::BuildEnd {
                cell,
                structure,
                breaking,
                links,
                ..
            } => {
                if *breaking {
                    self.world.remove(*cell);
                } else {
                    self.mirror_place(*cell, structure, links.as_ref());
                }
            }
            WorldEvent::Configure {
                cell,
                links: Some(links),
                ..
            } => {
                if let Err(error) = self.world.set_links(*cell, links.clone()) {
                    debug!(%error, "link update for unknown building ignored");
                }
            }
            WorldEvent::PlayerLeave { .. } | WorldEvent::Configure { .. } | WorldEvent::Tap { .. } => {}
        }
    }

    /// Place a building, replacing whatever its footprint overlaps, with
    /// the link state its placement configuration produced.
    fn mirror_place(
        &mut self,
        origin: CellPos,
        structure: &StructureDescriptor,
        links: Option<&LinkState>,
    ) {
        let covered: Vec<CellPos> = Footprint::of(origin, structure).cells().collect();
        for cell in covered {
            self.world.remove(cell);
        }
        let mut building = Building::new(origin, Arc::new(structure.clone()));
        if let Some(links) = links {
            building.links = links.clone();
        }
        if let Err(error) = self.world.place(building) {
            warn!(%error, %origin, structure = %structure.name, "placement not mirrored");
        }
    }

    /// The tracker.
    #[cfg(test)]
    pub const fn inspector(&self) -> &Inspector {
        &self.inspector
    }
}
