//! The tracker: event handlers, commands, and queries over one world's
//! history.
//!
//! An [`Inspector`] exclusively owns the [`HistoryStore`] and the
//! [`InspectorRegistry`]. It is driven by a single event stream and expects
//! run-to-completion handling: callers that share one across threads must
//! serialize every call behind one lock, because the duplicate-link check
//! reads the most recent record right before appending.
//!
//! No handler returns an error. Events naming empty or off-grid cells are
//! logged and dropped.

use std::sync::Arc;

use blockwatch_types::{
    ActionRecord, ActorId, BlockActionKind, CellPos, ChatCommand, ConfigAction, ConfigValue,
    StructureDescriptor, WorldEvent,
};
use blockwatch_world::{Building, Footprint, WorldView};
use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use crate::config::{BlockwatchConfig, QueryConfig};
use crate::directory::ActorDirectory;
use crate::error::HistoryError;
use crate::link::{self, ConfigPlan};
use crate::log::HistoryCapacity;
use crate::presenter::Presenter;
use crate::query::{self, HistoryRenderer};
use crate::registry::InspectorRegistry;
use crate::store::HistoryStore;

/// Reply to a tap on a cell with no history.
pub const NO_DATA_MESSAGE: &str = "No data for this cell";

/// Per-world action history tracker.
#[derive(Debug, Clone)]
pub struct Inspector {
    store: HistoryStore,
    inspectors: InspectorRegistry,
    query: QueryConfig,
}

impl Inspector {
    /// A tracker keeping `capacity` records per cell.
    pub const fn new(capacity: HistoryCapacity, query: QueryConfig) -> Self {
        Self {
            store: HistoryStore::new(capacity),
            inspectors: InspectorRegistry::new(),
            query,
        }
    }

    /// A tracker built from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] for a non-positive history
    /// limit and [`HistoryError::InvalidQueryLimits`] for zero query limits.
    pub fn from_config(config: &BlockwatchConfig) -> Result<Self, HistoryError> {
        let capacity = config.history.capacity()?;
        config.query.validate()?;
        Ok(Self::new(capacity, config.query))
    }

    /// The underlying history.
    pub const fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// The inspector-mode registry.
    pub const fn registry(&self) -> &InspectorRegistry {
        &self.inspectors
    }

    // -------------------------------------------------------------------
    // Event handlers
    // -------------------------------------------------------------------

    /// Dispatch one world notification.
    pub fn handle_event<W, D, P>(
        &mut self,
        event: &WorldEvent,
        world: &W,
        directory: &D,
        presenter: &mut P,
        now: DateTime<Utc>,
    ) where
        W: WorldView + ?Sized,
        D: ActorDirectory + ?Sized,
        P: Presenter + ?Sized,
    {
        match event {
            WorldEvent::WorldLoaded => self.on_world_loaded(),
            WorldEvent::PlayerJoin { actor, .. } => {
                trace!(%actor, "player joined");
            }
            WorldEvent::PlayerLeave { actor } => self.on_player_leave(*actor),
            WorldEvent::BuildEnd {
                cell,
                structure,
                actor,
                breaking,
                config,
                ..
            } => {
                let Some(actor) = actor else {
                    trace!(%cell, "build by non-player ignored");
                    return;
                };
                self.on_build_end(
                    world,
                    *cell,
                    Arc::new(structure.clone()),
                    *actor,
                    *breaking,
                    config,
                    now,
                );
            }
            WorldEvent::Configure {
                cell, actor, value, ..
            } => {
                let Some(actor) = actor else {
                    trace!(%cell, "configuration without player ignored");
                    return;
                };
                self.on_configure(world, *cell, *actor, value, now);
            }
            WorldEvent::Tap { actor, cell } => {
                self.on_tap(*actor, *cell, directory, presenter, now);
            }
        }
    }

    /// Forget everything: a new world was loaded.
    pub fn on_world_loaded(&mut self) {
        info!(
            cells = self.store.cell_count(),
            inspectors = self.inspectors.len(),
            "world loaded, history cleared"
        );
        self.store.reset();
        self.inspectors.clear_all();
    }

    /// Drop a disconnecting actor from inspector mode.
    pub fn on_player_leave(&mut self, actor: ActorId) {
        self.inspectors.clear(actor);
    }

    /// Record a finished build or break on every cell of the footprint.
    ///
    /// A placement that carried an initial configuration also runs the
    /// configuration pipeline.
    #[allow(clippy::too_many_arguments)]
    pub fn on_build_end<W>(
        &mut self,
        world: &W,
        cell: CellPos,
        structure: Arc<StructureDescriptor>,
        actor: ActorId,
        breaking: bool,
        config: &ConfigValue,
        now: DateTime<Utc>,
    ) where
        W: WorldView + ?Sized,
    {
        let kind = if breaking {
            BlockActionKind::Break
        } else {
            BlockActionKind::Place
        };
        trace!(%cell, %actor, structure = %structure.name, ?kind, "build finished");
        let footprint = Footprint::of(cell, &structure);
        let record = ActionRecord::block(actor, now, structure, kind);
        self.record_footprint(world, footprint, &record);

        if !breaking && !config.is_none() {
            self.on_configure(world, cell, actor, config, now);
        }
    }

    /// Record a configuration change, diffing link payloads against the
    /// live world.
    pub fn on_configure<W>(
        &mut self,
        world: &W,
        cell: CellPos,
        actor: ActorId,
        value: &ConfigValue,
        now: DateTime<Utc>,
    ) where
        W: WorldView + ?Sized,
    {
        let Some(building) = world.building_at(cell) else {
            debug!(%cell, %actor, "configuration on empty cell ignored");
            return;
        };
        match link::plan(building.kind(), building.origin, value) {
            ConfigPlan::Plain => {
                let change = ConfigAction {
                    value: value.clone(),
                    is_link_change: false,
                    connected: false,
                };
                self.record_config(world, building, actor, change, now);
            }
            ConfigPlan::Links(targets) => {
                for target in targets {
                    let connected = link::is_connected(world, building, target);
                    let last = self.store.last(building.origin.pack());
                    if link::is_redundant(last, actor, connected) {
                        debug!(
                            origin = %building.origin,
                            target = %target.unpack(),
                            connected,
                            "repeated link state suppressed"
                        );
                        continue;
                    }
                    let change = ConfigAction {
                        value: ConfigValue::Number(target.0),
                        is_link_change: true,
                        connected,
                    };
                    self.record_config(world, building, actor, change, now);
                }
            }
        }
    }

    /// Answer a tap from an actor in inspector mode with the cell's history.
    pub fn on_tap<D, P>(
        &self,
        actor: ActorId,
        cell: CellPos,
        directory: &D,
        presenter: &mut P,
        now: DateTime<Utc>,
    ) where
        D: ActorDirectory + ?Sized,
        P: Presenter + ?Sized,
    {
        if !self.inspectors.is_enabled(actor) {
            return;
        }
        presenter.place_effect(actor, cell);

        let lines = self.query_cell(cell, directory, directory.is_admin(actor), now);
        if lines.is_empty() {
            presenter.send_message(actor, NO_DATA_MESSAGE);
            return;
        }
        let mut message = format!("History of cell {cell}");
        for line in lines {
            message.push('\n');
            message.push_str(&line);
        }
        presenter.send_message(actor, &message);
    }

    // -------------------------------------------------------------------
    // Commands and queries
    // -------------------------------------------------------------------

    /// Dispatch one chat command, replying through `presenter`.
    pub fn handle_command<D, P>(
        &mut self,
        command: &ChatCommand,
        directory: &D,
        presenter: &mut P,
        now: DateTime<Utc>,
    ) where
        D: ActorDirectory + ?Sized,
        P: Presenter + ?Sized,
    {
        match command {
            ChatCommand::ToggleInspector { actor } => {
                let reply = if self.toggle_inspector_mode(*actor) {
                    "Inspector mode enabled."
                } else {
                    "Inspector mode disabled."
                };
                presenter.send_message(*actor, reply);
            }
            ChatCommand::Inspect {
                caller,
                target,
                limit,
            } => {
                let lines =
                    self.query_actor(*target, *limit, directory, directory.is_admin(*caller), now);
                let mut message = match directory.display_name(*target) {
                    Some(name) => format!("History of actor ({name})"),
                    None => format!("History of actor ({target})"),
                };
                for line in lines {
                    message.push('\n');
                    message.push_str(&line);
                }
                presenter.send_message(*caller, &message);
            }
        }
    }

    /// Flip inspector mode for `actor`, returning whether it is now enabled.
    pub fn toggle_inspector_mode(&mut self, actor: ActorId) -> bool {
        let enabled = self.inspectors.toggle(actor);
        debug!(%actor, enabled, "inspector mode toggled");
        enabled
    }

    /// The rendered history of `cell`, most recent first. Empty means no
    /// data.
    pub fn query_cell<D>(
        &self,
        cell: CellPos,
        directory: &D,
        privileged: bool,
        now: DateTime<Utc>,
    ) -> Vec<String>
    where
        D: ActorDirectory + ?Sized,
    {
        if self.store.is_empty(cell.pack()) {
            return Vec::new();
        }
        let renderer = HistoryRenderer::new(directory, privileged, now);
        query::query_cell(&self.store, cell, &renderer)
    }

    /// The rendered history of `actor` across all cells, most recent first.
    ///
    /// `limit` defaults and is clamped per the query configuration.
    pub fn query_actor<D>(
        &self,
        actor: ActorId,
        limit: Option<u32>,
        directory: &D,
        privileged: bool,
        now: DateTime<Utc>,
    ) -> Vec<String>
    where
        D: ActorDirectory + ?Sized,
    {
        let renderer = HistoryRenderer::new(directory, privileged, now);
        query::query_actor(&self.store, actor, self.query.clamp(limit), &renderer)
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn record_config<W>(
        &mut self,
        world: &W,
        building: &Building,
        actor: ActorId,
        change: ConfigAction,
        now: DateTime<Utc>,
    ) where
        W: WorldView + ?Sized,
    {
        let footprint = Footprint::of(building.origin, &building.structure);
        let record = ActionRecord::config(actor, now, Arc::clone(&building.structure), change);
        self.record_footprint(world, footprint, &record);
    }

    fn record_footprint<W>(&mut self, world: &W, footprint: Footprint, record: &ActionRecord)
    where
        W: WorldView + ?Sized,
    {
        let store = &mut self.store;
        footprint.resolve(world, |cell, is_virtual| {
            trace!(%cell, is_virtual, author = %record.author, "record appended");
            store.append(cell.pack(), record.propagated(is_virtual));
        });
    }
}
