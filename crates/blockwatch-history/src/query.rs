//! Per-cell and per-actor history views.
//!
//! Both views render one plain-text line per record:
//!
//! ```text
//! > <name> [(<x>,<y>)] [(<actor id>)] <what happened> <when>
//! ```
//!
//! Coordinates only appear in the per-actor view, since a per-cell reader
//! already knows the cell. The raw actor identifier only appears for
//! privileged callers. Colour markup is left to the presenter.

use blockwatch_types::{Action, ActionRecord, ActorId, CellPos, ConfigAction, StructureKind};
use chrono::{DateTime, Utc};

use crate::directory::ActorDirectory;
use crate::relative_time;
use crate::store::HistoryStore;

/// Which view a line is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// History of one cell; coordinates are implied.
    Cell,
    /// History of one actor across cells; coordinates are shown.
    Actor,
}

/// Renders [`ActionRecord`]s into history lines.
#[derive(Debug)]
pub struct HistoryRenderer<'a, D: ?Sized> {
    directory: &'a D,
    privileged: bool,
    now: DateTime<Utc>,
}

impl<'a, D> HistoryRenderer<'a, D>
where
    D: ActorDirectory + ?Sized,
{
    /// A renderer resolving names through `directory`, showing raw actor ids
    /// when `privileged`, and measuring ages against `now`.
    pub const fn new(directory: &'a D, privileged: bool, now: DateTime<Utc>) -> Self {
        Self {
            directory,
            privileged,
            now,
        }
    }

    /// Render `record`, stored against `cell`, for `view`.
    pub fn line(&self, record: &ActionRecord, cell: CellPos, view: View) -> String {
        let mut line = match self.directory.display_name(record.author) {
            Some(name) => format!("> {name}"),
            None => format!("> {}", record.author),
        };
        if view == View::Actor {
            line.push_str(&format!(" {cell}"));
        }
        if self.privileged {
            line.push_str(&format!(" ({})", record.author));
        }
        line.push(' ');
        line.push_str(&describe(record, cell));
        line.push(' ');
        line.push_str(&relative_time::relative(record.timestamp, self.now));
        line
    }
}

/// What happened, without who or when.
pub fn describe(record: &ActionRecord, cell: CellPos) -> String {
    match &record.action {
        Action::Block { kind } => format!("{} {}", kind.verb(), record.structure.name),
        Action::Config(config) => describe_config(record, config, cell),
    }
}

fn describe_config(record: &ActionRecord, config: &ConfigAction, cell: CellPos) -> String {
    if let Some(target) = config.link_target() {
        return if config.connected {
            format!("connected to {}", target.unpack())
        } else if target.is_sentinel() || target == cell.pack() {
            String::from("disconnected this cell")
        } else {
            format!("disconnected from {}", target.unpack())
        };
    }
    let kind = record.structure_kind();
    if kind == StructureKind::UnitFactory {
        return match config
            .value
            .as_number()
            .and_then(|index| record.structure.plan_name(index))
        {
            Some(plan) => format!("configured to {plan}"),
            None => String::from("configured to default"),
        };
    }
    // Item/liquid routing blocks and everything else print the payload as
    // is; an absent payload displays as "default".
    format!("configured to {}", config.value)
}

/// Records stored for `cell`, most recent first.
pub fn cell_records(store: &HistoryStore, cell: CellPos) -> Vec<&ActionRecord> {
    store
        .get(cell.pack())
        .map(|log| log.iter().rev().collect())
        .unwrap_or_default()
}

/// Non-virtual records authored by `actor` across all cells, newest first,
/// at most `limit` of them.
///
/// Records with equal timestamps keep cell-key order.
pub fn actor_records(
    store: &HistoryStore,
    actor: ActorId,
    limit: usize,
) -> Vec<(CellPos, &ActionRecord)> {
    let mut matches: Vec<(CellPos, &ActionRecord)> = store
        .iter()
        .flat_map(|(key, log)| {
            log.iter()
                .filter(move |record| record.author == actor && !record.is_virtual)
                .map(move |record| (key.unpack(), record))
        })
        .collect();
    matches.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp));
    matches.truncate(limit);
    matches
}

/// Rendered per-cell view. Empty means "no data".
pub fn query_cell<D>(
    store: &HistoryStore,
    cell: CellPos,
    renderer: &HistoryRenderer<'_, D>,
) -> Vec<String>
where
    D: ActorDirectory + ?Sized,
{
    cell_records(store, cell)
        .into_iter()
        .map(|record| renderer.line(record, cell, View::Cell))
        .collect()
}

/// Rendered per-actor view, most recent first, at most `limit` lines.
pub fn query_actor<D>(
    store: &HistoryStore,
    actor: ActorId,
    limit: usize,
    renderer: &HistoryRenderer<'_, D>,
) -> Vec<String>
where
    D: ActorDirectory + ?Sized,
{
    actor_records(store, actor, limit)
        .into_iter()
        .map(|(cell, record)| renderer.line(record, cell, View::Actor))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blockwatch_types::{
        BlockActionKind, CellKey, ConfigValue, StructureDescriptor,
    };
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::directory::PlayerDirectory;
    use crate::log::HistoryCapacity;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).single().unwrap_or_default()
    }

    fn config(
        author: ActorId,
        structure: &Arc<StructureDescriptor>,
        value: ConfigValue,
        is_link_change: bool,
        connected: bool,
    ) -> ActionRecord {
        ActionRecord::config(
            author,
            at(0),
            Arc::clone(structure),
            ConfigAction {
                value,
                is_link_change,
                connected,
            },
        )
    }

    #[test]
    fn block_line_per_cell_omits_coordinates() {
        let mut directory = PlayerDirectory::new();
        let author = ActorId::new();
        directory.register(author, "Anuke", false);
        let record = ActionRecord::block(
            author,
            at(0),
            Arc::new(StructureDescriptor::new("titanium-conveyor", 1)),
            BlockActionKind::Break,
        );
        let renderer = HistoryRenderer::new(&directory, false, at(180));
        assert_eq!(
            renderer.line(&record, CellPos::new(3, 4), View::Cell),
            "> Anuke broke titanium-conveyor 3 minutes ago"
        );
        assert_eq!(
            renderer.line(&record, CellPos::new(3, 4), View::Actor),
            "> Anuke (3,4) broke titanium-conveyor 3 minutes ago"
        );
    }

    #[test]
    fn privileged_line_shows_actor_id_and_unknown_name_falls_back() {
        let directory = PlayerDirectory::new();
        let author = ActorId::new();
        let record = ActionRecord::block(
            author,
            at(0),
            Arc::new(StructureDescriptor::new("router", 1)),
            BlockActionKind::Place,
        );
        let renderer = HistoryRenderer::new(&directory, true, at(10));
        assert_eq!(
            renderer.line(&record, CellPos::new(0, 0), View::Cell),
            format!("> {author} ({author}) placed router moments ago")
        );
    }

    #[test]
    fn link_descriptions() {
        let author = ActorId::new();
        let node = Arc::new(StructureDescriptor::new("power-node", 1));
        let here = CellPos::new(5, 5);
        let target = ConfigValue::Number(CellPos::new(5, 6).pack().0);

        let connected = config(author, &node, target.clone(), true, true);
        assert_eq!(describe(&connected, here), "connected to (5,6)");

        let disconnected = config(author, &node, target, true, false);
        assert_eq!(describe(&disconnected, here), "disconnected from (5,6)");

        let sentinel = config(author, &node, ConfigValue::Number(CellKey::NONE.0), true, false);
        assert_eq!(describe(&sentinel, here), "disconnected this cell");

        let own = config(author, &node, ConfigValue::Number(here.pack().0), true, false);
        assert_eq!(describe(&own, here), "disconnected this cell");
    }

    #[test]
    fn item_configurable_descriptions() {
        let author = ActorId::new();
        let sorter = Arc::new(StructureDescriptor::new("sorter", 1));
        let set = config(author, &sorter, ConfigValue::Content("copper".into()), false, false);
        assert_eq!(describe(&set, CellPos::new(0, 0)), "configured to copper");
        let reset = config(author, &sorter, ConfigValue::None, false, false);
        assert_eq!(describe(&reset, CellPos::new(0, 0)), "configured to default");
    }

    #[test]
    fn unit_factory_descriptions() {
        let author = ActorId::new();
        let factory = Arc::new(
            StructureDescriptor::new("ground-factory", 3).with_plans(["dagger", "crawler", "nova"]),
        );
        let cell = CellPos::new(0, 0);
        let plan = config(author, &factory, ConfigValue::Number(2), false, false);
        assert_eq!(describe(&plan, cell), "configured to nova");
        let negative = config(author, &factory, ConfigValue::Number(-1), false, false);
        assert_eq!(describe(&negative, cell), "configured to default");
        let missing = config(author, &factory, ConfigValue::Number(9), false, false);
        assert_eq!(describe(&missing, cell), "configured to default");
        let none = config(author, &factory, ConfigValue::None, false, false);
        assert_eq!(describe(&none, cell), "configured to default");
    }

    #[test]
    fn other_descriptions_print_raw_value() {
        let author = ActorId::new();
        let switch = Arc::new(StructureDescriptor::new("switch", 1));
        let on = config(author, &switch, ConfigValue::Bool(true), false, false);
        assert_eq!(describe(&on, CellPos::new(0, 0)), "configured to true");
    }

    #[test]
    fn actor_records_sorted_filtered_and_limited() {
        let Ok(capacity) = HistoryCapacity::new(10) else {
            return;
        };
        let mut store = HistoryStore::new(capacity);
        let me = ActorId::new();
        let someone = ActorId::new();
        let wall = Arc::new(StructureDescriptor::new("copper-wall", 1));
        let mut place = |cell: CellPos, author: ActorId, second: i64, is_virtual: bool| {
            let mut record =
                ActionRecord::block(author, at(second), Arc::clone(&wall), BlockActionKind::Place);
            record.is_virtual = is_virtual;
            store.append(cell.pack(), record);
        };
        place(CellPos::new(1, 1), me, 10, false);
        place(CellPos::new(2, 2), me, 30, false);
        place(CellPos::new(3, 3), me, 40, true);
        place(CellPos::new(4, 4), someone, 50, false);
        place(CellPos::new(5, 5), me, 20, false);

        let all = actor_records(&store, me, 100);
        let times: Vec<i64> = all.iter().map(|(_, r)| r.timestamp.timestamp()).collect();
        assert_eq!(times, vec![30, 20, 10]);

        let limited = actor_records(&store, me, 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited.first().map(|(c, _)| *c), Some(CellPos::new(2, 2)));
    }

    #[test]
    fn cell_view_is_reverse_insertion_order() {
        let Ok(capacity) = HistoryCapacity::new(10) else {
            return;
        };
        let mut store = HistoryStore::new(capacity);
        let author = ActorId::new();
        let wall = Arc::new(StructureDescriptor::new("copper-wall", 1));
        let cell = CellPos::new(1, 1);
        for (i, kind) in [BlockActionKind::Place, BlockActionKind::Break, BlockActionKind::Place]
            .into_iter()
            .enumerate()
        {
            let offset = TimeDelta::seconds(i64::try_from(i).unwrap_or_default());
            store.append(
                cell.pack(),
                ActionRecord::block(author, at(0) + offset, Arc::clone(&wall), kind),
            );
        }
        let directory = PlayerDirectory::new();
        let renderer = HistoryRenderer::new(&directory, false, at(600));
        let lines = query_cell(&store, cell, &renderer);
        assert_eq!(lines.len(), 3);
        let seconds: Vec<i64> = cell_records(&store, cell)
            .iter()
            .map(|r| r.timestamp.timestamp())
            .collect();
        assert_eq!(seconds, vec![2, 1, 0]);
        assert!(query_cell(&store, CellPos::new(9, 9), &renderer).is_empty());
    }
}
