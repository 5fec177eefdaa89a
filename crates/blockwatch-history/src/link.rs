//! Link-state diffing for configuration events.
//!
//! Some structures are configured with a reference to another cell: power
//! nodes, mass drivers, bridges, and processors configured with a packed
//! position. For those, a configuration event is recorded as a link change
//! and the live world decides whether the link now exists.
//!
//! Relative payloads (one offset or a list of offsets) are resolved against
//! the structure's origin and become one link change per absolute target.

use blockwatch_types::{
    ActionRecord, ActorId, CellKey, CellPos, ConfigValue, LinkState, StructureKind,
};
use blockwatch_world::{Building, WorldView};

/// How a configuration payload will be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPlan {
    /// Record the payload verbatim, not as a link change.
    Plain,
    /// Record one link change per absolute target, in order.
    Links(Vec<CellKey>),
}

/// Whether `value` is a link payload for a structure of `kind`.
///
/// Processors only link through packed positions; the other link-capable
/// families also accept relative offsets.
pub const fn is_link_config(kind: StructureKind, value: &ConfigValue) -> bool {
    match kind {
        StructureKind::LogicBlock => matches!(value, ConfigValue::Number(_)),
        StructureKind::PowerNode
        | StructureKind::MassDriver
        | StructureKind::PayloadDriver
        | StructureKind::ItemBridge => matches!(
            value,
            ConfigValue::Number(_) | ConfigValue::Point(_) | ConfigValue::Points(_)
        ),
        _ => false,
    }
}

/// Decide how to record `value` configured on a structure of `kind` at
/// `origin`.
///
/// Offsets that leave the coordinate range are dropped.
pub fn plan(kind: StructureKind, origin: CellPos, value: &ConfigValue) -> ConfigPlan {
    if !is_link_config(kind, value) {
        return ConfigPlan::Plain;
    }
    match value {
        ConfigValue::Number(n) => ConfigPlan::Links(vec![CellKey(*n)]),
        ConfigValue::Point(offset) => {
            ConfigPlan::Links(origin.offset(*offset).map(CellPos::pack).into_iter().collect())
        }
        ConfigValue::Points(offsets) => ConfigPlan::Links(
            offsets
                .iter()
                .filter_map(|offset| origin.offset(*offset))
                .map(CellPos::pack)
                .collect(),
        ),
        _ => ConfigPlan::Plain,
    }
}

/// Whether `building` is currently linked to `target`.
///
/// The no-link sentinel, the building's own origin, empty or off-grid
/// targets, and link state that does not match the building's family all
/// count as not connected. Paired families (drivers, bridges) additionally
/// require the partner to be a structure of the same family.
pub fn is_connected<W>(world: &W, building: &Building, target: CellKey) -> bool
where
    W: WorldView + ?Sized,
{
    if target == CellKey::NONE || target == building.origin.pack() {
        return false;
    }
    let cell = target.unpack();
    if !world.contains(cell) {
        return false;
    }
    let Some(other) = world.building_at(cell) else {
        return false;
    };
    let kind = building.kind();
    match &building.links {
        LinkState::Logic(links) if kind == StructureKind::LogicBlock => links
            .iter()
            .find(|link| link.target == cell)
            .is_some_and(|link| link.active),
        LinkState::Power(links) if kind == StructureKind::PowerNode => links.contains(&cell),
        LinkState::Single(Some(partner)) if kind.is_paired() => {
            *partner == cell && other.kind() == kind
        }
        _ => false,
    }
}

/// Whether a link change by `author` with state `connected` repeats the most
/// recent record for the cell.
///
/// Only the immediately preceding record is compared, so alternating
/// connect/disconnect sequences are always kept.
pub fn is_redundant(last: Option<&ActionRecord>, author: ActorId, connected: bool) -> bool {
    last.is_some_and(|record| {
        record.author == author
            && record
                .as_config()
                .is_some_and(|config| config.is_link_change && config.connected == connected)
    })
}
