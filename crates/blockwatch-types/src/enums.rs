//! Enumeration types for the Blockwatch tracker.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Structure kinds
// ---------------------------------------------------------------------------

/// Behavioural family of a placed structure.
///
/// The tracker only cares about the families whose configuration has special
/// meaning (links to other cells, item/liquid selection, unit plans). Every
/// other block is [`StructureKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Programmable processor whose links are configured by packed position.
    LogicBlock,
    /// Power distribution node with a set of laser links.
    PowerNode,
    /// Item mass driver, linked to exactly one other driver.
    MassDriver,
    /// Payload mass driver, linked to exactly one other payload driver.
    PayloadDriver,
    /// Item/liquid bridge family, linked to one bridge end.
    ItemBridge,
    /// Item sorter (regular or inverted).
    Sorter,
    /// Sandbox item source.
    ItemSource,
    /// Sandbox liquid source.
    LiquidSource,
    /// Duct router with a filter item.
    DuctRouter,
    /// Unit factory selecting a plan by index.
    UnitFactory,
    /// Anything else.
    Other,
}

/// Block names per family, checked by [`StructureKind::classify`].
const LOGIC_BLOCKS: &[&str] = &[
    "micro-processor",
    "logic-processor",
    "hyper-processor",
    "world-processor",
];
const POWER_NODES: &[&str] = &["power-node", "power-node-large", "surge-tower", "beam-link"];
const MASS_DRIVERS: &[&str] = &["mass-driver"];
const PAYLOAD_DRIVERS: &[&str] = &["payload-mass-driver", "large-payload-mass-driver"];
const ITEM_BRIDGES: &[&str] = &[
    "bridge-conveyor",
    "phase-conveyor",
    "bridge-conduit",
    "phase-conduit",
];
const SORTERS: &[&str] = &["sorter", "inverted-sorter"];
const UNIT_FACTORIES: &[&str] = &[
    "ground-factory",
    "air-factory",
    "naval-factory",
    "tank-fabricator",
    "ship-fabricator",
    "mech-fabricator",
];

impl StructureKind {
    /// Classify a block by its internal name.
    ///
    /// Unknown names map to [`StructureKind::Other`].
    pub fn classify(block_name: &str) -> Self {
        let name = block_name.trim();
        if LOGIC_BLOCKS.contains(&name) {
            Self::LogicBlock
        } else if POWER_NODES.contains(&name) {
            Self::PowerNode
        } else if MASS_DRIVERS.contains(&name) {
            Self::MassDriver
        } else if PAYLOAD_DRIVERS.contains(&name) {
            Self::PayloadDriver
        } else if ITEM_BRIDGES.contains(&name) {
            Self::ItemBridge
        } else if SORTERS.contains(&name) {
            Self::Sorter
        } else if name == "item-source" {
            Self::ItemSource
        } else if name == "liquid-source" {
            Self::LiquidSource
        } else if name == "duct-router" {
            Self::DuctRouter
        } else if UNIT_FACTORIES.contains(&name) {
            Self::UnitFactory
        } else {
            Self::Other
        }
    }

    /// Whether configuring this kind can reference another cell.
    pub const fn is_link_capable(self) -> bool {
        matches!(
            self,
            Self::LogicBlock
                | Self::PowerNode
                | Self::MassDriver
                | Self::PayloadDriver
                | Self::ItemBridge
        )
    }

    /// Whether this kind is a simple item/liquid routing block whose
    /// configuration is rendered verbatim.
    pub const fn is_item_configurable(self) -> bool {
        matches!(
            self,
            Self::Sorter | Self::ItemSource | Self::LiquidSource | Self::DuctRouter
        )
    }

    /// Whether this kind links to exactly one partner of the same kind.
    pub const fn is_paired(self) -> bool {
        matches!(self, Self::MassDriver | Self::PayloadDriver | Self::ItemBridge)
    }
}

// ---------------------------------------------------------------------------
// Block actions
// ---------------------------------------------------------------------------

/// Whether a structure was built or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockActionKind {
    /// The structure was constructed.
    Place,
    /// The structure was deconstructed.
    Break,
}

impl BlockActionKind {
    /// Past-tense verb used in rendered history lines.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Place => "placed",
            Self::Break => "broke",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_families() {
        assert_eq!(StructureKind::classify("power-node"), StructureKind::PowerNode);
        assert_eq!(StructureKind::classify("bridge-conduit"), StructureKind::ItemBridge);
        assert_eq!(
            StructureKind::classify("large-payload-mass-driver"),
            StructureKind::PayloadDriver
        );
        assert_eq!(StructureKind::classify("air-factory"), StructureKind::UnitFactory);
        assert_eq!(StructureKind::classify("inverted-sorter"), StructureKind::Sorter);
        assert_eq!(StructureKind::classify("conveyor"), StructureKind::Other);
    }

    #[test]
    fn link_capable_set_is_closed() {
        let capable: Vec<StructureKind> = [
            StructureKind::LogicBlock,
            StructureKind::PowerNode,
            StructureKind::MassDriver,
            StructureKind::PayloadDriver,
            StructureKind::ItemBridge,
            StructureKind::Sorter,
            StructureKind::ItemSource,
            StructureKind::LiquidSource,
            StructureKind::DuctRouter,
            StructureKind::UnitFactory,
            StructureKind::Other,
        ]
        .into_iter()
        .filter(|k| k.is_link_capable())
        .collect();
        assert_eq!(capable.len(), 5);
        assert!(!StructureKind::Sorter.is_link_capable());
        assert!(StructureKind::Sorter.is_item_configurable());
        assert!(!StructureKind::PowerNode.is_paired());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&StructureKind::PayloadDriver).ok();
        assert_eq!(json.as_deref(), Some("\"payload_driver\""));
    }
}
