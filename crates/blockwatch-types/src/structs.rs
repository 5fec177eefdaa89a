//! Core value types: structure descriptors, configuration payloads, live link
//! state, and the immutable history records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::{CellKey, CellOffset, CellPos};
use crate::enums::{BlockActionKind, StructureKind};
use crate::ids::ActorId;

// ---------------------------------------------------------------------------
// Structure descriptors
// ---------------------------------------------------------------------------

/// Static description of a block type: its name, family and footprint.
///
/// When deserialized without an explicit `kind`, the kind is classified from
/// the name once, so downstream code never inspects names again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDescriptor")]
pub struct StructureDescriptor {
    /// Internal block name, e.g. `"power-node"`.
    pub name: String,
    /// Behavioural family.
    pub kind: StructureKind,
    /// Edge length of the square footprint, in cells.
    pub size: u8,
    /// Unit plan names, in plan index order. Only unit factories have any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<String>,
}

/// Wire shape of [`StructureDescriptor`] before kind resolution.
#[derive(Deserialize)]
struct RawDescriptor {
    name: String,
    #[serde(default)]
    kind: Option<StructureKind>,
    #[serde(default = "default_size")]
    size: u8,
    #[serde(default)]
    plans: Vec<String>,
}

const fn default_size() -> u8 {
    1
}

impl From<RawDescriptor> for StructureDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        let kind = raw
            .kind
            .unwrap_or_else(|| StructureKind::classify(&raw.name));
        Self {
            name: raw.name,
            kind,
            size: raw.size.max(1),
            plans: raw.plans,
        }
    }
}

impl StructureDescriptor {
    /// Describe a block, classifying its kind from the name.
    pub fn new(name: impl Into<String>, size: u8) -> Self {
        let name = name.into();
        let kind = StructureKind::classify(&name);
        Self {
            name,
            kind,
            size: size.max(1),
            plans: Vec::new(),
        }
    }

    /// Override the classified kind.
    #[must_use]
    pub fn with_kind(mut self, kind: StructureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach unit plan names (unit factories).
    #[must_use]
    pub fn with_plans<I, S>(mut self, plans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plans = plans.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the footprint covers more than one cell.
    pub const fn is_multiblock(&self) -> bool {
        self.size > 1
    }

    /// Offset from the origin cell to the footprint's lower-left corner.
    ///
    /// Odd sizes are centred on the origin; even sizes put the origin in the
    /// lower-left cell of the central 2x2.
    pub fn size_offset(&self) -> i16 {
        let half = i16::from(self.size.saturating_sub(1) / 2);
        0_i16.saturating_sub(half)
    }

    /// Name of the unit plan at `index`, if any.
    pub fn plan_name(&self, index: i32) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.plans.get(i))
            .map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Configuration payloads
// ---------------------------------------------------------------------------

/// A structure configuration payload, resolved once at the event boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ConfigValue {
    /// No payload: the structure was reset to its default.
    #[default]
    None,
    /// A boolean toggle (switches).
    Bool(bool),
    /// An integer: a packed cell position for links, a plan index for unit
    /// factories, or a raw number.
    Number(i32),
    /// Free text (messages, processor code).
    Text(String),
    /// A content reference by name (item, liquid, unit type).
    Content(String),
    /// A single relative link target.
    Point(CellOffset),
    /// Several relative link targets.
    Points(Vec<CellOffset>),
}

impl ConfigValue {
    /// Whether this payload is absent.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The integer payload, if this is a [`ConfigValue::Number`].
    pub const fn as_number(&self) -> Option<i32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl core::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::None => f.write_str("default"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) | Self::Content(s) => f.write_str(s),
            Self::Point(p) => write!(f, "{p}"),
            Self::Points(points) => {
                f.write_str("[")?;
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Live link state
// ---------------------------------------------------------------------------

/// One link of a logic processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicLink {
    /// Linked cell.
    pub target: CellPos,
    /// Whether the link is currently live.
    pub active: bool,
}

/// The link state a structure currently exposes to the world.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "links", rename_all = "snake_case")]
pub enum LinkState {
    /// The structure holds no links.
    #[default]
    Unlinked,
    /// Processor links.
    Logic(Vec<LogicLink>),
    /// Power node laser links.
    Power(Vec<CellPos>),
    /// Driver or bridge partner.
    Single(Option<CellPos>),
}

// ---------------------------------------------------------------------------
// History records
// ---------------------------------------------------------------------------

/// A configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigAction {
    /// The payload. For link changes this is the packed absolute target.
    pub value: ConfigValue,
    /// Whether the payload references another cell.
    pub is_link_change: bool,
    /// For link changes: whether the link now exists.
    pub connected: bool,
}

impl ConfigAction {
    /// The referenced cell for link changes.
    pub const fn link_target(&self) -> Option<CellKey> {
        if !self.is_link_change {
            return None;
        }
        match self.value {
            ConfigValue::Number(n) => Some(CellKey(n)),
            _ => None,
        }
    }
}

/// What an actor did to a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// The structure was built or removed.
    Block {
        /// Place or break.
        kind: BlockActionKind,
    },
    /// The structure's configuration changed.
    Config(ConfigAction),
}

/// An immutable history entry stored against one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who did it.
    pub author: ActorId,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// True when stored on a cell other than the structure's origin.
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    /// The structure involved.
    pub structure: Arc<StructureDescriptor>,
    /// The action itself.
    pub action: Action,
}

impl ActionRecord {
    /// A build or break record for the origin cell.
    pub const fn block(
        author: ActorId,
        timestamp: DateTime<Utc>,
        structure: Arc<StructureDescriptor>,
        kind: BlockActionKind,
    ) -> Self {
        Self {
            author,
            timestamp,
            is_virtual: false,
            structure,
            action: Action::Block { kind },
        }
    }

    /// A configuration record for the origin cell.
    pub const fn config(
        author: ActorId,
        timestamp: DateTime<Utc>,
        structure: Arc<StructureDescriptor>,
        config: ConfigAction,
    ) -> Self {
        Self {
            author,
            timestamp,
            is_virtual: false,
            structure,
            action: Action::Config(config),
        }
    }

    /// Copy of this record flagged for propagation to another cell.
    #[must_use]
    pub fn propagated(&self, is_virtual: bool) -> Self {
        Self {
            is_virtual,
            ..self.clone()
        }
    }

    /// The configuration change, if this is one.
    pub const fn as_config(&self) -> Option<&ConfigAction> {
        match &self.action {
            Action::Config(config) => Some(config),
            Action::Block { .. } => None,
        }
    }

    /// Family of the structure involved.
    pub fn structure_kind(&self) -> StructureKind {
        self.structure.kind
    }
}
