//! The read-only view of the world the tracker consults.
//!
//! The tracker never owns the world. It only needs to know whether a cell
//! exists and which structure, if any, occupies it, together with that
//! structure's live link state.

use std::sync::Arc;

use blockwatch_types::{CellPos, LinkState, StructureDescriptor, StructureKind};
use serde::{Deserialize, Serialize};

/// A structure standing in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// The structure's origin cell.
    pub origin: CellPos,
    /// What was built.
    pub structure: Arc<StructureDescriptor>,
    /// Current links to other cells.
    #[serde(default)]
    pub links: LinkState,
}

impl Building {
    /// A freshly placed building with no links.
    pub const fn new(origin: CellPos, structure: Arc<StructureDescriptor>) -> Self {
        Self {
            origin,
            structure,
            links: LinkState::Unlinked,
        }
    }

    /// Family of the structure.
    pub fn kind(&self) -> StructureKind {
        self.structure.kind
    }
}

/// Cell lookup against the live world.
pub trait WorldView {
    /// Whether `cell` lies on the grid.
    fn contains(&self, cell: CellPos) -> bool;

    /// The building occupying `cell`, which need not be its origin.
    fn building_at(&self, cell: CellPos) -> Option<&Building>;
}
