//! Multiblock footprints.
//!
//! A structure of size `S` anchored at an origin cell covers the `S x S`
//! square whose lower-left corner is `origin + (offset, offset)`, where the
//! offset comes from [`StructureDescriptor::size_offset`]. One physical event
//! on such a structure is fanned out to every covered cell so that inspecting
//! any of them shows the history.

use blockwatch_types::{CellOffset, CellPos, StructureDescriptor};

use crate::view::WorldView;

/// The square of cells a structure occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    origin: CellPos,
    size: u8,
    offset: i16,
}

impl Footprint {
    /// Footprint of `structure` anchored at `origin`.
    pub fn of(origin: CellPos, structure: &StructureDescriptor) -> Self {
        Self {
            origin,
            size: structure.size.max(1),
            offset: structure.size_offset(),
        }
    }

    /// A single-cell footprint.
    pub const fn single(origin: CellPos) -> Self {
        Self {
            origin,
            size: 1,
            offset: 0,
        }
    }

    /// The origin cell.
    pub const fn origin(&self) -> CellPos {
        self.origin
    }

    /// Every covered cell, column by column.
    ///
    /// Cells whose coordinates would leave the `i16` range are skipped.
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        let size = if self.size <= 1 { 1 } else { self.size };
        let offset = if self.size <= 1 { 0 } else { self.offset };
        (0..size).flat_map(move |dx| {
            (0..size).filter_map(move |dy| {
                let dx = i16::from(dx).checked_add(offset)?;
                let dy = i16::from(dy).checked_add(offset)?;
                self.origin.offset(CellOffset::new(dx, dy))
            })
        })
    }

    /// Invoke `visit` for every covered cell that exists in `world`.
    ///
    /// The second argument is `true` for every cell except the origin. A
    /// single-cell footprint always visits its origin exactly once. Off-grid
    /// cells of larger footprints are skipped silently.
    pub fn resolve<W, F>(&self, world: &W, mut visit: F)
    where
        W: WorldView + ?Sized,
        F: FnMut(CellPos, bool),
    {
        if self.size <= 1 {
            visit(self.origin, false);
            return;
        }
        for cell in self.cells() {
            if world.contains(cell) {
                visit(cell, cell != self.origin);
            } else {
                tracing::trace!(%cell, origin = %self.origin, "footprint cell off grid, skipped");
            }
        }
    }
}
