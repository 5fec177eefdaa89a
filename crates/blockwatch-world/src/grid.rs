//! In-memory rectangular world.
//!
//! [`GridWorld`] mirrors the structures the event source reports so the
//! tracker has something to resolve cells and links against. Buildings are
//! indexed by origin; a second map points every covered cell at its origin.

use std::collections::BTreeMap;

use blockwatch_types::{CellKey, CellPos, LinkState};

use crate::error::WorldError;
use crate::footprint::Footprint;
use crate::view::{Building, WorldView};

/// A `width x height` grid of cells starting at `(0, 0)`.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: u16,
    height: u16,
    /// Buildings keyed by their origin cell.
    buildings: BTreeMap<CellKey, Building>,
    /// Every occupied cell, pointing at the origin of its building.
    occupancy: BTreeMap<CellKey, CellKey>,
}

impl GridWorld {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is zero.
    pub const fn new(width: u16, height: u16) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            buildings: BTreeMap::new(),
            occupancy: BTreeMap::new(),
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of standing buildings.
    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Place a building, claiming every cell of its footprint.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if any footprint cell is off the
    /// grid, or [`WorldError::Occupied`] if any is already taken.
    pub fn place(&mut self, building: Building) -> Result<(), WorldError> {
        let footprint = Footprint::of(building.origin, &building.structure);
        let cells: Vec<CellPos> = footprint.cells().collect();
        for cell in &cells {
            if !self.contains(*cell) {
                return Err(WorldError::OutOfBounds(*cell));
            }
            if let Some(origin) = self.occupancy.get(&cell.pack()) {
                return Err(WorldError::Occupied {
                    cell: *cell,
                    origin: origin.unpack(),
                });
            }
        }
        let origin = building.origin.pack();
        for cell in cells {
            self.occupancy.insert(cell.pack(), origin);
        }
        tracing::trace!(origin = %building.origin, structure = %building.structure.name, "building placed");
        self.buildings.insert(origin, building);
        Ok(())
    }

    /// Remove the building covering `cell`, returning it.
    pub fn remove(&mut self, cell: CellPos) -> Option<Building> {
        let origin = self.occupancy.get(&cell.pack()).copied()?;
        let building = self.buildings.remove(&origin)?;
        self.occupancy.retain(|_, owner| *owner != origin);
        tracing::trace!(origin = %building.origin, structure = %building.structure.name, "building removed");
        Some(building)
    }

    /// Replace the link state of the building covering `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoBuilding`] if the cell is empty.
    pub fn set_links(&mut self, cell: CellPos, links: LinkState) -> Result<(), WorldError> {
        let origin = self
            .occupancy
            .get(&cell.pack())
            .copied()
            .ok_or(WorldError::NoBuilding(cell))?;
        let building = self
            .buildings
            .get_mut(&origin)
            .ok_or(WorldError::NoBuilding(cell))?;
        building.links = links;
        Ok(())
    }

    /// Remove every building.
    pub fn clear(&mut self) {
        self.buildings.clear();
        self.occupancy.clear();
    }
}

impl WorldView for GridWorld {
    fn contains(&self, cell: CellPos) -> bool {
        let within = |coord: i16, limit: u16| {
            u16::try_from(coord).is_ok_and(|c| c < limit)
        };
        within(cell.x, self.width) && within(cell.y, self.height)
    }

    fn building_at(&self, cell: CellPos) -> Option<&Building> {
        let origin = self.occupancy.get(&cell.pack())?;
        self.buildings.get(origin)
    }
}
