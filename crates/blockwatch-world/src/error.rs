//! Error types for the `blockwatch-world` crate.
//!
//! All fallible grid mutations return [`WorldError`].

use blockwatch_types::CellPos;

/// Errors that can occur while mutating a [`crate::GridWorld`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    /// The grid was given a zero dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },

    /// A footprint cell lies outside the grid.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(CellPos),

    /// A footprint cell is already taken by another structure.
    #[error("cell {cell} is occupied by the structure at {origin}")]
    Occupied {
        /// The contested cell.
        cell: CellPos,
        /// Origin of the structure already there.
        origin: CellPos,
    },

    /// No structure occupies the cell.
    #[error("no structure at {0}")]
    NoBuilding(CellPos),
}
