//! World-side collaborators for the Blockwatch tracker.
//!
//! The tracker treats the world as an external collaborator it can only
//! query. This crate defines that query surface and the footprint logic that
//! maps one structure onto the cells it covers.
//!
//! # Modules
//!
//! - [`view`] -- The [`WorldView`] trait and the [`Building`] it returns.
//! - [`footprint`] -- [`Footprint`] expands a multiblock structure into its
//!   covered cells and flags every non-origin cell as virtual.
//! - [`grid`] -- [`GridWorld`], an in-memory rectangular world used by the
//!   engine binary and by tests.
//! - [`error`] -- Error types for grid mutations.

pub mod error;
pub mod footprint;
pub mod grid;
pub mod view;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use footprint::Footprint;
pub use grid::GridWorld;
pub use view::{Building, WorldView};
