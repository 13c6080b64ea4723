//! Grid placement module
//!
//! Snapping, viewport bounds, and the shared free-cell search.

mod geometry;
mod occupancy;

pub use geometry::{GridBounds, GridCell, GridLayout};
pub use occupancy::{OccupancyResolver, OccupiedCells};
