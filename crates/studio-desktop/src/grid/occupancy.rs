//! Occupancy resolution: is a cell free, and where is the nearest free one
//!
//! All placement paths (drag, folder/stack creation, paste, unstack, merge,
//! ingestion, resize repair) go through [`OccupancyResolver`] so they share
//! the same tie-breaking.

use std::collections::HashSet;
use super::{GridCell, GridLayout};
use crate::item::DesktopItem;
use crate::math::Point;

/// Set of claimed cells, used for self-consistent batch placement
pub type OccupiedCells = HashSet<GridCell>;

/// Resolves free cells against a fixed view of placed items
pub struct OccupancyResolver<'a> {
    grid: &'a GridLayout,
    entries: Vec<(&'a str, Point)>,
    min_rings: i32,
}

impl<'a> OccupancyResolver<'a> {
    /// Create a resolver over no items
    pub fn new(grid: &'a GridLayout, min_rings: i32) -> Self {
        Self {
            grid,
            entries: Vec::new(),
            min_rings,
        }
    }

    /// Create a resolver over the given items (normally the visible ones)
    pub fn with_items<I>(grid: &'a GridLayout, items: I, min_rings: i32) -> Self
    where
        I: IntoIterator<Item = &'a DesktopItem>,
    {
        Self {
            grid,
            entries: items
                .into_iter()
                .map(|item| (item.id.as_str(), item.position))
                .collect(),
            min_rings,
        }
    }

    /// The grid this resolver places onto
    #[inline]
    pub fn grid(&self) -> &GridLayout {
        self.grid
    }

    /// Cells taken by the resolver's items, skipping ids matched by `skip`
    pub fn occupied_cells<F>(&self, skip: F) -> OccupiedCells
    where
        F: Fn(&str) -> bool,
    {
        self.entries
            .iter()
            .filter(|(id, _)| !skip(*id))
            .map(|(_, pos)| self.grid.cell_of(*pos))
            .collect()
    }

    /// Check whether the cell under `pos` is taken
    ///
    /// An explicit `occupied` set is authoritative and `exclude` is then
    /// ignored; otherwise the resolver's items are scanned, skipping `exclude`.
    pub fn is_occupied(
        &self,
        pos: Point,
        exclude: Option<&str>,
        occupied: Option<&OccupiedCells>,
    ) -> bool {
        let cell = self.grid.cell_of(pos);
        match occupied {
            Some(set) => set.contains(&cell),
            None => self
                .entries
                .iter()
                .any(|(id, p)| Some(*id) != exclude && self.grid.cell_of(*p) == cell),
        }
    }

    /// Find the free cell nearest to `pos`
    pub fn find_nearest_free(
        &self,
        pos: Point,
        exclude: Option<&str>,
        occupied: Option<&OccupiedCells>,
    ) -> Point {
        let bounds = self.grid.bounds();
        let span = bounds.max_x.max(bounds.max_y);
        let grid = self.grid.grid_size();
        let rings = self.min_rings.max((span + grid - 1) / grid);
        self.find_nearest_free_within(pos, exclude, occupied, rings)
    }

    /// Find the free cell nearest to `pos`, searching at most `max_rings` rings
    ///
    /// Order: the candidate itself, then square rings of growing Chebyshev
    /// distance (increasing dx, then dy), then a row-major raster scan. When
    /// every cell is taken the clamped candidate is returned and the caller
    /// has to live with the overlap.
    pub fn find_nearest_free_within(
        &self,
        pos: Point,
        exclude: Option<&str>,
        occupied: Option<&OccupiedCells>,
        max_rings: i32,
    ) -> Point {
        let start = self.grid.place_point(pos);
        if !self.is_occupied(start, exclude, occupied) {
            return start;
        }

        let grid = self.grid.grid_size();
        for distance in 1..=max_rings {
            for (dx, dy) in ring_offsets(distance) {
                let candidate = start.offset(dx * grid, dy * grid);
                if self.grid.in_bounds(candidate) && !self.is_occupied(candidate, exclude, occupied) {
                    return candidate;
                }
            }
        }

        self.first_free_raster(exclude, occupied).unwrap_or(start)
    }

    /// First free cell in row-major order from the origin
    pub fn first_free_raster(
        &self,
        exclude: Option<&str>,
        occupied: Option<&OccupiedCells>,
    ) -> Option<Point> {
        (0..self.grid.rows())
            .flat_map(|row| (0..self.grid.columns()).map(move |col| GridCell::new(col, row)))
            .map(|cell| self.grid.cell_origin(cell))
            .find(|candidate| !self.is_occupied(*candidate, exclude, occupied))
    }
}

/// Boundary cells of the square ring at Chebyshev distance `d`
fn ring_offsets(d: i32) -> impl Iterator<Item = (i32, i32)> {
    (-d..=d).flat_map(move |dx| {
        (-d..=d)
            .filter(move |dy| dx.abs().max(dy.abs()) == d)
            .map(move |dy| (dx, dy))
    })
}
