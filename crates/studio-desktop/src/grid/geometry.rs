//! Grid geometry: snapping, bounds and clamping
//!
//! Pure functions mapping free-form pixel coordinates onto the snapped grid
//! bounded by the current viewport.

use serde::{Deserialize, Serialize};
use crate::config::DesktopConfig;
use crate::math::{Point, Rect, Size, Vec2};

/// A grid cell key (column, row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    /// Create a new cell key
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Largest valid top-left coordinates for a top-level item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl GridBounds {
    /// Create bounds directly
    #[inline]
    pub const fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }

    /// Derive bounds from the viewport size
    ///
    /// `maxX = floor((w - 2*padding - icon) / grid) * grid` and
    /// `maxY = floor((h - top_offset - icon) / grid) * grid`, never negative.
    pub fn from_viewport(viewport: Size, config: &DesktopConfig) -> Self {
        let grid = config.grid_size.max(1) as f64;
        let usable_w = viewport.width as f64 - 2.0 * config.padding as f64 - config.icon_size as f64;
        let usable_h = viewport.height as f64 - config.top_offset as f64 - config.icon_size as f64;
        let max_x = ((usable_w / grid).floor() * grid).max(0.0) as i32;
        let max_y = ((usable_h / grid).floor() * grid).max(0.0) as i32;
        Self { max_x, max_y }
    }
}

/// Snapped grid bounded by the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    grid_size: i32,
    icon_size: i32,
    bounds: GridBounds,
}

impl GridLayout {
    /// Create a grid with explicit bounds
    pub fn new(grid_size: i32, icon_size: i32, bounds: GridBounds) -> Self {
        Self {
            grid_size: grid_size.max(1),
            icon_size,
            bounds,
        }
    }

    /// Create a grid for a viewport using the engine configuration
    pub fn for_viewport(viewport: Size, config: &DesktopConfig) -> Self {
        Self::new(
            config.grid_size,
            config.icon_size,
            GridBounds::from_viewport(viewport, config),
        )
    }

    /// Grid cell size in pixels
    #[inline]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Icon footprint in pixels
    #[inline]
    pub fn icon_size(&self) -> i32 {
        self.icon_size
    }

    /// Current bounds
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of columns inside the bounds
    #[inline]
    pub fn columns(&self) -> i32 {
        self.bounds.max_x / self.grid_size + 1
    }

    /// Number of rows inside the bounds
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.max_y / self.grid_size + 1
    }

    /// Round one coordinate to the nearest grid multiple (half away from zero)
    #[inline]
    pub fn snap_value(&self, v: f64) -> i32 {
        let g = self.grid_size as f64;
        ((v / g).round() * g) as i32
    }

    /// Snap a float position onto the grid
    #[inline]
    pub fn snap(&self, pos: Vec2) -> Point {
        Point::new(self.snap_value(pos.x as f64), self.snap_value(pos.y as f64))
    }

    /// Snap an integer position onto the grid
    #[inline]
    pub fn snap_point(&self, pos: Point) -> Point {
        Point::new(self.snap_value(pos.x as f64), self.snap_value(pos.y as f64))
    }

    /// Clamp a position into `[0, max_x] x [0, max_y]`
    #[inline]
    pub fn clamp(&self, pos: Point) -> Point {
        Point::new(
            pos.x.clamp(0, self.bounds.max_x),
            pos.y.clamp(0, self.bounds.max_y),
        )
    }

    /// Clamp, snap, then clamp again (snapping can push past an edge)
    pub fn place(&self, pos: Vec2) -> Point {
        let x = (pos.x as f64).clamp(0.0, self.bounds.max_x as f64);
        let y = (pos.y as f64).clamp(0.0, self.bounds.max_y as f64);
        self.clamp(Point::new(self.snap_value(x), self.snap_value(y)))
    }

    /// Integer variant of [`GridLayout::place`]
    #[inline]
    pub fn place_point(&self, pos: Point) -> Point {
        self.clamp(self.snap_point(self.clamp(pos)))
    }

    /// Whether a position lies inside the bounds
    #[inline]
    pub fn in_bounds(&self, pos: Point) -> bool {
        (0..=self.bounds.max_x).contains(&pos.x) && (0..=self.bounds.max_y).contains(&pos.y)
    }

    /// Cell key of a position, snapping first
    #[inline]
    pub fn cell_of(&self, pos: Point) -> GridCell {
        let snapped = self.snap_point(pos);
        GridCell::new(snapped.x / self.grid_size, snapped.y / self.grid_size)
    }

    /// Top-left pixel position of a cell
    #[inline]
    pub fn cell_origin(&self, cell: GridCell) -> Point {
        Point::new(cell.col * self.grid_size, cell.row * self.grid_size)
    }

    /// Offset of the `index`-th item when spreading a batch over `columns` columns
    pub fn spread_offset(&self, index: usize, columns: i32) -> Point {
        let columns = columns.max(1) as usize;
        let col = (index % columns) as i32;
        let row = (index / columns) as i32;
        Point::new(col * self.grid_size, row * self.grid_size)
    }

    /// Icon bounding box of an item rendered at `pos`
    pub fn icon_rect(&self, pos: Point) -> Rect {
        Rect::from_pos_size(Vec2::from(pos), Size::square(self.icon_size as f32))
    }
}
