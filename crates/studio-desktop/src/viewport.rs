//! Viewport for the desktop area
//!
//! Holds the visible desktop size and the grid derived from it. Bounds are
//! recomputed on every resize.

use crate::config::DesktopConfig;
use crate::grid::{GridBounds, GridLayout};
use crate::math::Size;

/// Visible desktop area
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Screen size in pixels
    pub screen_size: Size,
    grid: GridLayout,
}

impl Viewport {
    /// Create a viewport of the given size
    pub fn new(screen_width: f32, screen_height: f32, config: &DesktopConfig) -> Self {
        let screen_size = Size::new(screen_width, screen_height);
        Self {
            screen_size,
            grid: GridLayout::for_viewport(screen_size, config),
        }
    }

    /// Update the screen size; true when the grid bounds changed
    pub fn resize(&mut self, screen_width: f32, screen_height: f32, config: &DesktopConfig) -> bool {
        let before = self.grid.bounds();
        self.screen_size = Size::new(screen_width, screen_height);
        self.grid = GridLayout::for_viewport(self.screen_size, config);
        self.grid.bounds() != before
    }

    /// Grid for the current size
    #[inline]
    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Placement bounds for the current size
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.grid.bounds()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, &DesktopConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_bounds() {
        // (1000 - 40 - 80) / 100 = 8.8 -> 800; (700 - 60 - 80) / 100 = 5.6 -> 500
        let viewport = Viewport::new(1000.0, 700.0, &DesktopConfig::default());
        assert_eq!(viewport.bounds(), GridBounds::new(800, 500));
    }

    #[test]
    fn test_viewport_resize_reports_change() {
        let config = DesktopConfig::default();
        let mut viewport = Viewport::new(1000.0, 700.0, &config);
        assert!(!viewport.resize(1010.0, 710.0, &config));
        assert!(viewport.resize(500.0, 400.0, &config));
        assert_eq!(viewport.bounds(), GridBounds::new(300, 200));
    }

    #[test]
    fn test_tiny_viewport_clamps_to_zero() {
        let viewport = Viewport::new(50.0, 50.0, &DesktopConfig::default());
        assert_eq!(viewport.bounds(), GridBounds::new(0, 0));
    }
}
