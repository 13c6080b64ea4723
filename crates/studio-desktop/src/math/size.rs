//! 2D size type for viewport dimensions

use serde::{Deserialize, Serialize};

/// 2D size for width and height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square size (icon footprint)
    #[inline]
    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Check if size is zero or negative
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_square() {
        let s = Size::square(80.0);
        assert!((s.width - 80.0).abs() < 0.001);
        assert!((s.height - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(100.0, 0.0).is_empty());
        assert!(!Size::new(1920.0, 1080.0).is_empty());
    }
}
