//! Core geometry types for the desktop workspace
//!
//! Float types (`Vec2`, `Size`, `Rect`) carry pointer and viewport data;
//! `Point` is the integer pixel position stored on items.

mod point;
mod rect;
mod size;
mod vec2;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
