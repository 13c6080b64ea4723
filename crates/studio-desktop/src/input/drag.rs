//! Tracking state for pointer interactions

use crate::math::{Rect, Vec2};
use crate::types::ItemId;

/// Current pointer interaction
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    /// Rubber-band selection on the empty desktop
    Selecting {
        /// Press position (container-local)
        origin: Vec2,
        /// Latest pointer position
        current: Vec2,
        /// Extend the existing selection instead of replacing it
        additive: bool,
    },
    /// Dragging the selected items
    DraggingItems {
        /// Item the press landed on
        anchor: ItemId,
        /// Press position (container-local)
        start: Vec2,
        /// Pointer travel since the press; never snapped while dragging
        delta: Vec2,
        /// Folder currently under the pointer
        drop_target: Option<ItemId>,
    },
}

impl DragState {
    /// Check if this is a marquee selection
    #[inline]
    pub fn is_selecting(&self) -> bool {
        matches!(self, DragState::Selecting { .. })
    }

    /// Check if this is an item drag
    #[inline]
    pub fn is_dragging_items(&self) -> bool {
        matches!(self, DragState::DraggingItems { .. })
    }

    /// Anchor item of an item drag
    pub fn anchor(&self) -> Option<&str> {
        match self {
            DragState::DraggingItems { anchor, .. } => Some(anchor),
            DragState::Selecting { .. } => None,
        }
    }

    /// Drop target of an item drag
    pub fn drop_target(&self) -> Option<&str> {
        match self {
            DragState::DraggingItems { drop_target, .. } => drop_target.as_deref(),
            DragState::Selecting { .. } => None,
        }
    }

    /// Normalized marquee rectangle
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            DragState::Selecting { origin, current, .. } => Some(Rect::from_corners(*origin, *current)),
            DragState::DraggingItems { .. } => None,
        }
    }

    /// Feed a new pointer position
    pub fn track(&mut self, pointer: Vec2) {
        match self {
            DragState::Selecting { current, .. } => *current = pointer,
            DragState::DraggingItems { start, delta, .. } => *delta = pointer - *start,
        }
    }
}
