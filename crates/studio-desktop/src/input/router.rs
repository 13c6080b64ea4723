//! Input router state machine
//!
//! `Idle -> Selecting -> Idle` and `Idle -> DraggingItems -> Idle`. The two
//! tracking states are exclusive. Entering one means the host has to deliver
//! pointer-move/up events; leaving it means it can stop.

use crate::math::Vec2;
use crate::types::ItemId;
use super::DragState;

/// Input router managing the tracking state
#[derive(Debug, Default)]
pub struct InputRouter {
    /// Current drag state (`None` = idle)
    drag: Option<DragState>,
}

impl InputRouter {
    /// Create a new, idle input router
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Get current drag state
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Check if a tracking state is active
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.drag.is_some()
    }

    /// Enter `Selecting`; false if another interaction is active
    pub fn start_marquee(&mut self, origin: Vec2, additive: bool) -> bool {
        self.enter(DragState::Selecting {
            origin,
            current: origin,
            additive,
        })
    }

    /// Enter `DraggingItems`; false if another interaction is active
    pub fn start_item_drag(&mut self, anchor: ItemId, start: Vec2) -> bool {
        self.enter(DragState::DraggingItems {
            anchor,
            start,
            delta: Vec2::ZERO,
            drop_target: None,
        })
    }

    /// Feed a pointer position to the active state
    pub fn track(&mut self, pointer: Vec2) -> bool {
        match self.drag.as_mut() {
            Some(state) => {
                state.track(pointer);
                true
            }
            None => false,
        }
    }

    /// Update the drop target of an item drag
    pub fn set_drop_target(&mut self, target: Option<ItemId>) {
        if let Some(DragState::DraggingItems { drop_target, .. }) = self.drag.as_mut() {
            *drop_target = target;
        }
    }

    /// Leave the active state, handing it back for commit
    pub fn finish(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    /// Leave the active state without committing (alias for finish)
    #[inline]
    pub fn cancel(&mut self) -> Option<DragState> {
        self.finish()
    }

    fn enter(&mut self, state: DragState) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_router_marquee() {
        let mut router = InputRouter::new();
        assert!(!router.is_tracking());

        assert!(router.start_marquee(Vec2::new(10.0, 10.0), false));
        assert!(router.is_tracking());
        assert!(matches!(router.drag_state(), Some(DragState::Selecting { .. })));

        let finished = router.finish();
        assert!(matches!(finished, Some(DragState::Selecting { .. })));
        assert!(!router.is_tracking());
    }

    #[test]
    fn test_tracking_states_are_exclusive() {
        let mut router = InputRouter::new();
        assert!(router.start_item_drag("a".to_string(), Vec2::ZERO));
        assert!(!router.start_marquee(Vec2::ZERO, false));
        assert!(!router.start_item_drag("b".to_string(), Vec2::ZERO));
        assert_eq!(router.drag_state().and_then(|s| s.anchor()), Some("a"));
    }

    #[test]
    fn test_track_when_idle_is_ignored() {
        let mut router = InputRouter::new();
        assert!(!router.track(Vec2::new(5.0, 5.0)));
        assert!(router.finish().is_none());
    }

    #[test]
    fn test_drop_target_only_for_item_drag() {
        let mut router = InputRouter::new();
        router.start_marquee(Vec2::ZERO, false);
        router.set_drop_target(Some("f".to_string()));
        assert!(router.drag_state().and_then(|s| s.drop_target()).is_none());
        router.cancel();

        router.start_item_drag("a".to_string(), Vec2::ZERO);
        router.set_drop_target(Some("f".to_string()));
        assert_eq!(router.drag_state().and_then(|s| s.drop_target()), Some("f"));
    }
}
