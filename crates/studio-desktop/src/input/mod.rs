//! Input routing module
//!
//! Provides the pointer state machine for marquee selection and item drags.

mod drag;
mod result;
mod router;

pub use drag::DragState;
pub use result::InputResult;
pub use router::InputRouter;

/// Keyboard modifiers held during a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
    };

    /// Build from individual flags
    #[inline]
    pub const fn new(shift: bool, ctrl: bool, meta: bool) -> Self {
        Self { shift, ctrl, meta }
    }

    /// Ctrl or Cmd: toggle an item in the selection
    #[inline]
    pub fn toggles(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Any selection-extending modifier
    #[inline]
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Primary (left) pointer button index
pub const PRIMARY_BUTTON: u8 = 0;
