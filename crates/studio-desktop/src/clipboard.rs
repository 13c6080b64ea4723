//! Single-slot desktop clipboard

use serde::{Deserialize, Serialize};
use crate::item::DesktopItem;

/// What the next paste does with the clipboard contents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardAction {
    /// Paste clones with fresh ids
    Copy,
    /// Paste moves the originals, then clears the clipboard
    Cut,
}

/// Snapshot of the items last copied or cut
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipboardState {
    pub items: Vec<DesktopItem>,
    pub action: ClipboardAction,
}

impl ClipboardState {
    /// Create a clipboard entry
    pub fn new(items: Vec<DesktopItem>, action: ClipboardAction) -> Self {
        Self { items, action }
    }

    /// Check if the entry was produced by a cut
    #[inline]
    pub fn is_cut(&self) -> bool {
        self.action == ClipboardAction::Cut
    }

    /// Number of top-level snapshot entries
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
