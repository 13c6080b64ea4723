//! Requests from the engine to its host
//!
//! The engine never mutates host state. Every effect is queued as a
//! [`HostRequest`] and drained by the host with `take_requests()`.

use serde::{Deserialize, Serialize};
use crate::item::DesktopItem;
use crate::types::ItemId;

/// Per-item actions the engine delegates to the host UI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemAction {
    Rename,
    Preview,
    Edit,
    Regenerate,
    CreateIdea,
    AddToCanvas,
}

/// Severity of a user-facing notice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message to show the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Effect requested by the engine
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostRequest {
    /// Replace the whole item list
    ItemsChanged { items: Vec<DesktopItem> },
    /// Replace the selection
    SelectionChanged { ids: Vec<ItemId> },
    /// Navigate into a folder or stack
    OpenContainer { id: ItemId },
    /// Navigate back to the top level
    CloseContainer,
    /// Ask the user to confirm deleting these items
    ConfirmDelete { ids: Vec<ItemId> },
    /// Run a host-side item action
    ItemAction { action: ItemAction, id: ItemId },
    /// Start delivering global pointer move/up events
    CapturePointer,
    /// Stop delivering global pointer events
    ReleasePointer,
    /// Show a notice
    Notice(Notice),
}

impl HostRequest {
    /// Check if this request replaces the item list
    #[inline]
    pub fn is_items_changed(&self) -> bool {
        matches!(self, HostRequest::ItemsChanged { .. })
    }
}
