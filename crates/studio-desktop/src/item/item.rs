//! Desktop item struct

use serde::{Deserialize, Serialize};
use crate::math::Point;
use crate::types::{ItemId, Timestamp};
use super::{ImageData, ItemKind, ItemType, StackData};

/// An entity on the desktop: image, video, folder or stack
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopItem {
    /// Unique identifier, immutable once assigned
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Top-left pixel position (grid aligned for top-level items)
    pub position: Point,
    /// Creation time (ms)
    pub created_at: Timestamp,
    /// Last mutation time (ms)
    pub updated_at: Timestamp,
    /// Variant payload
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl DesktopItem {
    /// Create an item with both timestamps set to `now`
    pub fn new(id: ItemId, name: String, position: Point, now: Timestamp, kind: ItemKind) -> Self {
        Self {
            id,
            name,
            position,
            created_at: now,
            updated_at: now,
            kind,
        }
    }

    /// Discriminant of this item
    #[inline]
    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    /// Check if this item is a folder or a stack
    #[inline]
    pub fn is_container(&self) -> bool {
        self.item_type().is_container()
    }

    /// Check if this item is an image
    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self.kind, ItemKind::Image(_))
    }

    /// Check if this item is a folder
    #[inline]
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder(_))
    }

    /// Image payload, if this is an image
    pub fn as_image(&self) -> Option<&ImageData> {
        match &self.kind {
            ItemKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Stack payload, if this is a stack
    pub fn as_stack(&self) -> Option<&StackData> {
        match &self.kind {
            ItemKind::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    /// Member ids of a container
    pub fn member_ids(&self) -> Option<&[ItemId]> {
        match &self.kind {
            ItemKind::Folder(folder) => Some(&folder.item_ids),
            ItemKind::Stack(stack) => Some(&stack.item_ids),
            ItemKind::Image(_) | ItemKind::Video(_) => None,
        }
    }

    /// Mutable member ids of a container
    pub fn member_ids_mut(&mut self) -> Option<&mut Vec<ItemId>> {
        match &mut self.kind {
            ItemKind::Folder(folder) => Some(&mut folder.item_ids),
            ItemKind::Stack(stack) => Some(&mut stack.item_ids),
            ItemKind::Image(_) | ItemKind::Video(_) => None,
        }
    }

    /// Check whether a container lists `id` as a member
    pub fn has_member(&self, id: &str) -> bool {
        self.member_ids()
            .map(|ids| ids.iter().any(|m| m == id))
            .unwrap_or(false)
    }

    /// Refresh `updated_at`
    #[inline]
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}
