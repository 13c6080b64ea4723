//! Variant-specific item data

use serde::{Deserialize, Serialize};
use crate::types::ItemId;

/// Discriminant of an item, without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Image,
    Video,
    Folder,
    Stack,
}

impl ItemType {
    /// Folders and stacks hold other items
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, ItemType::Folder | ItemType::Stack)
    }
}

/// Variant payload of a desktop item, tagged by `type` on the wire
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Image(ImageData),
    Video(VideoData),
    Folder(FolderData),
    Stack(StackData),
}

impl ItemKind {
    /// Discriminant of this payload
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Image(_) => ItemType::Image,
            ItemKind::Video(_) => ItemType::Video,
            ItemKind::Folder(_) => ItemType::Folder,
            ItemKind::Stack(_) => ItemType::Stack,
        }
    }
}

/// A generated or imported image
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_third_party: bool,
    /// Generation record this image came from; also the auto-stack group key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_error: Option<String>,
}

impl ImageData {
    /// Image with only a URL
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            ..Default::default()
        }
    }
}

/// An imported or saved video
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_error: Option<String>,
}

impl VideoData {
    /// Video with only a URL
    pub fn new(video_url: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
            ..Default::default()
        }
    }
}

/// A folder of items
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderData {
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Several images collapsed into one icon
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackData {
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
    #[serde(default)]
    pub is_expanded: bool,
}

impl StackData {
    /// Display name of a stack holding `count` images
    pub fn name_for(count: usize) -> String {
        format!("Stack ({})", count)
    }
}
