//! Display-state classification
//!
//! Collapses the loading/error/missing/video/normal checks into one closed
//! set so renderers only match on [`DisplayState`].

use serde::Serialize;
use crate::container::existing_members;
use crate::services::ThumbnailRepair;
use super::{DesktopItem, ItemKind};

/// What an item icon should show
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DisplayState {
    /// Media is still being produced or imported
    Loading,
    /// Production failed with a message
    Failed { message: String },
    /// No usable source; render the placeholder asset
    Missing,
    /// Video, with a thumbnail when one is usable
    #[serde(rename_all = "camelCase")]
    Video { thumbnail_url: Option<String> },
    /// Regular image
    #[serde(rename_all = "camelCase")]
    Image { image_url: String },
    /// Folder with its live member count
    Folder { count: usize },
    /// Stack with its live member count
    #[serde(rename_all = "camelCase")]
    Stack { count: usize, is_expanded: bool },
}

/// Classify how `item` should be displayed
///
/// `all` is the full item list, used to count live container members.
pub fn classify(item: &DesktopItem, all: &[DesktopItem], thumbnails: &ThumbnailRepair) -> DisplayState {
    match &item.kind {
        ItemKind::Image(image) => {
            if image.is_loading {
                DisplayState::Loading
            } else if let Some(message) = &image.loading_error {
                DisplayState::Failed {
                    message: message.clone(),
                }
            } else if image.image_url.trim().is_empty() || thumbnails.is_failed(&image.image_url) {
                DisplayState::Missing
            } else {
                DisplayState::Image {
                    image_url: image.image_url.clone(),
                }
            }
        }
        ItemKind::Video(video) => {
            if video.is_loading {
                DisplayState::Loading
            } else if let Some(message) = &video.loading_error {
                DisplayState::Failed {
                    message: message.clone(),
                }
            } else if video.video_url.trim().is_empty() {
                DisplayState::Missing
            } else {
                let thumbnail_url = video
                    .thumbnail_url
                    .clone()
                    .filter(|url| !thumbnails.is_failed(url));
                DisplayState::Video { thumbnail_url }
            }
        }
        ItemKind::Folder(_) => DisplayState::Folder {
            count: existing_members(item, all).count(),
        },
        ItemKind::Stack(stack) => DisplayState::Stack {
            count: existing_members(item, all).count(),
            is_expanded: stack.is_expanded,
        },
    }
}
