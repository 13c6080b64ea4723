//! Image compositing collaborator (merge images)

use std::future::Future;
use serde::{Deserialize, Serialize};
use super::ServiceError;

/// Layout axis of a merged composite
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Request sent to the compositor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    /// Image references in the order they should appear
    pub image_urls: Vec<String>,
    pub axis: MergeAxis,
    /// Gap between images in pixels
    pub spacing: u32,
    pub background_color: String,
}

/// Successful composite
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedImage {
    pub image_url: String,
    pub width: u32,
    pub height: u32,
}

/// Backend that stitches several images into one
pub trait ImageCompositor {
    /// Merge the requested images
    fn merge_images(
        &self,
        request: MergeRequest,
    ) -> impl Future<Output = Result<MergedImage, ServiceError>>;
}
