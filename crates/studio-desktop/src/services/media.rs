//! Media storage collaborator used by file-drop ingestion

use std::future::Future;
use super::ServiceError;

/// A video persisted to the output directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedVideo {
    pub url: String,
    pub filename: String,
}

/// Backend storage for dropped media that has no URL yet
pub trait MediaStore {
    /// Persist raw video bytes
    fn save_video(
        &self,
        data: Vec<u8>,
        suggested_name: &str,
    ) -> impl Future<Output = Result<SavedVideo, ServiceError>>;

    /// Persist a raw thumbnail image, returning its URL
    fn save_thumbnail(
        &self,
        data: Vec<u8>,
        suggested_name: &str,
    ) -> impl Future<Output = Result<String, ServiceError>>;
}
