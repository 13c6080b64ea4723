//! Thumbnail rebuild collaborator and its memo cache
//!
//! A thumbnail that fails to load is rebuilt at most once per process: refs
//! being rebuilt are not requested again, and refs whose rebuild failed are
//! pinned to the placeholder until [`ThumbnailRepair::reset`].

use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, warn};
use super::ServiceError;

/// A regenerated thumbnail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RebuiltThumbnail {
    pub thumbnail_url: String,
}

/// Backend that regenerates a thumbnail from its original
pub trait ThumbnailService {
    /// Rebuild the thumbnail of `original_url`
    fn rebuild_thumbnail(
        &self,
        original_url: &str,
    ) -> impl Future<Output = Result<RebuiltThumbnail, ServiceError>>;
}

/// Outcome of a repair attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThumbnailResolution {
    /// Use this thumbnail instead
    Rebuilt(String),
    /// A rebuild for this ref is already running
    Pending,
    /// Show the placeholder asset
    Placeholder,
}

/// Memo of in-flight and failed thumbnail rebuilds
#[derive(Clone, Debug, Default)]
pub struct ThumbnailRepair {
    rebuilding: HashSet<String>,
    failed: HashSet<String>,
}

impl ThumbnailRepair {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `url` is known to be unrecoverable
    #[inline]
    pub fn is_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Whether a rebuild of `url` is in flight
    #[inline]
    pub fn is_rebuilding(&self, url: &str) -> bool {
        self.rebuilding.contains(url)
    }

    /// Pin `url` to the placeholder
    pub fn mark_failed(&mut self, url: &str) {
        self.rebuilding.remove(url);
        self.failed.insert(url.to_string());
    }

    /// Claim a rebuild of `url`; false when it is in flight or known failed
    pub fn begin(&mut self, url: &str) -> bool {
        if self.is_failed(url) || self.is_rebuilding(url) {
            return false;
        }
        self.rebuilding.insert(url.to_string());
        true
    }

    /// Record the result of a claimed rebuild
    pub fn finish(
        &mut self,
        url: &str,
        outcome: Result<RebuiltThumbnail, ServiceError>,
    ) -> ThumbnailResolution {
        self.rebuilding.remove(url);
        match outcome {
            Ok(rebuilt) => {
                debug!(url, thumbnail = %rebuilt.thumbnail_url, "thumbnail rebuilt");
                ThumbnailResolution::Rebuilt(rebuilt.thumbnail_url)
            }
            Err(err) => {
                warn!(url, error = %err, "thumbnail rebuild failed; using placeholder");
                self.failed.insert(url.to_string());
                ThumbnailResolution::Placeholder
            }
        }
    }

    /// Handle a thumbnail load failure for `url`
    pub async fn repair<S: ThumbnailService>(&mut self, service: &S, url: &str) -> ThumbnailResolution {
        if self.is_failed(url) {
            return ThumbnailResolution::Placeholder;
        }
        if !self.begin(url) {
            return ThumbnailResolution::Pending;
        }
        let outcome = service.rebuild_thumbnail(url).await;
        self.finish(url, outcome)
    }

    /// Forget everything (adapter reset)
    pub fn reset(&mut self) {
        self.rebuilding.clear();
        self.failed.clear();
    }
}
