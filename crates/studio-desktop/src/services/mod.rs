//! External collaborator contracts
//!
//! The engine never talks to the backend directly. Hosts implement these
//! traits over their HTTP client (or fakes in tests) and hand them to the
//! async engine operations.

mod compositor;
mod media;
mod thumbnails;

pub use compositor::{ImageCompositor, MergeAxis, MergeRequest, MergedImage};
pub use media::{MediaStore, SavedVideo};
pub use thumbnails::{RebuiltThumbnail, ThumbnailRepair, ThumbnailResolution, ThumbnailService};

/// Failure reported by an external collaborator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceError {
    /// Collaborator message, surfaced verbatim
    pub message: String,
}

impl ServiceError {
    /// Create an error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceError {}
