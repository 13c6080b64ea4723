//! Core type definitions for the desktop workspace
//!
//! This module centralizes type aliases used throughout the crate
//! for consistency and discoverability.

/// Unique item identifier
///
/// Ids are opaque strings owned by the host. Items created by the engine
/// get a fresh UUID v4.
pub type ItemId = String;

/// Millisecond timestamp (Unix epoch)
pub type Timestamp = u64;

/// Generate a fresh item id
pub fn new_item_id() -> ItemId {
    uuid::Uuid::new_v4().to_string()
}
