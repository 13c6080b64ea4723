//! Engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for the desktop engine
///
/// Every field has a default, so hosts only send what they override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesktopConfig {
    /// Grid cell size in pixels
    pub grid_size: i32,
    /// Icon footprint (square side) in pixels
    pub icon_size: i32,
    /// Horizontal padding on each side of the desktop area
    pub padding: i32,
    /// Space reserved above the desktop area (toolbar)
    pub top_offset: i32,
    /// Lower bound on the number of spiral rings searched for a free cell
    pub min_search_rings: i32,
    /// Ring cap used when resolving a multi-item drag
    pub batch_search_rings: i32,
    /// Columns used to spread pasted or unstacked items before collision search
    pub spread_columns: i32,
    /// Suffix appended to the name of a pasted copy
    pub copy_suffix: String,
    /// Name given to newly created folders
    pub folder_name: String,
    /// Spacing between images in a merged composite
    pub merge_spacing: u32,
    /// Background fill of a merged composite
    pub merge_background: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            icon_size: 80,
            padding: 20,
            top_offset: 60,
            min_search_rings: 20,
            batch_search_rings: 20,
            spread_columns: 3,
            copy_suffix: " (copy)".to_string(),
            folder_name: "New Folder".to_string(),
            merge_spacing: 0,
            merge_background: "#ffffff".to_string(),
        }
    }
}
