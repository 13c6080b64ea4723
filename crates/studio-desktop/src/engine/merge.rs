//! Merge selected images through the compositor
//!
//! Split in two phases so hosts that cannot hold the engine across an await
//! (the wasm controller) can run the compositor call in between.

use tracing::{info, warn};
use crate::container::add_to_container;
use crate::error::{DesktopError, DesktopResult};
use crate::grid::OccupancyResolver;
use crate::item::{DesktopItem, ImageData, ItemKind};
use crate::math::Point;
use crate::services::{ImageCompositor, MergeAxis, MergeRequest, MergedImage, ServiceError};
use crate::types::{new_item_id, ItemId};
use super::{BusyOp, DesktopEngine};

const MERGE_OP: &str = "merge images";

impl DesktopEngine {
    /// Validate the selection and claim the merge slot
    ///
    /// Image refs are listed in selection order.
    pub fn begin_merge(&mut self, axis: MergeAxis) -> DesktopResult<MergeRequest> {
        let image_urls: Vec<String> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.item(id))
            .filter_map(DesktopItem::as_image)
            .map(|image| image.image_url.clone())
            .collect();
        if image_urls.len() < 2 {
            return Err(self.reject(DesktopError::Validation {
                op: MERGE_OP,
                reason: "select at least two images",
            }));
        }
        if !self.busy.begin(BusyOp::Merge) {
            return Err(self.reject(DesktopError::Busy { op: BusyOp::Merge.label() }));
        }

        Ok(MergeRequest {
            image_urls,
            axis,
            spacing: self.config.merge_spacing,
            background_color: self.config.merge_background.clone(),
        })
    }

    /// Release the merge slot and insert the composite on success
    ///
    /// The new image goes to the first free cell in raster order. A failure
    /// leaves the item list untouched.
    pub fn finish_merge(&mut self, outcome: Result<MergedImage, ServiceError>) -> DesktopResult<ItemId> {
        self.busy.end(BusyOp::Merge);
        let merged = match outcome {
            Ok(merged) => merged,
            Err(err) => {
                warn!(error = %err, "merge failed");
                return Err(self.reject(DesktopError::External {
                    op: MERGE_OP,
                    message: err.message,
                }));
            }
        };

        let grid = self.grid();
        let open = self.open_container.clone();
        let position = {
            let resolver = OccupancyResolver::with_items(
                &grid,
                self.view_items(open.as_deref()),
                self.config.min_search_rings,
            );
            resolver
                .first_free_raster(None, None)
                .unwrap_or_else(|| resolver.find_nearest_free(Point::ORIGIN, None, None))
        };

        let now = self.now();
        let id = new_item_id();
        let name = format!("Merged ({}x{})", merged.width, merged.height);
        self.items.push(DesktopItem::new(
            id.clone(),
            name,
            position,
            now,
            ItemKind::Image(ImageData::new(merged.image_url)),
        ));
        if let Some(container_id) = open {
            add_to_container(&mut self.items, &container_id, &[id.clone()], now)?;
        }

        self.select_only_ids(vec![id.clone()]);
        info!(item_id = %id, x = position.x, y = position.y, "inserted merged image");
        self.commit_items();
        Ok(id)
    }

    /// Merge the selected images and insert the composite
    pub async fn merge_selected<C: ImageCompositor>(
        &mut self,
        compositor: &C,
        axis: MergeAxis,
    ) -> DesktopResult<ItemId> {
        let request = self.begin_merge(axis)?;
        let outcome = compositor.merge_images(request).await;
        self.finish_merge(outcome)
    }
}
