//! Item lifecycle: folders, rename, delete, move-out, history promotion

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::container::{
    add_to_container, find_item, position_of, remove_from_container, scrub_from_containers,
};
use crate::error::{DesktopError, DesktopResult};
use crate::grid::OccupancyResolver;
use crate::host::HostRequest;
use crate::item::{DesktopItem, FolderData, ImageData, ItemKind};
use crate::math::{Point, Vec2};
use crate::types::{new_item_id, ItemId};
use super::DesktopEngine;

/// A generation-history record promoted onto the desktop
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryImage {
    pub image_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub history_id: Option<String>,
    #[serde(default)]
    pub is_third_party: bool,
}

/// Longest prompt prefix used as an item name
const PROMPT_NAME_CHARS: usize = 40;

impl HistoryImage {
    /// Name shown on the desktop: explicit name, else the prompt, else "Image"
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(prompt) if prompt.chars().count() > PROMPT_NAME_CHARS => {
                let cut: String = prompt.chars().take(PROMPT_NAME_CHARS).collect();
                format!("{}...", cut.trim_end())
            }
            Some(prompt) => prompt.to_string(),
            None => "Image".to_string(),
        }
    }
}

impl DesktopEngine {
    /// Create an empty folder at the nearest free cell to `point`
    pub fn create_folder(&mut self, point: Vec2) -> DesktopResult<ItemId> {
        self.require_top_level("create a folder")?;

        let grid = self.grid();
        let position = {
            let resolver = OccupancyResolver::with_items(
                &grid,
                self.view_items(None),
                self.config.min_search_rings,
            );
            resolver.find_nearest_free(grid.place(point), None, None)
        };

        let id = new_item_id();
        let folder = DesktopItem::new(
            id.clone(),
            self.config.folder_name.clone(),
            position,
            self.now(),
            ItemKind::Folder(FolderData::default()),
        );
        self.items.push(folder);
        info!(item_id = %id, x = position.x, y = position.y, "created folder");
        self.commit_items();
        Ok(id)
    }

    /// Rename an item
    pub fn rename_item(&mut self, id: &str, name: &str) -> DesktopResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op: "rename",
                reason: "name must not be empty",
            }));
        }
        let now = self.now();
        let Some(index) = position_of(&self.items, id) else {
            return Err(self.reject(DesktopError::ItemNotFound(id.to_string())));
        };
        let item = &mut self.items[index];
        if item.name == name {
            return Ok(());
        }
        item.name = name.to_string();
        item.touch(now);
        self.commit_items();
        Ok(())
    }

    /// Ask the host to confirm deleting the selection
    pub fn request_delete(&mut self) -> DesktopResult<()> {
        if self.selection.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op: "delete",
                reason: "nothing is selected",
            }));
        }
        let ids = self.selection.ids().to_vec();
        self.push_request(HostRequest::ConfirmDelete { ids });
        Ok(())
    }

    /// Delete the selected items (after confirmation)
    pub fn delete_selected(&mut self) -> DesktopResult<usize> {
        if self.selection.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op: "delete",
                reason: "nothing is selected",
            }));
        }
        let ids = self.selection.ids().to_vec();
        self.delete_items(&ids)
    }

    /// Delete items by id
    ///
    /// Ids are scrubbed from every container. Members of a deleted folder or
    /// stack are kept and return to the top level, placed near the container.
    pub fn delete_items(&mut self, ids: &[ItemId]) -> DesktopResult<usize> {
        let doomed: HashSet<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| find_item(&self.items, id).is_some())
            .collect();
        if doomed.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op: "delete",
                reason: "none of the items exist",
            }));
        }

        // Members of deleted containers that survive and are not listed elsewhere
        let mut released: Vec<(ItemId, Point)> = Vec::new();
        for container in self.items.iter().filter(|item| doomed.contains(item.id.as_str())) {
            for member in container.member_ids().unwrap_or(&[]) {
                let orphaned = !doomed.contains(member.as_str())
                    && find_item(&self.items, member).is_some()
                    && !released.iter().any(|(id, _)| id == member);
                if orphaned {
                    released.push((member.clone(), container.position));
                }
            }
        }

        let now = self.now();
        let was_open = self
            .open_container
            .as_deref()
            .is_some_and(|open| doomed.contains(open));

        self.items.retain(|item| !doomed.contains(item.id.as_str()));
        scrub_from_containers(&mut self.items, &doomed, now);
        self.rehome_top_level(&released);
        if was_open {
            self.open_container = None;
            self.push_request(HostRequest::CloseContainer);
        }

        let count = doomed.len();
        let selected_before = self.selection.len();
        self.selection.retain(|id| !doomed.contains(id));
        if self.selection.len() != selected_before {
            self.emit_selection();
        }
        info!(count, released = released.len(), "deleted items");
        self.commit_items();
        Ok(count)
    }

    /// Move the selected members of the open container back to the top level
    ///
    /// Only membership changes; each item shows up at its stored position.
    pub fn move_out_of_container(&mut self) -> DesktopResult<Vec<ItemId>> {
        let Some(container_id) = self.open_container.clone() else {
            return Err(self.reject(DesktopError::Precondition {
                op: "move items out",
                reason: "no folder is open",
            }));
        };
        let ids: Vec<ItemId> = self
            .selection
            .ids()
            .iter()
            .filter(|id| self.item(&container_id).is_some_and(|c| c.has_member(id)))
            .cloned()
            .collect();
        if ids.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op: "move items out",
                reason: "select items inside the folder",
            }));
        }

        let now = self.now();
        remove_from_container(&mut self.items, &container_id, &ids, now)?;

        self.clear_selection();
        info!(container_id = %container_id, count = ids.len(), "moved items out of container");
        self.commit_items();
        Ok(ids)
    }

    /// Add a generation-history image to the desktop
    ///
    /// Without a point the image lands on the first free cell. With a
    /// container open, the image joins it.
    pub fn promote_history_image(&mut self, record: HistoryImage, point: Option<Vec2>) -> DesktopResult<ItemId> {
        let grid = self.grid();
        let open = self.open_container.clone();
        let position = {
            let resolver = OccupancyResolver::with_items(
                &grid,
                self.view_items(open.as_deref()),
                self.config.min_search_rings,
            );
            match point {
                Some(point) => resolver.find_nearest_free(grid.place(point), None, None),
                None => resolver
                    .first_free_raster(None, None)
                    .unwrap_or_else(|| resolver.find_nearest_free(Point::ORIGIN, None, None)),
            }
        };

        let id = new_item_id();
        let name = record.display_name();
        let kind = ItemKind::Image(ImageData {
            image_url: record.image_url,
            prompt: record.prompt,
            model: record.model,
            is_third_party: record.is_third_party,
            history_id: record.history_id,
            is_loading: false,
            loading_error: None,
        });
        let now = self.now();
        self.items.push(DesktopItem::new(id.clone(), name, position, now, kind));

        if let Some(container_id) = open {
            add_to_container(&mut self.items, &container_id, &[id.clone()], now)?;
        }
        info!(item_id = %id, "promoted history image");
        self.commit_items();
        Ok(id)
    }

    /// Place items on the top-level grid, each seeded at its given position
    ///
    /// Items are resolved one by one against a shared occupied set that
    /// excludes themselves.
    pub(crate) fn rehome_top_level(&mut self, seeds: &[(ItemId, Point)]) {
        if seeds.is_empty() {
            return;
        }
        let grid = self.grid();
        let skip: HashSet<&str> = seeds.iter().map(|(id, _)| id.as_str()).collect();
        let moves: Vec<(ItemId, Point)> = {
            let resolver = OccupancyResolver::with_items(
                &grid,
                self.view_items(None),
                self.config.min_search_rings,
            );
            let mut occupied = resolver.occupied_cells(|id| skip.contains(id));
            seeds
                .iter()
                .map(|(id, seed)| {
                    let placed = resolver.find_nearest_free(*seed, None, Some(&occupied));
                    occupied.insert(grid.cell_of(placed));
                    (id.clone(), placed)
                })
                .collect()
        };
        self.apply_positions(&moves);
    }
}
