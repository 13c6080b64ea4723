//! Copy, cut and paste

use std::collections::HashSet;
use tracing::info;
use crate::clipboard::{ClipboardAction, ClipboardState};
use crate::container::{add_to_container, existing_members, find_item, scrub_from_containers};
use crate::error::{DesktopError, DesktopResult};
use crate::item::DesktopItem;
use crate::math::{Point, Vec2};
use crate::types::{new_item_id, ItemId, Timestamp};
use super::DesktopEngine;

impl DesktopEngine {
    /// Snapshot the selection for a later paste as copies
    pub fn copy_selected(&mut self) -> DesktopResult<usize> {
        self.snapshot_selection(ClipboardAction::Copy, "copy")
    }

    /// Snapshot the selection for a later paste as a move
    pub fn cut_selected(&mut self) -> DesktopResult<usize> {
        self.snapshot_selection(ClipboardAction::Cut, "cut")
    }

    /// Paste the clipboard at `point` (default: the origin)
    ///
    /// With a container open, pasted items join it. Returns the ids of the
    /// pasted top-level entries, which become the selection.
    pub fn paste(&mut self, point: Option<Vec2>) -> DesktopResult<Vec<ItemId>> {
        let Some(clip) = self.clipboard.clone().filter(|c| !c.is_empty()) else {
            return Err(self.reject(DesktopError::Validation {
                op: "paste",
                reason: "clipboard is empty",
            }));
        };
        let anchor = point.map(|p| self.grid().place(p)).unwrap_or(Point::ORIGIN);

        let pasted = match clip.action {
            ClipboardAction::Copy => self.paste_copies(&clip.items, anchor)?,
            ClipboardAction::Cut => self.paste_moved(&clip.items, anchor)?,
        };

        self.select_only_ids(pasted.clone());
        info!(count = pasted.len(), cut = clip.is_cut(), "pasted items");
        self.commit_items();
        Ok(pasted)
    }

    fn snapshot_selection(&mut self, action: ClipboardAction, op: &'static str) -> DesktopResult<usize> {
        let items: Vec<DesktopItem> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.item(id))
            .cloned()
            .collect();
        if items.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op,
                reason: "nothing is selected",
            }));
        }
        let count = items.len();
        self.clipboard = Some(ClipboardState::new(items, action));
        Ok(count)
    }

    /// Whether `item` may be placed into the open container (or top level)
    fn fits_open_container(&self, item: &DesktopItem) -> bool {
        match self.open_container.as_deref().and_then(|id| self.item(id)) {
            None => true,
            Some(container) if container.as_stack().is_some() => item.is_image(),
            Some(_) => !item.is_container(),
        }
    }

    fn paste_copies(&mut self, sources: &[DesktopItem], anchor: Point) -> DesktopResult<Vec<ItemId>> {
        let sources: Vec<&DesktopItem> = sources
            .iter()
            .filter(|item| self.fits_open_container(item))
            .collect();
        if sources.is_empty() {
            return Err(self.reject(DesktopError::Validation {
                op: "paste",
                reason: "folders cannot be pasted into a folder",
            }));
        }

        let open = self.open_container.clone();
        let positions = self.place_batch(open.as_deref(), anchor, sources.len(), &HashSet::new());
        let now = self.now();

        let mut created: Vec<DesktopItem> = Vec::new();
        let mut pasted: Vec<ItemId> = Vec::with_capacity(sources.len());
        for (source, position) in sources.into_iter().zip(positions) {
            let mut copy = clone_item(source, now);
            copy.name = format!("{}{}", source.name, self.config.copy_suffix);
            copy.position = position;

            // containers are deep-cloned so membership stays exclusive
            let live = find_item(&self.items, &source.id).unwrap_or(source);
            let member_copies: Vec<DesktopItem> = existing_members(live, &self.items)
                .map(|member| clone_item(member, now))
                .collect();
            if let Some(ids) = copy.member_ids_mut() {
                *ids = member_copies.iter().map(|m| m.id.clone()).collect();
            }

            pasted.push(copy.id.clone());
            created.push(copy);
            created.extend(member_copies);
        }
        self.items.extend(created);

        if let Some(container_id) = open {
            add_to_container(&mut self.items, &container_id, &pasted, now)?;
        }
        Ok(pasted)
    }

    fn paste_moved(&mut self, sources: &[DesktopItem], anchor: Point) -> DesktopResult<Vec<ItemId>> {
        let open = self.open_container.clone();
        let ids: Vec<ItemId> = sources
            .iter()
            .filter(|source| Some(source.id.as_str()) != open.as_deref())
            .filter_map(|source| self.item(&source.id))
            .filter(|item| self.fits_open_container(item))
            .map(|item| item.id.clone())
            .collect();
        if ids.is_empty() {
            self.clipboard = None;
            return Err(self.reject(DesktopError::Validation {
                op: "paste",
                reason: "the cut items no longer fit here",
            }));
        }

        let now = self.now();
        match &open {
            Some(container_id) => {
                add_to_container(&mut self.items, container_id, &ids, now)?;
            }
            None => {
                let moving: HashSet<&str> = ids.iter().map(String::as_str).collect();
                scrub_from_containers(&mut self.items, &moving, now);
            }
        }

        let skip: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let positions = self.place_batch(open.as_deref(), anchor, ids.len(), &skip);
        let moves: Vec<(ItemId, Point)> = ids.iter().cloned().zip(positions).collect();
        self.apply_positions(&moves);

        self.clipboard = None;
        Ok(ids)
    }
}

/// Copy of `item` with a fresh id and timestamps
fn clone_item(item: &DesktopItem, now: Timestamp) -> DesktopItem {
    let mut copy = item.clone();
    copy.id = new_item_id();
    copy.created_at = now;
    copy.updated_at = now;
    copy
}
