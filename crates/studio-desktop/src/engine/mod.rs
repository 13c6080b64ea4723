//! Desktop engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `input`: Pointer events, drag commit, marquee and context menu
//! - `items`: Folder creation, rename, delete, move-out, history promotion
//! - `stacks`: Stack creation, expansion, dissolution, auto-stacking
//! - `clipboard`: Copy, cut and paste
//! - `layout`: Reorganize
//! - `merge`: Merging images through the compositor
//! - `ingest`: File-drop import through the media store

mod busy;
mod clipboard;
mod ingest;
mod input;
mod items;
mod layout;
mod merge;
mod stacks;

use std::collections::HashSet;
use tracing::{debug, info, warn};
use crate::clipboard::ClipboardState;
use crate::clock::{Clock, SystemClock};
use crate::config::DesktopConfig;
use crate::container::{find_item, top_level_items, visible_items};
use crate::error::DesktopError;
use crate::grid::{GridLayout, OccupancyResolver};
use crate::host::{HostRequest, Notice};
use crate::input::{DragState, InputRouter};
use crate::item::{classify, DesktopItem, DisplayState, ItemKind};
use crate::math::Point;
use crate::menu::ContextMenu;
use crate::selection::Selection;
use crate::services::{RebuiltThumbnail, ServiceError, ThumbnailRepair, ThumbnailResolution, ThumbnailService};
use crate::types::{ItemId, Timestamp};
use crate::viewport::Viewport;

pub use busy::{BusyFlags, BusyOp};
pub use ingest::{prepare_entries, DroppedEntry, IngestFailure, IngestReport, PreparedEntry};
pub use items::HistoryImage;
pub use stacks::AutoStackReport;

/// Desktop engine coordinating all desktop components
///
/// Owns a working copy of the host's item list plus the interaction state
/// (selection, open container, drag, clipboard, context menu). Every mutation
/// ends with a whole-list [`HostRequest::ItemsChanged`] in the outbox.
pub struct DesktopEngine {
    pub(crate) config: DesktopConfig,
    pub(crate) items: Vec<DesktopItem>,
    pub(crate) selection: Selection,
    pub(crate) open_container: Option<ItemId>,
    pub(crate) viewport: Viewport,
    pub(crate) input: InputRouter,
    pub(crate) clipboard: Option<ClipboardState>,
    pub(crate) context_menu: Option<ContextMenu>,
    pub(crate) busy: BusyFlags,
    pub(crate) thumbnails: ThumbnailRepair,
    clock: Box<dyn Clock>,
    outbox: Vec<HostRequest>,
}

impl Default for DesktopEngine {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl DesktopEngine {
    /// Create an engine with the default configuration and the system clock
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(DesktopConfig::default(), width, height, Box::new(SystemClock))
    }

    /// Create an engine with explicit configuration and time source
    pub fn with_config(config: DesktopConfig, width: f32, height: f32, clock: Box<dyn Clock>) -> Self {
        let viewport = Viewport::new(width, height, &config);
        Self {
            config,
            items: Vec::new(),
            selection: Selection::new(),
            open_container: None,
            viewport,
            input: InputRouter::new(),
            clipboard: None,
            context_menu: None,
            busy: BusyFlags::new(),
            thumbnails: ThumbnailRepair::new(),
            clock,
            outbox: Vec::new(),
        }
    }

    // ---- Host input ----

    /// Replace the working item list with the host's authoritative one
    ///
    /// Selected ids that vanished are dropped; an open container that
    /// vanished is closed.
    pub fn set_items(&mut self, items: Vec<DesktopItem>) {
        self.items = items;

        let before = self.selection.len();
        let existing: HashSet<&str> = self.items.iter().map(|i| i.id.as_str()).collect();
        self.selection.retain(|id| existing.contains(id));
        if self.selection.len() != before {
            self.emit_selection();
        }

        let open_is_gone = self
            .open_container
            .as_deref()
            .map(|id| !find_item(&self.items, id).is_some_and(DesktopItem::is_container))
            .unwrap_or(false);
        if open_is_gone {
            self.open_container = None;
            self.outbox.push(HostRequest::CloseContainer);
        }
        debug!(count = self.items.len(), "items replaced by host");
    }

    /// Replace the selection (host-driven, no echo)
    pub fn set_selection(&mut self, ids: Vec<ItemId>) {
        self.selection = Selection::from_ids(ids);
    }

    /// Navigate into a folder or stack
    pub fn open_container(&mut self, id: &str) -> Result<(), DesktopError> {
        let item = find_item(&self.items, id).ok_or_else(|| DesktopError::ItemNotFound(id.to_string()))?;
        if !item.is_container() {
            return Err(DesktopError::NotAContainer(id.to_string()));
        }
        self.cancel_interaction();
        self.open_container = Some(id.to_string());
        self.clear_selection();
        self.outbox.push(HostRequest::OpenContainer { id: id.to_string() });
        debug!(container_id = id, "opened container");
        Ok(())
    }

    /// Navigate back to the top level
    pub fn close_container(&mut self) {
        if self.open_container.take().is_some() {
            self.cancel_interaction();
            self.clear_selection();
            self.outbox.push(HostRequest::CloseContainer);
        }
    }

    /// Resize the viewport
    ///
    /// Top-level items that fall outside the new bounds are moved to the
    /// nearest free in-bounds cell. Items inside bounds are never touched.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.viewport.resize(width, height, &self.config) {
            return;
        }
        let grid = self.grid();

        let tops = top_level_items(&self.items);
        let stray: Vec<(ItemId, Point)> = tops
            .iter()
            .filter(|item| !grid.in_bounds(item.position))
            .map(|item| (item.id.clone(), item.position))
            .collect();
        if stray.is_empty() {
            return;
        }

        let resolver = OccupancyResolver::with_items(
            &grid,
            tops.iter().copied().filter(|item| grid.in_bounds(item.position)),
            self.config.min_search_rings,
        );
        let mut occupied = resolver.occupied_cells(|_| false);
        let mut moves = Vec::with_capacity(stray.len());
        for (id, position) in stray {
            let target = resolver.find_nearest_free(position, None, Some(&occupied));
            occupied.insert(grid.cell_of(target));
            moves.push((id, target));
        }

        let moved = self.apply_positions(&moves);
        info!(moved, max_x = grid.bounds().max_x, max_y = grid.bounds().max_y, "repaired layout after resize");
        self.commit_items();
    }

    // ---- Host output ----

    /// Drain queued host requests
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Peek at queued host requests
    #[inline]
    pub fn pending_requests(&self) -> &[HostRequest] {
        &self.outbox
    }

    // ---- Queries ----

    /// Working item list
    #[inline]
    pub fn items(&self) -> &[DesktopItem] {
        &self.items
    }

    /// Look up an item
    #[inline]
    pub fn item(&self, id: &str) -> Option<&DesktopItem> {
        find_item(&self.items, id)
    }

    /// Items shown in the current navigation state
    pub fn visible_items(&self) -> Vec<&DesktopItem> {
        visible_items(&self.items, self.open_container.as_deref())
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn open_container_id(&self) -> Option<&str> {
        self.open_container.as_deref()
    }

    #[inline]
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current grid (copied; it is small)
    #[inline]
    pub fn grid(&self) -> GridLayout {
        *self.viewport.grid()
    }

    #[inline]
    pub fn clipboard(&self) -> Option<&ClipboardState> {
        self.clipboard.as_ref()
    }

    #[inline]
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Active pointer interaction, if any
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.input.drag_state()
    }

    /// Check if an async operation is in flight
    #[inline]
    pub fn is_busy(&self, op: BusyOp) -> bool {
        self.busy.is_busy(op)
    }

    /// How an item icon should be rendered
    pub fn display_state(&self, id: &str) -> Option<DisplayState> {
        self.item(id).map(|item| classify(item, &self.items, &self.thumbnails))
    }

    // ---- Thumbnails ----

    /// Handle a thumbnail that failed to load
    ///
    /// A rebuilt thumbnail replaces the failed ref on every video using it.
    pub async fn repair_thumbnail<S: ThumbnailService>(&mut self, service: &S, url: &str) -> ThumbnailResolution {
        let resolution = self.thumbnails.repair(service, url).await;
        if let ThumbnailResolution::Rebuilt(rebuilt) = &resolution {
            self.replace_thumbnail(url, rebuilt);
        }
        resolution
    }

    /// Claim a thumbnail rebuild the host runs itself
    pub fn begin_thumbnail_repair(&mut self, url: &str) -> bool {
        self.thumbnails.begin(url)
    }

    /// Record the result of a rebuild claimed with `begin_thumbnail_repair`
    pub fn finish_thumbnail_repair(
        &mut self,
        url: &str,
        outcome: Result<RebuiltThumbnail, ServiceError>,
    ) -> ThumbnailResolution {
        let resolution = self.thumbnails.finish(url, outcome);
        if let ThumbnailResolution::Rebuilt(rebuilt) = &resolution {
            self.replace_thumbnail(url, rebuilt);
        }
        resolution
    }

    fn replace_thumbnail(&mut self, url: &str, rebuilt: &str) {
        let now = self.now();
        let mut changed = false;
        for item in self.items.iter_mut() {
            if let ItemKind::Video(video) = &mut item.kind {
                if video.thumbnail_url.as_deref() == Some(url) {
                    video.thumbnail_url = Some(rebuilt.to_string());
                    item.updated_at = now;
                    changed = true;
                }
            }
        }
        if changed {
            self.commit_items();
        }
    }

    /// Forget all thumbnail repair state
    pub fn reset_thumbnails(&mut self) {
        self.thumbnails.reset();
    }

    // ---- Internal helpers ----

    #[inline]
    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now_ms()
    }

    /// Items visible in `container` (or at top level)
    pub(crate) fn view_items(&self, container: Option<&str>) -> Vec<&DesktopItem> {
        visible_items(&self.items, container)
    }

    pub(crate) fn require_top_level(&mut self, op: &'static str) -> Result<(), DesktopError> {
        if self.open_container.is_some() {
            return Err(self.reject(DesktopError::Precondition {
                op,
                reason: "close the open folder first",
            }));
        }
        Ok(())
    }

    /// Place `count` new or moved items around `anchor` in `container`'s view
    ///
    /// Item `i` aims at `anchor + spread_offset(i)` and is resolved against a
    /// shared occupied set, so a batch never overlaps itself. Ids in `skip`
    /// do not count as occupants.
    pub(crate) fn place_batch(
        &self,
        container: Option<&str>,
        anchor: Point,
        count: usize,
        skip: &HashSet<&str>,
    ) -> Vec<Point> {
        let grid = self.grid();
        let resolver = OccupancyResolver::with_items(
            &grid,
            self.view_items(container),
            self.config.min_search_rings,
        );
        let mut occupied = resolver.occupied_cells(|id| skip.contains(id));
        (0..count)
            .map(|i| {
                let target = anchor + grid.spread_offset(i, self.config.spread_columns);
                let placed = resolver.find_nearest_free(target, None, Some(&occupied));
                occupied.insert(grid.cell_of(placed));
                placed
            })
            .collect()
    }

    /// Write positions; returns how many items actually moved
    pub(crate) fn apply_positions(&mut self, moves: &[(ItemId, Point)]) -> usize {
        let now = self.now();
        let mut moved = 0;
        for (id, position) in moves {
            if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
                if item.position != *position {
                    item.position = *position;
                    item.touch(now);
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Queue a whole-list replacement
    pub(crate) fn commit_items(&mut self) {
        self.outbox.push(HostRequest::ItemsChanged {
            items: self.items.clone(),
        });
    }

    pub(crate) fn emit_selection(&mut self) {
        self.outbox.push(HostRequest::SelectionChanged {
            ids: self.selection.ids().to_vec(),
        });
    }

    pub(crate) fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.emit_selection();
        }
    }

    pub(crate) fn select_only_ids(&mut self, ids: Vec<ItemId>) {
        let next = Selection::from_ids(ids);
        if next != self.selection {
            self.selection = next;
            self.emit_selection();
        }
    }

    pub(crate) fn push_request(&mut self, request: HostRequest) {
        self.outbox.push(request);
    }

    /// Log a refused operation, surfacing it as a notice when user visible
    pub(crate) fn reject(&mut self, err: DesktopError) -> DesktopError {
        if err.is_user_visible() {
            warn!(error = %err, "operation refused");
            self.outbox.push(HostRequest::Notice(Notice::error(err.to_string())));
        } else {
            debug!(error = %err, "operation rejected");
        }
        err
    }
}
