//! Input handling for pointer events, drags, marquee and context menu

use tracing::debug;
use crate::container::add_to_container;
use crate::error::{DesktopError, DesktopResult};
use crate::grid::OccupancyResolver;
use crate::host::{HostRequest, ItemAction};
use crate::input::{DragState, InputResult, Modifiers, PRIMARY_BUTTON};
use crate::item::DesktopItem;
use crate::math::{Point, Rect, Vec2};
use crate::menu::{menu_actions, ContextMenu, MenuAction, MenuContext};
use crate::types::ItemId;
use super::DesktopEngine;

impl DesktopEngine {
    /// Handle pointer down (container-local coordinates)
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, button: u8, modifiers: Modifiers) -> InputResult {
        self.context_menu = None;

        if self.input.is_tracking() || button != PRIMARY_BUTTON {
            return InputResult::Unhandled;
        }

        let pos = Vec2::new(x, y);
        match self.item_at(pos).map(|item| item.id.clone()) {
            Some(id) => self.press_item(id, pos, modifiers),
            None => {
                if self.input.start_marquee(pos, modifiers.any()) {
                    self.push_request(HostRequest::CapturePointer);
                }
                InputResult::Handled
            }
        }
    }

    /// Handle pointer move while tracking
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);
        if !self.input.track(pos) {
            return InputResult::Unhandled;
        }
        if self.input.drag_state().is_some_and(DragState::is_dragging_items) {
            let target = self.folder_drop_target(pos);
            self.input.set_drop_target(target);
        }
        InputResult::Handled
    }

    /// Handle pointer up, committing the active interaction
    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> InputResult {
        let pos = Vec2::new(x, y);
        if !self.input.track(pos) {
            return InputResult::Unhandled;
        }
        if self.input.drag_state().is_some_and(DragState::is_dragging_items) {
            let target = self.folder_drop_target(pos);
            self.input.set_drop_target(target);
        }

        let Some(state) = self.input.finish() else {
            return InputResult::Unhandled;
        };
        self.push_request(HostRequest::ReleasePointer);

        match state {
            DragState::Selecting { origin, current, additive } => {
                self.commit_marquee(Rect::from_corners(origin, current), additive);
            }
            DragState::DraggingItems { anchor, delta, drop_target, .. } => match drop_target {
                Some(folder) => self.commit_drop_into(&folder),
                // a plain click leaves the layout alone
                None if delta.is_zero() => {}
                None => self.commit_drag(&anchor, delta),
            },
        }
        InputResult::Handled
    }

    /// Handle a double click: open containers, preview media
    pub fn handle_double_click(&mut self, x: f32, y: f32) -> InputResult {
        let Some(id) = self.item_at(Vec2::new(x, y)).map(|item| item.id.clone()) else {
            return InputResult::Unhandled;
        };
        match self.activate_item(&id) {
            Ok(()) => InputResult::Handled,
            Err(_) => InputResult::Unhandled,
        }
    }

    /// Open a container or preview a media item
    pub fn activate_item(&mut self, id: &str) -> DesktopResult<()> {
        let is_container = self
            .item(id)
            .map(DesktopItem::is_container)
            .ok_or_else(|| DesktopError::ItemNotFound(id.to_string()))?;
        if is_container {
            self.open_container(id)
        } else {
            self.push_request(HostRequest::ItemAction {
                action: ItemAction::Preview,
                id: id.to_string(),
            });
            Ok(())
        }
    }

    /// Leave any tracking state without committing; also closes the menu
    pub fn cancel_interaction(&mut self) {
        self.context_menu = None;
        if self.input.cancel().is_some() {
            debug!("pointer interaction cancelled");
            self.push_request(HostRequest::ReleasePointer);
        }
    }

    // ---- Context menu ----

    /// Open the context menu at a point
    ///
    /// A target outside the current selection becomes the only selected item.
    pub fn open_context_menu(&mut self, x: f32, y: f32) -> InputResult {
        if self.input.is_tracking() {
            return InputResult::Unhandled;
        }
        let point = Vec2::new(x, y);
        let target = self.item_at(point).map(|item| item.id.clone());
        if let Some(id) = &target {
            if !self.selection.contains(id) {
                self.select_only_ids(vec![id.clone()]);
            }
        }

        let ctx = self.menu_context();
        let actions = menu_actions(target.as_deref().and_then(|id| self.item(id)), ctx);
        self.context_menu = Some(ContextMenu { point, target, actions });
        InputResult::Handled
    }

    /// Close the context menu
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Run an entry of the open context menu, closing it
    pub fn run_menu_action(&mut self, action: MenuAction) -> DesktopResult<()> {
        let Some(menu) = self.context_menu.take() else {
            return Err(self.reject(DesktopError::Validation {
                op: "run menu action",
                reason: "no context menu is open",
            }));
        };
        let target = menu.target.clone();
        let require_target = |this: &mut Self| -> DesktopResult<ItemId> {
            target.clone().ok_or_else(|| {
                this.reject(DesktopError::Validation {
                    op: "run menu action",
                    reason: "the menu has no target item",
                })
            })
        };

        match action {
            MenuAction::Open => {
                let id = require_target(self)?;
                self.activate_item(&id)
            }
            MenuAction::Item(item_action) => {
                let id = require_target(self)?;
                self.push_request(HostRequest::ItemAction { action: item_action, id });
                Ok(())
            }
            MenuAction::Copy => self.copy_selected().map(|_| ()),
            MenuAction::Cut => self.cut_selected().map(|_| ()),
            MenuAction::Paste => self.paste(Some(menu.point)).map(|_| ()),
            MenuAction::Delete => self.request_delete(),
            MenuAction::NewFolder => self.create_folder(menu.point).map(|_| ()),
            MenuAction::CreateStack => self.create_stack().map(|_| ()),
            MenuAction::ToggleStack => {
                let id = require_target(self)?;
                self.toggle_stack(&id).map(|_| ())
            }
            MenuAction::Unstack => {
                let id = require_target(self)?;
                self.unstack(&id).map(|_| ())
            }
            MenuAction::MoveOut => self.move_out_of_container().map(|_| ()),
            MenuAction::AutoStack => self.auto_stack_by_group().map(|_| ()),
            MenuAction::Reorganize => self.reorganize_layout().map(|_| ()),
        }
    }

    fn menu_context(&self) -> MenuContext {
        let selected: Vec<&DesktopItem> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.item(id))
            .collect();
        MenuContext {
            in_container: self.open_container.is_some(),
            selected: selected.len(),
            selected_images: selected.iter().filter(|item| item.is_image()).count(),
            can_paste: self.clipboard.as_ref().is_some_and(|c| !c.is_empty()),
        }
    }

    // ---- Hit testing ----

    /// Topmost visible item whose icon contains `pos`
    pub fn item_at(&self, pos: Vec2) -> Option<&DesktopItem> {
        let grid = self.grid();
        self.visible_items()
            .into_iter()
            .rev()
            .find(|item| grid.icon_rect(item.position).contains(pos))
    }

    /// Unselected visible folder under the pointer
    fn folder_drop_target(&self, pos: Vec2) -> Option<ItemId> {
        let grid = self.grid();
        self.visible_items()
            .into_iter()
            .rev()
            .filter(|item| item.is_folder() && !self.selection.contains(&item.id))
            .find(|item| grid.icon_rect(item.position).contains(pos))
            .map(|item| item.id.clone())
    }

    // ---- Press ----

    fn press_item(&mut self, id: ItemId, pos: Vec2, modifiers: Modifiers) -> InputResult {
        let before = self.selection.clone();
        if modifiers.toggles() {
            if !self.selection.toggle(&id) {
                self.emit_selection();
                return InputResult::Handled;
            }
        } else if modifiers.shift {
            self.selection.add(&id);
        } else if !(self.selection.contains(&id) && self.selection.len() > 1) {
            self.selection.select_only(&id);
        }
        if self.selection != before {
            self.emit_selection();
        }

        if self.input.start_item_drag(id, pos) {
            self.push_request(HostRequest::CapturePointer);
        }
        InputResult::Handled
    }

    // ---- Commit ----

    fn commit_marquee(&mut self, rect: Rect, additive: bool) {
        let grid = self.grid();
        let hits: Vec<ItemId> = self
            .visible_items()
            .into_iter()
            .filter(|item| rect.contains_inclusive(grid.icon_rect(item.position).center()))
            .map(|item| item.id.clone())
            .collect();

        let before = self.selection.clone();
        if !additive {
            self.selection.clear();
        }
        self.selection.extend(hits);
        if self.selection != before {
            self.emit_selection();
        }
    }

    /// Drop the selection onto a folder
    fn commit_drop_into(&mut self, folder_id: &str) {
        let candidates: Vec<ItemId> = self
            .selection
            .ids()
            .iter()
            .filter(|id| id.as_str() != folder_id)
            .filter(|id| self.item(id).is_some_and(|item| !item.is_container()))
            .cloned()
            .collect();
        if candidates.is_empty() {
            return;
        }

        let now = self.now();
        match add_to_container(&mut self.items, folder_id, &candidates, now) {
            Ok(added) => {
                debug!(folder_id, count = added.len(), "dropped items into folder");
                self.clear_selection();
                if !added.is_empty() {
                    self.commit_items();
                }
            }
            Err(err) => {
                self.reject(err);
            }
        }
    }

    /// Move the dragged selection by `delta`
    fn commit_drag(&mut self, anchor: &str, delta: Vec2) {
        let grid = self.grid();
        let visible = self.visible_items();
        let selected: Vec<&DesktopItem> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| visible.iter().copied().find(|item| &item.id == id))
            .collect();

        let moves: Vec<(ItemId, Point)> = match selected.as_slice() {
            [] => Vec::new(),
            [item] => {
                let resolver = OccupancyResolver::with_items(
                    &grid,
                    visible.iter().copied(),
                    self.config.min_search_rings,
                );
                let target = offset_by(item.position, delta);
                vec![(item.id.clone(), resolver.find_nearest_free(target, Some(item.id.as_str()), None))]
            }
            many => {
                let anchor_old = many
                    .iter()
                    .find(|item| item.id == anchor)
                    .map(|item| item.position)
                    .unwrap_or(many[0].position);
                let applied = grid.place_point(offset_by(anchor_old, delta)) - anchor_old;

                let resolver = OccupancyResolver::with_items(
                    &grid,
                    visible.iter().copied(),
                    self.config.min_search_rings,
                );
                let mut occupied = resolver.occupied_cells(|id| self.selection.contains(id));
                many.iter()
                    .map(|item| {
                        let target = grid.place_point(item.position + applied);
                        let placed = if occupied.contains(&grid.cell_of(target)) {
                            resolver.find_nearest_free_within(
                                target,
                                None,
                                Some(&occupied),
                                self.config.batch_search_rings,
                            )
                        } else {
                            target
                        };
                        occupied.insert(grid.cell_of(placed));
                        (item.id.clone(), placed)
                    })
                    .collect()
            }
        };

        if self.apply_positions(&moves) > 0 {
            debug!(count = moves.len(), "committed drag");
            self.commit_items();
        }
    }
}

/// `pos + delta`, rounded to whole pixels
fn offset_by(pos: Point, delta: Vec2) -> Point {
    Point::new(
        (pos.x as f32 + delta.x).round() as i32,
        (pos.y as f32 + delta.y).round() as i32,
    )
}
