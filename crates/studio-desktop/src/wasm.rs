//! WASM exports for the desktop workspace
//!
//! This module provides wasm-bindgen exports for the DesktopEngine,
//! allowing React to drive the desktop directly. Structured values cross the
//! boundary as JSON strings. Async collaborators stay on the JS side: merge
//! and import are split into `begin_*` / `finish_*` calls around the fetch.

use wasm_bindgen::prelude::*;

use crate::clock::Clock;
use crate::config::DesktopConfig;
use crate::engine::{DesktopEngine, HistoryImage, IngestFailure, PreparedEntry};
use crate::error::DesktopError;
use crate::input::Modifiers;
use crate::item::DesktopItem;
use crate::math::Vec2;
use crate::menu::MenuAction;
use crate::services::{MergeAxis, MergedImage, RebuiltThumbnail, ServiceError, ThumbnailResolution};
use crate::types::{ItemId, Timestamp};

/// Clock backed by `Date.now()`
struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> Timestamp {
        js_sys::Date::now() as Timestamp
    }
}

fn to_js(err: DesktopError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| to_js(DesktopError::SerializationError(e.to_string())))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Desktop controller for WASM - wraps DesktopEngine with JS-friendly API
#[wasm_bindgen]
pub struct DesktopController {
    engine: DesktopEngine,
}

#[wasm_bindgen]
impl DesktopController {
    /// Create a controller with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            engine: DesktopEngine::with_config(DesktopConfig::default(), width, height, Box::new(DateClock)),
        }
    }

    /// Create a controller from a (partial) JSON configuration
    #[wasm_bindgen]
    pub fn with_config(config_json: &str, width: f32, height: f32) -> Result<DesktopController, JsValue> {
        let config: DesktopConfig = parse(config_json)?;
        Ok(Self {
            engine: DesktopEngine::with_config(config, width, height, Box::new(DateClock)),
        })
    }

    // =========================================================================
    // Host state
    // =========================================================================

    /// Replace the item list
    #[wasm_bindgen]
    pub fn set_items_json(&mut self, items_json: &str) -> Result<(), JsValue> {
        let items: Vec<DesktopItem> = parse(items_json)?;
        self.engine.set_items(items);
        Ok(())
    }

    /// Replace the selection
    #[wasm_bindgen]
    pub fn set_selection_json(&mut self, ids_json: &str) -> Result<(), JsValue> {
        let ids: Vec<ItemId> = parse(ids_json)?;
        self.engine.set_selection(ids);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn open_container(&mut self, id: &str) -> Result<(), JsValue> {
        self.engine.open_container(id).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn close_container(&mut self) {
        self.engine.close_container();
    }

    /// Resize the desktop viewport
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(width, height);
    }

    /// Drain pending host requests as a JSON array
    #[wasm_bindgen]
    pub fn take_requests_json(&mut self) -> String {
        to_json(&self.engine.take_requests())
    }

    /// Whether the host should drain requests after this event
    #[wasm_bindgen]
    pub fn has_pending_requests(&self) -> bool {
        !self.engine.pending_requests().is_empty()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[wasm_bindgen]
    pub fn get_visible_items_json(&self) -> String {
        to_json(&self.engine.visible_items())
    }

    #[wasm_bindgen]
    pub fn get_selection_json(&self) -> String {
        to_json(self.engine.selection())
    }

    /// Grid bounds and size as JSON
    #[wasm_bindgen]
    pub fn get_grid_json(&self) -> String {
        let grid = self.engine.grid();
        to_json(&serde_json::json!({
            "gridSize": grid.grid_size(),
            "iconSize": grid.icon_size(),
            "maxX": grid.bounds().max_x,
            "maxY": grid.bounds().max_y,
        }))
    }

    /// Active drag (item delta or marquee rectangle) as JSON, `null` when idle
    #[wasm_bindgen]
    pub fn get_drag_json(&self) -> String {
        let Some(state) = self.engine.drag_state() else {
            return "null".to_string();
        };
        match state.marquee_rect() {
            Some(rect) => to_json(&serde_json::json!({ "type": "marquee", "rect": rect })),
            None => {
                let delta = match state {
                    crate::input::DragState::DraggingItems { delta, .. } => *delta,
                    crate::input::DragState::Selecting { .. } => Vec2::ZERO,
                };
                to_json(&serde_json::json!({
                    "type": "items",
                    "anchor": state.anchor(),
                    "delta": delta,
                    "dropTarget": state.drop_target(),
                }))
            }
        }
    }

    #[wasm_bindgen]
    pub fn get_display_state_json(&self, id: &str) -> String {
        to_json(&self.engine.display_state(id))
    }

    #[wasm_bindgen]
    pub fn get_context_menu_json(&self) -> String {
        to_json(&self.engine.context_menu())
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Handle pointer down; returns true when handled
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, button: u8, shift: bool, ctrl: bool, meta: bool) -> bool {
        self.engine
            .handle_pointer_down(x, y, button, Modifiers::new(shift, ctrl, meta))
            .is_handled()
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.engine.handle_pointer_move(x, y).is_handled()
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.engine.handle_pointer_up(x, y).is_handled()
    }

    #[wasm_bindgen]
    pub fn double_click(&mut self, x: f32, y: f32) -> bool {
        self.engine.handle_double_click(x, y).is_handled()
    }

    #[wasm_bindgen]
    pub fn cancel_interaction(&mut self) {
        self.engine.cancel_interaction();
    }

    #[wasm_bindgen]
    pub fn open_context_menu(&mut self, x: f32, y: f32) -> bool {
        self.engine.open_context_menu(x, y).is_handled()
    }

    #[wasm_bindgen]
    pub fn close_context_menu(&mut self) {
        self.engine.close_context_menu();
    }

    /// Run a menu entry given as JSON (e.g. `"copy"` or `{"item":"rename"}`)
    #[wasm_bindgen]
    pub fn run_menu_action_json(&mut self, action_json: &str) -> Result<(), JsValue> {
        let action: MenuAction = parse(action_json)?;
        self.engine.run_menu_action(action).map_err(to_js)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    #[wasm_bindgen]
    pub fn create_folder(&mut self, x: f32, y: f32) -> Result<String, JsValue> {
        self.engine.create_folder(Vec2::new(x, y)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn rename_item(&mut self, id: &str, name: &str) -> Result<(), JsValue> {
        self.engine.rename_item(id, name).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn request_delete(&mut self) -> Result<(), JsValue> {
        self.engine.request_delete().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn delete_selected(&mut self) -> Result<usize, JsValue> {
        self.engine.delete_selected().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn move_out_of_container(&mut self) -> Result<String, JsValue> {
        self.engine.move_out_of_container().map(|ids| to_json(&ids)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn create_stack(&mut self) -> Result<String, JsValue> {
        self.engine.create_stack().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn toggle_stack(&mut self, id: &str) -> Result<bool, JsValue> {
        self.engine.toggle_stack(id).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn unstack(&mut self, id: &str) -> Result<String, JsValue> {
        self.engine.unstack(id).map(|ids| to_json(&ids)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn auto_stack_by_group(&mut self) -> Result<String, JsValue> {
        self.engine.auto_stack_by_group().map(|report| to_json(&report)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reorganize_layout(&mut self) -> Result<usize, JsValue> {
        self.engine.reorganize_layout().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn copy_selected(&mut self) -> Result<usize, JsValue> {
        self.engine.copy_selected().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn cut_selected(&mut self) -> Result<usize, JsValue> {
        self.engine.cut_selected().map_err(to_js)
    }

    /// Paste at a point, or at the origin when `at_point` is false
    #[wasm_bindgen]
    pub fn paste(&mut self, x: f32, y: f32, at_point: bool) -> Result<String, JsValue> {
        let point = at_point.then(|| Vec2::new(x, y));
        self.engine.paste(point).map(|ids| to_json(&ids)).map_err(to_js)
    }

    /// Promote a generation-history record given as JSON
    #[wasm_bindgen]
    pub fn promote_history_image_json(
        &mut self,
        record_json: &str,
        x: f32,
        y: f32,
        at_point: bool,
    ) -> Result<String, JsValue> {
        let record: HistoryImage = parse(record_json)?;
        let point = at_point.then(|| Vec2::new(x, y));
        self.engine.promote_history_image(record, point).map_err(to_js)
    }

    // =========================================================================
    // Async operations (collaborator runs in JS)
    // =========================================================================

    /// Claim the merge slot; returns the compositor request as JSON
    #[wasm_bindgen]
    pub fn begin_merge(&mut self, axis: &str) -> Result<String, JsValue> {
        let axis = match axis {
            "vertical" => MergeAxis::Vertical,
            _ => MergeAxis::Horizontal,
        };
        self.engine.begin_merge(axis).map(|request| to_json(&request)).map_err(to_js)
    }

    /// Finish a merge with the compositor result (JSON) or its error message
    #[wasm_bindgen]
    pub fn finish_merge(&mut self, result_json: Option<String>, error: Option<String>) -> Result<String, JsValue> {
        let outcome = match (result_json, error) {
            (Some(json), None) => Ok(parse::<MergedImage>(&json)?),
            (_, Some(message)) => Err(ServiceError::new(message)),
            (None, None) => Err(ServiceError::new("compositor returned nothing")),
        };
        self.engine.finish_merge(outcome).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn begin_ingest(&mut self) -> Result<(), JsValue> {
        self.engine.begin_ingest().map_err(to_js)
    }

    /// Commit prepared entries (JSON) and failures (JSON); returns the report
    #[wasm_bindgen]
    pub fn finish_ingest_json(
        &mut self,
        prepared_json: &str,
        failures_json: &str,
        x: f32,
        y: f32,
    ) -> Result<String, JsValue> {
        let prepared: Vec<PreparedEntry> = parse(prepared_json)?;
        let failures: Vec<IngestFailure> = parse(failures_json)?;
        Ok(to_json(&self.engine.finish_ingest(prepared, failures, Vec2::new(x, y))))
    }

    // =========================================================================
    // Thumbnails
    // =========================================================================

    /// Claim a thumbnail rebuild; false when it is in flight or known failed
    #[wasm_bindgen]
    pub fn begin_thumbnail_repair(&mut self, url: &str) -> bool {
        self.engine.begin_thumbnail_repair(url)
    }

    /// Record a rebuild result; returns the thumbnail to use, if any
    #[wasm_bindgen]
    pub fn finish_thumbnail_repair(&mut self, url: &str, rebuilt_url: Option<String>) -> Option<String> {
        let outcome = rebuilt_url
            .map(|thumbnail_url| RebuiltThumbnail { thumbnail_url })
            .ok_or_else(|| ServiceError::new("rebuild failed"));
        match self.engine.finish_thumbnail_repair(url, outcome) {
            ThumbnailResolution::Rebuilt(thumbnail) => Some(thumbnail),
            ThumbnailResolution::Pending | ThumbnailResolution::Placeholder => None,
        }
    }

    #[wasm_bindgen]
    pub fn reset_thumbnails(&mut self) {
        self.engine.reset_thumbnails();
    }
}
