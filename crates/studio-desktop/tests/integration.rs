//! Integration tests for DesktopEngine
//!
//! These tests drive the engine through its public API the way a host does:
//! - Pointer flows (press, drag, marquee, drop into folder)
//! - Folder and stack lifecycle
//! - Clipboard round trips
//! - Layout operations and the host request outbox

use std::rc::Rc;
use studio_desktop::container::visible_items;
use studio_desktop::{
    DesktopConfig, DesktopEngine, DesktopItem, FolderData, HostRequest, ImageData, ItemAction,
    ItemKind, ManualClock, MenuAction, Modifiers, Point, Vec2,
};

/// Engine with bounds 400x300 (five columns, four rows)
fn engine_with(items: Vec<DesktopItem>) -> (DesktopEngine, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(1_000));
    let mut engine =
        DesktopEngine::with_config(DesktopConfig::default(), 600.0, 440.0, Box::new(clock.clone()));
    engine.set_items(items);
    engine.take_requests();
    (engine, clock)
}

fn image(id: &str, x: i32, y: i32) -> DesktopItem {
    DesktopItem::new(
        id.to_string(),
        format!("Image {}", id),
        Point::new(x, y),
        0,
        ItemKind::Image(ImageData::new(format!("/img/{}.png", id))),
    )
}

fn folder(id: &str, x: i32, y: i32, members: &[&str]) -> DesktopItem {
    DesktopItem::new(
        id.to_string(),
        format!("Folder {}", id),
        Point::new(x, y),
        0,
        ItemKind::Folder(FolderData {
            item_ids: members.iter().map(|m| m.to_string()).collect(),
            color: None,
        }),
    )
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn position(engine: &DesktopEngine, id: &str) -> Point {
    engine.item(id).unwrap().position
}

fn top_level_ids(engine: &DesktopEngine) -> Vec<String> {
    visible_items(engine.items(), None)
        .into_iter()
        .map(|item| item.id.clone())
        .collect()
}

/// Press at `from`, move to `to`, release at `to`
fn drag(engine: &mut DesktopEngine, from: (f32, f32), to: (f32, f32)) {
    assert!(engine.handle_pointer_down(from.0, from.1, 0, Modifiers::NONE).is_handled());
    engine.handle_pointer_move(to.0, to.1);
    assert!(engine.handle_pointer_up(to.0, to.1).is_handled());
}

// =============================================================================
// Drag Tests
// =============================================================================

#[test]
fn test_sub_cell_drag_snaps_back() {
    let (mut engine, _) = engine_with(vec![image("1", 0, 0)]);

    drag(&mut engine, (10.0, 10.0), (20.0, 20.0));

    assert_eq!(position(&engine, "1"), Point::new(0, 0));
    let requests = engine.take_requests();
    assert!(!requests.iter().any(HostRequest::is_items_changed));
    assert!(requests.contains(&HostRequest::CapturePointer));
    assert!(requests.contains(&HostRequest::ReleasePointer));
}

#[test]
fn test_single_drag_never_displaces_occupant() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 200, 0)]);

    // drop a onto b's cell
    drag(&mut engine, (10.0, 10.0), (210.0, 10.0));

    assert_eq!(position(&engine, "b"), Point::new(200, 0));
    let a = position(&engine, "a");
    assert_ne!(a, Point::new(200, 0));
    assert_eq!(a, Point::new(100, 0));
}

#[test]
fn test_drag_clamps_to_bounds() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0)]);

    drag(&mut engine, (10.0, 10.0), (900.0, 900.0));

    assert_eq!(position(&engine, "a"), Point::new(400, 300));
}

#[test]
fn test_multi_drag_keeps_selection_apart() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 100, 0), image("c", 200, 0)]);
    engine.set_selection(ids(&["a", "b"]));

    // pressing an already selected item keeps the group
    drag(&mut engine, (10.0, 10.0), (110.0, 10.0));

    assert_eq!(engine.selection().ids(), ids(&["a", "b"]).as_slice());
    assert_eq!(position(&engine, "a"), Point::new(100, 0));
    assert_eq!(position(&engine, "c"), Point::new(200, 0));
    let b = position(&engine, "b");
    assert_ne!(b, Point::new(100, 0));
    assert_ne!(b, Point::new(200, 0));
}

#[test]
fn test_drop_into_folder() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), folder("f", 200, 0, &[])]);

    drag(&mut engine, (10.0, 10.0), (210.0, 10.0));

    let f = engine.item("f").unwrap();
    assert_eq!(f.member_ids().unwrap(), ids(&["a"]).as_slice());
    assert_eq!(position(&engine, "a"), Point::new(0, 0));
    assert_eq!(top_level_ids(&engine), ids(&["f"]));
    assert!(engine.selection().is_empty());
}

#[test]
fn test_secondary_button_is_ignored() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0)]);
    assert!(!engine.handle_pointer_down(10.0, 10.0, 2, Modifiers::NONE).is_handled());
    assert!(engine.drag_state().is_none());
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_marquee_selects_centers_inside() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 100, 0), image("c", 300, 200)]);

    assert!(engine.handle_pointer_down(95.0, 95.0, 0, Modifiers::NONE).is_handled());
    assert!(engine.drag_state().unwrap().is_selecting());
    engine.handle_pointer_move(0.0, 0.0);
    engine.handle_pointer_up(0.0, 0.0);

    assert_eq!(engine.selection().ids(), ids(&["a"]).as_slice());
    let requests = engine.take_requests();
    assert!(requests.contains(&HostRequest::SelectionChanged { ids: ids(&["a"]) }));
    assert!(requests.contains(&HostRequest::ReleasePointer));
}

#[test]
fn test_modifier_click_toggles() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 100, 0)]);
    engine.set_selection(ids(&["a"]));

    let ctrl = Modifiers::new(false, true, false);
    engine.handle_pointer_down(110.0, 10.0, 0, ctrl);
    engine.handle_pointer_up(110.0, 10.0);
    assert_eq!(engine.selection().ids(), ids(&["a", "b"]).as_slice());

    engine.handle_pointer_down(10.0, 10.0, 0, ctrl);
    assert!(engine.drag_state().is_none());
    assert_eq!(engine.selection().ids(), ids(&["b"]).as_slice());
}

// =============================================================================
// Container Tests
// =============================================================================

#[test]
fn test_create_folder_at_free_cell() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 100, 0)]);

    let id = engine.create_folder(Vec2::new(5.0, 5.0)).unwrap();

    let created = engine.item(&id).unwrap();
    assert_eq!(created.position, Point::new(0, 100));
    assert_eq!(created.name, "New Folder");
    assert_eq!(created.created_at, 1_000);
}

#[test]
fn test_delete_folder_keeps_members() {
    let (mut engine, _) = engine_with(vec![
        image("a", 0, 0),
        image("b", 0, 0),
        folder("f", 100, 0, &["a", "b"]),
        image("c", 0, 0),
    ]);
    engine.set_selection(ids(&["f"]));

    assert_eq!(engine.delete_selected().unwrap(), 1);

    assert!(engine.item("f").is_none());
    assert_eq!(engine.items().len(), 3);
    let mut tops = top_level_ids(&engine);
    tops.sort();
    assert_eq!(tops, ids(&["a", "b", "c"]));

    let (a, b, c) = (position(&engine, "a"), position(&engine, "b"), position(&engine, "c"));
    assert_eq!(c, Point::new(0, 0));
    assert!(a != b && a != c && b != c);
}

#[test]
fn test_open_container_and_move_out() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), folder("f", 100, 0, &["a"])]);

    assert!(engine.handle_double_click(110.0, 10.0).is_handled());
    let requests = engine.take_requests();
    assert!(requests.contains(&HostRequest::OpenContainer { id: "f".to_string() }));
    assert_eq!(engine.open_container_id(), Some("f"));
    assert_eq!(engine.visible_items().len(), 1);

    engine.set_selection(ids(&["a"]));
    assert_eq!(engine.move_out_of_container().unwrap(), ids(&["a"]));
    assert!(engine.item("f").unwrap().member_ids().unwrap().is_empty());

    engine.close_container();
    let mut tops = top_level_ids(&engine);
    tops.sort();
    assert_eq!(tops, ids(&["a", "f"]));
    assert_eq!(position(&engine, "a"), Point::new(0, 0));
}

#[test]
fn test_double_click_media_previews() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0)]);
    assert!(engine.handle_double_click(10.0, 10.0).is_handled());
    assert!(engine.take_requests().contains(&HostRequest::ItemAction {
        action: ItemAction::Preview,
        id: "a".to_string(),
    }));
}

#[test]
fn test_stack_round_trip() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 100, 0)]);
    engine.set_selection(ids(&["a", "b"]));

    let stack = engine.create_stack().unwrap();
    assert_eq!(engine.item(&stack).unwrap().name, "Stack (2)");
    assert_eq!(top_level_ids(&engine), vec![stack.clone()]);

    let released = engine.unstack(&stack).unwrap();
    assert_eq!(released, ids(&["a", "b"]));
    assert!(engine.item(&stack).is_none());

    let mut tops = top_level_ids(&engine);
    tops.sort();
    assert_eq!(tops, ids(&["a", "b"]));
    assert_ne!(position(&engine, "a"), position(&engine, "b"));
}

// =============================================================================
// Clipboard Tests
// =============================================================================

#[test]
fn test_copy_paste_preserves_original() {
    let (mut engine, clock) = engine_with(vec![image("a", 0, 0)]);
    engine.set_selection(ids(&["a"]));
    engine.copy_selected().unwrap();
    clock.advance(50);

    let pasted = engine.paste(Some(Vec2::new(310.0, 190.0))).unwrap();
    assert_eq!(pasted.len(), 1);

    let original = engine.item("a").unwrap().clone();
    assert_eq!(original, image("a", 0, 0));

    let copy = engine.item(&pasted[0]).unwrap();
    assert_ne!(copy.id, "a");
    assert_eq!(copy.name, "Image a (copy)");
    assert_eq!(copy.position, Point::new(300, 200));
    assert_eq!(copy.created_at, 1_050);
    assert_eq!(copy.kind, original.kind);
    assert_eq!(engine.selection().ids(), pasted.as_slice());
}

#[test]
fn test_cut_paste_moves() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), image("b", 100, 0)]);
    engine.set_selection(ids(&["a"]));
    engine.cut_selected().unwrap();

    let pasted = engine.paste(Some(Vec2::new(300.0, 200.0))).unwrap();

    assert_eq!(pasted, ids(&["a"]));
    assert_eq!(engine.items().len(), 2);
    assert_eq!(position(&engine, "a"), Point::new(300, 200));
    assert!(engine.clipboard().is_none());
}

#[test]
fn test_cut_paste_into_open_folder() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0), folder("f", 100, 0, &[])]);
    engine.set_selection(ids(&["a"]));
    engine.cut_selected().unwrap();
    engine.open_container("f").unwrap();

    engine.paste(None).unwrap();

    assert_eq!(engine.item("f").unwrap().member_ids().unwrap(), ids(&["a"]).as_slice());
    assert_eq!(engine.visible_items().len(), 1);
}

#[test]
fn test_context_menu_copy() {
    let (mut engine, _) = engine_with(vec![image("a", 0, 0)]);

    assert!(engine.open_context_menu(10.0, 10.0).is_handled());
    assert_eq!(engine.selection().ids(), ids(&["a"]).as_slice());
    let menu = engine.context_menu().unwrap();
    assert!(menu.actions.contains(&MenuAction::Copy));

    engine.run_menu_action(MenuAction::Copy).unwrap();
    assert!(engine.context_menu().is_none());
    assert_eq!(engine.clipboard().unwrap().len(), 1);
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_reorganize_is_idempotent() {
    let (mut engine, _) = engine_with(vec![
        image("a", 300, 200),
        folder("f", 400, 300, &[]),
        image("b", 100, 100),
    ]);

    engine.reorganize_layout().unwrap();
    let first: Vec<(String, Point)> = engine.items().iter().map(|i| (i.id.clone(), i.position)).collect();
    engine.take_requests();

    assert_eq!(engine.reorganize_layout().unwrap(), 0);
    let second: Vec<(String, Point)> = engine.items().iter().map(|i| (i.id.clone(), i.position)).collect();
    assert_eq!(first, second);
    assert!(engine.take_requests().is_empty());
    assert_eq!(position(&engine, "f"), Point::new(0, 0));
}

#[test]
fn test_resize_pulls_items_back_in() {
    let (mut engine, _) = engine_with(vec![image("a", 400, 300), image("b", 200, 100)]);

    engine.resize(400.0, 300.0);

    assert_eq!(position(&engine, "b"), Point::new(200, 100));
    let a = position(&engine, "a");
    assert!(a.x <= 200 && a.y <= 100);
    assert_ne!(a, Point::new(200, 100));
}
