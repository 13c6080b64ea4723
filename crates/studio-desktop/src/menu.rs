//! Context menu overlay

use serde::{Deserialize, Serialize};
use crate::host::ItemAction;
use crate::item::{DesktopItem, ItemKind};
use crate::math::Vec2;
use crate::types::ItemId;

/// Entries a context menu can offer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuAction {
    Open,
    Item(ItemAction),
    Copy,
    Cut,
    Paste,
    Delete,
    NewFolder,
    CreateStack,
    ToggleStack,
    Unstack,
    MoveOut,
    AutoStack,
    Reorganize,
}

/// An open context menu
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContextMenu {
    /// Where the menu was opened (container-local)
    pub point: Vec2,
    /// Item under the pointer, `None` for the empty desktop
    pub target: Option<ItemId>,
    /// Entries to show, in order
    pub actions: Vec<MenuAction>,
}

/// What the menu needs to know about the engine state
#[derive(Clone, Copy, Debug, Default)]
pub struct MenuContext {
    /// A container is open
    pub in_container: bool,
    /// Number of selected items
    pub selected: usize,
    /// Number of selected images
    pub selected_images: usize,
    /// Clipboard has content
    pub can_paste: bool,
}

/// Entries for a menu opened on `target` (or the empty desktop)
pub fn menu_actions(target: Option<&DesktopItem>, ctx: MenuContext) -> Vec<MenuAction> {
    let mut actions = Vec::new();
    match target {
        Some(item) => {
            match &item.kind {
                ItemKind::Folder(_) => actions.push(MenuAction::Open),
                ItemKind::Stack(_) => {
                    actions.push(MenuAction::Open);
                    actions.push(MenuAction::ToggleStack);
                    actions.push(MenuAction::Unstack);
                }
                ItemKind::Image(_) => {
                    actions.push(MenuAction::Item(ItemAction::Preview));
                    actions.push(MenuAction::Item(ItemAction::Edit));
                    actions.push(MenuAction::Item(ItemAction::Regenerate));
                    actions.push(MenuAction::Item(ItemAction::CreateIdea));
                    actions.push(MenuAction::Item(ItemAction::AddToCanvas));
                }
                ItemKind::Video(_) => {
                    actions.push(MenuAction::Item(ItemAction::Preview));
                    actions.push(MenuAction::Item(ItemAction::AddToCanvas));
                }
            }
            actions.push(MenuAction::Item(ItemAction::Rename));
            if ctx.selected_images >= 2 && !ctx.in_container {
                actions.push(MenuAction::CreateStack);
            }
            if ctx.in_container {
                actions.push(MenuAction::MoveOut);
            }
            actions.push(MenuAction::Copy);
            actions.push(MenuAction::Cut);
            actions.push(MenuAction::Delete);
        }
        None => {
            if !ctx.in_container {
                actions.push(MenuAction::NewFolder);
            }
            if ctx.can_paste {
                actions.push(MenuAction::Paste);
            }
            if !ctx.in_container {
                actions.push(MenuAction::AutoStack);
                actions.push(MenuAction::Reorganize);
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{FolderData, ImageData};
    use crate::math::Point;

    #[test]
    fn test_empty_desktop_menu() {
        let actions = menu_actions(None, MenuContext::default());
        assert_eq!(
            actions,
            vec![MenuAction::NewFolder, MenuAction::AutoStack, MenuAction::Reorganize]
        );

        let ctx = MenuContext {
            in_container: true,
            can_paste: true,
            ..Default::default()
        };
        assert_eq!(menu_actions(None, ctx), vec![MenuAction::Paste]);
    }

    #[test]
    fn test_item_menus() {
        let folder = DesktopItem::new(
            "f".to_string(),
            "f".to_string(),
            Point::ORIGIN,
            0,
            ItemKind::Folder(FolderData::default()),
        );
        let actions = menu_actions(Some(&folder), MenuContext { selected: 1, ..Default::default() });
        assert_eq!(actions[0], MenuAction::Open);
        assert!(!actions.contains(&MenuAction::CreateStack));

        let image = DesktopItem::new(
            "a".to_string(),
            "a".to_string(),
            Point::ORIGIN,
            0,
            ItemKind::Image(ImageData::new("/a.png")),
        );
        let ctx = MenuContext {
            selected: 2,
            selected_images: 2,
            ..Default::default()
        };
        let actions = menu_actions(Some(&image), ctx);
        assert!(actions.contains(&MenuAction::CreateStack));
        assert!(actions.contains(&MenuAction::Item(ItemAction::AddToCanvas)));
        assert!(!actions.contains(&MenuAction::MoveOut));
    }
}
