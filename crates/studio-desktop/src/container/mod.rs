//! Containment model for folders and stacks
//!
//! Membership lives only in each container's `itemIds`; an item is top-level
//! exactly when no container lists it. Dangling ids are tolerated and
//! filtered on read.

mod membership;

pub use membership::{add_to_container, remove_from_container, scrub_from_containers};

use std::collections::HashSet;
use crate::item::DesktopItem;

/// Ids referenced by any container
pub fn contained_ids(all: &[DesktopItem]) -> HashSet<&str> {
    all.iter()
        .filter_map(|item| item.member_ids())
        .flatten()
        .map(String::as_str)
        .collect()
}

/// Items not referenced by any container, in list order
pub fn top_level_items(all: &[DesktopItem]) -> Vec<&DesktopItem> {
    let contained = contained_ids(all);
    all.iter()
        .filter(|item| !contained.contains(item.id.as_str()))
        .collect()
}

/// Live members of a container, in `itemIds` order
///
/// Ids that no longer exist, and containers (which cannot nest), are skipped.
pub fn existing_members<'a>(
    container: &'a DesktopItem,
    all: &'a [DesktopItem],
) -> impl Iterator<Item = &'a DesktopItem> + 'a {
    container
        .member_ids()
        .unwrap_or(&[])
        .iter()
        .filter_map(move |id| find_item(all, id))
        .filter(|item| !item.is_container())
}

/// Items shown for the current navigation state
///
/// With an open container its members are visible; otherwise the top-level
/// items. An open id that does not name a container falls back to top level.
pub fn visible_items<'a>(all: &'a [DesktopItem], open_container: Option<&str>) -> Vec<&'a DesktopItem> {
    match open_container.and_then(|id| find_item(all, id)) {
        Some(container) if container.is_container() => existing_members(container, all).collect(),
        _ => top_level_items(all),
    }
}

/// Look up an item by id
#[inline]
pub fn find_item<'a>(all: &'a [DesktopItem], id: &str) -> Option<&'a DesktopItem> {
    all.iter().find(|item| item.id == id)
}

/// Index of an item by id
#[inline]
pub fn position_of(all: &[DesktopItem], id: &str) -> Option<usize> {
    all.iter().position(|item| item.id == id)
}
