//! Membership mutations: add, remove, scrub

use std::collections::HashSet;
use tracing::debug;
use crate::error::{DesktopError, DesktopResult};
use crate::item::{DesktopItem, ItemKind, StackData};
use crate::types::{ItemId, Timestamp};
use super::position_of;

/// Add `candidates` to a container, returning the ids actually added
///
/// Ids that are missing, already present, or name a container are skipped;
/// stacks additionally accept images only. An id listed by another container
/// is moved out of it first so membership stays exclusive.
pub fn add_to_container(
    items: &mut [DesktopItem],
    container_id: &str,
    candidates: &[ItemId],
    now: Timestamp,
) -> DesktopResult<Vec<ItemId>> {
    let index = position_of(items, container_id)
        .ok_or_else(|| DesktopError::ItemNotFound(container_id.to_string()))?;
    let accepts_only_images = match &items[index].kind {
        ItemKind::Folder(_) => false,
        ItemKind::Stack(_) => true,
        _ => return Err(DesktopError::NotAContainer(container_id.to_string())),
    };

    let mut added: Vec<ItemId> = Vec::new();
    for id in candidates {
        if added.contains(id) || items[index].has_member(id) {
            continue;
        }
        let eligible = items.iter().find(|item| &item.id == id).map(|item| {
            !item.is_container() && (!accepts_only_images || item.is_image())
        });
        if eligible == Some(true) {
            added.push(id.clone());
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let moving: HashSet<&str> = added.iter().map(String::as_str).collect();
    for (i, item) in items.iter_mut().enumerate() {
        if i == index {
            continue;
        }
        if detach(item, &moving) {
            item.touch(now);
        }
    }

    let container = &mut items[index];
    if let Some(ids) = container.member_ids_mut() {
        ids.extend(added.iter().cloned());
    }
    refresh_stack_name(container);
    container.touch(now);

    debug!(container_id, count = added.len(), "added items to container");
    Ok(added)
}

/// Remove `ids` from a container, returning how many were removed
pub fn remove_from_container(
    items: &mut [DesktopItem],
    container_id: &str,
    ids: &[ItemId],
    now: Timestamp,
) -> DesktopResult<usize> {
    let index = position_of(items, container_id)
        .ok_or_else(|| DesktopError::ItemNotFound(container_id.to_string()))?;
    let container = &mut items[index];
    if !container.is_container() {
        return Err(DesktopError::NotAContainer(container_id.to_string()));
    }

    let removing: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let before = container.member_ids().map(|m| m.len()).unwrap_or(0);
    detach(container, &removing);
    let after = container.member_ids().map(|m| m.len()).unwrap_or(0);

    let removed = before - after;
    if removed > 0 {
        container.touch(now);
        debug!(container_id, removed, "removed items from container");
    }
    Ok(removed)
}

/// Remove `ids` from every container that lists them
pub fn scrub_from_containers(items: &mut [DesktopItem], ids: &HashSet<&str>, now: Timestamp) {
    for item in items.iter_mut() {
        if detach(item, ids) {
            item.touch(now);
        }
    }
}

/// Drop `ids` from a container's member list; true if anything changed
fn detach(container: &mut DesktopItem, ids: &HashSet<&str>) -> bool {
    let changed = match container.member_ids_mut() {
        Some(members) => {
            let before = members.len();
            members.retain(|m| !ids.contains(m.as_str()));
            members.len() != before
        }
        None => false,
    };
    if changed {
        refresh_stack_name(container);
    }
    changed
}

/// Regenerate a stack's name from its member count
fn refresh_stack_name(item: &mut DesktopItem) {
    if let ItemKind::Stack(stack) = &item.kind {
        item.name = StackData::name_for(stack.item_ids.len());
    }
}
