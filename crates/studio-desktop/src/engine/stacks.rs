//! Stacks: create, expand/collapse, dissolve, auto-group

use std::collections::HashSet;
use serde::Serialize;
use tracing::info;
use crate::container::{add_to_container, existing_members, find_item, position_of};
use crate::error::{DesktopError, DesktopResult};
use crate::host::HostRequest;
use crate::item::{DesktopItem, ItemKind, StackData};
use crate::math::Point;
use crate::types::{new_item_id, ItemId};
use super::DesktopEngine;

/// Outcome of an auto-stack pass
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoStackReport {
    pub stacks_created: usize,
    pub images_stacked: usize,
}

impl DesktopEngine {
    /// Collapse the selected images into a new stack
    ///
    /// The stack takes the cell of the first selected image.
    pub fn create_stack(&mut self) -> DesktopResult<ItemId> {
        self.require_top_level("create a stack")?;

        let images: Vec<(ItemId, Point)> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.item(id))
            .filter(|item| item.is_image())
            .map(|item| (item.id.clone(), item.position))
            .collect();
        if images.len() < 2 {
            return Err(self.reject(DesktopError::Validation {
                op: "create stack",
                reason: "select at least two images",
            }));
        }

        let position = self.grid().place_point(images[0].1);
        let ids: Vec<ItemId> = images.into_iter().map(|(id, _)| id).collect();
        let stack_id = self.insert_stack(position, &ids)?;

        self.select_only_ids(vec![stack_id.clone()]);
        info!(item_id = %stack_id, count = ids.len(), "created stack");
        self.commit_items();
        Ok(stack_id)
    }

    /// Flip a stack between expanded and collapsed; returns the new state
    pub fn toggle_stack(&mut self, id: &str) -> DesktopResult<bool> {
        let now = self.now();
        let Some(index) = position_of(&self.items, id) else {
            return Err(self.reject(DesktopError::ItemNotFound(id.to_string())));
        };
        if self.items[index].as_stack().is_none() {
            return Err(self.reject(DesktopError::NotAContainer(id.to_string())));
        }
        let item = &mut self.items[index];
        let mut expanded = false;
        if let ItemKind::Stack(stack) = &mut item.kind {
            stack.is_expanded = !stack.is_expanded;
            expanded = stack.is_expanded;
        }
        item.touch(now);
        self.commit_items();
        Ok(expanded)
    }

    /// Dissolve a stack, spreading its images around its cell
    ///
    /// Member `i` aims at the stack position plus a three-column raster
    /// offset and is resolved against a shared occupied set.
    pub fn unstack(&mut self, id: &str) -> DesktopResult<Vec<ItemId>> {
        let Some(stack) = find_item(&self.items, id) else {
            return Err(self.reject(DesktopError::ItemNotFound(id.to_string())));
        };
        if stack.as_stack().is_none() {
            return Err(self.reject(DesktopError::NotAContainer(id.to_string())));
        }
        let anchor = stack.position;
        let members: Vec<ItemId> = existing_members(stack, &self.items).map(|m| m.id.clone()).collect();

        self.items.retain(|item| item.id != id);
        if self.open_container.as_deref() == Some(id) {
            self.open_container = None;
            self.push_request(HostRequest::CloseContainer);
        }

        let skip: HashSet<&str> = members.iter().map(String::as_str).collect();
        let positions = self.place_batch(None, anchor, members.len(), &skip);
        let moves: Vec<(ItemId, Point)> = members.iter().cloned().zip(positions).collect();
        self.apply_positions(&moves);

        self.select_only_ids(members.clone());
        info!(item_id = id, count = members.len(), "dissolved stack");
        self.commit_items();
        Ok(members)
    }

    /// Group top-level images by generation record into stacks
    pub fn auto_stack_by_group(&mut self) -> DesktopResult<AutoStackReport> {
        self.auto_stack_by(|item| item.as_image().and_then(|image| image.history_id.clone()))
    }

    /// Group top-level images by a caller key into stacks
    ///
    /// Images without a key stay put. Groups of at least two images become a
    /// stack at the cell of the group's first image (list order).
    pub fn auto_stack_by<F>(&mut self, key: F) -> DesktopResult<AutoStackReport>
    where
        F: Fn(&DesktopItem) -> Option<String>,
    {
        self.require_top_level("auto-stack")?;

        let mut groups: Vec<(String, Vec<(ItemId, Point)>)> = Vec::new();
        for item in self.view_items(None).into_iter().filter(|item| item.is_image()) {
            let Some(group_key) = key(item) else { continue };
            match groups.iter_mut().find(|(k, _)| *k == group_key) {
                Some((_, members)) => members.push((item.id.clone(), item.position)),
                None => groups.push((group_key, vec![(item.id.clone(), item.position)])),
            }
        }

        let mut report = AutoStackReport::default();
        for (_, members) in groups.into_iter().filter(|(_, m)| m.len() >= 2) {
            let position = self.grid().place_point(members[0].1);
            let ids: Vec<ItemId> = members.into_iter().map(|(id, _)| id).collect();
            self.insert_stack(position, &ids)?;
            report.stacks_created += 1;
            report.images_stacked += ids.len();
        }

        if report.stacks_created > 0 {
            let stacked: HashSet<ItemId> = self
                .items
                .iter()
                .filter_map(|item| item.as_stack())
                .flat_map(|stack| stack.item_ids.iter().cloned())
                .collect();
            let before = self.selection.len();
            self.selection.retain(|id| !stacked.contains(id));
            if self.selection.len() != before {
                self.emit_selection();
            }
            info!(stacks = report.stacks_created, images = report.images_stacked, "auto-stacked images");
            self.commit_items();
        }
        Ok(report)
    }

    /// Push a new stack and move `ids` into it
    fn insert_stack(&mut self, position: Point, ids: &[ItemId]) -> DesktopResult<ItemId> {
        let now = self.now();
        let stack_id = new_item_id();
        self.items.push(DesktopItem::new(
            stack_id.clone(),
            StackData::name_for(0),
            position,
            now,
            ItemKind::Stack(StackData::default()),
        ));
        add_to_container(&mut self.items, &stack_id, ids, now)?;
        Ok(stack_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::top_level_items;
    use crate::engine::tests::{engine_with, image_at};
    use crate::item::ImageData;

    fn grouped(id: &str, x: i32, group: &str) -> DesktopItem {
        let mut item = image_at(id, x, 0);
        item.kind = ItemKind::Image(ImageData {
            history_id: Some(group.to_string()),
            ..ImageData::new(format!("/img/{}.png", id))
        });
        item
    }

    #[test]
    fn test_create_stack_requires_two_images() {
        let (mut engine, _) = engine_with(vec![image_at("a", 0, 0)]);
        engine.set_selection(vec!["a".to_string()]);
        assert!(matches!(engine.create_stack(), Err(DesktopError::Validation { .. })));
        assert!(engine.take_requests().is_empty());
    }

    #[test]
    fn test_create_stack_takes_first_image_cell() {
        let (mut engine, _) = engine_with(vec![image_at("a", 100, 0), image_at("b", 200, 0)]);
        engine.set_selection(vec!["b".to_string(), "a".to_string()]);
        let id = engine.create_stack().unwrap();

        let stack = engine.item(&id).unwrap();
        assert_eq!(stack.position, Point::new(200, 0));
        assert_eq!(stack.name, "Stack (2)");
        assert_eq!(stack.member_ids().unwrap(), &["b".to_string(), "a".to_string()]);
        assert_eq!(top_level_items(engine.items()).len(), 1);
        assert_eq!(engine.selection().ids(), &[id]);
    }

    #[test]
    fn test_toggle_stack() {
        let (mut engine, _) = engine_with(vec![image_at("a", 0, 0), image_at("b", 100, 0)]);
        engine.set_selection(vec!["a".to_string(), "b".to_string()]);
        let id = engine.create_stack().unwrap();
        assert_eq!(engine.toggle_stack(&id), Ok(true));
        assert_eq!(engine.toggle_stack(&id), Ok(false));
        assert_eq!(engine.toggle_stack("a"), Err(DesktopError::NotAContainer("a".to_string())));
    }

    #[test]
    fn test_unstack_spreads_members() {
        let (mut engine, _) = engine_with(vec![
            image_at("a", 0, 0),
            image_at("b", 0, 0),
            image_at("c", 0, 0),
            image_at("d", 0, 0),
        ]);
        engine.set_selection(["a", "b", "c", "d"].map(String::from).to_vec());
        let id = engine.create_stack().unwrap();
        let members = engine.unstack(&id).unwrap();

        assert_eq!(members.len(), 4);
        assert!(engine.item(&id).is_none());
        let positions: Vec<Point> = members.iter().map(|m| engine.item(m).unwrap().position).collect();
        assert_eq!(
            positions,
            vec![Point::new(0, 0), Point::new(100, 0), Point::new(200, 0), Point::new(0, 100)]
        );
    }

    #[test]
    fn test_auto_stack_by_history() {
        let (mut engine, _) = engine_with(vec![
            grouped("a", 0, "h1"),
            grouped("b", 100, "h2"),
            grouped("c", 200, "h1"),
            image_at("d", 300, 0),
        ]);
        let report = engine.auto_stack_by_group().unwrap();
        assert_eq!(report, AutoStackReport { stacks_created: 1, images_stacked: 2 });

        let tops = top_level_items(engine.items());
        let ids: Vec<&str> = tops.iter().map(|i| i.id.as_str()).collect();
        assert!(ids.contains(&"b"));
        assert!(ids.contains(&"d"));
        let stack = tops.iter().find(|i| i.as_stack().is_some()).unwrap();
        assert_eq!(stack.position, Point::new(0, 0));
    }

    #[test]
    fn test_auto_stack_nothing_to_group_is_silent() {
        let (mut engine, _) = engine_with(vec![grouped("a", 0, "h1"), grouped("b", 100, "h2")]);
        let report = engine.auto_stack_by_group().unwrap();
        assert_eq!(report.stacks_created, 0);
        assert!(engine.take_requests().is_empty());
    }
}
