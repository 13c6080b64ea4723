//! Reorganize: re-grid the top level

use tracing::info;
use crate::error::DesktopResult;
use crate::grid::GridCell;
use crate::math::Point;
use crate::types::ItemId;
use super::DesktopEngine;

impl DesktopEngine {
    /// Lay the top level out row-major: containers first, then media
    ///
    /// Order within each class follows the item list. Rows continue past the
    /// bottom bound when the viewport is full. Returns how many items moved.
    pub fn reorganize_layout(&mut self) -> DesktopResult<usize> {
        self.require_top_level("reorganize layout")?;

        let grid = self.grid();
        let columns = grid.columns().max(1);
        let tops = self.view_items(None);
        let ordered = tops
            .iter()
            .filter(|item| item.is_container())
            .chain(tops.iter().filter(|item| !item.is_container()));

        let moves: Vec<(ItemId, Point)> = ordered
            .enumerate()
            .map(|(i, item)| {
                let i = i as i32;
                let cell = GridCell::new(i % columns, i / columns);
                (item.id.clone(), grid.cell_origin(cell))
            })
            .collect();

        let moved = self.apply_positions(&moves);
        if moved > 0 {
            info!(moved, total = moves.len(), "reorganized layout");
            self.commit_items();
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{engine_with, folder_at, image_at};
    use crate::error::DesktopError;

    #[test]
    fn test_reorganize_containers_first() {
        let (mut engine, _) = engine_with(vec![
            image_at("a", 300, 200),
            folder_at("f", 200, 200, &[]),
            image_at("b", 0, 0),
        ]);
        assert_eq!(engine.reorganize_layout().unwrap(), 3);
        assert_eq!(engine.item("f").unwrap().position, Point::new(0, 0));
        assert_eq!(engine.item("a").unwrap().position, Point::new(100, 0));
        assert_eq!(engine.item("b").unwrap().position, Point::new(200, 0));

        engine.take_requests();
        assert_eq!(engine.reorganize_layout().unwrap(), 0);
        assert!(engine.take_requests().is_empty());
    }

    #[test]
    fn test_reorganize_wraps_rows() {
        // five columns at max_x = 400
        let items = (0..7).map(|i| image_at(&format!("i{}", i), 0, 0)).collect();
        let (mut engine, _) = engine_with(items);
        engine.reorganize_layout().unwrap();
        assert_eq!(engine.item("i4").unwrap().position, Point::new(400, 0));
        assert_eq!(engine.item("i5").unwrap().position, Point::new(0, 100));
    }

    #[test]
    fn test_reorganize_refused_in_container() {
        let (mut engine, _) = engine_with(vec![folder_at("f", 0, 0, &[])]);
        engine.open_container("f").unwrap();
        assert!(matches!(
            engine.reorganize_layout(),
            Err(DesktopError::Precondition { .. })
        ));
    }
}
