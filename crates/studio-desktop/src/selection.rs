//! Ordered item selection

use serde::{Deserialize, Serialize};
use crate::types::ItemId;

/// Selected item ids in selection order, without duplicates
///
/// Order matters: merge requests list images in the order they were picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<ItemId>,
}

impl Selection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ids, dropping repeats
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        let mut selection = Self::new();
        selection.extend(ids);
        selection
    }

    /// Selected ids in order
    #[inline]
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check if `id` is selected
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Replace the selection with a single id
    pub fn select_only(&mut self, id: &str) {
        self.ids.clear();
        self.ids.push(id.to_string());
    }

    /// Append `id` unless already selected
    pub fn add(&mut self, id: &str) {
        if !self.contains(id) {
            self.ids.push(id.to_string());
        }
    }

    /// Append several ids, skipping repeats
    pub fn extend<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ItemId>,
    {
        for id in ids {
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Flip membership of `id`; returns true when it is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    /// Keep only ids accepted by `keep`
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.ids.retain(|id| keep(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(sel: &Selection) -> Vec<&str> {
        sel.ids().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_from_ids_dedupes_in_order() {
        let sel = Selection::from_ids(["b", "a", "b"].map(String::from));
        assert_eq!(ids(&sel), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle() {
        let mut sel = Selection::new();
        assert!(sel.toggle("a"));
        assert!(sel.toggle("b"));
        assert!(!sel.toggle("a"));
        assert_eq!(ids(&sel), vec!["b"]);
    }

    #[test]
    fn test_select_only_and_add() {
        let mut sel = Selection::from_ids(["a", "b"].map(String::from));
        sel.select_only("c");
        sel.add("d");
        sel.add("c");
        assert_eq!(ids(&sel), vec!["c", "d"]);
        sel.retain(|id| id != "c");
        assert_eq!(ids(&sel), vec!["d"]);
    }
}
