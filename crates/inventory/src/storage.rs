//! Ordered storage list.

use loadout_core::ItemId;

/// Ordered sequence of stored item ids, without duplicates.
///
/// Order is user-controlled: it only changes through the explicit operations
/// below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageOrder {
    ids: Vec<ItemId>,
}

impl StorageOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.position(item_id).is_some()
    }

    pub fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.ids.iter().position(|id| id == item_id)
    }

    pub fn get(&self, index: usize) -> Option<&ItemId> {
        self.ids.get(index)
    }


    pub fn iter(&self) -> core::slice::Iter<'_, ItemId> {
        self.ids.iter()
    }

    /// Append to the tail unless already present. Returns whether it was added.
    pub fn push_back(&mut self, item_id: ItemId) -> bool {
        if self.contains(&item_id) {
            return false;
        }
        self.ids.push(item_id);
        true
    }

    /// Remove `item_id`, returning the index it occupied.
    pub fn remove(&mut self, item_id: &ItemId) -> Option<usize> {
        let index = self.position(item_id)?;
        self.ids.remove(index);
        Some(index)
    }

    /// Insert at `index` (clamped to the tail), first removing any existing
    /// occurrence. `index` is interpreted after that removal.
    pub fn insert(&mut self, index: usize, item_id: ItemId) {
        self.remove(&item_id);
        let index = index.min(self.ids.len());
        self.ids.insert(index, item_id);
    }

    /// List-move: take the element at `from` out, then insert it at `to`
    /// (an index into the shortened list). Out-of-range `from` is ignored.
    pub fn move_to(&mut self, from: usize, to: usize) {
        if from >= self.ids.len() || from == to {
            return;
        }
        let item_id = self.ids.remove(from);
        let to = to.min(self.ids.len());
        self.ids.insert(to, item_id);
    }
}

impl<'a> IntoIterator for &'a StorageOrder {
    type Item = &'a ItemId;
    type IntoIter = core::slice::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> StorageOrder {
        let mut order = StorageOrder::new();
        for id in ids {
            order.push_back(id.parse().unwrap());
        }
        order
    }

    fn names(order: &StorageOrder) -> Vec<&str> {
        order.iter().map(ItemId::as_str).collect()
    }

    #[test]
    fn push_back_ignores_duplicates() {
        let mut o = order(&["a", "b"]);
        assert!(!o.push_back("a".parse().unwrap()));
        assert_eq!(names(&o), ["a", "b"]);
    }

    #[test]
    fn move_forward_lands_after_the_displaced_element() {
        let mut o = order(&["a", "b", "c"]);
        o.move_to(0, 1);
        assert_eq!(names(&o), ["b", "a", "c"]);
    }

    #[test]
    fn move_backward_takes_the_exact_index() {
        let mut o = order(&["a", "b", "c"]);
        o.move_to(2, 0);
        assert_eq!(names(&o), ["c", "a", "b"]);
    }

    #[test]
    fn insert_clamps_and_deduplicates() {
        let mut o = order(&["a", "b"]);
        o.insert(10, "c".parse().unwrap());
        assert_eq!(names(&o), ["a", "b", "c"]);

        o.insert(0, "c".parse().unwrap());
        assert_eq!(names(&o), ["c", "a", "b"]);
    }
}
