//! Sibling ordering shared by all three list levels
//!
//! The `order` field is the persisted source of truth for sibling position,
//! so every operation that changes the composition of a list (add, delete,
//! reorder) must leave `order == index` for every element.

use super::model::{Question, SubTopic, Topic};

/// A node with a persisted sibling position
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

impl Ordered for Topic {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Ordered for SubTopic {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Ordered for Question {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Order value for an element appended to `items`
pub fn next_order<T>(items: &[T]) -> usize {
    items.len()
}

/// Rewrite every element's order to its index
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index);
    }
}

/// Move the element at `from` to `to`, then renumber
///
/// `to` indexes the sequence after removal; a target past the end appends.
/// A `from` outside the list leaves it untouched and returns `false`.
pub fn move_item<T: Ordered>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    renumber(items);
    true
}

/// Remove every element matching `pred`, then renumber the survivors
///
/// Returns `true` if anything was removed.
pub fn remove_where<T: Ordered>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !pred(item));
    if items.len() == before {
        return false;
    }
    renumber(items);
    true
}

/// Check that orders are exactly 0..n-1 in array order
pub fn is_contiguous<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() == index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        order: usize,
    }

    impl Ordered for Item {
        fn order(&self) -> usize {
            self.order
        }

        fn set_order(&mut self, order: usize) {
            self.order = order;
        }
    }

    fn items(names: &[&'static str]) -> Vec<Item> {
        names
            .iter()
            .copied()
            .enumerate()
            .map(|(order, name)| Item { name, order })
            .collect()
    }

    fn names(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_move_forward_and_backward() {
        let mut list = items(&["a", "b", "c", "d"]);
        assert!(move_item(&mut list, 0, 2));
        assert_eq!(names(&list), vec!["b", "c", "a", "d"]);
        assert!(is_contiguous(&list));

        assert!(move_item(&mut list, 3, 0));
        assert_eq!(names(&list), vec!["d", "b", "c", "a"]);
        assert!(is_contiguous(&list));
    }

    #[test]
    fn test_move_same_index_keeps_sequence() {
        let mut list = items(&["a", "b", "c"]);
        let before = list.clone();
        assert!(move_item(&mut list, 1, 1));
        assert_eq!(list, before);
    }

    #[test]
    fn test_move_out_of_range() {
        let mut list = items(&["a", "b"]);
        assert!(!move_item(&mut list, 5, 0));
        assert_eq!(names(&list), vec!["a", "b"]);

        // Target past the end appends
        assert!(move_item(&mut list, 0, 10));
        assert_eq!(names(&list), vec!["b", "a"]);
        assert!(is_contiguous(&list));
    }

    #[test]
    fn test_remove_renumbers() {
        let mut list = items(&["a", "b", "c", "d"]);
        assert!(remove_where(&mut list, |i| i.name == "b"));
        assert_eq!(names(&list), vec!["a", "c", "d"]);
        assert!(is_contiguous(&list));

        assert!(!remove_where(&mut list, |i| i.name == "zzz"));
    }

    #[test]
    fn test_next_order_and_gaps() {
        let mut list = items(&["a", "b"]);
        assert_eq!(next_order(&list), 2);
        list[1].order = 7;
        assert!(!is_contiguous(&list));
        renumber(&mut list);
        assert!(is_contiguous(&list));
    }
}
