//! Sorted container whose uniqueness is decided by a caller-supplied comparator.

use std::cmp::Ordering;
use std::sync::RwLock;

/// A thread-safe sorted set.
///
/// Every operation takes the comparison function explicitly. The same
/// comparator positions an element and decides whether it is a duplicate: an
/// element comparing `Equal` to a member is rejected. `T`'s own `Eq`/`Ord`
/// are never consulted.
///
/// Callers must use comparators that agree on the stored order; a coarser
/// prefix comparison of a finer one qualifies.
#[derive(Debug)]
pub struct OrderedSet<T> {
    items: RwLock<Vec<T>>,
}

impl<T> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Insert `item` unless a member compares equal to it.
    ///
    /// Returns `true` if the item was added. Search and insertion happen under
    /// one write lock, so of several racing equal items exactly one is kept.
    pub fn insert_by<F>(&self, item: T, mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut items = self.items.write().unwrap();
        match items.binary_search_by(|member| compare(member, &item)) {
            Ok(_) => false,
            Err(position) => {
                items.insert(position, item);
                true
            }
        }
    }

    /// Whether a member compares equal to `item`.
    pub fn contains_by<F>(&self, item: &T, mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let items = self.items.read().unwrap();
        items
            .binary_search_by(|member| compare(member, item))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.items.write().unwrap().clear();
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> OrderedSet<T> {
    /// Copy of the members in ascending order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().unwrap().clone()
    }
}
