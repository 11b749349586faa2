//! Slab-backed doubly linked list.
//!
//! Stores list nodes in a vector of reusable slots and links them by `SlotId`,
//! giving stable handles and O(1) splice/move operations without raw pointers.
//! Freed slots go on a free list and are reused by later inserts.
//!
//! ```text
//!   slots (Vec<Option<Node<T>>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_0   │ { value: A, prev: None, next: Some(id_1) }  │
//!   │ id_1   │ { value: B, prev: Some(id_0), next: id_2 }  │
//!   │ id_2   │ { value: C, prev: Some(id_1), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── tail
//! ```
//!
//! The eviction policies keep `head` as the most-recently-used position and
//! `tail` as the eviction candidate.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

/// Stable handle to a node in a [`LinkedSlab`].
///
/// Ids are only meaningful for the slab that issued them. A slot freed by
/// `remove`/`pop_*` may be reissued for a later insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose nodes live in reusable slots addressed by [`SlotId`].
#[derive(Debug)]
pub struct LinkedSlab<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> LinkedSlab<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` names a live node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the id at the front of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the id at the back of the list.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its id.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.allocate(Node {
            value,
            prev: None,
            next: self.head,
        });
        if let Some(old_head) = self.head {
            if let Some(node) = self.node_mut(old_head) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Inserts a new node at the back and returns its id.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.allocate(Node {
            value,
            prev: self.tail,
            next: None,
        });
        if let Some(old_tail) = self.tail {
            if let Some(node) = self.node_mut(old_tail) {
                node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes and returns the back value together with its id.
    pub fn pop_back_with_id(&mut self) -> Option<(SlotId, T)> {
        let id = self.tail?;
        self.remove(id).map(|value| (id, value))
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if Some(id) == self.head {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns an iterator of `(SlotId, &T)` from front to back.
    pub fn iter(&self) -> LinkedSlabIter<'_, T> {
        LinkedSlabIter {
            slab: self,
            current: self.head,
        }
    }

    fn allocate(&mut self, node: Node<T>) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.slots.get(id.0)?.as_ref()?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.node_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.node_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) -> Option<()> {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        } else {
            return None;
        }
        if let Some(old_head) = old_head {
            if let Some(head_node) = self.node_mut(old_head) {
                head_node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle detected in list");
            let node = self.slots[id.0].as_ref().expect("node missing");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }

            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
    }
}

impl<T> Default for LinkedSlab<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LinkedSlabIter<'a, T> {
    slab: &'a LinkedSlab<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for LinkedSlabIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.slab.slots.get(id.0)?.as_ref()?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_orders_front_to_back() {
        let mut list = LinkedSlab::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        let values: Vec<_> = list.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"a"));
        list.debug_validate_invariants();
    }

    #[test]
    fn slot_reuse_after_remove() {
        let mut list = LinkedSlab::new();
        let id_a = list.push_front("a");
        list.push_front("b");
        assert_eq!(list.remove(id_a), Some("a"));
        assert_eq!(list.len(), 1);

        let id_c = list.push_front("c");
        assert_eq!(id_c.index(), id_a.index());
        assert_eq!(list.len(), 2);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_reorders() {
        let mut list = LinkedSlab::new();
        let id_a = list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert!(list.move_to_front(id_a));
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&2));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_of_head_is_noop() {
        let mut list = LinkedSlab::new();
        list.push_front(1);
        let id = list.push_front(2);
        assert!(list.move_to_front(id));
        assert_eq!(list.front(), Some(&2));
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_drains_in_lru_order() {
        let mut list = LinkedSlab::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn removed_id_is_not_contained() {
        let mut list = LinkedSlab::new();
        let id = list.push_front("x");
        assert!(list.contains(id));
        list.remove(id);
        assert!(!list.contains(id));
        assert!(!list.move_to_front(id));
        assert_eq!(list.get(id), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = LinkedSlab::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.debug_validate_invariants();
    }
}
