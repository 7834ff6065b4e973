//! Recency order list
//!
//! Doubly-linked list of records stored in a slot arena. Links are slot
//! indices, so moving a record never touches any other record than its two
//! neighbours.
//!
//! ```text
//!   slots: [ HEAD | TAIL | r2 | r3 | r4 | ... ]
//!
//!   HEAD ─► r4 ◄──► r2 ◄──► r3 ◄── TAIL
//!          (MRU)           (LRU)
//! ```
//!
//! Slots 0 and 1 are the head and tail sentinels. They never hold an entry
//! and are never freed, so linking and unlinking need no empty-list checks.
//! Each slot carries a generation that is bumped when its record leaves the
//! list; a [`Handle`] only resolves while its generation matches.

use std::fmt;

const HEAD: usize = 0;
const TAIL: usize = 1;

/// Stable reference to a record in an [`OrderList`]
///
/// Opaque outside the crate: slot index and generation are not exposed.
///
/// ```compile_fail
/// let mut list = slotlru::OrderList::new();
/// let handle = list.push_front(1, "a");
/// let _ = handle.index();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

impl Handle {
    /// Slot index inside the arena
    #[cfg(test)]
    pub(crate) fn index(self) -> usize {
        self.index
    }

    /// Generation the slot had when this handle was issued
    #[cfg(test)]
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// Arena slot: an entry plus its links
///
/// Sentinels and freed slots have no entry.
struct Record<K, V> {
    entry: Option<(K, V)>,
    prev: usize,
    next: usize,
    generation: u32,
}

impl<K, V> Record<K, V> {
    fn sentinel() -> Self {
        Self {
            entry: None,
            prev: HEAD,
            next: TAIL,
            generation: 0,
        }
    }
}

/// Records ordered from most recently used (front) to least recently used (back)
pub struct OrderList<K, V> {
    slots: Vec<Record<K, V>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> OrderList<K, V> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 2);
        slots.push(Record::sentinel());
        slots.push(Record::sentinel());

        Self {
            slots,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of records in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a record right after the head sentinel
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let idx = self.alloc_slot(key, value);
        self.link_front(idx);
        self.len += 1;

        Handle {
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    /// Relink a record right after the head sentinel
    ///
    /// Stale handles are ignored.
    pub fn move_to_front(&mut self, handle: Handle) {
        let Some(idx) = self.resolve(handle) else {
            return;
        };

        self.unlink(idx);
        self.link_front(idx);
    }

    /// Unlink a record and hand its entry back to the caller
    ///
    /// The slot is recycled and `handle` stops resolving.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        let idx = self.resolve(handle)?;
        self.unlink(idx);

        let slot = &mut self.slots[idx];
        let entry = slot.entry.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(idx);
        self.len -= 1;

        entry
    }

    /// Handle of the most recently used record
    pub fn front(&self) -> Option<Handle> {
        self.handle_at(self.slots[HEAD].next)
    }

    /// Handle of the least recently used record
    pub fn back(&self) -> Option<Handle> {
        self.handle_at(self.slots[TAIL].prev)
    }

    /// Entry for a live handle
    pub fn get(&self, handle: Handle) -> Option<(&K, &V)> {
        let idx = self.resolve(handle)?;
        self.slots[idx].entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Mutable value for a live handle
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        let idx = self.resolve(handle)?;
        self.slots[idx].entry.as_mut().map(|(_, v)| v)
    }

    /// Check whether `handle` still refers to a record in this list
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Iterate entries from front to back
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.slots[HEAD].next,
            remaining: self.len,
        }
    }

    /// Drop every record
    ///
    /// Slots are kept for reuse and all outstanding handles are invalidated.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().skip(TAIL + 1) {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(idx);
        }

        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.len = 0;
    }

    fn resolve(&self, handle: Handle) -> Option<usize> {
        if handle.index <= TAIL {
            return None;
        }
        let slot = self.slots.get(handle.index)?;
        (slot.generation == handle.generation && slot.entry.is_some()).then_some(handle.index)
    }

    fn handle_at(&self, idx: usize) -> Option<Handle> {
        (idx > TAIL).then(|| Handle {
            index: idx,
            generation: self.slots[idx].generation,
        })
    }

    fn alloc_slot(&mut self, key: K, value: V) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx].entry = Some((key, value));
            idx
        } else {
            self.slots.push(Record {
                entry: Some((key, value)),
                prev: HEAD,
                next: TAIL,
                generation: 0,
            });
            self.slots.len() - 1
        }
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    /// Walk the links in both directions and check them against `len`
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.slots[HEAD].entry.is_none());
        assert!(self.slots[TAIL].entry.is_none());

        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = self.slots[HEAD].next;
        while current != TAIL {
            let slot = &self.slots[current];
            assert!(slot.entry.is_some(), "linked slot {current} has no entry");
            assert_eq!(slot.prev, prev);
            prev = current;
            current = slot.next;
            count += 1;
            assert!(count <= self.len, "forward walk exceeds len");
        }
        assert_eq!(self.slots[TAIL].prev, prev);
        assert_eq!(count, self.len);

        let occupied = self.slots.iter().filter(|slot| slot.entry.is_some()).count();
        assert_eq!(occupied, self.len);
        assert_eq!(self.slots.len(), self.len + self.free_list.len() + 2);
    }
}

impl<K, V> Default for OrderList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over an [`OrderList`] from front to back
pub struct Iter<'a, K, V> {
    list: &'a OrderList<K, V>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let slot = &self.list.slots[self.cursor];
        self.cursor = slot.next;
        self.remaining -= 1;
        slot.entry.as_ref().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
