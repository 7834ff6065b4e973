//! LRU (Least Recently Used) cache implementation
//!
//! Composes an [`Index`] with an [`OrderList`]; every operation is a hash
//! lookup plus a constant number of slot relinks.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::order::{Iter, OrderList};

/// Outcome of a write
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Upsert<K, V> {
    /// New key stored with room to spare
    Inserted,
    /// Existing key overwritten; carries the old value
    Updated(K, V),
    /// New key stored after evicting this LRU entry
    Evicted(K, V),
}

/// LRU cache with fixed capacity
///
/// Not synchronized; see [`SharedLruCache`](crate::SharedLruCache) for
/// shared access across threads.
pub struct LruCache<K, V> {
    capacity: NonZeroUsize,
    index: Index<K>,
    order: OrderList<K, V>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// Returns [`Error::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(Error::ZeroCapacity)
    }

    /// Create a new LRU cache with a capacity that is known to be positive
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            index: Index::with_capacity(capacity.get()),
            order: OrderList::with_capacity(capacity.get()),
        }
    }

    /// Get a value from the cache and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|(_, value)| value)
    }

    /// Get a mutable value from the cache and mark it most recently used
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.order.move_to_front(handle);
        self.order.get_mut(handle)
    }

    /// Get a value without touching recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.order.get(handle).map(|(_, value)| value)
    }

    /// Check if a key is cached without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Insert a key-value pair into the cache
    pub fn put(&mut self, key: K, value: V) {
        self.push(key, value);
    }

    /// Insert a key-value pair and return whatever left the cache
    ///
    /// Overwriting an existing key returns that key with its old value.
    /// Inserting into a full cache returns the evicted LRU entry.
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.upsert(key, value) {
            Upsert::Inserted => None,
            Upsert::Updated(key, old) | Upsert::Evicted(key, old) => Some((key, old)),
        }
    }

    /// Insert or overwrite with a single index lookup, reporting which happened
    pub(crate) fn upsert(&mut self, key: K, value: V) -> Upsert<K, V> {
        if let Some(handle) = self.index.get(&key) {
            // Update existing
            self.order.move_to_front(handle);
            if let Some(slot) = self.order.get_mut(handle) {
                let old = mem::replace(slot, value);
                return Upsert::Updated(key, old);
            }
        }

        let evicted = if self.order.len() >= self.capacity.get() {
            self.pop_lru()
        } else {
            None
        };

        let handle = self.order.push_front(key.clone(), value);
        self.index.set(key, handle);

        match evicted {
            Some((key, value)) => Upsert::Evicted(key, value),
            None => Upsert::Inserted,
        }
    }

    /// Remove a key from the cache
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.delete(key)?;
        self.order.remove(handle).map(|(_, value)| value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let handle = self.order.back()?;
        let (key, value) = self.order.remove(handle)?;
        self.index.delete(&key);
        Some((key, value))
    }

    /// The entry that would be evicted next, without touching recency
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().and_then(|handle| self.order.get(handle))
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.order.iter()
    }

    /// Check capacity and that index and order list hold the same keys
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert!(self.len() <= self.capacity());
        assert_eq!(self.index.len(), self.order.len());

        for (key, _) in self.order.iter() {
            let handle = self.index.get(key).expect("listed key missing from index");
            let (listed, _) = self.order.get(handle).expect("index handle is stale");
            assert!(listed == key, "index handle points at a different key");
        }
        for key in self.index.keys() {
            let handle = self.index.get(key).expect("indexed key vanished");
            assert!(self.order.contains(handle), "indexed key missing from list");
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.order)
            .finish()
    }
}
