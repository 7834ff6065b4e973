//! Key to handle index

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::order::Handle;

/// Maps each cached key to the handle of its record
///
/// Holds handles only; the records themselves live in the order list.
#[derive(Debug)]
pub struct Index<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K> Index<K>
where
    K: Hash + Eq,
{
    /// Create an empty index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Look up the handle for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Map `key` to `handle`, returning the previous handle if any
    pub fn set(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    /// Remove the mapping for `key`
    pub fn delete<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Check if `key` is indexed
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate indexed keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Remove every mapping
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K> Default for Index<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
