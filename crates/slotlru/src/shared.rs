//! Thread-safe wrapper around [`LruCache`]
//!
//! One mutex guards the whole cache for the duration of each call. Every
//! operation is O(1), so the lock is held briefly.

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::lru::{LruCache, Upsert};
use crate::stats::CacheStats;

/// LRU cache shared between threads
pub struct SharedLruCache<K, V> {
    /// Single-threaded cache core
    cache: Mutex<LruCache<K, V>>,

    /// Cache statistics
    stats: CacheStats,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Errors
    /// Returns [`Error::ZeroCapacity`](crate::Error::ZeroCapacity) if
    /// `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        let cache = LruCache::new(capacity)?;

        Ok(Self {
            cache: Mutex::new(cache),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Get a copy of a value and mark it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.cache.lock().get(key).cloned();

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Insert a key-value pair
    pub fn put(&self, key: K, value: V) {
        let outcome = self.cache.lock().upsert(key, value);

        match outcome {
            Upsert::Inserted => self.stats.record_insert(),
            Upsert::Updated(..) => self.stats.record_update(),
            Upsert::Evicted(..) => {
                self.stats.record_insert();
                self.stats.record_eviction();
                trace!(capacity = self.capacity, "evicted least recently used entry");
            }
        }
    }

    /// Remove a key from the cache
    pub fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.cache.lock().delete(key);
        if removed.is_some() {
            self.stats.record_removal();
        }
        removed
    }

    /// Check if a key is cached without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.lock().contains(key)
    }

    /// Run `f` with exclusive access to the cache
    ///
    /// Lets a caller make several calls atomically. Operations made through
    /// `f` are not counted in [`stats`](Self::stats).
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        let mut cache = self.cache.lock();
        f(&mut cache)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache and reset statistics
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        let dropped = cache.len();
        cache.clear();
        self.stats.reset();
        drop(cache);

        debug!(dropped, "cleared shared cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Arc;
    use std::thread;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_is_send_sync() {
        assert_send_sync::<SharedLruCache<String, Vec<u8>>>();
    }

    #[test]
    fn test_shared_zero_capacity() {
        let result = SharedLruCache::<u64, u64>::new(0);
        assert_eq!(result.err(), Some(Error::ZeroCapacity));
    }

    #[test]
    fn test_shared_hit_and_miss() {
        let cache = SharedLruCache::new(10).unwrap();

        cache.put(1u64, b"data".to_vec());
        assert_eq!(cache.get(&1), Some(b"data".to_vec()));
        assert_eq!(cache.get(&2), None);

        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().hit_ratio(), 0.5);
    }

    #[test]
    fn test_shared_eviction_counted() {
        let cache = SharedLruCache::new(2).unwrap();

        cache.put(0u64, "data 0");
        cache.put(1, "data 1");
        cache.put(1, "data 1b");
        cache.put(2, "data 2");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
        assert!(!cache.contains(&0));
        assert_eq!(cache.stats().inserts(), 3);
        assert_eq!(cache.stats().updates(), 1);
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_shared_overwrite_when_full_is_not_eviction() {
        let cache = SharedLruCache::new(2).unwrap();

        cache.put(1u64, 1u64);
        cache.put(2, 2);
        cache.put(1, 10);

        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.get(&2), Some(2));
        assert_eq!(cache.stats().inserts(), 2);
        assert_eq!(cache.stats().updates(), 1);
        assert_eq!(cache.stats().evictions(), 0);
    }

    #[test]
    fn test_shared_delete() {
        let cache = SharedLruCache::new(4).unwrap();

        cache.put("k".to_string(), 1);
        assert_eq!(cache.delete("k"), Some(1));
        assert_eq!(cache.delete("k"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().removals(), 1);
    }

    #[test]
    fn test_shared_clear() {
        let cache = SharedLruCache::new(4).unwrap();

        cache.put(1, 1);
        cache.put(2, 2);
        cache.get(&1);
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.stats().inserts(), 0);
    }

    #[test]
    fn test_shared_with_lock() {
        let cache = SharedLruCache::new(3).unwrap();

        cache.put(1, 1);
        cache.put(2, 2);
        let lru = cache.with_lock(|inner| inner.pop_lru());

        assert_eq!(lru, Some((1, 1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_concurrent_access() {
        let cache = Arc::new(SharedLruCache::new(16).unwrap());
        let threads = 8;
        let ops = 500u64;

        let workers: Vec<_> = (0..threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops {
                        let key = (t * 7 + i) % 32;
                        if i % 3 == 0 {
                            cache.put(key, key * 2);
                        } else if let Some(value) = cache.get(&key) {
                            assert_eq!(value, key * 2);
                        }
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert!(cache.len() <= 16);
        cache.with_lock(|inner| inner.debug_validate_invariants());

        let stats = cache.stats().snapshot();
        assert_eq!(stats.hits + stats.misses, threads * (ops - ops.div_ceil(3)));
    }
}
