//! Cache statistics tracking

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for cache performance tracking
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
    removals: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSnapshot {
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups that did not find their key
    pub misses: u64,
    /// New keys stored
    pub inserts: u64,
    /// Existing keys overwritten
    pub updates: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Entries removed by explicit delete
    pub removals: u64,
    /// Hits over total lookups
    pub hit_ratio: f64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an insert of a new key
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an overwrite of an existing key
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an eviction
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an explicit removal
    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get total misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get total inserts
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Get total updates
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Get total evictions
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Get total removals
    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        ratio(self.hits(), self.misses())
    }

    /// Copy all counters
    ///
    /// Counters are read one at a time, so a snapshot taken while other
    /// threads are recording may mix values from slightly different moments.
    pub fn snapshot(&self) -> StatsSnapshot {
        let hits = self.hits();
        let misses = self.misses();

        StatsSnapshot {
            hits,
            misses,
            inserts: self.inserts(),
            updates: self.updates(),
            evictions: self.evictions(),
            removals: self.removals(),
            hit_ratio: ratio(hits, misses),
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.removals.store(0, Ordering::Relaxed);
    }
}

fn ratio(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = CacheStats::new();

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = CacheStats::new();

        stats.record_insert();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        stats.record_removal();
        stats.record_hit();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.inserts, 2);
        assert_eq!(snapshot.updates, 1);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.removals, 1);
        assert_eq!(snapshot.hit_ratio, 1.0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(stats.hit_ratio(), 0.0);
    }
}
