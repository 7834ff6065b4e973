//! Multi-threaded workload over a shared cache

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, Result};
use serde::Serialize;
use slotlru::SharedLruCache;
use tracing::debug;

/// Workload parameters
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub capacity: usize,
    pub threads: usize,
    pub ops_per_thread: u64,
    pub key_space: u64,
}

/// Outcome of a workload run
#[derive(Debug, Serialize)]
pub struct WorkloadReport {
    pub capacity: usize,
    pub threads: usize,
    pub ops_per_thread: u64,
    pub len: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
    pub elapsed_ms: u128,
}

/// Run the workload: each thread reads three keys for every one it writes
///
/// Keys follow a fixed per-thread stride so runs are reproducible.
pub fn run_workload(config: &WorkloadConfig) -> Result<WorkloadReport> {
    let cache: Arc<SharedLruCache<u64, u64>> = Arc::new(SharedLruCache::new(config.capacity)?);
    let started = Instant::now();

    let workers: Vec<_> = (0..config.threads as u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let ops = config.ops_per_thread;
            let key_space = config.key_space;
            thread::spawn(move || {
                for i in 0..ops {
                    let key = (i * (2 * t + 1) + t * 31) % key_space;
                    if i % 4 == 0 {
                        cache.put(key, i);
                    } else {
                        cache.get(&key);
                    }
                }
                debug!(thread = t, ops, "worker finished");
            })
        })
        .collect();

    for worker in workers {
        worker
            .join()
            .map_err(|_| anyhow!("workload thread panicked"))?;
    }

    let elapsed = started.elapsed();
    let stats = cache.stats().snapshot();

    Ok(WorkloadReport {
        capacity: cache.capacity(),
        threads: config.threads,
        ops_per_thread: config.ops_per_thread,
        len: cache.len(),
        hits: stats.hits,
        misses: stats.misses,
        inserts: stats.inserts,
        updates: stats.updates,
        evictions: stats.evictions,
        hit_ratio: stats.hit_ratio,
        elapsed_ms: elapsed.as_millis(),
    })
}
