//! slotlru demonstration driver
//!
//! Replays the scripted capacity-2 scenario, then optionally hammers a
//! shared cache from several threads and reports the statistics.

mod workload;

use anyhow::{Context, Result};
use clap::Parser;
use slotlru::LruCache;
use tracing::info;

use crate::workload::{run_workload, WorkloadConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items) for the threaded workload
    #[arg(short, long, default_value_t = 1024)]
    capacity: usize,

    /// Worker threads; 0 skips the workload
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Operations per worker thread
    #[arg(short, long, default_value_t = 100_000)]
    ops: u64,

    /// Number of distinct keys the workload touches
    #[arg(short, long, default_value_t = 4096)]
    keys: u64,

    /// Print the workload report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting slotlru demo v{}", env!("CARGO_PKG_VERSION"));
    run_scenario()?;

    if args.threads == 0 {
        return Ok(());
    }

    let config = WorkloadConfig {
        capacity: args.capacity,
        threads: args.threads,
        ops_per_thread: args.ops,
        key_space: args.keys.max(1),
    };
    info!(
        capacity = config.capacity,
        threads = config.threads,
        ops = config.ops_per_thread,
        keys = config.key_space,
        "Running threaded workload"
    );

    let report = run_workload(&config).context("workload failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n📊 WORKLOAD:");
        println!("   Threads x Ops:   {} x {}", report.threads, report.ops_per_thread);
        println!("   Cache Size:      {} / {}", report.len, report.capacity);
        println!("   Hits / Misses:   {} / {}", report.hits, report.misses);
        println!("   Hit Rate:        {:.2}%", report.hit_ratio * 100.0);
        println!("   Inserts:         {}", report.inserts);
        println!("   Updates:         {}", report.updates);
        println!("   Evictions:       {}", report.evictions);
        println!("   Elapsed:         {} ms", report.elapsed_ms);
    }

    Ok(())
}

/// Scripted walk through the eviction rules with capacity 2
///
/// Absent keys print as -1. Returns the printed values in order.
fn run_scenario() -> Result<Vec<i32>> {
    let mut cache = LruCache::new(2)?;
    let mut printed = Vec::new();

    cache.put(1, 1);
    cache.put(2, 2);
    printed.push(print_get(&mut cache, 1)); // 1
    cache.put(3, 3); // evicts 2
    printed.push(print_get(&mut cache, 2)); // -1
    cache.put(4, 4); // evicts 1
    printed.push(print_get(&mut cache, 1)); // -1
    printed.push(print_get(&mut cache, 3)); // 3
    printed.push(print_get(&mut cache, 4)); // 4

    Ok(printed)
}

fn print_get(cache: &mut LruCache<i32, i32>, key: i32) -> i32 {
    let value = cache.get(&key).copied().unwrap_or(-1);
    println!("get({}) = {}", key, value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_output() {
        assert_eq!(run_scenario().unwrap(), vec![1, -1, -1, 3, 4]);
    }

    #[test]
    fn test_print_get_missing_is_negative_one() {
        let mut cache = LruCache::new(1).unwrap();
        cache.put(5, 50);

        assert_eq!(print_get(&mut cache, 5), 50);
        assert_eq!(print_get(&mut cache, 6), -1);
    }
}
