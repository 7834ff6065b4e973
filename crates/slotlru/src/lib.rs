//! # slotlru
//!
//! Fixed-capacity LRU cache with O(1) `get` and `put`.
//!
//! ## Architecture
//! - **Index**: AHash map from key to record handle (O(1) lookup)
//! - **Order list**: doubly-linked list in a slot arena, head and tail
//!   sentinels, generation-tagged handles (O(1) reorder and eviction)
//! - **LruCache**: single-threaded composition of the two
//! - **SharedLruCache**: mutex-guarded wrapper with hit/miss statistics
//!
//! ```
//! use slotlru::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.len(), 2);
//! # Ok::<(), slotlru::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod index;
mod lru;
mod order;
mod shared;
mod stats;

pub use error::{Error, Result};
pub use index::Index;
pub use lru::LruCache;
pub use order::{Handle, Iter, OrderList};
pub use shared::SharedLruCache;
pub use stats::{CacheStats, StatsSnapshot};
