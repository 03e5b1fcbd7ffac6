//! # duocache
//!
//! An embeddable, in-memory key/value cache with an approximate LRU
//! eviction policy and optional TTL expiration.
//!
//! Instead of tracking exact recency with a doubly-linked list, the cache
//! keeps two insertion-ordered generations of entries. Writes land in the
//! `recent` generation; when it fills to capacity the generations rotate,
//! discarding the old `stale` generation wholesale. Reads that hit `stale`
//! promote the entry back into `recent`. The result is O(1) amortized
//! insert/get with bounded memory, at the cost of an approximate eviction
//! order.
//!
//! ## Features
//!
//! - **Approximate LRU**: generation rotation guarantees eventual eviction
//!   of untouched keys without per-access bookkeeping
//! - **TTL Support**: cache-wide default plus per-entry overrides, enforced
//!   lazily on access and enumeration
//! - **Eviction Callbacks**: observe every discarded entry, whether dropped
//!   by rotation, expiration, resize, or manual eviction
//! - **Ordered Iteration**: ascending/descending traversal reconciling both
//!   generations into one consistent view
//! - **Dynamic Resize & Manual Eviction**: both built on the same ordered
//!   reconciliation
//! - **Statistics**: hit/miss and discard counters (default-on `stats`
//!   feature)
//!
//! ## Quick start
//!
//! ```
//! use std::time::Duration;
//!
//! use duocache::DuoCache;
//!
//! let mut cache = DuoCache::builder(100)
//!     .default_ttl(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//!
//! cache.insert("answer", 42);
//! assert_eq!(cache.get(&"answer"), Some(&42));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Thread safety
//!
//! Every operation takes `&mut self` and completes synchronously; the cache
//! contains no locks. Share it across threads only behind external mutual
//! exclusion.

mod builder;
mod cache;
mod cache_entry;
mod error;

#[cfg(feature = "stats")]
mod stats;

pub use builder::CacheBuilder;
pub use cache::{DuoCache, EvictionCallback};
pub use cache_entry::RemainingTtl;
pub use error::CacheError;

#[cfg(feature = "stats")]
pub use stats::CacheStats;
