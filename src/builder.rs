use std::hash::Hash;
use std::time::Duration;

use indexmap::IndexMap;

use crate::cache::EvictionCallback;
use crate::error::CacheError;
use crate::DuoCache;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// Validated construction of a [`DuoCache`].
///
/// Configuration errors are reported by [`build`](Self::build) before any
/// state exists, so a failed build has no side effects.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use duocache::{CacheBuilder, DuoCache};
///
/// let mut cache: DuoCache<String, Vec<u8>> = CacheBuilder::new(1000)
///     .default_ttl(Duration::from_secs(300))
///     .on_eviction(|key, _value| eprintln!("dropped {key}"))
///     .build()
///     .unwrap();
///
/// cache.insert("blob".to_string(), vec![1, 2, 3]);
/// ```
///
/// Zero capacity and zero TTL are rejected:
///
/// ```
/// use std::time::Duration;
///
/// use duocache::{CacheBuilder, CacheError};
///
/// let err = CacheBuilder::<u32, u32>::new(0).build().unwrap_err();
/// assert_eq!(err, CacheError::InvalidCapacity);
///
/// let err = CacheBuilder::<u32, u32>::new(8)
///     .default_ttl(Duration::ZERO)
///     .build()
///     .unwrap_err();
/// assert_eq!(err, CacheError::InvalidTtl);
/// ```
pub struct CacheBuilder<K, V> {
    capacity: usize,
    default_ttl: Option<Duration>,
    on_eviction: Option<EvictionCallback<K, V>>,
}

impl<K: Hash + Eq, V> CacheBuilder<K, V> {
    /// Starts a builder for a cache holding at most `capacity` live
    /// entries. The capacity is validated by [`build`](Self::build).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            default_ttl: None,
            on_eviction: None,
        }
    }

    /// Sets the TTL applied to entries inserted without an explicit
    /// per-entry TTL. Must be strictly positive; `Duration::ZERO` is
    /// rejected by [`build`](Self::build).
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Registers a callback invoked for every entry the cache discards:
    /// rotation, lazy expiration, `resize` shrinks, and `evict`. Manual
    /// `remove` and `clear` do not fire it.
    pub fn on_eviction<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&K, &V) + 'static,
    {
        self.on_eviction = Some(Box::new(callback));
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// * [`CacheError::InvalidCapacity`] if the capacity is zero
    /// * [`CacheError::InvalidTtl`] if the default TTL is exactly zero
    pub fn build(self) -> Result<DuoCache<K, V>, CacheError> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        if matches!(self.default_ttl, Some(ttl) if ttl.is_zero()) {
            return Err(CacheError::InvalidTtl);
        }

        Ok(DuoCache {
            recent: IndexMap::new(),
            stale: IndexMap::new(),
            insert_count: 0,
            capacity: self.capacity,
            default_ttl: self.default_ttl,
            on_eviction: self.on_eviction,
            #[cfg(feature = "stats")]
            stats: CacheStats::new(),
        })
    }
}
