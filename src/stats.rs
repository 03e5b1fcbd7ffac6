/// Cache statistics for monitoring hit/miss rates and discard activity.
///
/// Counters are plain integers: the cache mutates through `&mut self`, so no
/// synchronization is needed. Lookups (`get`, `peek`, `contains_key`) record
/// a hit or a miss; every discarded entry bumps either `expirations` (lazy
/// TTL removal) or `evictions` (rotation, `resize` shrink, `evict`). Manual
/// `remove` and `clear` touch no counters.
///
/// # Examples
///
/// ```
/// use duocache::DuoCache;
///
/// let mut cache = DuoCache::new(8).unwrap();
/// cache.insert("key", 1);
///
/// let _ = cache.get(&"key");
/// let _ = cache.get(&"missing");
///
/// let stats = cache.stats();
/// assert_eq!(stats.hits(), 1);
/// assert_eq!(stats.misses(), 1);
/// assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    expirations: u64,
    evictions: u64,
}

impl CacheStats {
    /// Creates a new `CacheStats` with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    #[inline]
    pub(crate) fn record_expirations(&mut self, count: u64) {
        self.expirations = self.expirations.saturating_add(count);
    }

    #[inline]
    pub(crate) fn record_evictions(&mut self, count: u64) {
        self.evictions = self.evictions.saturating_add(count);
    }

    /// Total number of lookups that found a live entry.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Total number of lookups that found nothing, or found only an expired
    /// entry.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Total number of entries removed by lazy TTL expiration.
    #[inline]
    pub fn expirations(&self) -> u64 {
        self.expirations
    }

    /// Total number of entries discarded by rotation, `resize` shrinks, and
    /// `evict` calls.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Total number of recorded lookups (hits + misses).
    #[inline]
    pub fn total_accesses(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    /// Fraction of lookups that hit, in `0.0..=1.0`. Returns `0.0` when no
    /// lookups have been recorded.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}
