use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::cache_entry::{CacheEntry, RemainingTtl};
use crate::error::CacheError;
use crate::CacheBuilder;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// Callback invoked with a reference to each entry the cache discards.
///
/// Fires for generation rotation, lazy TTL expiration, [`resize`] shrinks,
/// and [`evict`]. It does **not** fire for [`remove`] or [`clear`]: manual
/// removal is not an eviction.
///
/// The callback runs synchronously on the calling thread and must not call
/// back into the same cache instance.
///
/// [`resize`]: DuoCache::resize
/// [`evict`]: DuoCache::evict
/// [`remove`]: DuoCache::remove
/// [`clear`]: DuoCache::clear
pub type EvictionCallback<K, V> = Box<dyn FnMut(&K, &V)>;

/// An in-memory key/value cache with approximate LRU eviction and optional
/// TTL expiration.
///
/// # Two-generation design
///
/// Entries live in one of two insertion-ordered generations:
///
/// - `recent` - the active write target; every insert lands here
/// - `stale` - the previous generation, read-only except for deletion and
///   promotion
///
/// Once `capacity` distinct keys have been inserted into `recent`, the cache
/// *rotates*: the current `stale` generation is discarded wholesale (firing
/// the eviction callback for each entry), `recent` becomes the new `stale`,
/// and a fresh empty `recent` takes its place. A [`get`] that hits `stale`
/// *promotes* the entry back into `recent`, so any key touched within a
/// capacity's worth of inserts survives the next rotation.
///
/// This approximates LRU with O(1) amortized insert and lookup and no
/// per-access pointer surgery. The trade-off is precision: an entry inserted
/// just before a rotation can outlive an untouched entry inserted just
/// after, and under insert-driven growth the two backing maps may together
/// hold up to twice `capacity` raw entries. A partial [`evict`] parks all
/// survivors in `stale`, which can leave even more raw entries until the
/// next rotation drains them. The reported [`len`] deduplicates and never
/// exceeds `capacity`.
///
/// # TTL expiration
///
/// Expiry is lazy. Nothing runs in the background; an entry's deadline is
/// checked when the entry is read ([`get`], [`peek`], [`contains_key`]) or
/// enumerated (iteration, [`resize`], [`evict`]), and the entry is removed
/// at that moment, firing the eviction callback. [`expires_in`] is the one
/// read that reports staleness without removing anything.
///
/// # Thread safety
///
/// None. Every operation takes `&mut self` and completes before returning.
/// Callers that share a cache across threads must supply their own mutual
/// exclusion.
///
/// # Examples
///
/// ```
/// use duocache::DuoCache;
///
/// let mut cache = DuoCache::new(2).unwrap();
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // Touching "a" promotes it, so it survives the inserts below.
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.insert("c", 3);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.insert("d", 4);
/// assert!(cache.contains_key(&"a"));
/// ```
///
/// With a default TTL and an eviction callback:
///
/// ```
/// use std::time::Duration;
///
/// use duocache::DuoCache;
///
/// let mut cache: duocache::DuoCache<String, u32> = DuoCache::builder(100)
///     .default_ttl(Duration::from_secs(300))
///     .on_eviction(|key, value| eprintln!("dropped {key} => {value}"))
///     .build()
///     .unwrap();
///
/// cache.insert("session".to_string(), 1);
/// ```
///
/// [`get`]: DuoCache::get
/// [`peek`]: DuoCache::peek
/// [`contains_key`]: DuoCache::contains_key
/// [`expires_in`]: DuoCache::expires_in
/// [`resize`]: DuoCache::resize
/// [`evict`]: DuoCache::evict
/// [`len`]: DuoCache::len
pub struct DuoCache<K, V> {
    pub(crate) recent: IndexMap<K, CacheEntry<V>>,
    pub(crate) stale: IndexMap<K, CacheEntry<V>>,
    /// Number of keys inserted into `recent` since the last rotation.
    /// In-place updates of an existing `recent` key do not count.
    pub(crate) insert_count: usize,
    pub(crate) capacity: usize,
    pub(crate) default_ttl: Option<Duration>,
    pub(crate) on_eviction: Option<EvictionCallback<K, V>>,
    #[cfg(feature = "stats")]
    pub(crate) stats: CacheStats,
}

impl<K: Hash + Eq, V> DuoCache<K, V> {
    /// Creates a cache holding at most `capacity` live entries, with no
    /// default TTL and no eviction callback.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use duocache::{CacheError, DuoCache};
    ///
    /// let cache = DuoCache::<&str, i32>::new(10).unwrap();
    /// assert_eq!(cache.capacity(), 10);
    ///
    /// let err = DuoCache::<&str, i32>::new(0).unwrap_err();
    /// assert_eq!(err, CacheError::InvalidCapacity);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        CacheBuilder::new(capacity).build()
    }

    /// Returns a [`CacheBuilder`] for configuring a default TTL and an
    /// eviction callback before construction.
    pub fn builder(capacity: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(capacity)
    }

    /// Retrieves a value by key, refreshing its recency.
    ///
    /// A hit in the `stale` generation promotes the entry into `recent`,
    /// which may trigger a rotation exactly as an insert would. This is the
    /// only read path that changes generation membership.
    ///
    /// An expired entry is removed on the spot (firing the eviction
    /// callback) and reported as a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use duocache::DuoCache;
    ///
    /// let mut cache = DuoCache::new(4).unwrap();
    /// cache.insert("key", 100);
    /// assert_eq!(cache.get(&"key"), Some(&100));
    /// assert_eq!(cache.get(&"missing"), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = Instant::now();

        if self.recent.contains_key(key) {
            if self.sweep_if_expired(key, now) {
                self.record_miss();
                return None;
            }
            self.record_hit();
            return self.recent.get(key).map(|entry| &entry.value);
        }

        if self.stale.contains_key(key) {
            if self.sweep_if_expired(key, now) {
                self.record_miss();
                return None;
            }
            // Promote the stale hit through the normal insertion path. The
            // push can fill `recent` and rotate, in which case the promoted
            // entry lands in the new `stale` generation.
            if let Some((owned_key, entry)) = self.stale.shift_remove_entry(key) {
                self.insert_into_recent(owned_key, entry);
            }
            self.record_hit();
            return self
                .recent
                .get(key)
                .or_else(|| self.stale.get(key))
                .map(|entry| &entry.value);
        }

        self.record_miss();
        None
    }

    /// Retrieves a value by key without refreshing its recency.
    ///
    /// Expiry is enforced exactly as in [`get`](Self::get) - an expired
    /// entry is removed and the callback fires - but a live `stale` hit is
    /// left where it is.
    pub fn peek(&mut self, key: &K) -> Option<&V> {
        let now = Instant::now();
        if self.sweep_if_expired(key, now) {
            self.record_miss();
            return None;
        }
        if self.recent.contains_key(key) || self.stale.contains_key(key) {
            self.record_hit();
            self.recent
                .get(key)
                .or_else(|| self.stale.get(key))
                .map(|entry| &entry.value)
        } else {
            self.record_miss();
            None
        }
    }

    /// Returns true if a live entry exists for `key`.
    ///
    /// Like [`get`](Self::get) this removes an expired entry it finds
    /// (firing the eviction callback), but it never promotes a `stale` hit.
    pub fn contains_key(&mut self, key: &K) -> bool {
        let now = Instant::now();
        if self.sweep_if_expired(key, now) {
            self.record_miss();
            return false;
        }
        let present = self.recent.contains_key(key) || self.stale.contains_key(key);
        if present {
            self.record_hit();
        } else {
            self.record_miss();
        }
        present
    }

    /// Reports the remaining time-to-live of the entry for `key`.
    ///
    /// This is the one inspection that never mutates the cache: an overdue
    /// entry is reported with a negative remainder and left in place until
    /// the next read or enumeration sweeps it.
    ///
    /// Returns `None` if the key is absent from both generations.
    pub fn expires_in(&self, key: &K) -> Option<RemainingTtl> {
        let entry = self.recent.get(key).or_else(|| self.stale.get(key))?;
        Some(entry.remaining_ttl(Instant::now()))
    }

    /// Inserts a value under the cache's default TTL.
    ///
    /// If `key` is already present in the `recent` generation its entry is
    /// overwritten in place; this is a pure update and cannot trigger a
    /// rotation. Otherwise the pair is appended to `recent`, and filling
    /// `recent` to capacity rotates the generations: every entry still in
    /// `stale` is discarded, firing the eviction callback for each.
    ///
    /// A copy of `key` left in `stale` (from before the last rotation) is
    /// not touched; lookups and iteration always prefer the `recent` copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use duocache::DuoCache;
    ///
    /// let mut cache = DuoCache::new(4).unwrap();
    /// cache.insert("first", 1);
    /// cache.insert("first", 2); // in-place update
    /// assert_eq!(cache.get(&"first"), Some(&2));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let expires_at = self
            .default_ttl
            .and_then(|ttl| Instant::now().checked_add(ttl));
        self.insert_entry(key, CacheEntry::new(value, expires_at));
    }

    /// Inserts a value with an explicit per-entry TTL, overriding the
    /// cache's default.
    ///
    /// `Some(ttl)` expires the entry `ttl` from now; `None` pins the entry
    /// so it never expires, even when a default TTL is configured. A TTL of
    /// zero is accepted and produces an entry that is already due.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use duocache::DuoCache;
    ///
    /// let mut cache = DuoCache::builder(4)
    ///     .default_ttl(Duration::from_secs(1))
    ///     .build()
    ///     .unwrap();
    ///
    /// cache.insert_with_ttl("long", 1, Some(Duration::from_secs(3600)));
    /// cache.insert_with_ttl("pinned", 2, None);
    /// ```
    pub fn insert_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.insert_entry(key, CacheEntry::new(value, expires_at));
    }

    /// Removes `key` from both generations.
    ///
    /// Returns true if the key was present in either generation. The
    /// eviction callback does not fire; manual removal is not an eviction.
    pub fn remove(&mut self, key: &K) -> bool {
        let from_recent = self.recent.shift_remove(key).is_some();
        if from_recent {
            self.insert_count = self.insert_count.saturating_sub(1);
        }
        let from_stale = self.stale.shift_remove(key).is_some();
        from_recent || from_stale
    }

    /// Empties both generations. The eviction callback does not fire.
    pub fn clear(&mut self) {
        self.recent.clear();
        self.stale.clear();
        self.insert_count = 0;
    }

    /// Number of distinct live keys, never exceeding [`capacity`].
    ///
    /// Keys present in both generations are counted once. This is an
    /// O(`stale` size) computation: deduplication needs a membership scan.
    /// Expired-but-unswept entries still count; they disappear on their
    /// next read or enumeration.
    ///
    /// [`capacity`]: Self::capacity
    pub fn len(&self) -> usize {
        if self.insert_count == 0 {
            return usize::min(self.stale.len(), self.capacity);
        }
        let carried = self
            .stale
            .keys()
            .filter(|key| !self.recent.contains_key(*key))
            .count();
        usize::min(self.insert_count + carried, self.capacity)
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.stale.is_empty()
    }

    /// Maximum number of live entries the cache reports holding. Raw
    /// storage across both generations can transiently exceed this while
    /// older entries await rotation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The TTL applied by [`insert`](Self::insert), or `None` when entries
    /// do not expire by default.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Cache statistics recorded so far.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Iterates entries from oldest to newest approximate recency.
    ///
    /// Walks `stale` in insertion order - skipping keys that also exist in
    /// `recent`, whose fresher copy wins - then `recent` in insertion
    /// order. Expired entries are removed (firing the eviction callback)
    /// before the traversal yields anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use duocache::DuoCache;
    ///
    /// let mut cache = DuoCache::new(10).unwrap();
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    ///
    /// let keys: Vec<_> = cache.ascending().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, ["a", "b"]);
    /// ```
    pub fn ascending(&mut self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let now = Instant::now();
        self.prune_stale(now);
        self.prune_recent(now);

        let recent = &self.recent;
        self.stale
            .iter()
            .filter(move |(key, _)| !recent.contains_key(*key))
            .chain(recent.iter())
            .map(|(key, entry)| (key, &entry.value))
    }

    /// Iterates entries from newest to oldest approximate recency.
    ///
    /// The exact reverse of [`ascending`](Self::ascending): `recent` in
    /// reverse insertion order, then `stale` in reverse insertion order
    /// excluding keys shadowed by `recent`. Applies the same expiry
    /// pruning.
    pub fn descending(&mut self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let now = Instant::now();
        self.prune_stale(now);
        self.prune_recent(now);

        let recent = &self.recent;
        recent
            .iter()
            .rev()
            .chain(
                self.stale
                    .iter()
                    .rev()
                    .filter(move |(key, _)| !recent.contains_key(*key)),
            )
            .map(|(key, entry)| (key, &entry.value))
    }

    /// Iterates entries in plain traversal order: `recent` first (insertion
    /// order), then the unshadowed remainder of `stale`.
    ///
    /// Note that this is *not* the same order as
    /// [`ascending`](Self::ascending) or [`descending`](Self::descending);
    /// it mirrors how the two generations are laid out rather than
    /// approximate recency. Applies the same expiry pruning as the ordered
    /// traversals.
    pub fn iter(&mut self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let now = Instant::now();
        self.prune_recent(now);
        self.prune_stale(now);

        let recent = &self.recent;
        recent
            .iter()
            .chain(
                self.stale
                    .iter()
                    .filter(move |(key, _)| !recent.contains_key(*key)),
            )
            .map(|(key, entry)| (key, &entry.value))
    }

    /// Iterates keys in plain traversal order. See [`iter`](Self::iter).
    pub fn keys(&mut self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates values in plain traversal order. See [`iter`](Self::iter).
    pub fn values(&mut self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Changes the cache capacity, discarding the oldest entries if the
    /// live set no longer fits.
    ///
    /// The surviving entries are reassembled from the ascending,
    /// expiry-pruned view of both generations. When shrinking, the oldest
    /// `len - new_capacity` entries are discarded, firing the eviction
    /// callback for each; the survivors become the `stale` generation.
    /// When growing (or when everything fits), all entries become the
    /// `recent` generation and nothing is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `new_capacity` is zero;
    /// the cache is left untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), CacheError> {
        if new_capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }

        let mut entries = self.take_entries_ascending();
        if entries.len() < new_capacity {
            self.insert_count = entries.len();
            self.recent = entries.into_iter().collect();
        } else {
            let kept = entries.split_off(entries.len() - new_capacity);
            debug!(
                old_capacity = self.capacity,
                new_capacity,
                discarded = entries.len(),
                "resizing cache"
            );
            self.emit_evictions(entries);
            self.stale = kept.into_iter().collect();
        }
        self.capacity = new_capacity;
        Ok(())
    }

    /// Manually evicts up to `count` of the oldest entries.
    ///
    /// At least one live entry always survives a non-empty cache, however
    /// large `count` is; `count == 0` evicts nothing. The eviction callback
    /// fires for each discarded entry, oldest first. Returns the number of
    /// entries actually evicted.
    ///
    /// Expired entries are swept (and reported through the callback as
    /// expirations) before the eviction quota is applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use duocache::DuoCache;
    ///
    /// let mut cache = DuoCache::new(10).unwrap();
    /// for i in 0..5 {
    ///     cache.insert(i, i * 10);
    /// }
    ///
    /// assert_eq!(cache.evict(100), 4); // one entry always survives
    /// assert_eq!(cache.len(), 1);
    /// assert!(cache.contains_key(&4));
    /// ```
    pub fn evict(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }

        let mut entries = self.take_entries_ascending();
        let quota = count.min(entries.len().saturating_sub(1));
        let kept = entries.split_off(quota);
        let evicted = entries.len();
        if evicted > 0 {
            debug!(requested = count, evicted, "evicting oldest entries");
            self.emit_evictions(entries);
        }
        self.stale = kept.into_iter().collect();
        evicted
    }

    /// Appends an entry to `recent`, rotating the generations if that
    /// fills the current insertion window.
    fn insert_into_recent(&mut self, key: K, entry: CacheEntry<V>) {
        self.recent.insert(key, entry);
        self.insert_count += 1;
        if self.insert_count >= self.capacity {
            self.rotate();
        }
    }

    fn insert_entry(&mut self, key: K, entry: CacheEntry<V>) {
        if let Some(existing) = self.recent.get_mut(&key) {
            // Pure update: no counter bump, no rotation.
            *existing = entry;
            return;
        }
        self.insert_into_recent(key, entry);
    }

    /// Discards the `stale` generation, demotes `recent`, and starts a
    /// fresh empty `recent`. The swap commits before any callback runs, so
    /// a panicking callback cannot leave the generations inconsistent.
    fn rotate(&mut self) {
        let outgoing = std::mem::replace(&mut self.stale, std::mem::take(&mut self.recent));
        self.insert_count = 0;
        debug!(discarded = outgoing.len(), "rotating generations");
        self.emit_evictions(outgoing);
    }

    /// Removes the entry for `key` if it has expired, firing the eviction
    /// callback. The `recent` copy is consulted first; an expired removal
    /// clears the key from both generations, like [`remove`](Self::remove).
    ///
    /// Returns true when an expired entry was removed. Shared by every
    /// read path; enumeration uses the bulk variants below.
    fn sweep_if_expired(&mut self, key: &K, now: Instant) -> bool {
        let expired = self
            .recent
            .get(key)
            .or_else(|| self.stale.get(key))
            .map_or(false, |entry| entry.is_expired(now));
        if !expired {
            return false;
        }

        let recent_copy = self.recent.shift_remove_entry(key);
        if recent_copy.is_some() {
            self.insert_count = self.insert_count.saturating_sub(1);
        }
        let stale_copy = self.stale.shift_remove_entry(key);
        if let Some((key, entry)) = recent_copy.or(stale_copy) {
            trace!("removed expired entry");
            #[cfg(feature = "stats")]
            self.stats.record_expirations(1);
            if let Some(callback) = self.on_eviction.as_mut() {
                callback(&key, &entry.value);
            }
        }
        true
    }

    /// Sweeps expired entries out of `stale`, leaving copies shadowed by
    /// `recent` alone: the fresher copy wins and is checked on its turn.
    fn prune_stale(&mut self, now: Instant) {
        let Self {
            recent,
            stale,
            on_eviction,
            ..
        } = self;

        let mut expired = 0u64;
        stale.retain(|key, entry| {
            if recent.contains_key(key) || !entry.is_expired(now) {
                return true;
            }
            if let Some(callback) = on_eviction.as_mut() {
                callback(key, &entry.value);
            }
            expired += 1;
            false
        });

        if expired > 0 {
            trace!(expired, "pruned expired stale entries");
            #[cfg(feature = "stats")]
            self.stats.record_expirations(expired);
        }
    }

    /// Sweeps expired entries out of `recent`. An expired `recent` key also
    /// drops its shadowed `stale` copy, silently; the callback fires once
    /// with the `recent` value.
    fn prune_recent(&mut self, now: Instant) {
        if !self.recent.values().any(|entry| entry.is_expired(now)) {
            return;
        }

        let mut expired = 0u64;
        let drained = std::mem::take(&mut self.recent);
        for (key, entry) in drained {
            if entry.is_expired(now) {
                self.insert_count = self.insert_count.saturating_sub(1);
                self.stale.shift_remove(&key);
                expired += 1;
                if let Some(callback) = self.on_eviction.as_mut() {
                    callback(&key, &entry.value);
                }
            } else {
                self.recent.insert(key, entry);
            }
        }

        trace!(expired, "pruned expired recent entries");
        #[cfg(feature = "stats")]
        self.stats.record_expirations(expired);
    }

    /// Drains both generations into a single expiry-pruned list in
    /// ascending order, leaving the cache empty with `insert_count == 0`.
    /// The substrate for [`resize`](Self::resize) and
    /// [`evict`](Self::evict).
    fn take_entries_ascending(&mut self) -> Vec<(K, CacheEntry<V>)> {
        let now = Instant::now();
        self.prune_stale(now);
        self.prune_recent(now);

        let recent = std::mem::take(&mut self.recent);
        let stale = std::mem::take(&mut self.stale);
        self.insert_count = 0;

        let mut entries = Vec::with_capacity(recent.len() + stale.len());
        for (key, entry) in stale {
            if !recent.contains_key(&key) {
                entries.push((key, entry));
            }
        }
        entries.extend(recent);
        entries
    }

    /// Reports a batch of discarded entries to the eviction callback and
    /// the eviction counter. The entries have already left the maps.
    fn emit_evictions<I>(&mut self, discarded: I)
    where
        I: IntoIterator<Item = (K, CacheEntry<V>)>,
        I::IntoIter: ExactSizeIterator,
    {
        let discarded = discarded.into_iter();
        #[cfg(feature = "stats")]
        self.stats.record_evictions(discarded.len() as u64);
        if let Some(callback) = self.on_eviction.as_mut() {
            for (key, entry) in discarded {
                callback(&key, &entry.value);
            }
        }
    }

    #[inline]
    fn record_hit(&mut self) {
        #[cfg(feature = "stats")]
        self.stats.record_hit();
    }

    #[inline]
    fn record_miss(&mut self) {
        #[cfg(feature = "stats")]
        self.stats.record_miss();
    }
}

impl<K: Hash + Eq, V> fmt::Display for DuoCache<K, V> {
    /// Formats a summary of the form `DuoCache(len/capacity)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DuoCache({}/{})", self.len(), self.capacity)
    }
}

impl<K: Hash + Eq, V> fmt::Debug for DuoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuoCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_len<K: Hash + Eq, V>(cache: &DuoCache<K, V>) -> usize {
        cache.recent.len() + cache.stale.len()
    }

    #[test]
    fn test_rotation_swaps_generations() {
        let mut cache = DuoCache::new(2).unwrap();
        cache.insert("a", 1);
        assert_eq!(cache.recent.len(), 1);
        assert_eq!(cache.stale.len(), 0);

        // Second insert fills the window and rotates.
        cache.insert("b", 2);
        assert_eq!(cache.recent.len(), 0);
        assert_eq!(cache.stale.len(), 2);
        assert_eq!(cache.insert_count, 0);
    }

    #[test]
    fn test_in_place_update_does_not_count_as_insert() {
        let mut cache = DuoCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("a", 2);
        cache.insert("a", 3);

        assert_eq!(cache.insert_count, 1);
        assert_eq!(cache.recent.len(), 1);
        assert_eq!(cache.get(&"a"), Some(&3));
    }

    #[test]
    fn test_promotion_moves_entry_to_recent() {
        let mut cache = DuoCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2); // rotation: both now stale

        assert!(cache.stale.contains_key(&"a"));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert!(cache.recent.contains_key(&"a"));
        assert!(!cache.stale.contains_key(&"a"));
        assert_eq!(cache.insert_count, 1);
    }

    #[test]
    fn test_key_may_exist_in_both_generations() {
        let mut cache = DuoCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2); // rotation
        cache.insert("a", 10); // fresh copy in recent, old copy still stale

        assert!(cache.recent.contains_key(&"a"));
        assert!(cache.stale.contains_key(&"a"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
    }

    #[test]
    fn test_raw_storage_bounded_by_twice_capacity() {
        let mut cache = DuoCache::new(8).unwrap();
        for i in 0..1000 {
            cache.insert(i, i);
            assert!(raw_len(&cache) <= 16);
            assert!(cache.len() <= 8);
        }
    }

    #[test]
    fn test_remove_decrements_insert_count_only_for_recent() {
        let mut cache = DuoCache::new(3).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.insert_count, 2);

        assert!(cache.remove(&"a"));
        assert_eq!(cache.insert_count, 1);

        cache.insert("c", 3); // window now at 2 of 3
        cache.insert("d", 4); // fills the window, rotates
        assert_eq!(cache.insert_count, 0);

        // "b" lives in stale; removing it leaves the counter alone.
        assert!(cache.remove(&"b"));
        assert_eq!(cache.insert_count, 0);
        assert!(!cache.remove(&"b"));
    }

    #[test]
    fn test_promotion_can_trigger_rotation() {
        let mut cache = DuoCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2); // rotation: a, b stale
        cache.insert("c", 3); // recent: c

        // Promoting "a" pushes recent to capacity and rotates again,
        // discarding "b".
        assert_eq!(cache.get(&"a"), Some(&1));
        assert!(!cache.contains_key(&"b"));
        assert!(cache.contains_key(&"a"));
        assert!(cache.contains_key(&"c"));
    }

    #[test]
    fn test_display_summary() {
        let mut cache = DuoCache::new(10).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.to_string(), "DuoCache(2/10)");
    }

    #[test]
    fn test_debug_is_not_exhaustive_over_values() {
        let mut cache = DuoCache::new(3).unwrap();
        cache.insert("secret", 42);
        let rendered = format!("{cache:?}");
        assert!(rendered.contains("capacity: 3"));
        assert!(!rendered.contains("42"));
    }

    #[test]
    fn test_take_entries_ascending_resets_state() {
        let mut cache = DuoCache::new(3).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3); // rotation
        cache.insert("d", 4);

        let entries = cache.take_entries_ascending();
        let keys: Vec<_> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["a", "b", "c", "d"]);
        assert!(cache.recent.is_empty());
        assert!(cache.stale.is_empty());
        assert_eq!(cache.insert_count, 0);
    }
}
