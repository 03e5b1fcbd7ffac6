use std::time::Instant;

/// Internal wrapper that pairs a cached value with its expiry deadline.
///
/// Each value stored in the cache is wrapped in a `CacheEntry` recording the
/// absolute `Instant` at which it expires. Entries with no deadline never
/// expire. Expiry is enforced lazily: nothing inspects these timestamps
/// except the read and enumeration paths of the cache itself.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry<V> {
    pub(crate) value: V,
    pub(crate) expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    /// Returns true if the entry's deadline has passed at `now`.
    ///
    /// Entries without a deadline are never expired.
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => deadline <= now,
            None => false,
        }
    }

    /// Time left until this entry expires, measured from `now`.
    pub(crate) fn remaining_ttl(&self, now: Instant) -> RemainingTtl {
        match self.expires_at {
            None => RemainingTtl::Unbounded,
            Some(deadline) if deadline >= now => {
                RemainingTtl::Millis(deadline.duration_since(now).as_millis() as i64)
            }
            Some(deadline) => {
                RemainingTtl::Millis(-(now.duration_since(deadline).as_millis() as i64))
            }
        }
    }
}

/// Remaining time-to-live of a cache entry, as reported by
/// [`DuoCache::expires_in`](crate::DuoCache::expires_in).
///
/// # Variants
///
/// * `Unbounded` - The entry has no expiry deadline and never expires
/// * `Millis(n)` - Milliseconds until the entry expires. Negative when the
///   deadline has already passed but the entry has not yet been swept by a
///   read or enumeration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use duocache::{DuoCache, RemainingTtl};
///
/// let mut cache = DuoCache::new(4).unwrap();
/// cache.insert("forever", 1);
/// cache.insert_with_ttl("brief", 2, Some(Duration::from_secs(60)));
///
/// assert_eq!(cache.expires_in(&"forever"), Some(RemainingTtl::Unbounded));
/// assert!(matches!(
///     cache.expires_in(&"brief"),
///     Some(RemainingTtl::Millis(ms)) if ms > 0 && ms <= 60_000
/// ));
/// assert_eq!(cache.expires_in(&"missing"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemainingTtl {
    /// No expiry deadline is set for the entry.
    Unbounded,
    /// Milliseconds until expiry; negative if already due but not yet swept.
    Millis(i64),
}
