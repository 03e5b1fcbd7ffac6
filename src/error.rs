//! Error types for cache construction and resizing.
//!
//! All lookup operations are total: a missing key is reported as `None` or
//! `false`, never as an error. Only configuration can fail.

use thiserror::Error;

/// Unified error type for cache configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The requested capacity was zero. A cache must be able to hold at
    /// least one entry; this is enforced at construction and at every
    /// [`resize`](crate::DuoCache::resize).
    #[error("cache capacity must be at least 1")]
    InvalidCapacity,

    /// The default TTL was exactly zero. Entries inserted under a zero TTL
    /// would be dead on arrival; pass no default TTL instead if entries
    /// should never expire.
    #[error("default TTL must be greater than zero")]
    InvalidTtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidCapacity.to_string(),
            "cache capacity must be at least 1"
        );
        assert_eq!(
            CacheError::InvalidTtl.to_string(),
            "default TTL must be greater than zero"
        );
    }
}
