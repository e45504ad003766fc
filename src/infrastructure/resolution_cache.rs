//! Resolution Cache
//!
//! Fixed-capacity, least-recently-used memo of IP string -> country.
//! Entries never expire; the only way out is being the oldest entry
//! when a new one arrives at capacity.

use crate::domain::entities::CountryResult;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Default number of distinct addresses remembered.
pub const DEFAULT_CACHE_CAPACITY: usize = 50_000;

/// Thread-safe LRU cache of resolved countries.
///
/// The lock is held only for a single get or insert, never across a
/// database lookup.
pub struct ResolutionCache {
    inner: Mutex<LruCache<String, CountryResult>>,
    capacity: NonZeroUsize,
}

impl ResolutionCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            capacity,
        }
    }

    /// Fetch a cached result and mark it most recently used.
    pub fn get(&self, ip: &str) -> Option<CountryResult> {
        self.inner.lock().get(ip).cloned()
    }

    /// Store a result, evicting the least recently used entry when full.
    pub fn insert(&self, ip: String, result: CountryResult) {
        self.inner.lock().put(ip, result);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn country(code: &str) -> CountryResult {
        CountryResult::new(code, format!("Country {}", code))
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ResolutionCache::new(10);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn test_default_capacity() {
        let cache = ResolutionCache::default();
        assert_eq!(cache.capacity(), 50_000);
    }

    #[test]
    fn test_zero_capacity_clamped_to_one() {
        let cache = ResolutionCache::new(0);
        assert_eq!(cache.capacity(), 1);

        cache.insert("1.1.1.1".to_string(), country("AU"));
        cache.insert("8.8.8.8".to_string(), country("US"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("8.8.8.8"), Some(country("US")));
    }

    #[test]
    fn test_insert_and_get() {
        let cache = ResolutionCache::new(10);
        cache.insert("8.8.8.8".to_string(), country("US"));

        assert_eq!(cache.get("8.8.8.8"), Some(country("US")));
        assert_eq!(cache.get("9.9.9.9"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_same_key() {
        let cache = ResolutionCache::new(10);
        cache.insert("8.8.8.8".to_string(), country("US"));
        cache.insert("8.8.8.8".to_string(), country("US"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = ResolutionCache::new(2);
        cache.insert("a".to_string(), country("AA"));
        cache.insert("b".to_string(), country("BB"));

        // Touch "a" so "b" becomes the oldest
        assert!(cache.get("a").is_some());

        cache.insert("c".to_string(), country("CC"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let cache = ResolutionCache::new(100);
        for i in 0..1_000 {
            cache.insert(format!("10.0.{}.{}", i / 256, i % 256), country("ZZ"));
        }
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ResolutionCache::new(1_000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("{}.{}", t, i);
                        cache.insert(key.clone(), country("US"));
                        assert!(cache.get(&key).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 800);
    }
}
