//! Bounded LRU stores for extraction results.
//!
//! Two tiers:
//! - **whole text**: [`NormalizedText`] -> final [`EvaluationResult`]
//! - **subsequence**: candidate expression -> evaluator outcome (`Some(value)` on success,
//!   `None` for a definite failure)
//!
//! Entries are plain immutable values, so both tiers can be shared freely between
//! extractions (and threads). Each tier guards its LRU list with its own mutex; no lock is
//! held across an evaluator call.

use crate::extract::EvaluationResult;
use crate::text::NormalizedText;
use lru::LruCache;
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Capacities of the two cache tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of whole-text entries.
    pub whole_text_capacity: usize,
    /// Maximum number of per-candidate entries.
    pub subsequence_capacity: usize,
}

impl CacheConfig {
    /// Default whole-text capacity.
    pub const DEFAULT_WHOLE_TEXT_CAPACITY: usize = 500;
    /// Default per-candidate capacity.
    pub const DEFAULT_SUBSEQUENCE_CAPACITY: usize = 600;
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            whole_text_capacity: Self::DEFAULT_WHOLE_TEXT_CAPACITY,
            subsequence_capacity: Self::DEFAULT_SUBSEQUENCE_CAPACITY,
        }
    }
}

/// A thread-safe, bounded, least-recently-used key/value store.
#[derive(Debug)]
pub struct LruStore<K: Hash + Eq, V> {
    inner: Mutex<LruCache<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> LruStore<K, V> {
    /// Create a store holding at most `capacity` entries (a capacity of 0 is treated as 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        // Entries are replaced whole and never mutated in place; poisoning is ignored.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up `key`, marking it as most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.lock().get(key).cloned();
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Look up `key` without touching recency or hit counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().peek(key).cloned()
    }

    /// Insert or replace `key`, evicting the least recently used entry when full.
    ///
    /// Returns `true` if an entry was evicted.
    pub fn put(&self, key: K, value: V) -> bool {
        let mut cache = self.lock();
        let evicts = !cache.contains(&key) && cache.len() == cache.cap().get();
        cache.put(key, value);
        evicts
    }

    /// Returns `true` if `key` is present (does not touch recency).
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Drop every entry (hit/miss counters are kept).
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of successful lookups since creation or the last [`reset_stats`](Self::reset_stats).
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of failed lookups since creation or the last [`reset_stats`](Self::reset_stats).
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Reset hit/miss counters.
    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of cache occupancy and effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Whole-text entries currently stored.
    pub whole_text_len: usize,
    /// Whole-text lookups that hit.
    pub whole_text_hits: u64,
    /// Whole-text lookups that missed.
    pub whole_text_misses: u64,
    /// Per-candidate entries currently stored.
    pub subsequence_len: usize,
    /// Per-candidate lookups that hit (successes and definite failures).
    pub subsequence_hits: u64,
    /// Per-candidate lookups that missed.
    pub subsequence_misses: u64,
}

/// The two cache tiers used by an [`Extractor`](crate::Extractor).
///
/// Build one per engine instance; share it between extractors with an `Arc` when they use
/// the same evaluator.
#[derive(Debug)]
pub struct ExtractionCache {
    whole_text: LruStore<NormalizedText, EvaluationResult>,
    subsequence: LruStore<String, Option<String>>,
}

impl ExtractionCache {
    /// Create empty tiers with the given capacities.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            whole_text: LruStore::new(config.whole_text_capacity),
            subsequence: LruStore::new(config.subsequence_capacity),
        }
    }

    /// Capacities of both tiers.
    pub fn config(&self) -> CacheConfig {
        CacheConfig {
            whole_text_capacity: self.whole_text.capacity(),
            subsequence_capacity: self.subsequence.capacity(),
        }
    }

    /// Whole-text tier lookup.
    pub fn get_whole_text(&self, text: &NormalizedText) -> Option<EvaluationResult> {
        self.whole_text.get(text)
    }

    /// Whole-text tier store.
    pub fn put_whole_text(&self, text: NormalizedText, result: EvaluationResult) {
        if self.whole_text.put(text, result) {
            log::trace!("whole-text cache full, evicted least recently used entry");
        }
    }

    /// Per-candidate tier lookup.
    ///
    /// The outer `Option` says whether the candidate is known; the inner one whether the
    /// evaluator succeeded (`Some(value)`) or definitely failed (`None`).
    pub fn get_subsequence(&self, expr: &str) -> Option<Option<String>> {
        self.subsequence.get(expr)
    }

    /// Per-candidate tier store. `None` records a definite failure.
    pub fn put_subsequence(&self, expr: String, outcome: Option<String>) {
        self.subsequence.put(expr, outcome);
    }

    /// The whole-text tier.
    pub fn whole_text(&self) -> &LruStore<NormalizedText, EvaluationResult> {
        &self.whole_text
    }

    /// The per-candidate tier.
    pub fn subsequence(&self) -> &LruStore<String, Option<String>> {
        &self.subsequence
    }

    /// Snapshot of both tiers.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            whole_text_len: self.whole_text.len(),
            whole_text_hits: self.whole_text.hits(),
            whole_text_misses: self.whole_text.misses(),
            subsequence_len: self.subsequence.len(),
            subsequence_hits: self.subsequence.hits(),
            subsequence_misses: self.subsequence.misses(),
        }
    }

    /// Reset hit/miss counters of both tiers.
    pub fn reset_stats(&self) {
        self.whole_text.reset_stats();
        self.subsequence.reset_stats();
    }

    /// Drop every entry of both tiers.
    pub fn clear(&self) {
        self.whole_text.clear();
        self.subsequence.clear();
    }
}

impl Default for ExtractionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_store_evicts_least_recently_used() {
        let store: LruStore<&str, u32> = LruStore::new(2);
        assert!(!store.put("a", 1));
        assert!(!store.put("b", 2));

        // Touch "a" so "b" becomes the eviction candidate.
        assert_eq!(store.get(&"a"), Some(1));
        assert!(store.put("c", 3));

        assert_eq!(store.peek(&"a"), Some(1));
        assert_eq!(store.peek(&"b"), None);
        assert_eq!(store.peek(&"c"), Some(3));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_lru_store_replace_does_not_evict() {
        let store: LruStore<&str, u32> = LruStore::new(1);
        store.put("a", 1);
        assert!(!store.put("a", 2));
        assert_eq!(store.get(&"a"), Some(2));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let store: LruStore<u8, u8> = LruStore::new(0);
        assert_eq!(store.capacity(), 1);
        store.put(1, 1);
        assert_eq!(store.get(&1), Some(1));
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let store: LruStore<u8, u8> = LruStore::new(4);
        store.put(1, 10);
        store.get(&1);
        store.get(&2);
        store.get(&1);
        assert_eq!((store.hits(), store.misses()), (2, 1));
        store.reset_stats();
        assert_eq!((store.hits(), store.misses()), (0, 0));
    }

    #[test]
    fn test_negative_entries_are_known() {
        let cache = ExtractionCache::default();
        assert_eq!(cache.get_subsequence("is four"), None);
        cache.put_subsequence("is four".to_string(), None);
        assert_eq!(cache.get_subsequence("is four"), Some(None));
        cache.put_subsequence("2 + 2".to_string(), Some("4".to_string()));
        assert_eq!(
            cache.get_subsequence("2 + 2"),
            Some(Some("4".to_string()))
        );
    }

    #[test]
    fn test_default_capacities() {
        let cache = ExtractionCache::default();
        assert_eq!(cache.config(), CacheConfig::default());
        assert_eq!(cache.config().whole_text_capacity, 500);
        assert_eq!(cache.config().subsequence_capacity, 600);
    }
}
