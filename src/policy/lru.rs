//! # LRU (Least Recently Used) Cache Implementation
//!
//! Evicts the least recently touched entry when capacity is reached. Both
//! inserts and lookups count as touches, so the back of the recency list is
//! always the entry that has gone longest without access.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                        │
//!   │                                                              │
//!   │   index: FxHashMap<K, SlotId>                                │
//!   │              │                                               │
//!   │              ▼                                               │
//!   │   entries: LinkedSlab<Entry<K, V>>                           │
//!   │                                                              │
//!   │   front (MRU) ─► [k3] ◄──► [k1] ◄──► [k2] ◄─ back (LRU)      │
//!   │                                        │                     │
//!   │                                        └── eviction victim   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nodes live in a slab of reusable slots and are linked by `SlotId`, so
//! `get`, `insert`, `remove`, and eviction are all O(1) with no raw
//! pointers; the index maps keys to slot handles, never to references.
//!
//! ## Core Operations
//!
//! | Method        | Complexity | Description                                |
//! |---------------|------------|--------------------------------------------|
//! | `new(cap)`    | O(1)       | Create cache with fixed capacity           |
//! | `insert(k,v)` | O(1)       | Insert or update; may evict the LRU entry  |
//! | `get(&k)`     | O(1)       | Lookup; hit moves the entry to the front   |
//! | `peek(&k)`    | O(1)       | Lookup without touching recency order      |
//! | `remove(&k)`  | O(1)       | Remove entry by key                        |
//! | `pop_lru()`   | O(1)       | Remove and return the LRU entry            |
//! | `peek_lru()`  | O(1)       | Borrow the LRU entry without removing it   |
//! | `touch(&k)`   | O(1)       | Refresh recency without fetching the value |
//!
//! ## Capacity 0
//!
//! A capacity of 0 is a valid degenerate configuration: every insert of a
//! new key is rejected (`InsertOutcome::Rejected`), the length stays 0, and
//! no operation panics or loops.
//!
//! ## Thread Safety
//!
//! - `LruCache`: **NOT thread-safe** - single-threaded only
//! - `SharedLruCache`: thread-safe via `parking_lot::RwLock`; values are
//!   `Arc<V>` so `get` hands out owned clones without copying data

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::linked_slab::LinkedSlab;
use crate::ds::SlotId;
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};
use crate::traits::{CoreCache, InsertOutcome, LruCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LRU cache core over a hash index and a slab-backed recency list.
///
/// Most-recently-used entries sit at the front of the list; the back entry
/// is the eviction victim. See module-level documentation for details.
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    entries: LinkedSlab<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LRU cache with the given capacity.
    ///
    /// A capacity of 0 creates a cache that rejects every insert.
    pub fn new(capacity: usize) -> Self {
        LruCache {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: LinkedSlab::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Read-only lookup without a recency update.
    ///
    /// Unlike [`get`](CoreCache::get), this does not move the entry to the
    /// front, so it never changes which entry is evicted next.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Removes and returns the back (LRU) entry from both structures.
    fn evict_back(&mut self) -> Option<(K, V)> {
        let entry = self.entries.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            self.entries.debug_validate_invariants();
            debug_assert_eq!(self.index.len(), self.entries.len());
            for (id, entry) in self.entries.iter() {
                debug_assert_eq!(self.index.get(&entry.key), Some(&id));
            }
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }

            let entry = self.entries.get_mut(id).expect("lru entry missing");
            let previous = std::mem::replace(&mut entry.value, value);
            self.entries.move_to_front(id);

            self.validate_invariants();
            return InsertOutcome::Replaced(previous);
        }

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_rejects += 1;
            }
            return InsertOutcome::Rejected(value);
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_new += 1;
        }

        let mut outcome = InsertOutcome::Inserted;
        if self.index.len() >= self.capacity {
            if let Some((evicted_key, evicted_value)) = self.evict_back() {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.evicted_entries += 1;
                }
                outcome = InsertOutcome::Evicted(evicted_key, evicted_value);
            }
        }

        let id = self.entries.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        self.validate_invariants();
        outcome
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.get_calls += 1;
                    self.metrics.get_misses += 1;
                }
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.get_calls += 1;
            self.metrics.get_hits += 1;
        }

        self.entries.move_to_front(id);
        self.validate_invariants();
        self.entries.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.validate_invariants();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.entries.remove(id).expect("lru entry missing");
        self.validate_invariants();
        Some(entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lru_calls += 1;
        }

        let popped = self.evict_back();

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.pop_lru_found += 1;
        }

        self.validate_invariants();
        popped
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_lru_calls.incr();

        let entry = self.entries.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.peek_lru_found.incr();

        Some((&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        {
            self.metrics.touch_calls += 1;
        }

        if let Some(&id) = self.index.get(key) {
            self.entries.move_to_front(id);

            #[cfg(feature = "metrics")]
            {
                self.metrics.touch_found += 1;
            }

            self.validate_invariants();
            true
        } else {
            false
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            insert_rejects: self.metrics.insert_rejects,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache wrapper.
///
/// Every operation that reorders the recency list takes the write lock;
/// that includes `get`, since an LRU hit is itself a mutation. Only pure
/// introspection (`len`, `capacity`, `contains`, `peek`) takes the read
/// lock. Values are stored as `Arc<V>` so lookups return owned handles.
#[cfg(feature = "concurrency")]
pub struct SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LruCache<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for SharedLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("SharedLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> SharedLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe LRU cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Inserts a value, wrapping it in `Arc`.
    pub fn insert(&self, key: K, value: V) -> InsertOutcome<K, Arc<V>> {
        self.inner.write().insert(key, Arc::new(value))
    }

    /// Inserts an already-shared value without re-wrapping.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> InsertOutcome<K, Arc<V>> {
        self.inner.write().insert(key, value)
    }

    /// Looks up a value, refreshing its recency.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).cloned()
    }

    /// Looks up a value without touching recency order.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).cloned()
    }

    /// Removes an entry by key.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Marks an entry as recently used.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lru()
    }

    /// Returns a copy of the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache
            .peek_lru()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_roundtrip() {
        let mut cache = LruCache::new(4);
        assert_eq!(cache.insert("a", 1), InsertOutcome::Inserted);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_order_determines_oldest() {
        let mut cache = LruCache::new(3);
        cache.insert("k1", 1);
        cache.insert("k2", 2);
        cache.insert("k3", 3);

        assert_eq!(cache.peek_lru(), Some((&"k1", &1)));
    }

    #[test]
    fn get_refreshes_recency() {
        let mut cache = LruCache::new(3);
        cache.insert("k1", 1);
        cache.insert("k2", 2);
        cache.insert("k3", 3);

        cache.get(&"k1");
        assert_eq!(cache.peek_lru(), Some((&"k2", &2)));
    }

    #[test]
    fn capacity_one_evicts_previous() {
        let mut cache = LruCache::new(1);
        assert_eq!(cache.insert("a", 1), InsertOutcome::Inserted);
        assert_eq!(cache.insert("b", 2), InsertOutcome::Evicted("a", 1));

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn eviction_picks_least_recent() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");

        let outcome = cache.insert("c", 3);
        assert_eq!(outcome, InsertOutcome::Evicted("b", 2));
        assert!(cache.contains(&"a"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn update_never_signals_eviction_or_grows() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        let outcome = cache.insert("a", 10);
        assert_eq!(outcome, InsertOutcome::Replaced(1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
    }

    #[test]
    fn update_counts_as_touch() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 3);

        // "b" is now the oldest, so it is evicted next.
        assert_eq!(cache.insert("c", 4), InsertOutcome::Evicted("b", 2));
    }

    #[test]
    fn peek_does_not_touch() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        assert_eq!(cache.peek(&"a"), Some(&1));
        assert_eq!(cache.insert("c", 3), InsertOutcome::Evicted("a", 1));
    }

    #[test]
    fn touch_refreshes_without_value() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        assert!(cache.touch(&"a"));
        assert!(!cache.touch(&"missing"));
        assert_eq!(cache.insert("c", 3), InsertOutcome::Evicted("b", 2));
    }

    #[test]
    fn remove_then_miss() {
        let mut cache = LruCache::new(3);
        cache.insert("a", 1);
        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.remove(&"a"), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn pop_lru_drains_in_recency_order() {
        let mut cache = LruCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.get(&"a");

        assert_eq!(cache.pop_lru(), Some(("b", 2)));
        assert_eq!(cache.pop_lru(), Some(("c", 3)));
        assert_eq!(cache.pop_lru(), Some(("a", 1)));
        assert_eq!(cache.pop_lru(), None);
    }

    #[test]
    fn peek_lru_on_empty_is_none() {
        let cache: LruCache<&str, i32> = LruCache::new(3);
        assert_eq!(cache.peek_lru(), None);
    }

    #[test]
    fn capacity_zero_rejects_all_inserts() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.insert("a", 1), InsertOutcome::Rejected(1));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.pop_lru(), None);
    }

    #[test]
    fn clear_is_idempotent_and_reusable() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        cache.clear();
        assert_eq!(cache.len(), 0);
        cache.clear();
        assert_eq!(cache.len(), 0);

        // Behaves like a fresh instance afterwards.
        assert_eq!(cache.insert("c", 3), InsertOutcome::Inserted);
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let mut cache = LruCache::new(4);
        for i in 0..100u32 {
            cache.insert(i, i);
            assert!(cache.len() <= 4);
        }
        assert_eq!(cache.len(), 4);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_evictions() {
        let mut cache = LruCache::new(1);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"b");
        cache.get(&"a");

        let snapshot = cache.metrics_snapshot();
        assert_eq!(snapshot.insert_new, 2);
        assert_eq!(snapshot.evicted_entries, 1);
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 1);
        assert_eq!(snapshot.cache_len, 1);
        assert_eq!(snapshot.capacity, 1);
    }

    #[cfg(feature = "concurrency")]
    mod shared {
        use super::*;

        #[test]
        fn shared_basic_ops() {
            let cache: SharedLruCache<u64, String> = SharedLruCache::new(2);
            cache.insert(1, "one".to_string());
            cache.insert(2, "two".to_string());

            assert_eq!(cache.get(&1).as_deref(), Some(&"one".to_string()));
            assert_eq!(cache.len(), 2);

            // Key 2 is now LRU after the get above.
            let outcome = cache.insert(3, "three".to_string());
            assert!(outcome.was_evicted());
            assert!(!cache.contains(&2));
        }

        #[test]
        fn shared_handles_are_clones() {
            let cache: SharedLruCache<u64, u64> = SharedLruCache::new(4);
            let other = cache.clone();
            cache.insert(1, 10);
            assert_eq!(other.get(&1).as_deref(), Some(&10));
        }
    }
}
