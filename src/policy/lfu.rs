//! # LFU (Least Frequently Used) Cache Implementation
//!
//! Evicts the entry with the lowest access frequency when capacity is
//! reached. Entries tied at the minimum frequency are broken by recency:
//! the least recently touched of them is the victim, so a burst of new
//! keys cannot immediately push out each other in insertion order.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                         LfuCache<K, V>                         │
//!   │                                                                │
//!   │   index: FxHashMap<K, (freq, SlotId)>                          │
//!   │              │                                                 │
//!   │              ▼                                                 │
//!   │   buckets: FxHashMap<freq, LinkedSlab<Entry>>                  │
//!   │                                                                │
//!   │   freq 1:  front ─► [k5] ◄──► [k2] ◄─ back   ◄── min_freq      │
//!   │   freq 2:  front ─► [k9] ◄─ back                │              │
//!   │   freq 7:  front ─► [k1] ◄─ back                │              │
//!   │                            │                    │              │
//!   │                            └── victim: back of min bucket      │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each frequency owns a slab-backed recency list; a touch moves the entry
//! from its bucket to the front of the `freq + 1` bucket. `min_freq` tracks
//! the lowest populated frequency, so eviction is O(1) and a touch is O(1).
//! Empty buckets are dropped eagerly.
//!
//! ## Core Operations
//!
//! | Method          | Complexity | Description                               |
//! |-----------------|------------|-------------------------------------------|
//! | `new(cap)`      | O(1)       | Create cache with fixed capacity          |
//! | `insert(k,v)`   | O(1)       | Insert or update; may evict the LFU entry |
//! | `get(&k)`       | O(1)       | Lookup; hit bumps the entry's frequency   |
//! | `peek(&k)`      | O(1)       | Lookup without a frequency bump           |
//! | `remove(&k)`    | O(1)*      | Remove entry by key                       |
//! | `pop_lfu()`     | O(1)       | Remove and return the LFU entry           |
//! | `peek_lfu()`    | O(1)       | Borrow the LFU entry without removing it  |
//! | `frequency(&k)` | O(1)       | Current access count for a key            |
//!
//! (*) Removing the last entry of the minimum bucket rescans bucket keys to
//! re-establish `min_freq`; the bucket count is bounded by the number of
//! distinct frequencies in use.
//!
//! ## Frequency Semantics
//!
//! Frequency starts at 1 on first insert. Every hit (`get`) and every
//! in-place update (`insert` over an existing key) adds 1. Updating an
//! existing key never changes the entry count and never evicts.
//!
//! ## Thread Safety
//!
//! - `LfuCache`: **NOT thread-safe** - single-threaded only
//! - `SharedLfuCache`: thread-safe via `parking_lot::RwLock`; values are
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
use crate::metrics::{LfuMetrics, LfuMetricsSnapshot};
use crate::traits::{CoreCache, InsertOutcome, LfuCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LFU cache core over a hash index and per-frequency recency buckets.
///
/// See module-level documentation for the layout and semantics.
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, (u64, SlotId)>,
    buckets: FxHashMap<u64, LinkedSlab<Entry<K, V>>>,
    /// Lowest populated frequency; 0 only when the cache is empty.
    min_freq: u64,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LFU cache with the given capacity.
    ///
    /// A capacity of 0 creates a cache that rejects every insert.
    pub fn new(capacity: usize) -> Self {
        LfuCache {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Read-only lookup without a frequency bump.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &(freq, id) = self.index.get(key)?;
        self.buckets
            .get(&freq)
            .and_then(|bucket| bucket.get(id))
            .map(|entry| &entry.value)
    }

    /// Detaches an entry from its bucket, dropping the bucket if it empties.
    ///
    /// Returns the entry and whether its bucket emptied; callers own
    /// re-establishing `min_freq`.
    fn detach(&mut self, freq: u64, id: SlotId) -> (Entry<K, V>, bool) {
        let bucket = self.buckets.get_mut(&freq).expect("lfu bucket missing");
        let entry = bucket.remove(id).expect("lfu entry missing");
        let emptied = bucket.is_empty();
        if emptied {
            self.buckets.remove(&freq);
        }
        (entry, emptied)
    }

    /// Recomputes `min_freq` by scanning the remaining bucket keys.
    ///
    /// Bounded by the number of distinct frequencies in use. Only the
    /// removal paths pay for this; a touch stays O(1).
    fn rescan_min_freq(&mut self) {
        self.min_freq = self.buckets.keys().min().copied().unwrap_or(0);
    }

    /// Moves an entry to the front of the `freq + 1` bucket.
    fn bump(&mut self, key: &K) {
        let &(freq, id) = self.index.get(key).expect("lfu index entry missing");
        let (entry, emptied) = self.detach(freq, id);
        let next = freq + 1;
        let new_id = self.buckets.entry(next).or_default().push_front(entry);
        // If the touched entry drained the minimum bucket, every other
        // bucket sits strictly above `freq`, so the new minimum is exactly
        // where the entry just landed.
        if emptied && freq == self.min_freq {
            self.min_freq = next;
        }
        self.index.insert(key.clone(), (next, new_id));
        self.validate_invariants();
    }

    /// Removes and returns the back of the minimum-frequency bucket.
    fn evict_lfu(&mut self) -> Option<(K, V)> {
        if self.index.is_empty() {
            return None;
        }
        let bucket = self
            .buckets
            .get_mut(&self.min_freq)
            .expect("lfu min bucket missing");
        let entry = bucket.pop_back().expect("lfu min bucket empty");
        let emptied = bucket.is_empty();
        if emptied {
            let freq = self.min_freq;
            self.buckets.remove(&freq);
        }
        self.index.remove(&entry.key);
        if emptied {
            self.rescan_min_freq();
        }
        Some((entry.key, entry.value))
    }

    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let bucket_total: usize = self.buckets.values().map(|b| b.len()).sum();
            debug_assert_eq!(bucket_total, self.index.len());
            debug_assert!(self.buckets.values().all(|b| !b.is_empty()));
            if self.index.is_empty() {
                debug_assert_eq!(self.min_freq, 0);
            } else {
                debug_assert!(self.buckets.contains_key(&self.min_freq));
                debug_assert_eq!(
                    self.buckets.keys().min().copied(),
                    Some(self.min_freq)
                );
            }
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        if let Some(&(freq, id)) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }

            let bucket = self.buckets.get_mut(&freq).expect("lfu bucket missing");
            let entry = bucket.get_mut(id).expect("lfu entry missing");
            let previous = std::mem::replace(&mut entry.value, value);
            // An update counts as an access, so the entry also climbs a
            // frequency bucket. The entry count is untouched.
            self.bump(&key);
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
            if let Some((evicted_key, evicted_value)) = self.evict_lfu() {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.evicted_entries += 1;
                }
                outcome = InsertOutcome::Evicted(evicted_key, evicted_value);
            }
        }

        let id = self.buckets.entry(1).or_default().push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, (1, id));
        self.min_freq = 1;

        self.validate_invariants();
        outcome
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.index.contains_key(key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.get_calls += 1;
                self.metrics.get_misses += 1;
            }
            return None;
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.get_calls += 1;
            self.metrics.get_hits += 1;
        }

        self.bump(key);
        let &(freq, id) = self.index.get(key).expect("lfu index entry missing");
        self.buckets
            .get(&freq)
            .and_then(|bucket| bucket.get(id))
            .map(|entry| &entry.value)
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
        self.buckets.clear();
        self.min_freq = 0;
        self.validate_invariants();
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let (freq, id) = self.index.remove(key)?;
        let (entry, emptied) = self.detach(freq, id);
        if emptied && freq == self.min_freq {
            self.rescan_min_freq();
        }
        self.validate_invariants();
        Some(entry.value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lfu_calls += 1;
        }

        let popped = self.evict_lfu();

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.pop_lfu_found += 1;
        }

        self.validate_invariants();
        popped
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_lfu_calls.incr();

        if self.index.is_empty() {
            return None;
        }
        let entry = self
            .buckets
            .get(&self.min_freq)
            .and_then(|bucket| bucket.back())?;

        #[cfg(feature = "metrics")]
        self.metrics.peek_lfu_found.incr();

        Some((&entry.key, &entry.value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.frequency_calls.incr();

        let freq = self.index.get(key).map(|&(freq, _)| freq);

        #[cfg(feature = "metrics")]
        if freq.is_some() {
            self.metrics.frequency_found.incr();
        }

        freq
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            insert_rejects: self.metrics.insert_rejects,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("min_freq", &self.min_freq)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LFU cache wrapper.
///
/// Every operation that changes frequency state takes the write lock,
/// including `get`. Values are stored as `Arc<V>` so lookups return owned
/// handles.
#[cfg(feature = "concurrency")]
pub struct SharedLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LfuCache<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for SharedLfuCache<K, V>
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
impl<K, V> fmt::Debug for SharedLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("SharedLfuCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> SharedLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe LFU cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LfuCache::new(capacity))),
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

    /// Looks up a value, bumping its frequency.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).cloned()
    }

    /// Looks up a value without a frequency bump.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).cloned()
    }

    /// Removes an entry by key.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Removes and returns the least frequently used entry.
    pub fn pop_lfu(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lfu()
    }

    /// Returns a copy of the least frequently used entry without removing it.
    pub fn peek_lfu(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache
            .peek_lfu()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    /// Gets the access frequency for a key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.read().frequency(key)
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
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_roundtrip() {
        let mut cache = LfuCache::new(4);
        assert_eq!(cache.insert("a", 1), InsertOutcome::Inserted);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn frequency_starts_at_one_and_counts_hits() {
        let mut cache = LfuCache::new(4);
        cache.insert("a", 1);
        assert_eq!(cache.frequency(&"a"), Some(1));

        cache.get(&"a");
        cache.get(&"a");
        assert_eq!(cache.frequency(&"a"), Some(3));
        assert_eq!(cache.frequency(&"missing"), None);
    }

    #[test]
    fn eviction_picks_lowest_frequency() {
        let mut cache = LfuCache::new(2);
        cache.insert("hot", 1);
        cache.insert("cold", 2);
        cache.get(&"hot");

        let outcome = cache.insert("new", 3);
        assert_eq!(outcome, InsertOutcome::Evicted("cold", 2));
        assert!(cache.contains(&"hot"));
        assert!(cache.contains(&"new"));
    }

    #[test]
    fn tie_break_is_least_recently_touched() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        // All at frequency 1; "a" has gone longest without a touch.
        assert_eq!(cache.insert("d", 4), InsertOutcome::Evicted("a", 1));
    }

    #[test]
    fn update_bumps_frequency_without_growth() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        let outcome = cache.insert("a", 10);
        assert_eq!(outcome, InsertOutcome::Replaced(1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.frequency(&"a"), Some(2));
        assert_eq!(cache.peek(&"a"), Some(&10));

        // Repeated updates of the same key never evict anything.
        for i in 0..10 {
            assert!(!cache.insert("a", i).was_evicted());
        }
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn min_frequency_advances_after_eviction() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");
        cache.get(&"b");

        // Both now at frequency 2; the new entry lands at frequency 1 and
        // the next eviction has to come from there.
        assert_eq!(cache.insert("c", 3), InsertOutcome::Evicted("a", 1));
        assert_eq!(cache.insert("d", 4), InsertOutcome::Evicted("c", 3));
        assert!(cache.contains(&"b"));
    }

    #[test]
    fn touch_that_empties_min_bucket_advances_minimum() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");

        // "b" is the sole frequency-1 entry; touching it drains that
        // bucket and the minimum moves up to 2 with it.
        cache.get(&"b");
        assert_eq!(cache.frequency(&"b"), Some(2));
        assert_eq!(cache.peek_lfu(), Some((&"a", &1)));
        assert_eq!(cache.pop_lfu(), Some(("a", 1)));
        assert_eq!(cache.pop_lfu(), Some(("b", 2)));
    }

    #[test]
    fn update_that_empties_min_bucket_advances_minimum() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");

        // An in-place update is a touch too: it drains the frequency-1
        // bucket the same way a get does.
        assert_eq!(cache.insert("b", 20), InsertOutcome::Replaced(2));
        assert_eq!(cache.frequency(&"b"), Some(2));
        assert_eq!(cache.peek_lfu(), Some((&"a", &1)));
    }

    #[test]
    fn peek_does_not_change_frequency() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert_eq!(cache.frequency(&"a"), Some(1));
    }

    #[test]
    fn pop_lfu_drains_in_frequency_then_recency_order() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.get(&"a");

        assert_eq!(cache.pop_lfu(), Some(("b", 2)));
        assert_eq!(cache.pop_lfu(), Some(("c", 3)));
        assert_eq!(cache.pop_lfu(), Some(("a", 1)));
        assert_eq!(cache.pop_lfu(), None);
    }

    #[test]
    fn peek_lfu_on_empty_is_none() {
        let cache: LfuCache<&str, i32> = LfuCache::new(3);
        assert_eq!(cache.peek_lfu(), None);
    }

    #[test]
    fn peek_lfu_matches_next_eviction() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");

        assert_eq!(cache.peek_lfu(), Some((&"b", &2)));
        assert_eq!(cache.pop_lfu(), Some(("b", 2)));
    }

    #[test]
    fn remove_rebalances_min_frequency() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"b");

        // "a" is the only frequency-1 entry; removing it leaves "b" at
        // frequency 2 as the new minimum.
        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.peek_lfu(), Some((&"b", &2)));
        assert_eq!(cache.remove(&"a"), None);
    }

    #[test]
    fn capacity_zero_rejects_all_inserts() {
        let mut cache = LfuCache::new(0);
        assert_eq!(cache.insert("a", 1), InsertOutcome::Rejected(1));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.pop_lfu(), None);
    }

    #[test]
    fn clear_resets_frequency_state() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.get(&"a");

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.frequency(&"a"), None);

        cache.insert("a", 2);
        assert_eq!(cache.frequency(&"a"), Some(1));
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let mut cache = LfuCache::new(4);
        for i in 0..100u32 {
            cache.insert(i, i);
            if i % 3 == 0 {
                cache.get(&i);
            }
            assert!(cache.len() <= 4);
        }
        assert_eq!(cache.len(), 4);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_frequency_activity() {
        let mut cache = LfuCache::new(1);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"b");
        cache.get(&"a");

        let snapshot = cache.metrics_snapshot();
        assert_eq!(snapshot.insert_new, 2);
        assert_eq!(snapshot.evicted_entries, 1);
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 1);
    }

    #[cfg(feature = "concurrency")]
    mod shared {
        use super::*;

        #[test]
        fn shared_basic_ops() {
            let cache: SharedLfuCache<u64, String> = SharedLfuCache::new(2);
            cache.insert(1, "one".to_string());
            cache.insert(2, "two".to_string());
            cache.get(&1);

            let outcome = cache.insert(3, "three".to_string());
            assert!(outcome.was_evicted());
            assert!(!cache.contains(&2));
            assert_eq!(cache.frequency(&1), Some(2));
        }
    }
}
