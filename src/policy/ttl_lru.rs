//! # TTL-LRU Cache Implementation
//!
//! An LRU cache whose entries also carry a time-to-live. Capacity pressure
//! is handled exactly like [`LruCache`](crate::policy::lru::LruCache):
//! inserting a new key at capacity evicts the least recently used entry,
//! regardless of whether fresher entries have already expired. Expiry is
//! **lazy**: there is no background sweeper, and an expired entry is only
//! reclaimed when `get` observes it past its deadline and removes it,
//! reporting a miss.
//!
//! ## Core Operations
//!
//! | Method                     | Complexity | Description                            |
//! |----------------------------|------------|----------------------------------------|
//! | `new(cap, ttl_secs)`       | O(1)       | Create cache with a default TTL        |
//! | `insert(k,v)`              | O(1)       | Insert with the default TTL            |
//! | `insert_with_ttl(k,v,ttl)` | O(1)       | Insert with a per-entry TTL            |
//! | `get(&k)`                  | O(1)       | Lookup; reclaims the entry if expired  |
//! | `expires_at(&k)`           | O(1)       | Deadline for a key, if it has one      |
//! | `pop_lru()` / `peek_lru()` | O(1)       | LRU end access, expiry not consulted   |
//! | `touch(&k)`                | O(1)       | Refresh recency; does not extend TTL   |
//!
//! A TTL of zero or below means the entry never expires; this is also how a
//! cache with no meaningful default TTL is configured.
//!
//! ## Clock Injection
//!
//! The cache is generic over a [`Clock`] and defaults to [`SystemClock`].
//! Tests inject a [`ManualClock`](crate::clock::ManualClock) and advance it
//! explicitly instead of sleeping.
//!
//! ## Thread Safety
//!
//! - `TtlLruCache`: **NOT thread-safe** - single-threaded only
//! - `SharedTtlLruCache`: thread-safe via `parking_lot::RwLock`; values are
//!   `Arc<V>` so `get` hands out owned clones without copying data

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::clock::{Clock, SystemClock};
use crate::ds::linked_slab::LinkedSlab;
use crate::ds::SlotId;
#[cfg(feature = "metrics")]
use crate::metrics::{TtlLruMetrics, TtlLruMetricsSnapshot};
use crate::traits::{CoreCache, InsertOutcome, LruCacheTrait, MutableCache};

/// Converts a TTL in whole seconds to a duration; zero or below means the
/// entry never expires.
fn ttl_duration(ttl_secs: i64) -> Option<Duration> {
    if ttl_secs <= 0 {
        None
    } else {
        Some(Duration::from_secs(ttl_secs as u64))
    }
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    expires_at: Option<Instant>,
}

impl<K, V> Entry<K, V> {
    fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}

/// LRU cache with lazy per-entry expiry.
///
/// See module-level documentation for semantics. The third type parameter
/// selects the time source and defaults to the system clock.
pub struct TtlLruCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    index: FxHashMap<K, SlotId>,
    entries: LinkedSlab<Entry<K, V>>,
    capacity: usize,
    default_ttl: Option<Duration>,
    clock: C,
    #[cfg(feature = "metrics")]
    metrics: TtlLruMetrics,
}

impl<K, V> TtlLruCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new TTL-LRU cache on the system clock.
    ///
    /// `default_ttl_secs` applies to entries inserted via plain `insert`;
    /// zero or below means those entries never expire. A capacity of 0
    /// creates a cache that rejects every insert.
    pub fn new(capacity: usize, default_ttl_secs: i64) -> Self {
        Self::with_clock(capacity, default_ttl_secs, SystemClock)
    }
}

impl<K, V, C> TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Creates a new TTL-LRU cache reading time from the given clock.
    pub fn with_clock(capacity: usize, default_ttl_secs: i64, clock: C) -> Self {
        TtlLruCache {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: LinkedSlab::with_capacity(capacity),
            capacity,
            default_ttl: ttl_duration(default_ttl_secs),
            clock,
            #[cfg(feature = "metrics")]
            metrics: TtlLruMetrics::default(),
        }
    }

    /// Inserts a key-value pair with its own TTL, overriding the default.
    ///
    /// `ttl_secs` of zero or below makes this entry immortal. Inserting
    /// over an existing key replaces its value, resets its deadline from
    /// now, and counts as a touch; this applies even when the previous
    /// entry had already expired but not yet been reclaimed.
    pub fn insert_with_ttl(&mut self, key: K, value: V, ttl_secs: i64) -> InsertOutcome<K, V> {
        let ttl = ttl_duration(ttl_secs);
        self.insert_entry(key, value, ttl)
    }

    /// Read-only lookup without a recency update.
    ///
    /// Returns `None` for an entry past its deadline but does not reclaim
    /// it; reclamation happens on the next `get`.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        let entry = self.entries.get(id)?;
        if entry.is_expired(self.clock.now()) {
            return None;
        }
        Some(&entry.value)
    }

    /// Returns the expiry deadline for a key.
    ///
    /// `None` means the key is absent or the entry never expires.
    pub fn expires_at(&self, key: &K) -> Option<Instant> {
        let id = *self.index.get(key)?;
        self.entries.get(id).and_then(|entry| entry.expires_at)
    }

    fn insert_entry(&mut self, key: K, value: V, ttl: Option<Duration>) -> InsertOutcome<K, V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        let expires_at = ttl.map(|ttl| self.clock.now() + ttl);

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }

            let entry = self.entries.get_mut(id).expect("ttl-lru entry missing");
            let previous = std::mem::replace(&mut entry.value, value);
            entry.expires_at = expires_at;
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
            expires_at,
        });
        self.index.insert(key, id);

        self.validate_invariants();
        outcome
    }

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

impl<K, V, C> CoreCache<K, V> for TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Inserts with the cache's default TTL.
    fn insert(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        self.insert_entry(key, value, self.default_ttl)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.get_calls += 1;
        }

        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.get_misses += 1;
                }
                return None;
            },
        };

        let expired = self
            .entries
            .get(id)
            .expect("ttl-lru entry missing")
            .is_expired(self.clock.now());

        if expired {
            self.index.remove(key);
            self.entries.remove(id);

            #[cfg(feature = "metrics")]
            {
                self.metrics.get_misses += 1;
                self.metrics.expired_entries += 1;
            }
            self.validate_invariants();
            return None;
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.get_hits += 1;
        }

        self.entries.move_to_front(id);
        self.validate_invariants();
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Reports raw presence; an expired entry still counts until `get`
    /// reclaims it.
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

impl<K, V, C> MutableCache<K, V> for TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.entries.remove(id).expect("ttl-lru entry missing");
        self.validate_invariants();
        Some(entry.value)
    }
}

impl<K, V, C> LruCacheTrait<K, V> for TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Removes the least recently used entry, expired or not.
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

    /// Refreshes recency only; the entry's deadline is unchanged.
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
impl<K, V, C> TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    pub fn metrics_snapshot(&self) -> TtlLruMetricsSnapshot {
        TtlLruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            expired_entries: self.metrics.expired_entries,
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

impl<K, V, C> fmt::Debug for TtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlLruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Thread-safe TTL-LRU cache wrapper.
///
/// Every operation that reorders the recency list or reclaims an expired
/// entry takes the write lock, including `get`. Values are stored as
/// `Arc<V>` so lookups return owned handles.
#[cfg(feature = "concurrency")]
pub struct SharedTtlLruCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    inner: Arc<RwLock<TtlLruCache<K, Arc<V>, C>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V, C> Clone for SharedTtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, C> fmt::Debug for SharedTtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("SharedTtlLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> SharedTtlLruCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe TTL-LRU cache on the system clock.
    pub fn new(capacity: usize, default_ttl_secs: i64) -> Self {
        Self::with_clock(capacity, default_ttl_secs, SystemClock)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, C> SharedTtlLruCache<K, V, C>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
    C: Clock + Send + Sync,
{
    /// Creates a new thread-safe TTL-LRU cache on the given clock.
    pub fn with_clock(capacity: usize, default_ttl_secs: i64, clock: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TtlLruCache::with_clock(
                capacity,
                default_ttl_secs,
                clock,
            ))),
        }
    }

    /// Inserts a value with the default TTL, wrapping it in `Arc`.
    pub fn insert(&self, key: K, value: V) -> InsertOutcome<K, Arc<V>> {
        self.inner.write().insert(key, Arc::new(value))
    }

    /// Inserts a value with its own TTL, wrapping it in `Arc`.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl_secs: i64) -> InsertOutcome<K, Arc<V>> {
        self.inner
            .write()
            .insert_with_ttl(key, Arc::new(value), ttl_secs)
    }

    /// Looks up a value, reclaiming it on expiry.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).cloned()
    }

    /// Looks up a value without touching recency or reclaiming.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).cloned()
    }

    /// Returns the expiry deadline for a key.
    pub fn expires_at(&self, key: &K) -> Option<Instant> {
        self.inner.read().expires_at(key)
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
    pub fn metrics_snapshot(&self) -> TtlLruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock(
        capacity: usize,
        ttl_secs: i64,
    ) -> (TtlLruCache<&'static str, i32, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = TtlLruCache::with_clock(capacity, ttl_secs, clock.clone());
        (cache, clock)
    }

    #[test]
    fn fresh_entry_is_a_hit() {
        let (mut cache, clock) = cache_with_clock(4, 10);
        cache.insert("a", 1);

        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get(&"a"), Some(&1));
    }

    #[test]
    fn expired_entry_is_reclaimed_on_get() {
        let (mut cache, clock) = cache_with_clock(4, 10);
        cache.insert("a", 1);
        assert_eq!(cache.len(), 1);

        clock.advance(Duration::from_secs(10));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn per_entry_ttl_overrides_default() {
        let (mut cache, clock) = cache_with_clock(4, 100);
        cache.insert_with_ttl("short", 1, 5);
        cache.insert("long", 2);

        clock.advance(Duration::from_secs(5));
        assert_eq!(cache.get(&"short"), None);
        assert_eq!(cache.get(&"long"), Some(&2));
    }

    #[test]
    fn non_positive_ttl_never_expires() {
        let (mut cache, clock) = cache_with_clock(4, 0);
        cache.insert("a", 1);
        cache.insert_with_ttl("b", 2, -7);

        clock.advance(Duration::from_secs(1_000_000));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.expires_at(&"a"), None);
    }

    #[test]
    fn expires_at_reports_deadline() {
        let (mut cache, clock) = cache_with_clock(4, 10);
        cache.insert("a", 1);

        let deadline = cache.expires_at(&"a").unwrap();
        assert_eq!(deadline - clock.now(), Duration::from_secs(10));
        assert_eq!(cache.expires_at(&"missing"), None);
    }

    #[test]
    fn update_resets_deadline_and_recency() {
        let (mut cache, clock) = cache_with_clock(2, 10);
        cache.insert("a", 1);
        cache.insert("b", 2);

        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.insert("a", 3), InsertOutcome::Replaced(1));

        // The refreshed deadline outlives the original one.
        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get(&"a"), Some(&3));

        // The update also made "a" most recent, so "b" is the LRU victim.
        assert_eq!(cache.insert("c", 4).evicted().map(|(k, _)| k), Some("b"));
    }

    #[test]
    fn capacity_eviction_ignores_expiry_state() {
        let (mut cache, clock) = cache_with_clock(2, 10);
        cache.insert_with_ttl("stale", 1, 1);
        cache.insert("fresh", 2);
        clock.advance(Duration::from_secs(5));

        // "stale" is expired but also the LRU entry, so it goes first; the
        // policy never scans for expired entries to prefer.
        assert_eq!(cache.insert("new", 3), InsertOutcome::Evicted("stale", 1));
    }

    #[test]
    fn touch_does_not_extend_ttl() {
        let (mut cache, clock) = cache_with_clock(4, 10);
        cache.insert("a", 1);

        clock.advance(Duration::from_secs(9));
        assert!(cache.touch(&"a"));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn peek_hides_expired_without_reclaiming() {
        let (mut cache, clock) = cache_with_clock(4, 10);
        cache.insert("a", 1);

        clock.advance(Duration::from_secs(10));
        assert_eq!(cache.peek(&"a"), None);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn lru_order_works_as_without_ttl() {
        let (mut cache, _clock) = cache_with_clock(3, 0);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.get(&"a");

        assert_eq!(cache.peek_lru(), Some((&"b", &2)));
        assert_eq!(cache.pop_lru(), Some(("b", 2)));
        assert_eq!(cache.pop_lru(), Some(("c", 3)));
        assert_eq!(cache.pop_lru(), Some(("a", 1)));
        assert_eq!(cache.pop_lru(), None);
    }

    #[test]
    fn peek_lru_on_empty_is_none() {
        let (cache, _clock) = cache_with_clock(3, 10);
        assert_eq!(cache.peek_lru(), None);
    }

    #[test]
    fn capacity_zero_rejects_all_inserts() {
        let (mut cache, _clock) = cache_with_clock(0, 10);
        assert_eq!(cache.insert("a", 1), InsertOutcome::Rejected(1));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn clear_then_reuse() {
        let (mut cache, clock) = cache_with_clock(2, 10);
        cache.insert("a", 1);
        cache.clear();
        assert_eq!(cache.len(), 0);

        clock.advance(Duration::from_secs(100));
        assert_eq!(cache.insert("b", 2), InsertOutcome::Inserted);
        assert_eq!(cache.get(&"b"), Some(&2));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_count_expired_entries() {
        let (mut cache, clock) = cache_with_clock(4, 5);
        cache.insert("a", 1);
        cache.insert("b", 2);

        clock.advance(Duration::from_secs(5));
        cache.get(&"a");
        cache.get(&"b");
        cache.get(&"missing");

        let snapshot = cache.metrics_snapshot();
        assert_eq!(snapshot.expired_entries, 2);
        assert_eq!(snapshot.get_misses, 3);
        assert_eq!(snapshot.get_hits, 0);
    }

    #[cfg(feature = "concurrency")]
    mod shared {
        use super::*;

        #[test]
        fn shared_expiry_roundtrip() {
            let clock = ManualClock::new();
            let cache: SharedTtlLruCache<u64, String, ManualClock> =
                SharedTtlLruCache::with_clock(4, 10, clock.clone());

            cache.insert(1, "one".to_string());
            assert_eq!(cache.get(&1).as_deref(), Some(&"one".to_string()));

            clock.advance(Duration::from_secs(10));
            assert_eq!(cache.get(&1), None);
            assert!(cache.is_empty());
        }
    }
}
