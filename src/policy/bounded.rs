//! # Bounded Fail-Fast Store
//!
//! A fixed-capacity key/value store with **no eviction policy**: once the
//! store is full, inserting a new key fails instead of displacing an
//! existing entry. Intended for workloads where silently losing an entry is
//! worse than refusing a write.
//!
//! ## Core Operations
//!
//! | Method            | Complexity | Description                               |
//! |-------------------|------------|-------------------------------------------|
//! | `new(cap)`        | O(1)       | Create store with fixed capacity          |
//! | `try_insert(k,v)` | O(1)       | Insert or replace; errors when full       |
//! | `get(&k)`         | O(1)       | Lookup; errors when absent                |
//! | `update(k,v)`     | O(1)       | Replace an existing value; errors on miss |
//! | `remove(&k)`      | O(1)       | Remove entry; errors on miss              |
//! | `clear()`         | O(n)       | Remove every entry                        |
//!
//! Replacing the value of a key that is already present always succeeds,
//! even at capacity, because it does not grow the store.
//!
//! The store also implements [`CoreCache`] and [`MutableCache`], mapping a
//! full store to [`InsertOutcome::Rejected`] so it slots into code written
//! against the trait hierarchy.
//!
//! ## Thread Safety
//!
//! - `BoundedStore`: **NOT thread-safe** - single-threaded only
//! - `SharedBoundedStore`: thread-safe via `parking_lot::RwLock`

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::StoreError;
#[cfg(feature = "metrics")]
use crate::metrics::{BoundedMetrics, BoundedMetricsSnapshot};
use crate::traits::{CoreCache, InsertOutcome, MutableCache};

/// Fixed-capacity store that refuses writes instead of evicting.
///
/// See module-level documentation for semantics.
pub struct BoundedStore<K, V>
where
    K: Eq + Hash,
{
    entries: FxHashMap<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: BoundedMetrics,
}

impl<K, V> BoundedStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new store with the given capacity.
    ///
    /// A capacity of 0 creates a store in which every insert fails.
    pub fn new(capacity: usize) -> Self {
        BoundedStore {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: BoundedMetrics::default(),
        }
    }

    /// Inserts a value, failing if the store is full.
    ///
    /// Returns the previous value when the key was already present; such
    /// replacements succeed even at capacity since the entry count is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`StoreError::OverCapacity`] if the key is new and the store holds
    /// `capacity` entries (always the case when capacity is 0).
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, StoreError> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }
            return Ok(Some(std::mem::replace(slot, value)));
        }

        if self.entries.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_rejects += 1;
            }
            return Err(StoreError::OverCapacity);
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_new += 1;
        }
        self.entries.insert(key, value);
        Ok(None)
    }

    /// Looks up a value by key.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key is absent.
    pub fn get(&self, key: &K) -> Result<&V, StoreError> {
        #[cfg(feature = "metrics")]
        self.metrics.get_calls.incr();

        match self.entries.get(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.get_hits.incr();
                Ok(value)
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.get_misses.incr();
                Err(StoreError::NotFound)
            },
        }
    }

    /// Replaces the value of an existing key, returning the old value.
    ///
    /// Unlike [`try_insert`](Self::try_insert), this never creates a key.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key is absent.
    pub fn update(&mut self, key: &K, value: V) -> Result<V, StoreError> {
        match self.entries.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(StoreError::NotFound),
        }
    }

    /// Removes an entry, returning its value.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key is absent.
    pub fn try_remove(&mut self, key: &K) -> Result<V, StoreError> {
        match self.entries.remove(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.removes += 1;
                }
                Ok(value)
            },
            None => Err(StoreError::NotFound),
        }
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> BoundedMetricsSnapshot {
        BoundedMetricsSnapshot {
            get_calls: self.metrics.get_calls.get(),
            get_hits: self.metrics.get_hits.get(),
            get_misses: self.metrics.get_misses.get(),
            insert_calls: self.metrics.insert_calls,
            insert_new: self.metrics.insert_new,
            insert_updates: self.metrics.insert_updates,
            insert_rejects: self.metrics.insert_rejects,
            removes: self.metrics.removes,
            store_len: self.entries.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> CoreCache<K, V> for BoundedStore<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }
            return InsertOutcome::Replaced(std::mem::replace(slot, value));
        }

        if self.entries.len() >= self.capacity {
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
        self.entries.insert(key, value);
        InsertOutcome::Inserted
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        BoundedStore::get(self, key).ok()
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> MutableCache<K, V> for BoundedStore<K, V>
where
    K: Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.try_remove(key).ok()
    }
}

impl<K, V> fmt::Debug for BoundedStore<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Thread-safe bounded store wrapper.
///
/// Values are stored as `Arc<V>` so lookups return owned handles without
/// copying data.
#[cfg(feature = "concurrency")]
pub struct SharedBoundedStore<K, V>
where
    K: Eq + Hash,
{
    inner: Arc<RwLock<BoundedStore<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for SharedBoundedStore<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for SharedBoundedStore<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.read();
        f.debug_struct("SharedBoundedStore")
            .field("len", &store.len())
            .field("capacity", &store.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> SharedBoundedStore<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe bounded store with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedStore::new(capacity))),
        }
    }

    /// Inserts a value, wrapping it in `Arc`.
    pub fn try_insert(&self, key: K, value: V) -> Result<Option<Arc<V>>, StoreError> {
        self.inner.write().try_insert(key, Arc::new(value))
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &K) -> Result<Arc<V>, StoreError> {
        self.inner.read().get(key).map(Arc::clone)
    }

    /// Replaces the value of an existing key.
    pub fn update(&self, key: &K, value: V) -> Result<Arc<V>, StoreError> {
        self.inner.write().update(key, Arc::new(value))
    }

    /// Removes an entry, returning its value.
    pub fn try_remove(&self, key: &K) -> Result<Arc<V>, StoreError> {
        self.inner.write().try_remove(key)
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
    pub fn metrics_snapshot(&self) -> BoundedMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}
