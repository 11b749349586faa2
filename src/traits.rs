//! # Cache Trait Hierarchy
//!
//! This module defines the trait hierarchy for the cache family, providing a
//! unified interface across eviction policies (bounded fail-fast, LRU, LFU,
//! TTL-LRU) while keeping policy-appropriate operation sets.
//!
//! ## Architecture
//!
//! ```text
//!                ┌─────────────────────────────────────────┐
//!                │            CoreCache<K, V>              │
//!                │                                         │
//!                │  insert(&mut, K, V) → InsertOutcome     │
//!                │  get(&mut, &K) → Option<&V>             │
//!                │  contains(&, &K) → bool                 │
//!                │  len(&) → usize                         │
//!                │  is_empty(&) → bool                     │
//!                │  capacity(&) → usize                    │
//!                │  clear(&mut)                            │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │           MutableCache<K, V>            │
//!                │                                         │
//!                │  remove(&K) → Option<V>                 │
//!                └──────────┬───────────────────┬──────────┘
//!                           │                   │
//!                           ▼                   ▼
//!          ┌────────────────────────┐  ┌────────────────────────┐
//!          │   LruCacheTrait<K, V>  │  │   LfuCacheTrait<K, V>  │
//!          │                        │  │                        │
//!          │  pop_lru() → (K, V)    │  │  pop_lfu() → (K, V)    │
//!          │  peek_lru() → (&K, &V) │  │  peek_lfu() → (&K, &V) │
//!          │  touch(&K) → bool      │  │  frequency(&K) → u64   │
//!          └────────────────────────┘  └────────────────────────┘
//! ```
//!
//! ## Insert Semantics
//!
//! `insert` returns an [`InsertOutcome`] rather than a bare `Option<V>` so
//! callers can distinguish the four things an insert can do:
//!
//! | Outcome            | Meaning                                            |
//! |--------------------|----------------------------------------------------|
//! | `Inserted`         | New entry stored, nothing displaced                |
//! | `Replaced(prev)`   | Key existed; value replaced, size unchanged        |
//! | `Evicted(k, v)`    | New entry stored after evicting the policy victim  |
//! | `Rejected(v)`      | No room and no eviction possible; value handed back|
//!
//! Updating an existing key never reports an eviction and never changes the
//! entry count; only net key creation can displace another entry.
//!
//! ## Thread Safety
//!
//! The policy cores are **not** thread-safe. Each policy module provides a
//! `Shared*` wrapper (`concurrency` feature) that serializes all mutating
//! operations, including `get`, behind a `parking_lot::RwLock`.

/// Result of a cache insert.
///
/// Carries the displaced data out of the cache so nothing is silently
/// dropped: a replaced value, an evicted entry, or the rejected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<K, V> {
    /// A new entry was stored without displacing anything.
    Inserted,
    /// The key already existed; its value was replaced in place.
    Replaced(V),
    /// A new entry was stored after evicting the policy's victim.
    Evicted(K, V),
    /// The cache has no room and no eviction policy to make room
    /// (capacity 0, or a bounded store at capacity). The input value is
    /// returned untouched.
    Rejected(V),
}

impl<K, V> InsertOutcome<K, V> {
    /// Returns `true` if the insert displaced another entry.
    pub fn was_evicted(&self) -> bool {
        matches!(self, InsertOutcome::Evicted(..))
    }

    /// Returns `true` if the insert was refused outright.
    pub fn was_rejected(&self) -> bool {
        matches!(self, InsertOutcome::Rejected(_))
    }

    /// Returns the evicted entry, if any.
    pub fn evicted(self) -> Option<(K, V)> {
        match self {
            InsertOutcome::Evicted(key, value) => Some((key, value)),
            _ => None,
        }
    }

    /// Returns the previous value for an in-place update, if any.
    pub fn replaced(self) -> Option<V> {
        match self {
            InsertOutcome::Replaced(value) => Some(value),
            _ => None,
        }
    }
}

/// Core cache operations that all policies support.
///
/// # Example
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, reporting what the insert displaced.
    ///
    /// If the cache is at capacity and the key is new, an entry may be
    /// evicted according to the cache's policy before the new entry is
    /// stored. Inserting over an existing key replaces its value in place
    /// and never evicts.
    fn insert(&mut self, key: K, value: V) -> InsertOutcome<K, V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates internal eviction state (recency order, frequency count)
    /// on a hit. Use [`contains`](Self::contains) to check existence
    /// without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// LRU-specific operations that respect access order.
///
/// Entries are ordered by recency; the least recently touched entry is the
/// eviction candidate.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LruCacheTrait};
/// use evictkit::policy::lru::LruCache;
///
/// let mut cache: LruCache<u64, &str> = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it most recent.
/// cache.get(&1);
///
/// // Key 2 is now the eviction candidate.
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving the value.
/// assert!(cache.touch(&2));
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(3));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// Returns `None` if the cache is empty.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it.
    ///
    /// Returns `None` if the cache is empty. Does not update access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    fn touch(&mut self, key: &K) -> bool;
}

/// LFU-specific operations that respect frequency order.
///
/// Entries are ordered by access frequency; the least frequently touched
/// entry is the eviction candidate, with recency as the tie-break among
/// entries at the same frequency.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LfuCacheTrait};
/// use evictkit::policy::lfu::LfuCache;
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// // Access key 2 to raise its frequency.
/// cache.get(&2);
/// assert_eq!(cache.frequency(&2), Some(2));
///
/// // Key 1 is the eviction candidate (freq 1 vs 2).
/// let (key, _) = cache.pop_lfu().unwrap();
/// assert_eq!(key, 1);
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry.
    ///
    /// Among entries tied at the minimum frequency, the least recently
    /// touched one is removed. Returns `None` if the cache is empty.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the LFU entry without removing it.
    ///
    /// Returns `None` if the cache is empty. Does not increment frequency.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Gets the access frequency for a key.
    ///
    /// Frequency starts at 1 on first insert and counts every touching
    /// insert or lookup since. Returns `None` if the key is not found.
    fn frequency(&self, key: &K) -> Option<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_outcome_accessors() {
        let outcome: InsertOutcome<u32, &str> = InsertOutcome::Evicted(1, "old");
        assert!(outcome.was_evicted());
        assert!(!outcome.was_rejected());
        assert_eq!(outcome.evicted(), Some((1, "old")));

        let outcome: InsertOutcome<u32, &str> = InsertOutcome::Replaced("prev");
        assert!(!outcome.was_evicted());
        assert_eq!(outcome.replaced(), Some("prev"));

        let outcome: InsertOutcome<u32, &str> = InsertOutcome::Rejected("v");
        assert!(outcome.was_rejected());
        assert_eq!(outcome.evicted(), None);

        let outcome: InsertOutcome<u32, &str> = InsertOutcome::Inserted;
        assert_eq!(outcome.replaced(), None);
    }
}
