//! Feature-gated operation counters for the cache policies.
//!
//! Each policy core owns a plain counter struct and exposes a
//! `metrics_snapshot()` accessor returning a `Copy` snapshot plus the
//! length/capacity gauges captured at snapshot time. Counters for `&self`
//! operations (peeks, frequency queries) use [`MetricsCell`], a relaxed
//! atomic: the shared wrappers serve those paths under the read lock, so
//! several threads may bump the same counter at once.
//!
//! Nothing here is exported to a monitoring backend; callers own publication.

use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter for operations taking `&self`.
///
/// Relaxed ordering is enough: the counters are observational and never
/// gate control flow.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Bounded store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BoundedMetrics {
    pub get_calls: MetricsCell,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejects: u64,
    pub removes: u64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BoundedMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejects: u64,
    pub removes: u64,

    pub store_len: usize,
    pub capacity: usize,
}

// ---------------------------------------------------------------------------
// LRU
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub insert_rejects: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub touch_calls: u64,
    pub touch_found: u64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub insert_rejects: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

// ---------------------------------------------------------------------------
// LFU
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LfuMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub insert_rejects: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: MetricsCell,
    pub peek_lfu_found: MetricsCell,
    pub frequency_calls: MetricsCell,
    pub frequency_found: MetricsCell,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LfuMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub insert_rejects: u64,

    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: u64,
    pub peek_lfu_found: u64,
    pub frequency_calls: u64,
    pub frequency_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

// ---------------------------------------------------------------------------
// TTL-LRU
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TtlLruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub expired_entries: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub insert_rejects: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub touch_calls: u64,
    pub touch_found: u64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TtlLruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    /// Entries removed by lazy expiry during `get`, a subset of misses.
    pub expired_entries: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub insert_rejects: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
}
