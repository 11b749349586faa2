//! evictkit: fixed-capacity in-process key/value caches with pluggable
//! eviction semantics.
//!
//! Four policies share one trait hierarchy: a fail-fast bounded store, an
//! LRU cache, an LFU cache with recency tie-break, and a TTL-LRU cache
//! with lazy expiry. Cores are single-threaded; the `concurrency` feature
//! adds lock-wrapped `Shared*` handles with `Arc<V>` values.

pub mod clock;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
