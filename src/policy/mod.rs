//! Eviction policy implementations.
//!
//! Each submodule owns one policy core plus its `Shared*` wrapper:
//!
//! - [`bounded`]: fixed capacity, no eviction, fail-fast inserts
//! - [`lru`]: least recently used eviction
//! - [`lfu`]: least frequently used eviction, recency tie-break
//! - [`ttl_lru`]: LRU eviction plus lazy per-entry expiry

pub mod bounded;
pub mod lfu;
pub mod lru;
pub mod ttl_lru;

pub use bounded::BoundedStore;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use ttl_lru::TtlLruCache;

#[cfg(feature = "concurrency")]
pub use bounded::SharedBoundedStore;
#[cfg(feature = "concurrency")]
pub use lfu::SharedLfuCache;
#[cfg(feature = "concurrency")]
pub use lru::SharedLruCache;
#[cfg(feature = "concurrency")]
pub use ttl_lru::SharedTtlLruCache;
