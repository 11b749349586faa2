pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::ds::{LinkedSlab, SlotId};
pub use crate::error::StoreError;
pub use crate::policy::{BoundedStore, LfuCache, LruCache, TtlLruCache};
pub use crate::traits::{CoreCache, InsertOutcome, LfuCacheTrait, LruCacheTrait, MutableCache};

#[cfg(feature = "concurrency")]
pub use crate::policy::{SharedBoundedStore, SharedLfuCache, SharedLruCache, SharedTtlLruCache};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    BoundedMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot, TtlLruMetricsSnapshot,
};
