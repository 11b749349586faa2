//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`StoreError`]: Returned by the fail-fast [`BoundedStore`] API when an
//!   insert has no room (`OverCapacity`) or a keyed operation misses
//!   (`NotFound`).
//!
//! The eviction-capable caches report absence through `Option` and report
//! displacement through [`InsertOutcome`]; only the bounded store, which has
//! no eviction policy to fall back on, surfaces errors.
//!
//! [`BoundedStore`]: crate::policy::bounded::BoundedStore
//! [`InsertOutcome`]: crate::traits::InsertOutcome
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::StoreError;
//! use evictkit::policy::bounded::BoundedStore;
//!
//! let mut store: BoundedStore<&str, i32> = BoundedStore::new(1);
//! store.try_insert("a", 1).unwrap();
//!
//! // Full store refuses new keys instead of evicting.
//! assert_eq!(store.try_insert("b", 2), Err(StoreError::OverCapacity));
//!
//! // Keyed misses are explicit.
//! assert_eq!(store.get(&"missing"), Err(StoreError::NotFound));
//! ```

use std::fmt;

/// Error returned by the bounded store's fail-fast operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Insertion attempted with no room and no eviction policy to make room.
    OverCapacity,
    /// The requested key is not present.
    NotFound,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::OverCapacity => f.write_str("store is at capacity"),
            StoreError::NotFound => f.write_str("no value for the given key"),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(StoreError::OverCapacity.to_string(), "store is at capacity");
        assert_eq!(
            StoreError::NotFound.to_string(),
            "no value for the given key"
        );
    }

    #[test]
    fn debug_includes_variant() {
        let dbg = format!("{:?}", StoreError::OverCapacity);
        assert!(dbg.contains("OverCapacity"));
    }

    #[test]
    fn clone_and_eq() {
        let a = StoreError::NotFound;
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<StoreError>();
    }
}
