pub mod linked_slab;

pub use linked_slab::{LinkedSlab, SlotId};
