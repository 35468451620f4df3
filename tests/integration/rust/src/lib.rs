//! Integration test suite for the runtime evaluation core.
//!
//! This crate holds the cross-component tests that verify the value model,
//! numeric tower, dispatch engine, enumerators and deadlines work together
//! across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use enumerator;
    pub use memory_manager;
    pub use method_dispatch;
    pub use numeric_tower;
    pub use timeout;
}
