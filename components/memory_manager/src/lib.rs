//! Memory Manager - object heap and GC counter facade
//!
//! This component provides:
//! - The object heap: identity-addressed objects with dynamic type tags,
//!   mutable field maps and freeze semantics
//! - Mark/sweep collection over an explicit root set
//! - The process-wide, read-only GC cycle counter

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod gc_counter;
mod heap;
mod object;

pub use gc_counter::read_cycle_count;
pub use heap::Heap;
pub use object::RObject;
