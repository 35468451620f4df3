//! Method dispatch engine.
//!
//! Types are registered in a [`TypeRegistry`] as [`TypeDescriptor`]s carrying
//! a method table, ordered capability-set includes and an optional
//! superclass. Resolution walks own table, includes (most recent first),
//! then the superclass chain, and is cached both globally per
//! (type, name) and per call site through [`CallSite`] inline caches.
//! Reopening a type invalidates the caches for it and its descendants.
//!
//! Including the Comparable capability set gives a type the full family of
//! ordering operations derived from its `<=>`, and a type that also defines
//! `succ` can be iterated through [`CustomRange`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod bootstrap;
mod call_site;
mod comparable;
mod method;
mod range;
mod registry;

pub use call_site::CallSite;
pub use comparable::{comparable_table, CmpDerived};
pub use method::{MethodImpl, MethodTable, NativeFn};
pub use range::CustomRange;
pub use registry::{CapabilityId, TypeDescriptor, TypeId, TypeRegistry};
