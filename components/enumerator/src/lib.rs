//! Cooperative yield/resume engine.
//!
//! An [`Enumerator`] runs its body on a dedicated thread, handing values
//! across a zero-capacity rendezvous channel so producer and consumer
//! strictly alternate. The body sees a [`Yielder`]; the consumer drives it
//! with [`Enumerator::advance`], whose resume value becomes the result of
//! the body's suspended yield. Dropping the handle unwinds a suspended
//! body, so abandonment never leaks the execution context.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod enumerator;
mod yielder;

pub use crate::enumerator::{Enumerator, EnumeratorState, Step};
pub use crate::yielder::Yielder;
