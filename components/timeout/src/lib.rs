//! Cooperative execution deadlines.
//!
//! [`run_bounded`] runs a closure under a time limit enforced by one shared
//! background timer thread. The closure receives a [`Deadline`] and calls
//! its safe points (`check`, `sleep`) wherever interruption is acceptable;
//! when the limit passes, the next safe point fails with a
//! `Timeout::Error` that unwinds through the ordinary error path. Nested
//! bounds observe their enclosing deadlines, and a finished bound disarms
//! its timer entry so abandoned entries never accumulate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod deadline;
mod timer;

pub use deadline::{pending_timers, run_bounded, Deadline};
