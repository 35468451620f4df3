//! The body-side half of the yield/resume handoff.

use crossbeam::channel::{Receiver, Sender};

use core_types::{RubyResult, Value};

/// Panic payload used to unwind an abandoned enumerator body.
///
/// When the consuming handle is dropped while the body is suspended, both
/// channel ends close; the next channel operation inside the body observes
/// the closure and unwinds with this payload, running the body's
/// destructors on the way out. The generator thread catches it and exits
/// quietly.
pub(crate) struct Abandoned;

/// What the body reports back across the rendezvous.
pub(crate) enum Event {
    /// The body yielded a value and is now suspended
    Yielded(Value),
    /// The body ran to completion (or failed)
    Completed(RubyResult<Value>),
}

/// Handed to the enumerator body; its only way to produce values.
///
/// `yield_value` blocks the body until the consumer asks for the next
/// element, making yield and resume strictly alternate.
pub struct Yielder {
    pub(crate) events: Sender<Event>,
    pub(crate) resume: Receiver<Value>,
}

impl Yielder {
    /// Yields a value to the consumer and suspends until resumed.
    ///
    /// Evaluates to the value the consumer passed when resuming.
    pub fn yield_value(&self, value: Value) -> RubyResult<Value> {
        if self.events.send(Event::Yielded(value)).is_err() {
            // Consumer handle dropped: unwind the body.
            std::panic::panic_any(Abandoned);
        }
        match self.resume.recv() {
            Ok(resume_value) => Ok(resume_value),
            Err(_) => std::panic::panic_any(Abandoned),
        }
    }
}
