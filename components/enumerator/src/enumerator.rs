//! The consumer-side enumerator handle and its state machine.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::thread::JoinHandle;

use crossbeam::channel::{bounded, Receiver, Sender};

use core_types::{RubyError, RubyResult, Value};

use crate::yielder::{Abandoned, Event, Yielder};

/// Lifecycle of an enumerator's execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratorState {
    /// Body not started yet
    Created,
    /// Body parked inside a `yield_value` call
    Suspended,
    /// Body executing between a resume and the next yield
    Running,
    /// Body returned (or failed); no further values
    Completed,
}

/// One step of iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The body yielded this value and suspended
    Yielded(Value),
    /// The body returned this value; iteration is over
    Completed(Value),
}

type Body = Box<dyn FnOnce(&Yielder) -> RubyResult<Value> + Send + 'static>;

/// A suspendable producer of values.
///
/// The body runs on a dedicated thread, parked at every `yield_value` on a
/// zero-capacity rendezvous channel, so exactly one side executes at a time
/// and yield/resume strictly alternate. Dropping the handle while the body
/// is suspended unwinds it, releasing everything the body owns.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use enumerator::{Enumerator, Step};
///
/// let mut e = Enumerator::new(|y| {
///     y.yield_value(Value::integer(1))?;
///     y.yield_value(Value::integer(2))?;
///     Ok(Value::Nil)
/// });
/// assert_eq!(e.next().unwrap(), Value::integer(1));
/// assert_eq!(e.next().unwrap(), Value::integer(2));
/// assert!(e.next().is_err());
/// ```
pub struct Enumerator {
    state: EnumeratorState,
    body: Option<Body>,
    resume_tx: Option<Sender<Value>>,
    events: Option<Receiver<Event>>,
    thread: Option<JoinHandle<()>>,
    peeked: Option<Value>,
}

impl Enumerator {
    /// Creates an enumerator; the body does not run until first advanced.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce(&Yielder) -> RubyResult<Value> + Send + 'static,
    {
        Enumerator {
            state: EnumeratorState::Created,
            body: Some(Box::new(body)),
            resume_tx: None,
            events: None,
            thread: None,
            peeked: None,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> EnumeratorState {
        self.state
    }

    /// Resumes the body, handing it `resume_value` as the result of its
    /// suspended `yield_value` call.
    ///
    /// The first advance starts the body; its resume value is discarded
    /// since no yield is suspended yet. Advancing a completed enumerator
    /// is a `StopIteration` error.
    pub fn advance(&mut self, resume_value: Value) -> RubyResult<Step> {
        if let Some(buffered) = self.peeked.take() {
            return Ok(Step::Yielded(buffered));
        }
        match self.state {
            EnumeratorState::Created => self.start(),
            EnumeratorState::Suspended => {
                self.state = EnumeratorState::Running;
                let sent = self
                    .resume_tx
                    .as_ref()
                    .map(|tx| tx.send(resume_value).is_ok())
                    .unwrap_or(false);
                if !sent {
                    self.state = EnumeratorState::Completed;
                    return Err(RubyError::stop_iteration());
                }
                self.wait_for_event()
            }
            EnumeratorState::Running => Err(RubyError::type_mismatch(
                "enumerator resumed while already running",
            )),
            EnumeratorState::Completed => Err(RubyError::stop_iteration()),
        }
    }

    /// Returns the next yielded value, resuming the body with nil.
    ///
    /// Completion surfaces as `StopIteration`, like Ruby's `Enumerator#next`.
    pub fn next(&mut self) -> RubyResult<Value> {
        match self.advance(Value::Nil)? {
            Step::Yielded(v) => Ok(v),
            Step::Completed(_) => Err(RubyError::stop_iteration()),
        }
    }

    /// Returns the next value without consuming it.
    ///
    /// The value is buffered in a one-slot lookahead; the following
    /// `advance`/`next` returns it without touching the body. The resume
    /// value for the peeked element is nil.
    pub fn peek(&mut self) -> RubyResult<Value> {
        if let Some(buffered) = &self.peeked {
            return Ok(buffered.clone());
        }
        match self.advance(Value::Nil)? {
            Step::Yielded(v) => {
                self.peeked = Some(v.clone());
                Ok(v)
            }
            Step::Completed(_) => Err(RubyError::stop_iteration()),
        }
    }

    fn start(&mut self) -> RubyResult<Step> {
        let (event_tx, event_rx) = bounded::<Event>(0);
        let (resume_tx, resume_rx) = bounded::<Value>(0);
        let body = match self.body.take() {
            Some(body) => body,
            None => return Err(RubyError::stop_iteration()),
        };

        let thread = std::thread::spawn(move || {
            let yielder = Yielder {
                events: event_tx,
                resume: resume_rx,
            };
            let outcome = catch_unwind(AssertUnwindSafe(|| body(&yielder)));
            match outcome {
                Ok(result) => {
                    // Consumer may already be gone; nothing left to do then.
                    let _ = yielder.events.send(Event::Completed(result));
                }
                Err(payload) if payload.downcast_ref::<Abandoned>().is_some() => {}
                Err(payload) => resume_unwind(payload),
            }
        });

        self.resume_tx = Some(resume_tx);
        self.events = Some(event_rx);
        self.thread = Some(thread);
        self.state = EnumeratorState::Running;
        self.wait_for_event()
    }

    fn wait_for_event(&mut self) -> RubyResult<Step> {
        let received = self.events.as_ref().map(|rx| rx.recv());
        match received {
            Some(Ok(Event::Yielded(value))) => {
                self.state = EnumeratorState::Suspended;
                Ok(Step::Yielded(value))
            }
            Some(Ok(Event::Completed(result))) => {
                self.finish();
                Ok(Step::Completed(result?))
            }
            // Body thread gone without a completion event.
            Some(Err(_)) | None => {
                self.finish();
                Err(RubyError::stop_iteration())
            }
        }
    }

    fn finish(&mut self) {
        self.state = EnumeratorState::Completed;
        self.resume_tx = None;
        self.events = None;
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Enumerator {
    fn drop(&mut self) {
        // Closing both channel ends makes a suspended body's next channel
        // operation unwind it; join so its teardown finishes before the
        // handle is gone.
        self.resume_tx = None;
        self.events = None;
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for Enumerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerator")
            .field("state", &self.state)
            .field("peeked", &self.peeked)
            .finish()
    }
}
