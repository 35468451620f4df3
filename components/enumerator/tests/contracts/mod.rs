//! Contract tests: strict yield/resume alternation, resume-value plumbing
//! and abandonment cleanup.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use core_types::{ErrorKind, Value};
use enumerator::{Enumerator, EnumeratorState, Step};

#[test]
fn test_yield_and_resume_strictly_alternate() {
    // Values must arrive one per resume, in body order; the rendezvous
    // channel never buffers, so a second yield cannot start before the
    // consumer asks for it.
    let yields_finished = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&yields_finished);

    let mut e = Enumerator::new(move |y| {
        for i in 0..100 {
            y.yield_value(Value::integer(i))?;
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Ok(Value::Nil)
    });

    for expected in 0..100 {
        match e.advance(Value::Nil).unwrap() {
            Step::Yielded(v) => assert_eq!(v, Value::integer(expected)),
            Step::Completed(_) => panic!("completed early at {}", expected),
        }
    }
    assert!(matches!(e.advance(Value::Nil).unwrap(), Step::Completed(_)));
    assert_eq!(yields_finished.load(Ordering::SeqCst), 100);
}

#[test]
fn test_resume_values_accumulate_inside_the_body() {
    // A running-total body: each resume value is added to the sum the
    // suspended yield call produces.
    let mut e = Enumerator::new(|y| {
        let mut total = Value::integer(0);
        loop {
            let fed = y.yield_value(total.clone())?;
            match fed {
                Value::Nil => return Ok(total),
                Value::Integer(n) => {
                    if let Value::Integer(t) = total {
                        total = Value::Integer(t + n);
                    }
                }
                other => return Err(core_types::RubyError::type_mismatch(format!(
                    "expected an Integer to accumulate, got {}",
                    other.class_name()
                ))),
            }
        }
    });

    assert_eq!(e.advance(Value::Nil).unwrap(), Step::Yielded(Value::integer(0)));
    assert_eq!(
        e.advance(Value::integer(5)).unwrap(),
        Step::Yielded(Value::integer(5))
    );
    assert_eq!(
        e.advance(Value::integer(7)).unwrap(),
        Step::Yielded(Value::integer(12))
    );
    assert_eq!(
        e.advance(Value::Nil).unwrap(),
        Step::Completed(Value::integer(12))
    );
}

#[test]
fn test_next_surfaces_completion_as_stop_iteration() {
    let mut e = Enumerator::new(|y| {
        y.yield_value(Value::str("only"))?;
        Ok(Value::Nil)
    });
    assert_eq!(e.next().unwrap(), Value::str("only"));
    let err = e.next().unwrap_err();
    assert_eq!(err.kind, ErrorKind::StopIteration);
    // And again: completed enumerators keep answering StopIteration.
    let err = e.next().unwrap_err();
    assert_eq!(err.kind, ErrorKind::StopIteration);
}

#[test]
fn test_created_body_does_not_run_until_advanced() {
    let started = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&started);
    let mut e = Enumerator::new(move |y| {
        flag.fetch_add(1, Ordering::SeqCst);
        y.yield_value(Value::Nil)?;
        Ok(Value::Nil)
    });
    assert_eq!(e.state(), EnumeratorState::Created);
    assert_eq!(started.load(Ordering::SeqCst), 0);
    let _ = e.advance(Value::Nil).unwrap();
    assert_eq!(started.load(Ordering::SeqCst), 1);
}

#[test]
fn test_abandoning_many_suspended_enumerators_releases_their_state() {
    // Each body owns a guard whose destructor bumps the counter; dropping
    // the handle mid-iteration must run it every time.
    struct CountOnDrop(Arc<AtomicUsize>);
    impl Drop for CountOnDrop {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let unwound = Arc::new(AtomicUsize::new(0));
    for _ in 0..64 {
        let counter = Arc::clone(&unwound);
        let mut e = Enumerator::new(move |y| {
            let _guard = CountOnDrop(counter);
            let mut i = 0i64;
            loop {
                y.yield_value(Value::integer(i))?;
                i += 1;
            }
        });
        let _ = e.advance(Value::Nil).unwrap();
        let _ = e.advance(Value::Nil).unwrap();
        drop(e);
    }
    assert_eq!(unwound.load(Ordering::SeqCst), 64);
}

#[test]
fn test_peek_buffer_survives_interleaved_advances() {
    let mut e = Enumerator::new(|y| {
        for i in 1..=3 {
            y.yield_value(Value::integer(i))?;
        }
        Ok(Value::Nil)
    });
    assert_eq!(e.next().unwrap(), Value::integer(1));
    assert_eq!(e.peek().unwrap(), Value::integer(2));
    assert_eq!(e.next().unwrap(), Value::integer(2));
    assert_eq!(e.peek().unwrap(), Value::integer(3));
    assert_eq!(e.next().unwrap(), Value::integer(3));
    assert_eq!(e.next().unwrap_err().kind, ErrorKind::StopIteration);
}
