//! Enumerators driving dispatched arithmetic: the body computes each value
//! through the type registry while suspended iteration stays coherent.

use std::sync::Arc;

use core_types::{ErrorKind, Value};
use enumerator::{Enumerator, EnumeratorState, Step};
use memory_manager::Heap;
use method_dispatch::TypeRegistry;

#[test]
fn test_enumerator_body_dispatches_through_the_registry() {
    let registry = Arc::new(TypeRegistry::with_core_types(Arc::new(Heap::new())));

    let r = Arc::clone(&registry);
    let mut doubling = Enumerator::new(move |y| {
        let mut current = Value::integer(1);
        for _ in 0..10 {
            current = y.yield_value(current.clone()).and_then(|resumed| {
                // nil resume keeps doubling; a number restarts from there.
                match resumed {
                    Value::Nil => r.call(&current, "*", &[Value::integer(2)]),
                    other => Ok(other),
                }
            })?;
        }
        Ok(current)
    });

    assert_eq!(doubling.next().unwrap(), Value::integer(1));
    assert_eq!(doubling.next().unwrap(), Value::integer(2));
    assert_eq!(doubling.next().unwrap(), Value::integer(4));
    // Feed a restart value through the suspended yield.
    assert_eq!(
        doubling.advance(Value::integer(100)).unwrap(),
        Step::Yielded(Value::integer(100))
    );
    assert_eq!(doubling.next().unwrap(), Value::integer(200));
}

#[test]
fn test_exact_rational_series_through_an_enumerator() {
    let registry = Arc::new(TypeRegistry::with_core_types(Arc::new(Heap::new())));

    // Partial sums of 1/1 + 1/2 + ... + 1/8, all exact.
    let r = Arc::clone(&registry);
    let mut harmonic = Enumerator::new(move |y| {
        let mut sum = Value::rational(0, 1)?;
        for n in 1..=8i64 {
            sum = r.call(&sum, "+", &[Value::rational(1, n)?])?;
            y.yield_value(sum.clone())?;
        }
        Ok(sum)
    });

    let mut last = Value::Nil;
    loop {
        match harmonic.advance(Value::Nil).unwrap() {
            Step::Yielded(v) => last = v,
            Step::Completed(v) => {
                assert_eq!(v, last);
                break;
            }
        }
    }
    // H_8 = 761/280, still in lowest terms after every dispatched addition.
    assert_eq!(last, Value::rational(761, 280).unwrap());
    assert_eq!(harmonic.state(), EnumeratorState::Completed);

    let err = harmonic.advance(Value::Nil).unwrap_err();
    assert_eq!(err.kind, ErrorKind::StopIteration);
}

#[test]
fn test_dispatch_error_inside_the_body_surfaces_to_the_consumer() {
    let registry = Arc::new(TypeRegistry::with_core_types(Arc::new(Heap::new())));

    let r = Arc::clone(&registry);
    let mut e = Enumerator::new(move |y| {
        y.yield_value(Value::integer(1))?;
        r.call(&Value::integer(1), "/", &[Value::integer(0)])
    });
    assert_eq!(e.next().unwrap(), Value::integer(1));
    let err = e.advance(Value::Nil).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
}

#[test]
fn test_abandoned_enumerator_releases_heap_handles() {
    let heap = Arc::new(Heap::new());
    let registry = Arc::new(TypeRegistry::with_core_types(Arc::clone(&heap)));

    let body_heap = Arc::clone(&heap);
    let r = Arc::clone(&registry);
    let mut e = Enumerator::new(move |y| {
        loop {
            // Allocate per step; abandonment must unwind out of here.
            let obj = Value::ObjectRef(body_heap.allocate("Object"));
            let class = r.call(&obj, "class", &[])?;
            y.yield_value(class)?;
        }
    });
    assert_eq!(e.next().unwrap(), Value::str("Object"));
    assert_eq!(e.next().unwrap(), Value::str("Object"));
    drop(e);

    // With the body unwound, the only strong registry/heap owners left are
    // the locals here.
    assert_eq!(Arc::strong_count(&registry), 1);
}
