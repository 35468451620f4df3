//! Dispatch plus numeric tower: operator calls resolve through the type
//! registry and land in the tower's coercion and arithmetic.

use std::sync::Arc;

use num_bigint::BigInt;

use core_types::{ErrorKind, Value};
use memory_manager::Heap;
use method_dispatch::TypeRegistry;
use numeric_tower::CalendarDate;

fn registry() -> TypeRegistry {
    TypeRegistry::with_core_types(Arc::new(Heap::new()))
}

#[test]
fn test_mixed_kind_chain_stays_exact() {
    let r = registry();
    // (1 + 1/2) * 2 == 3, kept as the exact Rational 3/1.
    let sum = r
        .call(&Value::integer(1), "+", &[Value::rational(1, 2).unwrap()])
        .unwrap();
    let product = r.call(&sum, "*", &[Value::integer(2)]).unwrap();
    assert_eq!(product, Value::rational(3, 1).unwrap());
}

#[test]
fn test_float_contact_promotes_and_sticks() {
    let r = registry();
    let sum = r
        .call(&Value::rational(1, 2).unwrap(), "+", &[Value::Float(0.5)])
        .unwrap();
    assert_eq!(sum, Value::Float(1.0));
}

#[test]
fn test_complex_is_never_demoted() {
    let r = registry();
    // i * i == -1+0i, still a Complex, and not equal to Integer(-1).
    let i = Value::complex(0, 1);
    let squared = r.call(&i, "*", &[i.clone()]).unwrap();
    assert_eq!(squared, Value::complex(-1, 0));
    assert_ne!(squared, Value::integer(-1));
}

#[test]
fn test_division_semantics_split_by_kind() {
    let r = registry();
    let err = r
        .call(&Value::integer(1), "/", &[Value::integer(0)])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);

    let inf = r
        .call(&Value::Float(1.0), "/", &[Value::Float(0.0)])
        .unwrap();
    assert_eq!(inf, Value::Float(f64::INFINITY));
}

#[test]
fn test_numeric_comparable_comes_from_the_capability() {
    let r = registry();
    assert_eq!(
        r.call(&Value::integer(1), "<", &[Value::rational(3, 2).unwrap()])
            .unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        r.call(
            &Value::Float(2.5),
            "clamp",
            &[Value::integer(0), Value::integer(2)]
        )
        .unwrap(),
        Value::integer(2)
    );
    // Complex is unordered: derived == answers false instead of raising.
    assert_eq!(
        r.call(&Value::complex(1, 1), "==", &[Value::integer(1)])
            .unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_float_to_rational_is_the_exact_binary_expansion() {
    let r = registry();
    assert_eq!(
        r.call(&Value::Float(0.5), "to_r", &[]).unwrap(),
        Value::rational(1, 2).unwrap()
    );
    // 0.1 is not 1/10 in binary; the conversion is exact, not pretty.
    let exact = r.call(&Value::Float(0.1), "to_r", &[]).unwrap();
    assert_ne!(exact, Value::rational(1, 10).unwrap());
}

#[test]
fn test_far_future_date_shift_is_exact() {
    let year = BigInt::from(1_000_000_000_000u64);
    let date = CalendarDate::from_civil(year.clone(), 6, 15).unwrap();
    let shifted = date.add_days(&core_types::Rational::from_integer(BigInt::from(365)));
    let (y, m, d) = shifted.civil();
    // Year 10^12 is a leap year and June 15 is past its leap day, so a
    // 365-day shift lands on the same civil date one year later.
    assert_eq!(y, year + 1);
    assert_eq!((m, d), (6, 15));
}
