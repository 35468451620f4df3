//! Numeric kind ordering and promotion.
//!
//! The promotion order is total: Integer < Rational < Float < Complex.
//! `coerce` lifts both operands of a binary operation to their common kind;
//! arithmetic then happens in that kind's native representation.

use core_types::{Complex, Rational, Real, RubyError, RubyResult, Value};

/// The numeric kinds, in promotion order.
///
/// The derived `Ord` follows variant order, which is the promotion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NumericKind {
    /// Arbitrary-precision integer
    Integer,
    /// Exact rational
    Rational,
    /// Double-precision float
    Float,
    /// Complex number
    Complex,
}

/// The numeric kind of a value, or `None` for non-numeric values.
pub fn kind_of(value: &Value) -> Option<NumericKind> {
    match value {
        Value::Integer(_) => Some(NumericKind::Integer),
        Value::Rational(_) => Some(NumericKind::Rational),
        Value::Float(_) => Some(NumericKind::Float),
        Value::Complex(_) => Some(NumericKind::Complex),
        _ => None,
    }
}

/// Promotes both operands to their common numeric kind.
///
/// Fails with a `TypeError`-class error when either operand is not numeric.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use numeric_tower::coerce;
///
/// let (a, b) = coerce(&Value::integer(1), &Value::rational(1, 2).unwrap()).unwrap();
/// assert_eq!(a.class_name(), "Rational");
/// assert_eq!(b.class_name(), "Rational");
/// ```
pub fn coerce(a: &Value, b: &Value) -> RubyResult<(Value, Value)> {
    let ka = kind_of(a).ok_or_else(|| coerce_error(a, b))?;
    let kb = kind_of(b).ok_or_else(|| coerce_error(a, b))?;
    let target = ka.max(kb);
    Ok((promote(a, target), promote(b, target)))
}

fn coerce_error(a: &Value, b: &Value) -> RubyError {
    RubyError::type_mismatch(format!(
        "{} can't be coerced with {}",
        a.class_name(),
        b.class_name()
    ))
}

/// Promotes a numeric value to `target`, which must not be below its kind.
pub(crate) fn promote(value: &Value, target: NumericKind) -> Value {
    match (value, target) {
        (Value::Integer(n), NumericKind::Integer) => Value::Integer(n.clone()),
        (Value::Integer(n), NumericKind::Rational) => {
            Value::Rational(Rational::from_integer(n.clone()))
        }
        (Value::Integer(n), NumericKind::Float) => {
            Value::Float(Rational::from_integer(n.clone()).to_f64())
        }
        (Value::Integer(n), NumericKind::Complex) => Value::Complex(Complex::new(
            Real::Integer(n.clone()),
            Real::Integer(num_bigint::BigInt::from(0)),
        )),
        (Value::Rational(r), NumericKind::Rational) => Value::Rational(r.clone()),
        (Value::Rational(r), NumericKind::Float) => Value::Float(r.to_f64()),
        (Value::Rational(r), NumericKind::Complex) => Value::Complex(Complex::new(
            Real::Rational(r.clone()),
            Real::Integer(num_bigint::BigInt::from(0)),
        )),
        (Value::Float(x), NumericKind::Float) => Value::Float(*x),
        (Value::Float(x), NumericKind::Complex) => {
            Value::Complex(Complex::new(Real::Float(*x), Real::Float(0.0)))
        }
        (Value::Complex(c), NumericKind::Complex) => Value::Complex(c.clone()),
        // Demotion is never requested: target is the max of both kinds.
        _ => value.clone(),
    }
}
