//! Numeric conversions (`to_r`, `to_c`, `to_f`).
//!
//! nil has defined, non-erroring numeric conversions: `nil.to_r` is
//! `Rational(0,1)` and `nil.to_c` is `Complex(0,0)`. Float-to-rational uses
//! the exact binary expansion of the double, never a decimal approximation.

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use core_types::{Complex, Rational, Real, RubyError, RubyResult, Value};

/// Converts a value to a Rational.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use numeric_tower::to_rational;
///
/// assert_eq!(to_rational(&Value::Nil).unwrap(), Value::rational(0, 1).unwrap());
/// assert_eq!(to_rational(&Value::Float(0.5)).unwrap(), Value::rational(1, 2).unwrap());
/// ```
pub fn to_rational(value: &Value) -> RubyResult<Value> {
    match value {
        Value::Nil => Ok(Value::Rational(Rational::zero())),
        Value::Integer(n) => Ok(Value::Rational(Rational::from_integer(n.clone()))),
        Value::Rational(r) => Ok(Value::Rational(r.clone())),
        Value::Float(x) => Ok(Value::Rational(float_to_rational(*x)?)),
        Value::Complex(c) => {
            if c.im().is_zero() {
                to_rational(&real_to_value(c.re()))
            } else {
                Err(RubyError::type_mismatch(
                    "can't convert Complex with non-zero imaginary part into Rational",
                ))
            }
        }
        other => Err(RubyError::type_mismatch(format!(
            "can't convert {} into Rational",
            other.class_name()
        ))),
    }
}

/// Converts a value to a Complex. The result is always a Complex value, even
/// for a zero imaginary part.
pub fn to_complex(value: &Value) -> RubyResult<Value> {
    match value {
        Value::Nil => Ok(Value::Complex(Complex::zero())),
        Value::Integer(n) => Ok(Value::Complex(Complex::new(
            Real::Integer(n.clone()),
            Real::Integer(BigInt::from(0)),
        ))),
        Value::Rational(r) => Ok(Value::Complex(Complex::new(
            Real::Rational(r.clone()),
            Real::Integer(BigInt::from(0)),
        ))),
        Value::Float(x) => Ok(Value::Complex(Complex::new(
            Real::Float(*x),
            Real::Integer(BigInt::from(0)),
        ))),
        Value::Complex(c) => Ok(Value::Complex(c.clone())),
        other => Err(RubyError::type_mismatch(format!(
            "can't convert {} into Complex",
            other.class_name()
        ))),
    }
}

/// Converts a numeric value to a Float.
pub fn to_float(value: &Value) -> RubyResult<Value> {
    match value {
        Value::Nil => Ok(Value::Float(0.0)),
        Value::Integer(n) => Ok(Value::Float(n.to_f64().unwrap_or(f64::NAN))),
        Value::Rational(r) => Ok(Value::Float(r.to_f64())),
        Value::Float(x) => Ok(Value::Float(*x)),
        other => Err(RubyError::type_mismatch(format!(
            "can't convert {} into Float",
            other.class_name()
        ))),
    }
}

fn real_to_value(r: &Real) -> Value {
    match r {
        Real::Integer(n) => Value::Integer(n.clone()),
        Real::Rational(q) => Value::Rational(q.clone()),
        Real::Float(x) => Value::Float(*x),
    }
}

/// Exact rational expansion of a finite double.
///
/// Decomposes the IEEE-754 bit pattern into mantissa and exponent, so the
/// result is the precise binary value, e.g. `0.1` becomes
/// `3602879701896397/36028797018963968`.
fn float_to_rational(x: f64) -> RubyResult<Rational> {
    if x.is_nan() {
        return Err(RubyError::type_mismatch("NaN can't be converted into Rational"));
    }
    if x.is_infinite() {
        return Err(RubyError::type_mismatch(
            "Infinity can't be converted into Rational",
        ));
    }

    let bits = x.to_bits();
    let sign_negative = bits >> 63 == 1;
    let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mantissa, exponent) = if biased_exponent == 0 {
        // subnormal
        (fraction, -1074i64)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    let mut numer = BigInt::from(mantissa);
    let mut denom = BigInt::one();
    if exponent >= 0 {
        numer <<= exponent as usize;
    } else {
        denom <<= (-exponent) as usize;
    }
    if sign_negative {
        numer = -numer;
    }
    Rational::new(numer, denom)
}
