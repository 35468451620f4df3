//! Arithmetic dispatch over the numeric tower.
//!
//! Binary operations promote both operands to their common kind, then apply
//! the operation in that kind's native arithmetic. Exact kinds (Integer,
//! Rational) signal `ZeroDivisionError` on division by zero; Float follows
//! IEEE-754 and produces infinities or NaN instead.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::Zero;
use std::cmp::Ordering;

use core_types::{Complex, Rational, Real, RubyError, RubyResult, Value};

use crate::coerce::coerce;

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division (floor division on Integer)
    Div,
    /// Modulo (sign follows the divisor, as on the original runtime)
    Mod,
}

impl BinaryOp {
    /// The operator's method name in user code.
    pub fn method_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// Applies `op` to two numeric values, coercing to the common kind first.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use numeric_tower::{apply, BinaryOp};
///
/// let sum = apply(BinaryOp::Add, &Value::integer(1), &Value::rational(1, 2).unwrap()).unwrap();
/// assert_eq!(sum, Value::rational(3, 2).unwrap());
/// ```
pub fn apply(op: BinaryOp, a: &Value, b: &Value) -> RubyResult<Value> {
    let (pa, pb) = coerce(a, b)?;
    match (pa, pb) {
        (Value::Integer(x), Value::Integer(y)) => integer_op(op, &x, &y),
        (Value::Rational(x), Value::Rational(y)) => rational_op(op, &x, &y),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(float_op(op, x, y))),
        (Value::Complex(x), Value::Complex(y)) => complex_op(op, &x, &y),
        // coerce returns matching kinds
        _ => unreachable!("coerce returned mismatched kinds"),
    }
}

/// Three-way comparison over the ordered numeric kinds.
///
/// Complex values are unordered and NaN comparisons fail, both with a
/// `TypeError`-class error (mirroring a failed `<=>`).
pub fn compare(a: &Value, b: &Value) -> RubyResult<Ordering> {
    let (pa, pb) = coerce(a, b)?;
    match (pa, pb) {
        (Value::Integer(x), Value::Integer(y)) => Ok(x.cmp(&y)),
        (Value::Rational(x), Value::Rational(y)) => Ok(x.cmp(&y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(&y).ok_or_else(|| {
            RubyError::type_mismatch("comparison of Float with Float failed (NaN)")
        }),
        (Value::Complex(_), Value::Complex(_)) => {
            Err(RubyError::type_mismatch("Complex values are not ordered"))
        }
        _ => unreachable!("coerce returned mismatched kinds"),
    }
}

fn integer_op(op: BinaryOp, x: &BigInt, y: &BigInt) -> RubyResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::Integer(x + y)),
        BinaryOp::Sub => Ok(Value::Integer(x - y)),
        BinaryOp::Mul => Ok(Value::Integer(x * y)),
        BinaryOp::Div => {
            if y.is_zero() {
                Err(RubyError::division_by_zero())
            } else {
                // Floor division: -7 / 2 == -4
                Ok(Value::Integer(x.div_floor(y)))
            }
        }
        BinaryOp::Mod => {
            if y.is_zero() {
                Err(RubyError::division_by_zero())
            } else {
                Ok(Value::Integer(x.mod_floor(y)))
            }
        }
    }
}

fn rational_op(op: BinaryOp, x: &Rational, y: &Rational) -> RubyResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::Rational(x.add(y))),
        BinaryOp::Sub => Ok(Value::Rational(x.sub(y))),
        BinaryOp::Mul => Ok(Value::Rational(x.mul(y))),
        BinaryOp::Div => Ok(Value::Rational(x.checked_div(y)?)),
        BinaryOp::Mod => {
            let quotient = x.checked_div(y)?;
            let whole = Rational::from_integer(quotient.floor());
            Ok(Value::Rational(x.sub(&y.mul(&whole))))
        }
    }
}

fn float_op(op: BinaryOp, x: f64, y: f64) -> f64 {
    match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        // IEEE semantics: 1.0/0.0 == inf, 0.0/0.0 == NaN, no error
        BinaryOp::Div => x / y,
        BinaryOp::Mod => x - y * (x / y).floor(),
    }
}

fn complex_op(op: BinaryOp, x: &Complex, y: &Complex) -> RubyResult<Value> {
    let (a, b) = (x.re(), x.im());
    let (c, d) = (y.re(), y.im());
    match op {
        BinaryOp::Add => Ok(Value::Complex(Complex::new(
            real_add(a, c),
            real_add(b, d),
        ))),
        BinaryOp::Sub => Ok(Value::Complex(Complex::new(
            real_sub(a, c),
            real_sub(b, d),
        ))),
        BinaryOp::Mul => {
            let re = real_sub(&real_mul(a, c), &real_mul(b, d));
            let im = real_add(&real_mul(a, d), &real_mul(b, c));
            Ok(Value::Complex(Complex::new(re, im)))
        }
        BinaryOp::Div => {
            let norm = real_add(&real_mul(c, c), &real_mul(d, d));
            let re = real_div(&real_add(&real_mul(a, c), &real_mul(b, d)), &norm)?;
            let im = real_div(&real_sub(&real_mul(b, c), &real_mul(a, d)), &norm)?;
            Ok(Value::Complex(Complex::new(re, im)))
        }
        BinaryOp::Mod => Err(RubyError::type_mismatch(
            "Complex does not support the % operation",
        )),
    }
}

// Real-component arithmetic for Complex. Components promote among the real
// kinds only: Integer < Rational < Float.

fn real_pair(a: &Real, b: &Real) -> (Real, Real) {
    match (a, b) {
        (Real::Float(_), _) | (_, Real::Float(_)) => {
            (Real::Float(a.to_f64()), Real::Float(b.to_f64()))
        }
        (Real::Rational(_), _) | (_, Real::Rational(_)) => {
            (Real::Rational(real_to_rational(a)), Real::Rational(real_to_rational(b)))
        }
        (Real::Integer(x), Real::Integer(y)) => (Real::Integer(x.clone()), Real::Integer(y.clone())),
    }
}

fn real_to_rational(r: &Real) -> Rational {
    match r {
        Real::Integer(n) => Rational::from_integer(n.clone()),
        Real::Rational(q) => q.clone(),
        // callers promote floats before reaching here
        Real::Float(_) => unreachable!("float component in exact context"),
    }
}

/// Demotes an integral rational component back to an integer component.
/// This is within the Real kinds and never demotes a Complex to a real.
fn tidy(r: Rational) -> Real {
    if r.is_integral() {
        Real::Integer(r.numer().clone())
    } else {
        Real::Rational(r)
    }
}

fn real_add(a: &Real, b: &Real) -> Real {
    match real_pair(a, b) {
        (Real::Integer(x), Real::Integer(y)) => Real::Integer(x + y),
        (Real::Rational(x), Real::Rational(y)) => tidy(x.add(&y)),
        (Real::Float(x), Real::Float(y)) => Real::Float(x + y),
        _ => unreachable!(),
    }
}

fn real_sub(a: &Real, b: &Real) -> Real {
    match real_pair(a, b) {
        (Real::Integer(x), Real::Integer(y)) => Real::Integer(x - y),
        (Real::Rational(x), Real::Rational(y)) => tidy(x.sub(&y)),
        (Real::Float(x), Real::Float(y)) => Real::Float(x - y),
        _ => unreachable!(),
    }
}

fn real_mul(a: &Real, b: &Real) -> Real {
    match real_pair(a, b) {
        (Real::Integer(x), Real::Integer(y)) => Real::Integer(x * y),
        (Real::Rational(x), Real::Rational(y)) => tidy(x.mul(&y)),
        (Real::Float(x), Real::Float(y)) => Real::Float(x * y),
        _ => unreachable!(),
    }
}

fn real_div(a: &Real, b: &Real) -> RubyResult<Real> {
    match real_pair(a, b) {
        (Real::Integer(x), Real::Integer(y)) => {
            if y.is_zero() {
                return Err(RubyError::division_by_zero());
            }
            Ok(tidy(Rational::new(x, y)?))
        }
        (Real::Rational(x), Real::Rational(y)) => Ok(tidy(x.checked_div(&y)?)),
        (Real::Float(x), Real::Float(y)) => Ok(Real::Float(x / y)),
        _ => unreachable!(),
    }
}
