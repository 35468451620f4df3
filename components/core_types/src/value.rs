//! Runtime value representation using a tagged enum.
//!
//! This module provides the core `Value` enum representing every value the
//! evaluation core manipulates, together with the exact numeric payloads
//! (`Rational`, `Complex`) whose invariants live with their constructors.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;

use crate::error::{RubyError, RubyResult};
use crate::string::RString;

/// Identity of a heap-allocated object, assigned by the object heap.
pub type ObjectId = u64;

/// An exact rational number, always in lowest terms with positive denominator.
///
/// The reduction invariant is enforced at construction and maintained by
/// every arithmetic helper; there is no way to observe an unreduced value.
///
/// # Examples
///
/// ```
/// use core_types::Rational;
/// use num_bigint::BigInt;
///
/// let r = Rational::new(BigInt::from(4), BigInt::from(-6)).unwrap();
/// assert_eq!(r.numer(), &BigInt::from(-2));
/// assert_eq!(r.denom(), &BigInt::from(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Creates a rational, reducing to lowest terms and normalizing the sign
    /// onto the numerator. A zero denominator is a `ZeroDivisionError`.
    pub fn new(numer: BigInt, denom: BigInt) -> RubyResult<Self> {
        if denom.is_zero() {
            return Err(RubyError::division_by_zero());
        }
        let g = numer.gcd(&denom);
        let (mut n, mut d) = if g.is_zero() {
            // numer == 0, denom != 0
            (BigInt::zero(), BigInt::from(1))
        } else {
            (&numer / &g, &denom / &g)
        };
        if d.is_negative() {
            n = -n;
            d = -d;
        }
        Ok(Rational { numer: n, denom: d })
    }

    /// The rational `n/1`.
    pub fn from_integer(n: BigInt) -> Self {
        Rational {
            numer: n,
            denom: BigInt::from(1),
        }
    }

    /// The rational `0/1`.
    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    /// Numerator, carrying the sign.
    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    /// Denominator, always positive.
    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// True if this rational is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// True if the denominator is one.
    pub fn is_integral(&self) -> bool {
        self.denom == BigInt::from(1)
    }

    /// Sum, in lowest terms.
    pub fn add(&self, other: &Rational) -> Rational {
        let numer = &self.numer * &other.denom + &other.numer * &self.denom;
        let denom = &self.denom * &other.denom;
        // denominators are positive and nonzero, so new() cannot fail
        Rational::new(numer, denom).unwrap_or_else(|_| unreachable!())
    }

    /// Difference, in lowest terms.
    pub fn sub(&self, other: &Rational) -> Rational {
        self.add(&other.neg())
    }

    /// Product, in lowest terms.
    pub fn mul(&self, other: &Rational) -> Rational {
        let numer = &self.numer * &other.numer;
        let denom = &self.denom * &other.denom;
        Rational::new(numer, denom).unwrap_or_else(|_| unreachable!())
    }

    /// Exact quotient; dividing by zero is a `ZeroDivisionError`.
    pub fn checked_div(&self, other: &Rational) -> RubyResult<Rational> {
        if other.is_zero() {
            return Err(RubyError::division_by_zero());
        }
        let numer = &self.numer * &other.denom;
        let denom = &self.denom * &other.numer;
        Rational::new(numer, denom)
    }

    /// Negation.
    pub fn neg(&self) -> Rational {
        Rational {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }

    /// Largest integer not greater than this rational.
    pub fn floor(&self) -> BigInt {
        self.numer.div_floor(&self.denom)
    }

    /// Nearest double-precision approximation.
    pub fn to_f64(&self) -> f64 {
        let n = self.numer.to_f64().unwrap_or(f64::NAN);
        let d = self.denom.to_f64().unwrap_or(f64::NAN);
        n / d
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Denominators are positive, so cross-multiplication preserves order.
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

/// A real numeric component of a complex number.
#[derive(Debug, Clone, PartialEq)]
pub enum Real {
    /// Arbitrary-precision integer component
    Integer(BigInt),
    /// Exact rational component
    Rational(Rational),
    /// Double-precision component
    Float(f64),
}

impl Real {
    /// True if this component is exactly (or IEEE-) zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Real::Integer(n) => n.is_zero(),
            Real::Rational(r) => r.is_zero(),
            Real::Float(x) => *x == 0.0,
        }
    }

    /// Nearest double-precision approximation.
    pub fn to_f64(&self) -> f64 {
        match self {
            Real::Integer(n) => n.to_f64().unwrap_or(f64::NAN),
            Real::Rational(r) => r.to_f64(),
            Real::Float(x) => *x,
        }
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Real::Integer(n) => write!(f, "{}", n),
            Real::Rational(r) => write!(f, "{}", r),
            Real::Float(x) => write!(f, "{}", x),
        }
    }
}

/// A complex number with real and imaginary components.
///
/// A complex value with a zero imaginary part is never demoted to its real
/// component: `Complex(0,0)` stays a Complex and is not `==` to `Integer(0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Complex {
    re: Real,
    im: Real,
}

impl Complex {
    /// Creates a complex number from two real components.
    pub fn new(re: Real, im: Real) -> Self {
        Complex { re, im }
    }

    /// The complex zero `(0+0i)` with exact integer components.
    pub fn zero() -> Self {
        Complex {
            re: Real::Integer(BigInt::zero()),
            im: Real::Integer(BigInt::zero()),
        }
    }

    /// Real component.
    pub fn re(&self) -> &Real {
        &self.re
    }

    /// Imaginary component.
    pub fn im(&self) -> &Real {
        &self.im
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}+{}i)", self.re, self.im)
    }
}

/// Represents any runtime value.
///
/// Primitive and numeric values are stored inline; heap objects are
/// referenced by identity and resolved through the object heap.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let n = Value::integer(42);
/// assert!(n.is_truthy());
/// assert_eq!(n.class_name(), "Integer");
/// assert!(!Value::Nil.is_truthy());
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// The nil singleton
    Nil,
    /// true or false
    Bool(bool),
    /// Arbitrary-precision integer
    Integer(BigInt),
    /// Exact rational, always reduced
    Rational(Rational),
    /// IEEE 754 double-precision float
    Float(f64),
    /// Complex number, never auto-demoted
    Complex(Complex),
    /// Encoding-tagged byte string
    Str(RString),
    /// Heap object referenced by identity
    ObjectRef(ObjectId),
}

impl Value {
    /// Integer value from a machine word.
    pub fn integer(n: i64) -> Value {
        Value::Integer(BigInt::from(n))
    }

    /// Reduced rational value; fails on a zero denominator.
    pub fn rational(numer: i64, denom: i64) -> RubyResult<Value> {
        Ok(Value::Rational(Rational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )?))
    }

    /// Complex value with integer components.
    pub fn complex(re: i64, im: i64) -> Value {
        Value::Complex(Complex::new(
            Real::Integer(BigInt::from(re)),
            Real::Integer(BigInt::from(im)),
        ))
    }

    /// UTF-8 string value.
    pub fn str(s: &str) -> Value {
        Value::Str(RString::from_str(s))
    }

    /// Ruby truthiness: everything except nil and false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// The built-in type name this value dispatches through.
    ///
    /// `ObjectRef` values carry their dynamic type in the heap; this returns
    /// the generic name used when the heap is not consulted.
    pub fn class_name(&self) -> &'static str {
        match self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Integer(_) => "Integer",
            Value::Rational(_) => "Rational",
            Value::Float(_) => "Float",
            Value::Complex(_) => "Complex",
            Value::Str(_) => "String",
            Value::ObjectRef(_) => "Object",
        }
    }
}

impl PartialEq for Value {
    /// Structural equality by kind. No cross-kind auto-equality: a Complex
    /// with zero imaginary part is not equal to a bare Integer.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Rational(a), Value::Rational(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::ObjectRef(a), Value::ObjectRef(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Rational(r) => write!(f, "{}", r),
            Value::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() && x.abs() < 1e15 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Complex(c) => write!(f, "{}", c),
            Value::Str(s) => match std::str::from_utf8(s.as_bytes()) {
                Ok(text) => write!(f, "\"{}\"", text),
                Err(_) => write!(f, "{:?}", s.as_bytes()),
            },
            Value::ObjectRef(id) => write!(f, "#<Object:{}>", id),
        }
    }
}
