//! Contract compliance tests for core_types
//!
//! These tests pin the invariants the other components build on: variant
//! coverage, rational normalization and the no-auto-demotion rule.

use core_types::{Complex, Rational, Real, RubyError, Value};
use num_bigint::BigInt;

mod value_contract_tests {
    use super::*;

    #[test]
    fn test_value_covers_every_kind() {
        let _: Value = Value::Nil;
        let _: Value = Value::Bool(true);
        let _: Value = Value::integer(1);
        let _: Value = Value::rational(1, 2).unwrap();
        let _: Value = Value::Float(1.0);
        let _: Value = Value::complex(1, 1);
        let _: Value = Value::str("s");
        let _: Value = Value::ObjectRef(0);
    }
}

mod rational_contract_tests {
    use super::*;

    #[test]
    fn test_always_lowest_terms() {
        let q = Rational::new(BigInt::from(6), BigInt::from(-4)).unwrap();
        assert_eq!(q.numer(), &BigInt::from(-3));
        assert_eq!(q.denom(), &BigInt::from(2));
    }

    #[test]
    fn test_denominator_is_always_positive() {
        let q = Rational::new(BigInt::from(1), BigInt::from(-7)).unwrap();
        assert!(q.denom() > &BigInt::from(0));
        assert_eq!(q.numer(), &BigInt::from(-1));
    }

    #[test]
    fn test_zero_denominator_is_rejected_at_construction() {
        let err = Rational::new(BigInt::from(1), BigInt::from(0)).unwrap_err();
        assert_eq!(err, RubyError::division_by_zero());
    }
}

mod complex_contract_tests {
    use super::*;

    #[test]
    fn test_zero_imaginary_part_is_not_demoted() {
        let c = Complex::new(Real::Integer(BigInt::from(5)), Real::Integer(BigInt::from(0)));
        assert_eq!(Value::Complex(c).class_name(), "Complex");
        assert_ne!(Value::complex(5, 0), Value::integer(5));
    }
}
