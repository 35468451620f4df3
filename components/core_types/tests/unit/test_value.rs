//! Unit tests for the Value enum and its numeric payloads.

use core_types::Value;

mod value_creation_tests {
    use super::*;

    #[test]
    fn test_value_nil() {
        let val = Value::Nil;
        assert!(matches!(val, Value::Nil));
    }

    #[test]
    fn test_value_bool() {
        assert!(matches!(Value::Bool(true), Value::Bool(true)));
        assert!(matches!(Value::Bool(false), Value::Bool(false)));
    }

    #[test]
    fn test_value_integer_helper() {
        let val = Value::integer(42);
        assert!(matches!(val, Value::Integer(_)));
    }

    #[test]
    fn test_value_rational_helper_reduces() {
        let val = Value::rational(2, 4).unwrap();
        assert_eq!(val, Value::rational(1, 2).unwrap());
    }

    #[test]
    fn test_value_complex_helper() {
        let val = Value::complex(3, -4);
        assert!(matches!(val, Value::Complex(_)));
    }

    #[test]
    fn test_value_str_helper() {
        let val = Value::str("hello");
        assert!(matches!(val, Value::Str(_)));
    }
}

mod truthiness_tests {
    use super::*;

    #[test]
    fn test_nil_and_false_are_falsy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
    }

    #[test]
    fn test_everything_else_is_truthy() {
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::integer(0).is_truthy());
        assert!(Value::Float(0.0).is_truthy());
        assert!(Value::str("").is_truthy());
        assert!(Value::rational(0, 1).unwrap().is_truthy());
    }
}

mod class_name_tests {
    use super::*;

    #[test]
    fn test_class_names_match_the_builtin_types() {
        assert_eq!(Value::Nil.class_name(), "NilClass");
        assert_eq!(Value::Bool(true).class_name(), "TrueClass");
        assert_eq!(Value::Bool(false).class_name(), "FalseClass");
        assert_eq!(Value::integer(1).class_name(), "Integer");
        assert_eq!(Value::rational(1, 2).unwrap().class_name(), "Rational");
        assert_eq!(Value::Float(1.5).class_name(), "Float");
        assert_eq!(Value::complex(0, 1).class_name(), "Complex");
        assert_eq!(Value::str("x").class_name(), "String");
        assert_eq!(Value::ObjectRef(7).class_name(), "Object");
    }
}

mod equality_tests {
    use super::*;

    #[test]
    fn test_equality_is_structural_within_a_kind() {
        assert_eq!(Value::integer(5), Value::integer(5));
        assert_ne!(Value::integer(5), Value::integer(6));
        assert_eq!(Value::str("a"), Value::str("a"));
    }

    #[test]
    fn test_no_cross_kind_equality() {
        assert_ne!(Value::integer(0), Value::Float(0.0));
        assert_ne!(Value::integer(1), Value::rational(1, 1).unwrap());
        assert_ne!(Value::complex(0, 0), Value::integer(0));
        assert_ne!(Value::Nil, Value::Bool(false));
    }
}
