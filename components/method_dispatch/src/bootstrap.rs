//! Built-in type bootstrap.
//!
//! Wires the core value types into a fresh registry: the numeric hierarchy
//! delegating arithmetic to the numeric tower, nil's numeric conversions,
//! string introspection and the heap-backed object primitives.

use std::cmp::Ordering;
use std::sync::Arc;

use core_types::{ErrorKind, RubyError, RubyResult, Value};
use memory_manager::Heap;
use numeric_tower::{apply, compare, to_complex, to_float, to_rational, BinaryOp};

use crate::comparable::comparable_table;
use crate::registry::TypeRegistry;

fn first_arg<'a>(args: &'a [Value], method: &str) -> RubyResult<&'a Value> {
    args.first().ok_or_else(|| {
        RubyError::type_mismatch(format!(
            "wrong number of arguments for {} (given 0, expected 1)",
            method
        ))
    })
}

fn ordering_value(ordering: Ordering) -> Value {
    Value::integer(match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

impl TypeRegistry {
    /// Builds a registry pre-populated with the built-in types.
    pub fn with_core_types(heap: Arc<Heap>) -> Self {
        let registry = TypeRegistry::new(heap);

        let comparable =
            registry.define_capability_with_table("Comparable", comparable_table());

        let object = registry.define_type("Object", None);
        let numeric = registry.define_type("Numeric", Some(object));
        registry.include_capability(numeric, comparable);
        for name in ["Integer", "Rational", "Float", "Complex"] {
            registry.define_type(name, Some(numeric));
        }
        registry.define_type("NilClass", Some(object));
        registry.define_type("TrueClass", Some(object));
        registry.define_type("FalseClass", Some(object));
        registry.define_type("String", Some(object));

        define_object_methods(&registry, object);
        define_numeric_methods(&registry, numeric);
        define_nil_methods(&registry);
        define_string_methods(&registry);

        registry
    }
}

fn define_object_methods(registry: &TypeRegistry, object: crate::registry::TypeId) {
    let heap = Arc::clone(registry.heap());
    registry.define_method(object, "class", move |recv, _| {
        let name = match recv {
            Value::ObjectRef(id) => heap.class_of(*id)?,
            other => other.class_name().to_string(),
        };
        Ok(Value::str(&name))
    });

    let heap = Arc::clone(registry.heap());
    registry.define_method(object, "freeze", move |recv, _| {
        if let Value::ObjectRef(id) = recv {
            heap.freeze(*id)?;
        }
        Ok(recv.clone())
    });

    let heap = Arc::clone(registry.heap());
    registry.define_method(object, "frozen?", move |recv, _| {
        let frozen = match recv {
            Value::ObjectRef(id) => heap.is_frozen(*id)?,
            // Immediate values have no mutable state to thaw.
            _ => true,
        };
        Ok(Value::Bool(frozen))
    });

    registry.define_method(object, "==", |recv, args| {
        let other = first_arg(args, "==")?;
        Ok(Value::Bool(recv == other))
    });

    registry.define_method(object, "nil?", |recv, _| {
        Ok(Value::Bool(matches!(recv, Value::Nil)))
    });
}

fn define_numeric_methods(registry: &TypeRegistry, numeric: crate::registry::TypeId) {
    for (name, op) in [
        ("+", BinaryOp::Add),
        ("-", BinaryOp::Sub),
        ("*", BinaryOp::Mul),
        ("/", BinaryOp::Div),
        ("%", BinaryOp::Mod),
    ] {
        registry.define_method(numeric, name, move |recv, args| {
            let other = first_arg(args, op.method_name())?;
            apply(op, recv, other)
        });
    }

    // Ruby answers nil rather than raising when numeric operands cannot
    // be ordered, so Comparable's derived ops see the failure uniformly.
    registry.define_method(numeric, "<=>", |recv, args| {
        let other = first_arg(args, "<=>")?;
        match compare(recv, other) {
            Ok(ordering) => Ok(ordering_value(ordering)),
            Err(e) if e.kind == ErrorKind::TypeMismatch => Ok(Value::Nil),
            Err(e) => Err(e),
        }
    });

    registry.define_method(numeric, "to_r", |recv, _| to_rational(recv));
    registry.define_method(numeric, "to_c", |recv, _| to_complex(recv));
    registry.define_method(numeric, "to_f", |recv, _| to_float(recv));
}

fn define_nil_methods(registry: &TypeRegistry) {
    let nil_class = match registry.type_id("NilClass") {
        Some(id) => id,
        None => return,
    };
    registry.define_method(nil_class, "to_r", |recv, _| to_rational(recv));
    registry.define_method(nil_class, "to_c", |recv, _| to_complex(recv));
}

fn define_string_methods(registry: &TypeRegistry) {
    let string = match registry.type_id("String") {
        Some(id) => id,
        None => return,
    };
    registry.define_method(string, "length", |recv, _| match recv {
        Value::Str(s) => Ok(Value::integer(s.char_len()? as i64)),
        other => Err(RubyError::type_mismatch(format!(
            "length expects a String receiver, got {}",
            other.class_name()
        ))),
    });
    registry.define_method(string, "bytesize", |recv, _| match recv {
        Value::Str(s) => Ok(Value::integer(s.byte_len() as i64)),
        other => Err(RubyError::type_mismatch(format!(
            "bytesize expects a String receiver, got {}",
            other.class_name()
        ))),
    });
    registry.define_method(string, "encoding", |recv, _| match recv {
        Value::Str(s) => Ok(Value::str(s.encoding().name())),
        other => Err(RubyError::type_mismatch(format!(
            "encoding expects a String receiver, got {}",
            other.class_name()
        ))),
    });
}
