//! Heap object representation.
//!
//! Provides the core `RObject` type: identity is owned by the heap, each
//! object carries its dynamic type name, a mutable field map, and a freeze
//! bit that makes every further mutation fail.

use std::collections::HashMap;

use core_types::{RubyError, RubyResult, Value};

/// A heap-allocated object with a dynamic type tag and mutable field map.
#[derive(Debug, Clone)]
pub struct RObject {
    /// Name of the object's dynamic type, resolved by the dispatch registry
    class_name: String,
    /// Named instance fields
    fields: HashMap<String, Value>,
    /// Once set, every mutating operation is rejected
    frozen: bool,
}

impl RObject {
    /// Creates an empty, unfrozen object of the given type.
    pub fn new(class_name: impl Into<String>) -> Self {
        RObject {
            class_name: class_name.into(),
            fields: HashMap::new(),
            frozen: false,
        }
    }

    /// The object's dynamic type name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Reads a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Writes a field. Frozen objects reject the write with `FrozenError`.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> RubyResult<()> {
        if self.frozen {
            return Err(RubyError::frozen_mutation(&self.class_name));
        }
        self.fields.insert(name.into(), value);
        Ok(())
    }

    /// Removes a field. Frozen objects reject the removal with `FrozenError`.
    pub fn remove(&mut self, name: &str) -> RubyResult<Option<Value>> {
        if self.frozen {
            return Err(RubyError::frozen_mutation(&self.class_name));
        }
        Ok(self.fields.remove(name))
    }

    /// Marks the object frozen. Freezing is idempotent and irreversible.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Whether the object is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Iterates over the field values, for GC marking.
    pub fn field_values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
