//! Ordered iteration over user-defined successions.
//!
//! Any type that answers `<=>` and `succ` can be traversed as a range. The
//! comparator orders the walk and decides termination; `succ` produces the
//! next element. Incomparable endpoints fail up front instead of looping.

use core_types::{RubyError, RubyResult, Value};

use crate::registry::TypeRegistry;

/// A range over dispatch-visible values, iterated through `<=>` and `succ`.
#[derive(Debug, Clone)]
pub struct CustomRange {
    start: Value,
    end: Value,
    exclusive: bool,
}

impl CustomRange {
    /// An inclusive range `start..=end`.
    pub fn inclusive(start: Value, end: Value) -> Self {
        CustomRange {
            start,
            end,
            exclusive: false,
        }
    }

    /// An end-exclusive range `start..end`.
    pub fn exclusive(start: Value, end: Value) -> Self {
        CustomRange {
            start,
            end,
            exclusive: true,
        }
    }

    /// The range start.
    pub fn start(&self) -> &Value {
        &self.start
    }

    /// The range end.
    pub fn end(&self) -> &Value {
        &self.end
    }

    /// Walks the range in comparator order, calling `f` on each element.
    ///
    /// Dispatches `<=>` to decide whether the cursor is still inside the
    /// range and `succ` to step. An empty range (start past end) visits
    /// nothing; endpoints the comparator cannot order are a `TypeMismatch`.
    pub fn each<F>(&self, registry: &TypeRegistry, mut f: F) -> RubyResult<()>
    where
        F: FnMut(&Value) -> RubyResult<()>,
    {
        use std::cmp::Ordering;

        let mut cursor = self.start.clone();
        loop {
            let ordering = registry.three_way(&cursor, &self.end)?.ok_or_else(|| {
                RubyError::type_mismatch(format!(
                    "cannot iterate from {} to {}",
                    self.start.class_name(),
                    self.end.class_name()
                ))
            })?;
            let inside = match ordering {
                Ordering::Less => true,
                Ordering::Equal => !self.exclusive,
                Ordering::Greater => false,
            };
            if !inside {
                return Ok(());
            }
            f(&cursor)?;
            if ordering == Ordering::Equal {
                // Inclusive end reached; succ past the end is never taken.
                return Ok(());
            }
            cursor = registry.call(&cursor, "succ", &[])?;
        }
    }

    /// Collects the range's elements into a vector.
    pub fn to_vec(&self, registry: &TypeRegistry) -> RubyResult<Vec<Value>> {
        let mut out = Vec::new();
        self.each(registry, |v| {
            out.push(v.clone());
            Ok(())
        })?;
        Ok(out)
    }
}
