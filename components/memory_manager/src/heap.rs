//! Object heap with identity-based access and mark/sweep collection.
//!
//! Objects are owned by the heap and addressed by [`ObjectId`]. Collection
//! marks from an explicit root set, sweeps everything unreached, and bumps
//! the process-wide cycle counter exactly once per completed cycle.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use core_types::{ObjectId, RubyError, RubyResult, Value};

use crate::gc_counter;
use crate::object::RObject;

/// The object heap.
///
/// # Examples
///
/// ```
/// use memory_manager::Heap;
/// use core_types::Value;
///
/// let heap = Heap::new();
/// let id = heap.allocate("Point");
/// heap.set_field(id, "x", Value::integer(1)).unwrap();
/// assert_eq!(heap.get_field(id, "x").unwrap(), Some(Value::integer(1)));
/// ```
#[derive(Debug, Default)]
pub struct Heap {
    objects: RwLock<HashMap<ObjectId, RObject>>,
    next_id: AtomicU64,
}

impl Heap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Heap {
            objects: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocates a fresh, unfrozen object of the given type.
    pub fn allocate(&self, class_name: &str) -> ObjectId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.objects.write().insert(id, RObject::new(class_name));
        id
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// True if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Runs a closure against the object behind `id`.
    pub fn with_object<R>(&self, id: ObjectId, f: impl FnOnce(&RObject) -> R) -> RubyResult<R> {
        let objects = self.objects.read();
        let obj = objects
            .get(&id)
            .ok_or_else(|| RubyError::type_mismatch(format!("no object with id {}", id)))?;
        Ok(f(obj))
    }

    /// Runs a closure against the object behind `id`, mutably.
    pub fn with_object_mut<R>(
        &self,
        id: ObjectId,
        f: impl FnOnce(&mut RObject) -> RubyResult<R>,
    ) -> RubyResult<R> {
        let mut objects = self.objects.write();
        let obj = objects
            .get_mut(&id)
            .ok_or_else(|| RubyError::type_mismatch(format!("no object with id {}", id)))?;
        f(obj)
    }

    /// The dynamic type name of the object behind `id`.
    pub fn class_of(&self, id: ObjectId) -> RubyResult<String> {
        self.with_object(id, |obj| obj.class_name().to_string())
    }

    /// Reads a field of the object behind `id`.
    pub fn get_field(&self, id: ObjectId, name: &str) -> RubyResult<Option<Value>> {
        self.with_object(id, |obj| obj.get(name).cloned())
    }

    /// Writes a field of the object behind `id`; frozen objects reject it.
    pub fn set_field(&self, id: ObjectId, name: &str, value: Value) -> RubyResult<()> {
        self.with_object_mut(id, |obj| obj.set(name, value))
    }

    /// Freezes the object behind `id`.
    pub fn freeze(&self, id: ObjectId) -> RubyResult<()> {
        self.with_object_mut(id, |obj| {
            obj.freeze();
            Ok(())
        })
    }

    /// Whether the object behind `id` is frozen.
    pub fn is_frozen(&self, id: ObjectId) -> RubyResult<bool> {
        self.with_object(id, |obj| obj.is_frozen())
    }

    /// Collects unreachable objects.
    ///
    /// Marks transitively from `roots` through object fields, sweeps every
    /// unmarked object, and records exactly one completed cycle on the
    /// process-wide counter. Returns the number of objects reclaimed.
    pub fn collect(&self, roots: &[ObjectId]) -> usize {
        let mut objects = self.objects.write();

        let mut marked: HashSet<ObjectId> = HashSet::new();
        let mut work: Vec<ObjectId> = roots.to_vec();
        while let Some(id) = work.pop() {
            if !marked.insert(id) {
                continue;
            }
            if let Some(obj) = objects.get(&id) {
                for value in obj.field_values() {
                    if let Value::ObjectRef(child) = value {
                        if !marked.contains(child) {
                            work.push(*child);
                        }
                    }
                }
            }
        }

        let before = objects.len();
        objects.retain(|id, _| marked.contains(id));
        let reclaimed = before - objects.len();

        // One completed cycle, counted after the sweep is done.
        gc_counter::record_cycle();
        reclaimed
    }
}
